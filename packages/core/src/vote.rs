// ABOUTME: Vote toggle state machine
// ABOUTME: Maps a user's prior vote and the requested vote to the next state and action

use crate::types::{VoteAction, VoteType};

/// Outcome of applying one toggle request to a user's vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTransition {
    pub next: Option<VoteType>,
    pub action: VoteAction,
}

/// Apply a toggle request to the prior vote of one user on one feature.
///
/// Requesting the vote already held clears it, requesting the opposite vote
/// flips it, and requesting any vote with none held records it.
pub fn apply_toggle(prior: Option<VoteType>, requested: VoteType) -> VoteTransition {
    match prior {
        None => VoteTransition {
            next: Some(requested),
            action: VoteAction::Added,
        },
        Some(current) if current == requested => VoteTransition {
            next: None,
            action: VoteAction::Removed,
        },
        Some(_) => VoteTransition {
            next: Some(requested),
            action: VoteAction::Changed,
        },
    }
}
