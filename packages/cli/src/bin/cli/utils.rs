// ABOUTME: Formatting helpers shared by the CLI commands
// ABOUTME: Table construction, date formatting and text truncation

use chrono::{DateTime, Local, Utc};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};

pub fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
}

pub fn format_datetime(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format("%-m/%-d/%Y %H:%M")
        .to_string()
}

/// Shorten `s` to at most `max_len` characters, marking the cut with "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
