//! Item text parsing for the bulk-load editor and the single-item field.

/// Trim a single entry.  Returns `None` when nothing is left.
pub fn normalize_item(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split newline-delimited text into items, trimming each line and
/// discarding blank ones.  `\r\n` line endings are handled by the trim.
pub fn parse_bulk(text: &str) -> Vec<String> {
    text.lines().filter_map(normalize_item).collect()
}
