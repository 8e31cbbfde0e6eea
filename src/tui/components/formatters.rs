// Text formatters
//
// Shared formatting utilities for cell and status text.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format a rating average for display
///
/// Whole numbers keep one decimal so "7" reads as a rating, not a count.
///
/// # Examples
/// ```ignore
/// assert_eq!(format_rating(7.0), "7.0");
/// assert_eq!(format_rating(8.45), "8.45");
/// ```
pub fn format_rating(average: f64) -> String {
    if average.fract() == 0.0 && average.is_finite() {
        format!("{:.1}", average)
    } else {
        average.to_string()
    }
}

/// Join genres the way the cell shows them
pub fn format_genres(genres: &[String]) -> String {
    genres.join(", ")
}

/// Truncate `text` to `max_width` display columns, adding `…` when cut
///
/// Uses unicode display width (not byte length) so CJK titles line up.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let target_width = max_width.saturating_sub(1);
    let mut current_width = 0;
    let mut truncate_at = 0;
    for (i, c) in text.char_indices() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > target_width {
            break;
        }
        current_width += char_width;
        truncate_at = i + c.len_utf8();
    }

    let mut out = text[..truncate_at].to_string();
    if max_width > 0 {
        out.push('…');
    }
    out
}

/// Format a byte count compactly with K/M suffixes
pub fn format_bytes(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{}K", n / 1_000)
    } else {
        format!("{}B", n)
    }
}
