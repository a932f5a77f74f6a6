//! Shared rendering utilities and helpers.
//!
//! Low-level text utilities used across the UI components: cursor placement,
//! width-aware truncation and padding, and fuzzy match highlighting. All
//! widths are counted in characters, never bytes.
//!
//! # Example
//!
//! ```rust
//! use companyplus::ui::helpers::{centered, truncate};
//!
//! assert_eq!(truncate("Psychological Thriller", 10), "Psycholog…");
//! assert_eq!(centered("ok", 6), "  ok  ");
//! ```

use crate::ui::theme::Palette;

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Character count of `text`.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` characters, ending with `…` when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// `text` truncated to `cols` and padded on both sides to fill it. Odd
/// padding goes to the right.
#[must_use]
pub fn centered(text: &str, cols: usize) -> String {
    let text = truncate(text, cols);
    let left = (cols - width(&text)) / 2;
    let right = cols - width(&text) - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// `text` truncated to `cols` and padded on the right to fill it.
#[must_use]
pub fn padded(text: &str, cols: usize) -> String {
    let text = truncate(text, cols);
    let fill = cols - width(&text);
    format!("{}{}", text, " ".repeat(fill))
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// Ranges are `(start, end)` character indices with exclusive end. When the
/// item is selected, match highlighting is skipped so it does not fight the
/// selection colours.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    palette: &Palette,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Palette::fg(&palette.colors.accent_fg));
        print!("{}", Palette::bg(&palette.colors.accent));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Palette::reset());
        print!("{}", Palette::fg(&palette.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Niños", 5), "Niños");
        assert_eq!(truncate("Niños", 4), "Niñ…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn centered_fills_width() {
        assert_eq!(width(&centered("abc", 8)), 8);
        assert_eq!(centered("abc", 8), "  abc   ");
        assert_eq!(centered("toolong", 4), "too…");
    }

    #[test]
    fn padded_fills_width() {
        assert_eq!(padded("ab", 4), "ab  ");
        assert_eq!(padded("abcdef", 3), "ab…");
    }
}
