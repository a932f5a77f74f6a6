//! Toast stack renderer.
//!
//! Toasts stack downwards in the top-right corner of the body, newest last.

use crate::notifications::Severity;
use crate::ui::helpers::{padded, position_cursor, truncate, width};
use crate::ui::theme::Palette;
use crate::ui::viewmodel::ToastInfo;

const MAX_WIDTH: usize = 40;

fn severity_color(palette: &Palette, severity: Severity) -> &str {
    match severity {
        Severity::Success => &palette.colors.success,
        Severity::Error => &palette.colors.error,
        Severity::Warning => &palette.colors.warning,
        Severity::Info => &palette.colors.info,
    }
}

/// Renders `toasts` starting at `row`, right-aligned.
///
/// # Returns
///
/// The row after the last toast.
pub fn render_toasts(row: usize, toasts: &[ToastInfo], palette: &Palette, cols: usize) -> usize {
    let box_width = MAX_WIDTH.min(cols.saturating_sub(2));
    if box_width < 8 {
        return row;
    }
    let left = cols.saturating_sub(box_width + 1) + 1;

    let mut current = row;
    for toast in toasts {
        let color = severity_color(palette, toast.severity);
        let message = truncate(&toast.message, box_width.saturating_sub(width(toast.icon) + 3));

        position_cursor(current, left);
        print!("{}", Palette::bg(&palette.colors.surface));
        print!("{}{}", Palette::fg(color), Palette::bold());
        print!(" {} ", toast.icon);
        print!("{}", Palette::reset());
        print!("{}", Palette::bg(&palette.colors.surface));
        print!("{}", Palette::fg(&palette.colors.text_normal));
        print!("{}", padded(&message, box_width.saturating_sub(width(toast.icon) + 2)));
        print!("{}", Palette::reset());
        current += 1;
    }
    current
}
