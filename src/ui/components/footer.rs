//! Footer component renderer.
//!
//! This module renders the footer help bar with centered keybinding hints.

use crate::ui::helpers::{centered, position_cursor};
use crate::ui::theme::Palette;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer help bar at the specified row.
///
/// Displays keybinding hints centered horizontally with dimmed styling,
/// truncated on narrow panes. When offline, a marker is prepended.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_footer(row: usize, footer: &FooterInfo, online: bool, palette: &Palette, cols: usize) -> usize {
    let help_text = if online {
        footer.keybindings.clone()
    } else {
        format!("⚠ offline  {}", footer.keybindings)
    };

    position_cursor(row, 1);
    print!("{}", Palette::fg(&palette.colors.text_dim));
    print!("{}", centered(&help_text, cols));
    print!("{}", Palette::reset());
    row + 1
}
