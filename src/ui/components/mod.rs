//! Composable UI component renderers.
//!
//! Each component prints one part of the pane and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Address bar, navigation header and the title line
//! - [`body`]: One renderer per view body
//! - [`particles`]: Decorative background dots
//! - [`toasts`]: Notification stack
//! - [`overlay`]: Dropdown menus and the add-profile modal
//! - [`footer`]: Keybinding hints and the offline marker
//!
//! # Layout
//!
//! ```text
//! [Address bar]
//! [Header | title line]
//! [Border]
//! [blank]
//! [Body, particles behind it, toasts and overlay above it]
//! [Border]
//! [Footer]
//! ```

mod body;
mod footer;
mod header;
mod overlay;
mod particles;
mod toasts;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Palette;
use crate::ui::viewmodel::UIViewModel;

use body::{render_body, Area};
use footer::render_footer;
use header::{render_address_bar, render_header, render_title_line};
use overlay::render_overlay;
use particles::render_particles;
use toasts::render_toasts;

/// First body row.
const BODY_TOP: usize = 5;

/// Renders a horizontal border line at `row`.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Palette::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Palette::reset());
    row + 1
}

/// Renders the whole pane for `vm`.
///
/// Panes shorter than the chrome only get the address bar and header.
pub fn render_layout(vm: &UIViewModel, palette: &Palette, rows: usize, cols: usize) {
    let mut current_row = render_address_bar(1, &vm.address_bar, palette, cols);
    current_row = match &vm.header {
        Some(header) => render_header(current_row, header, palette, cols),
        None => render_title_line(current_row, &vm.title, palette, cols),
    };
    render_border(current_row, &palette.colors.border, cols);

    let footer_row = rows;
    let border_row = rows.saturating_sub(1);
    let last_body_row = rows.saturating_sub(2);
    if last_body_row < BODY_TOP {
        return;
    }

    render_particles(BODY_TOP, &vm.particles, cols);

    let area = Area {
        first_row: BODY_TOP,
        last_row: last_body_row,
        left: 0,
        cols,
    };
    render_body(&area, &vm.body, palette);

    render_toasts(BODY_TOP - 1, &vm.toasts, palette, cols);

    if let Some(overlay) = &vm.overlay {
        render_overlay(overlay, BODY_TOP, last_body_row, palette, cols);
    }

    render_border(border_row, &palette.colors.border, cols);
    render_footer(footer_row, &vm.footer, vm.online, palette, cols);
}
