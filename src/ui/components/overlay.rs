//! Overlay renderer: dropdown menus and the add-profile modal.
//!
//! Overlays are drawn last, as a bordered box centred over the body.

use super::body::{render_form, Area};
use crate::ui::helpers::{padded, position_cursor, truncate};
use crate::ui::theme::Palette;
use crate::ui::viewmodel::{MenuEntry, OverlayInfo};

const MENU_WIDTH: usize = 32;
const MODAL_WIDTH: usize = 56;

fn frame(top: usize, height: usize, left: usize, inner: usize, palette: &Palette) {
    let border = Palette::fg(&palette.colors.border);
    let fill = Palette::bg(&palette.colors.surface);

    position_cursor(top, left);
    print!("{fill}{border}┌{}┐{}", "─".repeat(inner), Palette::reset());
    for row in top + 1..top + height - 1 {
        position_cursor(row, left);
        print!("{fill}{border}│{}│{}", " ".repeat(inner), Palette::reset());
    }
    position_cursor(top + height - 1, left);
    print!("{fill}{border}└{}┘{}", "─".repeat(inner), Palette::reset());
}

fn entry_line(row: usize, col: usize, entry: &MenuEntry, palette: &Palette, inner: usize) {
    let marker = if entry.active { "●" } else { " " };
    let text = truncate(&format!(" {marker} {}", entry.label), inner);

    position_cursor(row, col);
    if entry.selected {
        print!("{}", Palette::fg(&palette.colors.selection_fg));
        print!("{}", Palette::bg(&palette.colors.selection_bg));
    } else {
        print!("{}", Palette::bg(&palette.colors.surface));
        print!("{}", Palette::fg(&palette.colors.text_normal));
    }
    print!("{}", padded(&text, inner));
    print!("{}", Palette::reset());
}

/// Renders `overlay` inside the body rows `first_row..=last_row`.
pub fn render_overlay(overlay: &OverlayInfo, first_row: usize, last_row: usize, palette: &Palette, cols: usize) {
    let available = last_row.saturating_sub(first_row) + 1;

    match overlay {
        OverlayInfo::Menu { title, entries } => {
            let inner = MENU_WIDTH.min(cols.saturating_sub(4));
            let height = (entries.len() + 3).min(available);
            if height < 3 || inner < 4 {
                return;
            }
            let left = cols.saturating_sub(inner + 2) / 2 + 1;
            frame(first_row, height, left, inner, palette);

            position_cursor(first_row + 1, left + 1);
            print!("{}", Palette::bg(&palette.colors.surface));
            print!("{}{}", Palette::bold(), Palette::fg(&palette.colors.header_fg));
            print!("{}", padded(&truncate(&format!(" {title}"), inner), inner));
            print!("{}", Palette::reset());

            for (i, entry) in entries.iter().take(height - 3).enumerate() {
                entry_line(first_row + 2 + i, left + 1, entry, palette, inner);
            }
        }
        OverlayInfo::Modal { form } => {
            let inner = MODAL_WIDTH.min(cols.saturating_sub(4));
            if available < 3 || inner < 8 {
                return;
            }
            let left = cols.saturating_sub(inner + 2) / 2 + 1;
            frame(first_row, available, left, inner, palette);

            let area = Area {
                first_row: first_row + 1,
                last_row: last_row.saturating_sub(1),
                left,
                cols: inner,
            };
            print!("{}", Palette::bg(&palette.colors.surface));
            render_form(&area, area.first_row, form, palette);
            print!("{}", Palette::reset());
        }
    }
}
