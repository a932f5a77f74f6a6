//! Address bar and header renderers.
//!
//! The address bar stands in for the browser location: it shows the current
//! fragment, or the buffer while the user types a new one. The header holds
//! the brand, the navigation links with their shortcuts and the account area.

use crate::ui::helpers::{centered, padded, position_cursor, truncate, width};
use crate::ui::theme::Palette;
use crate::ui::viewmodel::{AddressBarInfo, HeaderInfo, NavLink};

/// Renders the address bar at `row`.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_address_bar(row: usize, bar: &AddressBarInfo, palette: &Palette, cols: usize) -> usize {
    let prompt = format!(" {}: ", bar.prompt);
    let cursor = if bar.editing { "▏" } else { "" };

    position_cursor(row, 1);
    print!("{}", Palette::fg(&palette.colors.text_dim));
    print!("{prompt}");
    if bar.editing {
        print!("{}", Palette::fg(&palette.colors.accent));
    } else {
        print!("{}", Palette::fg(&palette.colors.text_normal));
    }
    let text = format!("{}{cursor}", bar.text);
    print!("{}", padded(&text, cols.saturating_sub(width(&prompt))));
    print!("{}", Palette::reset());
    row + 1
}

fn link_text(link: &NavLink) -> String {
    link.hotkey
        .map_or_else(|| link.label.clone(), |key| format!("{} [{key}]", link.label))
}

/// Renders the header bar at `row`.
///
/// Layout:
///
/// ```text
/// BRAND  Home [H]  Support [S] ...            Sign In [L]  Sign Up [R]  Español · Dark
/// ```
///
/// When `collapsed`, the links are replaced by a menu hint.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_header(row: usize, header: &HeaderInfo, palette: &Palette, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Palette::bg(&palette.colors.surface));
    print!("{}{}", Palette::bold(), Palette::fg(&palette.colors.accent));
    print!(" {} ", header.brand);
    print!("{}", Palette::reset());
    print!("{}", Palette::bg(&palette.colors.surface));

    let mut used = width(&header.brand) + 2;

    if header.collapsed {
        let hint = " ☰ [m] ";
        print!("{}{hint}", Palette::fg(&palette.colors.header_fg));
        used += width(hint);
    } else {
        for link in &header.links {
            let text = format!(" {} ", link_text(link));
            if link.active {
                print!("{}{}", Palette::bold(), Palette::fg(&palette.colors.accent));
            } else {
                print!("{}", Palette::fg(&palette.colors.header_fg));
            }
            print!("{text}");
            print!("{}{}", Palette::reset(), Palette::bg(&palette.colors.surface));
            used += width(&text);
        }
    }

    let account: Vec<String> = header.account.iter().map(link_text).collect();
    let right = format!("{}  {} · {} ", account.join("  "), header.language, header.theme);
    let right = truncate(&right, cols.saturating_sub(used));
    let gap = cols.saturating_sub(used + width(&right));

    print!("{}", " ".repeat(gap));
    print!("{}{right}", Palette::fg(&palette.colors.text_dim));
    print!("{}", Palette::reset());
    row + 1
}

/// Renders the line that replaces the header on views that hide it: just
/// the pane title, centered and dim.
pub fn render_title_line(row: usize, title: &str, palette: &Palette, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Palette::fg(&palette.colors.text_dim));
    print!("{}", centered(title, cols));
    print!("{}", Palette::reset());
    row + 1
}
