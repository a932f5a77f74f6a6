//! View body renderers.
//!
//! One function per [`ViewBody`] variant. Each prints from `row` downwards,
//! never past `last_row`, and returns the next free row.

use crate::forms::{FieldKind, StrengthLevel};
use crate::ui::helpers::{self, centered, padded, position_cursor, truncate, width};
use crate::ui::theme::Palette;
use crate::ui::viewmodel::{
    DashboardBody, FaqBody, FormBody, HomeBody, InfoBody, InfoSection, MenuEntry, NavLink,
    ProfilesBody, SettingsBody, StrengthMeter, ViewBody,
};

/// Left margin of body content.
const INDENT: usize = 3;

/// Bounds of the area a body may draw into.
#[derive(Debug, Clone, Copy)]
pub struct Area {
    pub first_row: usize,
    pub last_row: usize,
    /// Columns to the left of the area.
    pub left: usize,
    pub cols: usize,
}

impl Area {
    const fn fits(&self, row: usize) -> bool {
        row >= self.first_row && row <= self.last_row
    }

    const fn inner(&self) -> usize {
        self.cols.saturating_sub(INDENT * 2)
    }
}

fn line(area: &Area, row: usize, color: &str, text: &str) -> usize {
    if area.fits(row) {
        position_cursor(row, area.left + INDENT + 1);
        print!("{}{}{}", Palette::fg(color), truncate(text, area.inner()), Palette::reset());
    }
    row + 1
}

fn heading(area: &Area, row: usize, palette: &Palette, text: &str) -> usize {
    if area.fits(row) {
        position_cursor(row, area.left + 1);
        print!("{}{}", Palette::bold(), Palette::fg(&palette.colors.header_fg));
        print!("{}", centered(text, area.cols));
        print!("{}", Palette::reset());
    }
    row + 1
}

fn subtitle(area: &Area, row: usize, palette: &Palette, text: &str) -> usize {
    if text.is_empty() {
        return row;
    }
    if area.fits(row) {
        position_cursor(row, area.left + 1);
        print!("{}{}", Palette::fg(&palette.colors.text_dim), centered(text, area.cols));
        print!("{}", Palette::reset());
    }
    row + 1
}

fn menu_entry(area: &Area, row: usize, palette: &Palette, entry: &MenuEntry) -> usize {
    if !area.fits(row) {
        return row + 1;
    }

    let marker = if entry.active { "●" } else { " " };
    let text = entry.detail.as_ref().map_or_else(
        || format!("{marker} {}", entry.label),
        |detail| format!("{marker} {}  {detail}", entry.label),
    );

    position_cursor(row, area.left + INDENT + 1);
    if entry.selected {
        print!("{}", Palette::fg(&palette.colors.selection_fg));
        print!("{}", Palette::bg(&palette.colors.selection_bg));
    } else {
        print!("{}", Palette::fg(&palette.colors.text_normal));
    }
    print!("{}", padded(&format!(" {text}"), area.inner()));
    print!("{}", Palette::reset());
    row + 1
}

fn sections(area: &Area, mut row: usize, palette: &Palette, items: &[InfoSection]) -> usize {
    for section in items {
        if let Some(h) = &section.heading {
            if area.fits(row) {
                position_cursor(row, area.left + INDENT + 1);
                print!("{}{}", Palette::bold(), Palette::fg(&palette.colors.accent));
                print!("{}", truncate(h, area.inner()));
                print!("{}", Palette::reset());
            }
            row += 1;
        }
        row = line(area, row, &palette.colors.text_normal, &section.text);
        row += 1;
    }
    row
}

fn links(area: &Area, row: usize, palette: &Palette, items: &[NavLink]) -> usize {
    if items.is_empty() {
        return row;
    }
    let text: Vec<String> = items
        .iter()
        .map(|l| l.hotkey.map_or_else(|| l.label.clone(), |k| format!("{} [{k}]", l.label)))
        .collect();
    line(area, row, &palette.colors.text_dim, &text.join("   "))
}

/// Renders the visible view's body.
pub fn render_body(area: &Area, body: &ViewBody, palette: &Palette) -> usize {
    let row = area.first_row;
    match body {
        ViewBody::Home(home) => render_home(area, row, home, palette),
        ViewBody::Form(form) => render_form(area, row, form, palette),
        ViewBody::Profiles(profiles) => render_profiles(area, row, profiles, palette),
        ViewBody::Dashboard(dashboard) => render_dashboard(area, row, dashboard, palette),
        ViewBody::Faq(faq) => render_faq(area, row, faq, palette),
        ViewBody::Settings(settings) => render_settings(area, row, settings, palette),
        ViewBody::Info(info) => render_info(area, row, info, palette),
    }
}

fn render_home(area: &Area, mut row: usize, home: &HomeBody, palette: &Palette) -> usize {
    if area.fits(row) {
        let title = format!("{} {}", home.title, home.highlight);
        let left = area.cols.saturating_sub(width(&title)) / 2;
        position_cursor(row, area.left + left + 1);
        print!("{}{}{} ", Palette::bold(), Palette::fg(&palette.colors.header_fg), home.title);
        print!("{}{}", Palette::fg(&palette.colors.accent), home.highlight);
        print!("{}", Palette::reset());
    }
    row += 1;
    row = subtitle(area, row, palette, &home.subtitle);
    row += 1;

    for entry in &home.actions {
        row = menu_entry(area, row, palette, entry);
    }
    row += 1;

    row = heading(area, row, palette, &home.features_title);
    row += 1;
    sections(area, row, palette, &home.features)
}

const METER_SEGMENTS: u8 = 5;

fn strength_color(palette: &Palette, level: StrengthLevel) -> &str {
    match level {
        StrengthLevel::VeryWeak | StrengthLevel::Weak => &palette.colors.error,
        StrengthLevel::Fair => &palette.colors.warning,
        StrengthLevel::Strong => &palette.colors.info,
        StrengthLevel::VeryStrong | StrengthLevel::Excellent => &palette.colors.success,
    }
}

fn strength_meter(area: &Area, row: usize, palette: &Palette, meter: &StrengthMeter) -> usize {
    let filled = meter.level.score().min(METER_SEGMENTS);
    let bar = format!(
        "  {}{}  {}",
        "■".repeat(usize::from(filled)),
        "□".repeat(usize::from(METER_SEGMENTS - filled)),
        meter.label
    );
    line(area, row, strength_color(palette, meter.level), &bar)
}

/// Renders a form. Also used by the profile modal.
pub fn render_form(area: &Area, mut row: usize, form: &FormBody, palette: &Palette) -> usize {
    row = heading(area, row, palette, &form.title);
    row = subtitle(area, row, palette, &form.subtitle);
    row += 1;

    for field in &form.fields {
        let label_color = if field.focused {
            &palette.colors.accent
        } else {
            &palette.colors.text_dim
        };

        if field.kind == FieldKind::Checkbox {
            let mark = if field.checked { "[x]" } else { "[ ]" };
            row = line(area, row, label_color, &format!("{mark} {}", field.label));
        } else {
            row = line(area, row, label_color, &field.label);
            if area.fits(row) {
                let cursor = if field.focused { "▏" } else { "" };
                position_cursor(row, area.left + INDENT + 1);
                print!("{}", Palette::bg(&palette.colors.surface));
                print!("{}", Palette::fg(&palette.colors.text_normal));
                print!("{}", padded(&format!(" {}{cursor}", field.value), area.inner()));
                print!("{}", Palette::reset());
            }
            row += 1;
        }

        if let Some(meter) = &field.strength {
            row = strength_meter(area, row, palette, meter);
        }

        if let Some(error) = &field.error {
            row = line(area, row, &palette.colors.error, &format!("  {error}"));
        }
    }
    row += 1;

    let button = if form.submitting {
        format!("[ {} … ]", form.submit_label)
    } else {
        format!("[ {} ]", form.submit_label)
    };
    if area.fits(row) {
        position_cursor(row, area.left + INDENT + 1);
        print!("{}{}", Palette::bold(), Palette::fg(&palette.colors.accent));
        print!("{}", truncate(&button, area.inner()));
        print!("{}", Palette::reset());
    }
    row += 2;

    links(area, row, palette, &form.links)
}

fn render_profiles(area: &Area, mut row: usize, body: &ProfilesBody, palette: &Palette) -> usize {
    row = heading(area, row, palette, &body.title);
    row = subtitle(area, row, palette, &body.subtitle);
    row += 1;

    for card in &body.cards {
        let badge = card
            .kid_badge
            .as_ref()
            .map_or_else(String::new, |b| format!("  ({b})"));
        let current = if card.current { " ✓" } else { "" };
        let entry = MenuEntry {
            label: format!("[{}] {}{badge}{current}", card.avatar, card.name),
            detail: None,
            selected: card.selected,
            active: false,
        };
        row = menu_entry(area, row, palette, &entry);
    }

    if let Some(add) = &body.add {
        let entry = MenuEntry {
            label: format!("+ {}", add.label),
            ..add.clone()
        };
        row = menu_entry(area, row, palette, &entry);
    }
    row
}

fn render_dashboard(area: &Area, mut row: usize, body: &DashboardBody, palette: &Palette) -> usize {
    let welcome = body
        .profile
        .as_ref()
        .map_or_else(|| body.welcome.clone(), |p| format!("{}  ·  {p}", body.welcome));
    row = line(area, row, &palette.colors.header_fg, &welcome);
    row = links(area, row, palette, &body.user_menu);
    row += 1;

    if area.fits(row) {
        let (text, color) = if body.search.query.is_empty() && !body.search.focused {
            (body.search.placeholder.clone(), &palette.colors.text_dim)
        } else {
            let cursor = if body.search.focused { "▏" } else { "" };
            (format!("{}{cursor}", body.search.query), &palette.colors.text_normal)
        };
        let border = if body.search.focused {
            &palette.colors.accent
        } else {
            &palette.colors.border
        };
        position_cursor(row, area.left + INDENT + 1);
        print!("{}🔍 {}", Palette::fg(border), Palette::fg(color));
        print!("{}", padded(&text, area.inner().saturating_sub(3)));
        print!("{}", Palette::reset());
    }
    row += 2;

    if let Some(empty) = &body.empty {
        return line(area, row, &palette.colors.text_dim, &empty.message);
    }

    for content_row in &body.rows {
        if area.fits(row) {
            position_cursor(row, area.left + INDENT + 1);
            print!("{}{}", Palette::bold(), Palette::fg(&palette.colors.header_fg));
            print!("{}", truncate(&content_row.title, area.inner()));
            print!("{}", Palette::reset());
        }
        row += 1;

        if area.fits(row) {
            position_cursor(row, area.left + INDENT + 1);
            let mut used = 0;
            for tile in &content_row.items {
                let tile_width = width(&tile.title) + 4;
                if used + tile_width > area.inner() {
                    print!("{}…", Palette::fg(&palette.colors.text_dim));
                    break;
                }
                if tile.selected {
                    print!("{}", Palette::fg(&palette.colors.selection_fg));
                    print!("{}", Palette::bg(&palette.colors.selection_bg));
                } else {
                    print!("{}", Palette::fg(&palette.colors.text_normal));
                }
                print!("[ ");
                helpers::render_highlighted_text(&tile.title, &tile.highlight_ranges, palette, tile.selected);
                print!(" ]");
                print!("{} ", Palette::reset());
                used += tile_width;
            }
            print!("{}", Palette::reset());
        }
        row += 2;
    }
    row
}

fn render_faq(area: &Area, mut row: usize, body: &FaqBody, palette: &Palette) -> usize {
    row = heading(area, row, palette, &body.title);
    row += 1;

    for (i, item) in body.items.iter().enumerate() {
        let arrow = if item.answer.is_some() { "▾" } else { "▸" };
        let entry = MenuEntry {
            label: format!("{arrow} {}. {}", i + 1, item.question),
            detail: None,
            selected: item.selected,
            active: false,
        };
        row = menu_entry(area, row, palette, &entry);
        if let Some(answer) = &item.answer {
            row = line(area, row, &palette.colors.text_dim, &format!("    {answer}"));
        }
    }
    row
}

fn render_settings(area: &Area, mut row: usize, body: &SettingsBody, palette: &Palette) -> usize {
    row = heading(area, row, palette, &body.title);
    row += 1;
    for entry in &body.entries {
        row = menu_entry(area, row, palette, entry);
    }
    row
}

fn render_info(area: &Area, mut row: usize, body: &InfoBody, palette: &Palette) -> usize {
    row = heading(area, row, palette, &body.title);
    if let Some(sub) = &body.subtitle {
        row = subtitle(area, row, palette, sub);
    }
    row += 1;
    sections(area, row, palette, &body.sections)
}
