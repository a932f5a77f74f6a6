//! Particle background renderer.

use crate::particles::ParticleDot;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Palette;

/// Draws `dots` relative to `top_row`. Dots outside `cols` are skipped.
pub fn render_particles(top_row: usize, dots: &[ParticleDot], cols: usize) {
    for dot in dots.iter().filter(|d| d.col < cols) {
        position_cursor(top_row + dot.row, dot.col + 1);
        if dot.faint {
            print!("{}", Palette::dim());
        }
        print!("{}{}{}", Palette::fg(&dot.color), dot.glyph, Palette::reset());
    }
}
