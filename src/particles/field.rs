//! Particle simulation.
//!
//! Particles live in a virtual pixel space of `CELL_WIDTH` x `CELL_HEIGHT`
//! pixels per terminal cell, so speeds and sizes keep their canvas meaning.
//! Each step moves every particle, wraps it at the edges and pulses its
//! opacity with `sin(life * 0.02)`.

use rand::rngs::StdRng;
use rand::Rng;

/// Virtual pixels per terminal column.
pub const CELL_WIDTH: f64 = 8.0;
/// Virtual pixels per terminal row.
pub const CELL_HEIGHT: f64 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    pub min_size: f64,
    pub max_size: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    /// Hex colours, picked uniformly per particle.
    pub colors: Vec<String>,
    pub frame_interval_ms: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            min_size: 1.0,
            max_size: 4.0,
            min_speed: 0.5,
            max_speed: 2.0,
            min_opacity: 0.3,
            max_opacity: 0.7,
            colors: vec!["#0a97f7".into(), "#10b981".into(), "#f59e0b".into()],
            frame_interval_ms: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub color: String,
    pub opacity: f64,
    pub life: f64,
}

/// A particle projected onto the terminal grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticleDot {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
    pub glyph: char,
    pub color: String,
    /// Below mid opacity; drawn dim.
    pub faint: bool,
}

#[derive(Debug)]
pub struct ParticleField {
    config: ParticleConfig,
    rng: StdRng,
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    active: bool,
}

impl ParticleField {
    #[must_use]
    pub const fn new(config: ParticleConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            particles: Vec::new(),
            width: 0.0,
            height: 0.0,
            active: false,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub const fn frame_interval_ms(&self) -> u64 {
        self.config.frame_interval_ms
    }

    /// Starts the animation. Calling it while running does nothing.
    pub fn start(&mut self) {
        if self.active {
            return;
        }
        tracing::debug!(count = self.config.count, "starting particle field");
        self.active = true;
        if self.particles.is_empty() {
            self.populate();
        }
    }

    pub fn stop(&mut self) {
        if self.active {
            tracing::debug!("stopping particle field");
        }
        self.active = false;
    }

    /// Resizes the field to `cols` x `rows` cells and regenerates particles.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.width = cols as f64 * CELL_WIDTH;
        self.height = rows as f64 * CELL_HEIGHT;
        self.populate();
    }

    fn populate(&mut self) {
        self.particles = (0..self.config.count).map(|_| self.spawn()).collect();
    }

    fn spawn(&mut self) -> Particle {
        let c = &self.config;
        let speed_span = c.max_speed - c.min_speed;
        let color = if c.colors.is_empty() {
            String::from("#0a97f7")
        } else {
            c.colors[self.rng.gen_range(0..c.colors.len())].clone()
        };

        Particle {
            x: self.rng.gen::<f64>() * self.width,
            y: self.rng.gen::<f64>() * self.height,
            size: self.rng.gen::<f64>().mul_add(c.max_size - c.min_size, c.min_size),
            speed_x: (self.rng.gen::<f64>() - 0.5).mul_add(speed_span, c.min_speed),
            speed_y: (self.rng.gen::<f64>() - 0.5).mul_add(speed_span, c.min_speed),
            color,
            opacity: self
                .rng
                .gen::<f64>()
                .mul_add(c.max_opacity - c.min_opacity, c.min_opacity),
            life: self.rng.gen::<f64>() * 100.0,
        }
    }

    /// Advances one frame. Does nothing while stopped.
    pub fn step(&mut self) {
        if !self.active {
            return;
        }

        let mid = (self.config.min_opacity + self.config.max_opacity) / 2.0;
        let amplitude = (self.config.max_opacity - self.config.min_opacity) / 2.0;
        let (width, height) = (self.width, self.height);

        for p in &mut self.particles {
            p.x += p.speed_x;
            p.y += p.speed_y;
            p.life += 1.0;

            if p.x < 0.0 {
                p.x = width;
            }
            if p.x > width {
                p.x = 0.0;
            }
            if p.y < 0.0 {
                p.y = height;
            }
            if p.y > height {
                p.y = 0.0;
            }

            p.opacity = (p.life * 0.02).sin().mul_add(amplitude, mid);
        }
    }

    /// Projects the particles onto a `cols` x `rows` grid.
    #[must_use]
    pub fn dots(&self, cols: usize, rows: usize) -> Vec<ParticleDot> {
        if !self.active || cols == 0 || rows == 0 {
            return Vec::new();
        }

        let mid = (self.config.min_opacity + self.config.max_opacity) / 2.0;
        self.particles
            .iter()
            .map(|p| ParticleDot {
                row: ((p.y / CELL_HEIGHT) as usize).min(rows - 1),
                col: ((p.x / CELL_WIDTH) as usize).min(cols - 1),
                glyph: match p.size {
                    s if s < 2.0 => '·',
                    s if s < 3.0 => '•',
                    _ => '●',
                },
                color: p.color.clone(),
                faint: p.opacity < mid,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn field() -> ParticleField {
        let mut field = ParticleField::new(ParticleConfig::default(), StdRng::seed_from_u64(7));
        field.resize(80, 24);
        field
    }

    #[test]
    fn particles_respect_configured_ranges() {
        let field = field();
        assert_eq!(field.particles().len(), 50);
        for p in field.particles() {
            assert!((1.0..=4.0).contains(&p.size));
            assert!((0.3..=0.7).contains(&p.opacity));
            assert!((0.0..=640.0).contains(&p.x));
            assert!((0.0..=384.0).contains(&p.y));
        }
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut field = field();
        field.start();
        let snapshot = field.particles().to_vec();
        field.start();
        assert_eq!(field.particles(), snapshot.as_slice());

        field.stop();
        field.stop();
        assert!(!field.is_active());
    }

    #[test]
    fn stopped_field_does_not_move() {
        let mut field = field();
        let before = field.particles().to_vec();
        field.step();
        assert_eq!(field.particles(), before.as_slice());
        assert!(field.dots(80, 24).is_empty());
    }

    #[test]
    fn step_wraps_and_pulses() {
        let mut field = field();
        field.start();
        for _ in 0..500 {
            field.step();
        }
        for p in field.particles() {
            assert!(p.x >= 0.0 && p.x <= 640.0);
            assert!(p.y >= 0.0 && p.y <= 384.0);
            assert!(p.opacity >= 0.3 - 1e-9 && p.opacity <= 0.7 + 1e-9);
        }
        for dot in field.dots(80, 24) {
            assert!(dot.row < 24 && dot.col < 80);
        }
    }

    #[test]
    fn same_seed_same_field() {
        assert_eq!(field().particles(), field().particles());
    }
}
