//! Decorative particle field drawn behind the authentication views.

pub mod field;

pub use field::{Particle, ParticleConfig, ParticleDot, ParticleField};
