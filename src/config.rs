//! Scenario descriptions loadable from JSON.
//!
//! A scenario is a domain plus any mix of explicitly listed particles and a seeded random
//! "Brownian" generator:
//!
//! ```json
//! {
//!   "domain": { "width": 800.0, "height": 600.0 },
//!   "particles": [
//!     { "position": [100.0, 100.0], "velocity": [3.0, 1.0], "radius": 5.0 },
//!     { "position": [400.0, 300.0], "radius": 40.0, "mass": 5000.0 }
//!   ],
//!   "generator": { "count": 300, "radius": 5.0, "speed": 3.0, "seed": 7 }
//! }
//! ```
//!
//! Particle `mass` defaults to the area rule `π r²` and `velocity` defaults to rest.

use serde::Deserialize;

use crate::core::domain::Domain;
use crate::core::math::Vec2;
use crate::core::scenario;
use crate::core::Particle;
use crate::error::Result;

/// Raw particle entry. Converted into a validated [`Particle`] on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ParticleConfig {
    pub position: Vec2,
    #[serde(default)]
    pub velocity: Vec2,
    pub radius: f64,
    #[serde(default)]
    pub mass: Option<f64>,
}

fn default_radius() -> f64 {
    5.0
}

fn default_speed() -> f64 {
    3.0
}

/// Random particle set: `count` small discs with velocity components uniform in
/// `[-speed, speed]`, optionally plus one heavy disc at rest.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    pub count: usize,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Radius of an extra disc placed at rest, the particle whose random walk is watched.
    #[serde(default)]
    pub heavy_radius: Option<f64>,
    /// RNG seed for reproducibility; `None` for nondeterministic.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 0,
            radius: default_radius(),
            speed: default_speed(),
            heavy_radius: None,
            seed: None,
        }
    }
}

/// Top-level scenario: a domain plus its initial particles.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioConfig {
    pub domain: Domain,
    #[serde(default)]
    pub particles: Vec<Particle>,
    #[serde(default)]
    pub generator: Option<GeneratorConfig>,
}

impl ScenarioConfig {
    /// Parse a scenario from JSON text. Particle and domain values are validated here.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.domain.validate()?;
        Ok(config)
    }

    /// Explicit particles followed by generated ones. Generated discs avoid everything
    /// placed before them; explicit entries are checked for overlap and containment when
    /// the engine is built.
    pub fn build_particles(&self) -> Result<Vec<Particle>> {
        let particles = self.particles.clone();
        match &self.generator {
            Some(g) => scenario::populate(&self.domain, g, particles),
            None => Ok(particles),
        }
    }
}
