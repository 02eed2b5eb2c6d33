//! Discrete-event simulation of elastic collisions between discs in a rectangular box.
//!
//! ```
//! use brownsim::core::{CollisionSystem, Domain, Particle};
//!
//! let particles = vec![
//!     Particle::new([20.0, 50.0], [1.0, 0.0], 1.0)?,
//!     Particle::new([30.0, 50.0], [-1.0, 0.0], 1.0)?,
//! ];
//! let mut sim = CollisionSystem::new(particles, Domain::new(100.0, 100.0)?)?;
//! sim.advance(5.0)?;
//! assert_eq!(sim.time(), 5.0);
//! assert_eq!(sim.stats().particle_collisions, 1);
//! # Ok::<(), brownsim::error::Error>(())
//! ```

pub mod config;
pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python;
