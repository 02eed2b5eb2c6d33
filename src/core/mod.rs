//! Event-driven collision engine: disc physics, predicted events, the min-priority queue
//! over them and the `CollisionSystem` that advances time from one collision to the next.

pub mod domain;
pub mod event;
pub mod math;
pub mod particle;
pub mod queue;
pub mod scenario;
pub mod sim;

pub use domain::Domain;
pub use event::{Event, EventKind};
pub use math::{Axis, Vec2};
pub use particle::Particle;
pub use queue::MinPq;
pub use sim::{CollisionSystem, EngineStats};
