use crate::error::{Error, Result};
use ordered_float::NotNan;
use std::cmp::Ordering;

/// What a predicted collision involves. Indices refer to the engine's particle slice.
///
/// Tie-breaking for deterministic ordering prefers `ParticleParticle` < `VerticalWall` <
/// `HorizontalWall` when times are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Collision between particles `a` and `b`.
    ParticleParticle { a: usize, b: usize },
    /// Particle hits the left or right wall.
    VerticalWall { particle: usize },
    /// Particle hits the bottom or top wall.
    HorizontalWall { particle: usize },
}

impl EventKind {
    #[inline]
    fn order_key(&self) -> (u8, usize, usize) {
        match *self {
            EventKind::ParticleParticle { a, b } => (0, a, b),
            EventKind::VerticalWall { particle } => (1, particle, 0),
            EventKind::HorizontalWall { particle } => (2, particle, 0),
        }
    }

    /// Index of the first (or only) particle involved.
    #[inline]
    pub fn first(&self) -> usize {
        match *self {
            EventKind::ParticleParticle { a, .. } => a,
            EventKind::VerticalWall { particle } | EventKind::HorizontalWall { particle } => {
                particle
            }
        }
    }

    /// Index of the second particle, for pair events only.
    #[inline]
    pub fn second(&self) -> Option<usize> {
        match *self {
            EventKind::ParticleParticle { b, .. } => Some(b),
            _ => None,
        }
    }
}

/// A predicted collision in the priority queue.
///
/// - `time`: absolute simulation time of the collision (finite, non-NaN).
/// - `kind`: which particles or walls are involved.
/// - `count_a`, `count_b`: collision-count snapshots taken at prediction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    time: NotNan<f64>,
    kind: EventKind,
    count_a: u64,
    count_b: Option<u64>,
}

impl Event {
    /// Particle-particle event between `a` and `b` with their current collision counts.
    pub fn particle_pair(time: f64, a: usize, b: usize, count_a: u64, count_b: u64) -> Result<Self> {
        Self::new(
            time,
            EventKind::ParticleParticle { a, b },
            count_a,
            Some(count_b),
        )
    }

    /// Vertical-wall event for `particle`.
    pub fn vertical_wall(time: f64, particle: usize, count: u64) -> Result<Self> {
        Self::new(time, EventKind::VerticalWall { particle }, count, None)
    }

    /// Horizontal-wall event for `particle`.
    pub fn horizontal_wall(time: f64, particle: usize, count: u64) -> Result<Self> {
        Self::new(time, EventKind::HorizontalWall { particle }, count, None)
    }

    fn new(time: f64, kind: EventKind, count_a: u64, count_b: Option<u64>) -> Result<Self> {
        if !time.is_finite() {
            return Err(Error::InvalidEvent(format!(
                "event time must be finite, got {time}"
            )));
        }
        let time = NotNan::new(time)
            .map_err(|_| Error::InvalidEvent("event time cannot be NaN".into()))?;
        Ok(Self {
            time,
            kind,
            count_a,
            count_b,
        })
    }

    /// Returns the raw f64 event time.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time.into_inner()
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Collision-count snapshots `(a, b)` taken when the event was predicted.
    #[inline]
    pub fn snapshots(&self) -> (u64, Option<u64>) {
        (self.count_a, self.count_b)
    }

    /// Validate against current collision counts. Wall events pass `None` for `count_b_now`.
    #[inline]
    pub fn is_valid(&self, count_a_now: u64, count_b_now: Option<u64>) -> bool {
        if self.count_a != count_a_now {
            return false;
        }
        match (self.count_b, count_b_now) {
            (Some(then), Some(now)) => then == now,
            (None, _) => true,
            (Some(_), None) => false,
        }
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.kind.order_key().cmp(&other.kind.order_key()))
            .then_with(|| {
                (self.count_a, self.count_b.unwrap_or(0))
                    .cmp(&(other.count_a, other.count_b.unwrap_or(0)))
            })
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
