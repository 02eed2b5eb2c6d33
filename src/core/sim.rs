use tracing::{debug, trace};

use crate::config::ScenarioConfig;
use crate::core::domain::Domain;
use crate::core::math::{Axis, Vec2};
use crate::core::queue::MinPq;
use crate::core::scenario::first_overlap;
use crate::core::{Event, EventKind, Particle};
use crate::error::{Error, Result};

/// Counters describing what the engine has processed so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub particle_collisions: u64,
    pub vertical_wall_collisions: u64,
    pub horizontal_wall_collisions: u64,
    /// Popped events whose participants had collided since the prediction.
    pub stale_discarded: u64,
}

impl EngineStats {
    /// Total number of bounces applied.
    pub fn events_applied(&self) -> u64 {
        self.particle_collisions + self.vertical_wall_collisions + self.horizontal_wall_collisions
    }
}

/// Event-driven collision engine for discs in a rectangular box.
///
/// Time jumps from one predicted collision to the next. Every velocity change is followed
/// by a fresh round of predictions for the particle involved, and predictions made before
/// the change are recognised as stale by their collision-count snapshots when popped.
#[derive(Debug)]
pub struct CollisionSystem {
    time_now: f64,
    domain: Domain,
    particles: Vec<Particle>,
    pq: MinPq<Event>,
    stats: EngineStats,
}

impl CollisionSystem {
    /// Build the engine and seed the queue with every particle's predictions.
    ///
    /// Errors:
    /// - `Error::InvalidInput` if `particles` is empty, any particle is invalid, the
    ///   domain has a non-finite or non-positive side, a disc does not lie inside the box
    ///   (or is too wide to move in it), or two discs overlap.
    pub fn new(particles: Vec<Particle>, domain: Domain) -> Result<Self> {
        if particles.is_empty() {
            return Err(Error::InvalidInput(
                "collision system requires at least one particle".into(),
            ));
        }
        domain.validate()?;
        for (i, p) in particles.iter().enumerate() {
            p.validate()?;
            check_inside(&domain, i, p)?;
            if let Some(j) = first_overlap(&particles[..i], &p.position(), p.radius()) {
                return Err(Error::InvalidInput(format!("particles {j} and {i} overlap")));
            }
        }

        let mut sim = Self {
            time_now: 0.0,
            domain,
            pq: MinPq::new(),
            particles,
            stats: EngineStats::default(),
        };
        sim.schedule_initial_events()?;
        debug!(
            particles = sim.particles.len(),
            pending = sim.pq.len(),
            width = domain.width,
            height = domain.height,
            "collision system ready"
        );
        Ok(sim)
    }

    /// Build the engine from a parsed scenario.
    pub fn from_config(config: &ScenarioConfig) -> Result<Self> {
        Self::new(config.build_particles()?, config.domain)
    }

    /// Returns current simulation time.
    pub fn time(&self) -> f64 {
        self.time_now
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Read-only view of the particles, indexed as at construction.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Number of queued predictions, stale ones included.
    pub fn pending_events(&self) -> usize {
        self.pq.len()
    }

    /// Total kinetic energy (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Total momentum (diagnostic).
    pub fn momentum(&self) -> Vec2 {
        self.particles.iter().fold([0.0, 0.0], |acc, p| {
            let m = p.momentum();
            [acc[0] + m[0], acc[1] + m[1]]
        })
    }

    /// Advance simulation time by exactly `dt`.
    ///
    /// Applies, in time order, every valid collision strictly before `time + dt`, then
    /// drifts all particles to `time + dt`.
    ///
    /// Errors:
    /// - `Error::InvalidInput` if `dt` is negative or not finite; state is left untouched.
    pub fn advance(&mut self, dt: f64) -> Result<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(Error::InvalidInput(format!(
                "dt must be finite and >= 0, got {dt}"
            )));
        }
        self.run_until(self.time_now + dt)
    }

    /// Advance to the absolute time `target_time` (must be >= current time).
    pub fn advance_to(&mut self, target_time: f64) -> Result<()> {
        if !target_time.is_finite() || target_time < self.time_now {
            return Err(Error::InvalidInput(format!(
                "target_time {target_time} must be finite and >= current time {}",
                self.time_now
            )));
        }
        self.run_until(target_time)
    }

    /// Jump to the next valid collision, apply it and return it.
    ///
    /// Returns `None` without moving time if no future collision is predicted.
    pub fn step(&mut self) -> Result<Option<Event>> {
        match self.pop_valid_before(f64::INFINITY)? {
            Some(ev) => {
                self.process(ev)?;
                Ok(Some(ev))
            }
            None => Ok(None),
        }
    }

    /// Rebuild the event queue from the current particle states.
    pub fn rebuild_event_queue(&mut self) -> Result<()> {
        self.pq.clear();
        self.schedule_initial_events()?;
        debug!(pending = self.pq.len(), time = self.time_now, "event queue rebuilt");
        Ok(())
    }

    // ============ Internal helpers ============

    fn run_until(&mut self, end: f64) -> Result<()> {
        while let Some(ev) = self.pop_valid_before(end)? {
            self.process(ev)?;
        }

        self.drift_all(end - self.time_now);
        self.time_now = end;
        Ok(())
    }

    fn schedule_initial_events(&mut self) -> Result<()> {
        for i in 0..self.particles.len() {
            self.predict_all(i)?;
        }
        Ok(())
    }

    /// Queue every future collision of particle `i` given the current state: one event per
    /// approaching partner plus the next vertical and horizontal wall contacts.
    ///
    /// A disc already at (or rounded past) the wall it is heading into bounces now. A pair
    /// touching and closing bounces now; a negative pair time means the discs overlap and
    /// the prediction is dropped.
    fn predict_all(&mut self, i: usize) -> Result<()> {
        let now = self.time_now;
        let p = &self.particles[i];
        let count_i = p.collision_count();

        for (j, other) in self.particles.iter().enumerate() {
            if j == i {
                continue;
            }
            if let Some(t) = pair_time(now, p.time_to_hit(other)) {
                self.pq.insert(Event::particle_pair(
                    t,
                    i,
                    j,
                    count_i,
                    other.collision_count(),
                )?);
            }
        }

        if let Some(t) = wall_time(now, p.time_to_hit_vertical_wall(&self.domain)) {
            self.pq.insert(Event::vertical_wall(t, i, count_i)?);
        }
        if let Some(t) = wall_time(now, p.time_to_hit_horizontal_wall(&self.domain)) {
            self.pq.insert(Event::horizontal_wall(t, i, count_i)?);
        }
        Ok(())
    }

    /// Pop events until one is still valid and earlier than `end`. Stale events are
    /// dropped without moving time.
    fn pop_valid_before(&mut self, end: f64) -> Result<Option<Event>> {
        while let Some(next) = self.pq.peek_min() {
            if next.time() >= end {
                return Ok(None);
            }
            let ev = self.pq.extract_min()?;
            if self.is_current(&ev) {
                return Ok(Some(ev));
            }
            self.stats.stale_discarded += 1;
            trace!(time = ev.time(), kind = ?ev.kind(), "discarded stale event");
        }
        Ok(None)
    }

    fn is_current(&self, ev: &Event) -> bool {
        let kind = ev.kind();
        let count_a = self.particles[kind.first()].collision_count();
        let count_b = kind.second().map(|j| self.particles[j].collision_count());
        ev.is_valid(count_a, count_b)
    }

    /// Drift everything to the event time, then apply the bounce and re-predict.
    fn process(&mut self, ev: Event) -> Result<()> {
        let t_ev = ev.time();
        self.drift_all(t_ev - self.time_now);
        self.time_now = t_ev;
        trace!(time = t_ev, kind = ?ev.kind(), "applying event");

        match ev.kind() {
            EventKind::ParticleParticle { a, b } => {
                let (pa, pb) = pair_mut(&mut self.particles, a, b);
                pa.resolve_particle_bounce(pb);
                self.stats.particle_collisions += 1;
                self.predict_all(a)?;
                self.predict_all(b)?;
            }
            EventKind::VerticalWall { particle } => {
                self.particles[particle].resolve_wall_bounce(Axis::X);
                self.stats.vertical_wall_collisions += 1;
                self.predict_all(particle)?;
            }
            EventKind::HorizontalWall { particle } => {
                self.particles[particle].resolve_wall_bounce(Axis::Y);
                self.stats.horizontal_wall_collisions += 1;
                self.predict_all(particle)?;
            }
        }
        Ok(())
    }

    fn drift_all(&mut self, dt: f64) {
        if dt == 0.0 {
            return;
        }
        for p in &mut self.particles {
            p.move_by(dt);
        }
    }
}

// ============ Utility helpers ============

/// Absolute time of a pair prediction. Zero (touching and closing) counts.
#[inline]
fn pair_time(now: f64, dt: f64) -> Option<f64> {
    if !dt.is_finite() || dt < 0.0 {
        return None;
    }
    let t = now + dt;
    t.is_finite().then_some(t)
}

/// Absolute time of a wall prediction. A non-positive `dt` means the disc is on or past
/// the wall while still moving into it, so the bounce is due immediately.
#[inline]
fn wall_time(now: f64, dt: f64) -> Option<f64> {
    if dt.is_nan() || dt == f64::INFINITY {
        return None;
    }
    let t = now + dt.max(0.0);
    t.is_finite().then_some(t)
}

fn check_inside(domain: &Domain, i: usize, p: &Particle) -> Result<()> {
    let r = p.radius();
    let [x, y] = p.position();
    if 2.0 * r >= domain.width || 2.0 * r >= domain.height {
        return Err(Error::InvalidInput(format!(
            "particle {i}: radius {r} does not fit in a {}x{} domain",
            domain.width, domain.height
        )));
    }
    if x < r || x > domain.width - r || y < r || y > domain.height - r {
        return Err(Error::InvalidInput(format!(
            "particle {i} at [{x}, {y}] is not inside the domain"
        )));
    }
    Ok(())
}

/// Two distinct mutable borrows into `ps`, returned in the order `(i, j)`.
fn pair_mut(ps: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert_ne!(i, j, "a particle cannot collide with itself");
    if i < j {
        let (lo, hi) = ps.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = ps.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}
