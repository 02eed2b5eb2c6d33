use serde::Deserialize;
use std::f64::consts::PI;

use crate::config::ParticleConfig;
use crate::core::domain::Domain;
use crate::core::math::{dot, is_finite, sub, Axis, Vec2, DIM};
use crate::error::{Error, Result};

/// Mass of a disc of radius `radius` under the area rule `π r²`.
#[inline]
pub fn mass_from_radius(radius: f64) -> f64 {
    PI * radius * radius
}

/// A rigid disc moving in the plane.
///
/// Fields:
/// - `position`: center [x, y]
/// - `velocity`: [vx, vy]
/// - `radius`: disc radius (> 0), fixed at construction
/// - `mass`: disc mass (> 0), fixed at construction
/// - `collision_count`: incremented each time the particle takes part in a bounce
///
/// Position and velocity only change through [`Particle::move_by`] and the
/// `resolve_*` methods, so the collision count always reflects every velocity change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ParticleConfig")]
pub struct Particle {
    position: Vec2,
    velocity: Vec2,
    radius: f64,
    mass: f64,
    collision_count: u64,
}

impl Particle {
    /// Create a particle whose mass follows the area rule `π r²`.
    ///
    /// Errors:
    /// - `Error::InvalidInput` if `radius` is non-positive or any component is NaN/inf.
    pub fn new(position: Vec2, velocity: Vec2, radius: f64) -> Result<Self> {
        Self::with_mass(position, velocity, radius, mass_from_radius(radius))
    }

    /// Create a particle with an explicit mass.
    ///
    /// Errors:
    /// - `Error::InvalidInput` if `radius` or `mass` is non-positive or any component is NaN/inf.
    pub fn with_mass(position: Vec2, velocity: Vec2, radius: f64, mass: f64) -> Result<Self> {
        let p = Self {
            position,
            velocity,
            radius,
            mass,
            collision_count: 0,
        };
        p.validate()?;
        Ok(p)
    }

    /// Check the construction invariants.
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidInput("radius must be finite and > 0".into()));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(Error::InvalidInput("mass must be finite and > 0".into()));
        }
        if !is_finite(&self.position) {
            return Err(Error::InvalidInput("position must be finite".into()));
        }
        if !is_finite(&self.velocity) {
            return Err(Error::InvalidInput("velocity must be finite".into()));
        }
        Ok(())
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Number of bounces this particle has taken part in.
    #[inline]
    pub fn collision_count(&self) -> u64 {
        self.collision_count
    }

    /// Returns the particle's kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * dot(&self.velocity, &self.velocity)
    }

    /// Returns the particle's momentum m v.
    #[inline]
    pub fn momentum(&self) -> Vec2 {
        [self.mass * self.velocity[0], self.mass * self.velocity[1]]
    }

    /// Linear drift: `position += velocity * dt`.
    #[inline]
    pub fn move_by(&mut self, dt: f64) {
        for k in 0..DIM {
            self.position[k] += self.velocity[k] * dt;
        }
    }

    /// Time until the disc's edge touches the left or right wall of `domain`.
    ///
    /// Returns `+∞` when there is no horizontal motion. A non-positive result means the
    /// disc already overlaps the wall it is heading to and is not a future event.
    pub fn time_to_hit_vertical_wall(&self, domain: &Domain) -> f64 {
        self.time_to_hit_wall(Axis::X, domain)
    }

    /// Time until the disc's edge touches the bottom or top wall of `domain`.
    pub fn time_to_hit_horizontal_wall(&self, domain: &Domain) -> f64 {
        self.time_to_hit_wall(Axis::Y, domain)
    }

    fn time_to_hit_wall(&self, axis: Axis, domain: &Domain) -> f64 {
        let k = axis.index();
        let (x, v) = (self.position[k], self.velocity[k]);
        if v == 0.0 {
            return f64::INFINITY;
        }
        if v > 0.0 {
            (domain.extent(axis) - self.radius - x) / v
        } else {
            (self.radius - x) / v
        }
    }

    /// Time until this disc and `other` first touch, or `+∞` if they never do.
    ///
    /// Solves `|dp + dv t| = r_a + r_b` for the smaller root. Separating pairs and
    /// grazing/missing trajectories (discriminant <= 0) return `+∞`.
    pub fn time_to_hit(&self, other: &Particle) -> f64 {
        if std::ptr::eq(self, other) {
            return f64::INFINITY;
        }
        let dp = sub(&other.position, &self.position);
        let dv = sub(&other.velocity, &self.velocity);
        let dpdv = dot(&dp, &dv);
        if dpdv > 0.0 {
            return f64::INFINITY;
        }
        let dvdv = dot(&dv, &dv);
        let dpdp = dot(&dp, &dp);
        let r_sum = self.radius + other.radius;
        let disc = dpdv * dpdv - dvdv * (dpdp - r_sum * r_sum);
        if disc <= 0.0 {
            return f64::INFINITY;
        }
        -(dpdv + disc.sqrt()) / dvdv
    }

    /// Specular reflection off a wall perpendicular to `axis`.
    pub fn resolve_wall_bounce(&mut self, axis: Axis) {
        let k = axis.index();
        self.velocity[k] = -self.velocity[k];
        self.bump_collision_count();
    }

    /// Elastic collision with `other`, applying equal and opposite impulses along the
    /// line of centers. Expects the discs to be in contact.
    pub fn resolve_particle_bounce(&mut self, other: &mut Particle) {
        let dp = sub(&other.position, &self.position);
        let dv = sub(&other.velocity, &self.velocity);
        let dpdv = dot(&dp, &dv);
        let r_sum = self.radius + other.radius;
        let (ma, mb) = (self.mass, other.mass);

        let j = 2.0 * ma * mb * dpdv / ((ma + mb) * r_sum);
        for k in 0..DIM {
            let jk = j * dp[k] / r_sum;
            self.velocity[k] += jk / ma;
            other.velocity[k] -= jk / mb;
        }

        self.bump_collision_count();
        other.bump_collision_count();
    }

    #[inline]
    fn bump_collision_count(&mut self) {
        self.collision_count = self.collision_count.saturating_add(1);
    }
}

impl TryFrom<ParticleConfig> for Particle {
    type Error = Error;

    fn try_from(c: ParticleConfig) -> Result<Self> {
        match c.mass {
            Some(m) => Particle::with_mass(c.position, c.velocity, c.radius, m),
            None => Particle::new(c.position, c.velocity, c.radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_momentum(a: &Particle, b: &Particle) -> Vec2 {
        let (pa, pb) = (a.momentum(), b.momentum());
        [pa[0] + pb[0], pa[1] + pb[1]]
    }

    #[test]
    fn new_particle_ok() -> Result<()> {
        let p = Particle::new([1.0, 2.0], [0.5, -3.0], 2.0)?;
        assert_eq!(p.position(), [1.0, 2.0]);
        assert_eq!(p.velocity(), [0.5, -3.0]);
        assert_eq!(p.radius(), 2.0);
        assert!((p.mass() - 4.0 * PI).abs() < 1e-12);
        assert_eq!(p.collision_count(), 0);
        Ok(())
    }

    #[test]
    fn invalid_radius_rejected() {
        let err = Particle::new([0.0, 0.0], [0.0, 0.0], 0.0).unwrap_err();
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn invalid_mass_rejected() {
        let err = Particle::with_mass([0.0, 0.0], [0.0, 0.0], 1.0, -1.0).unwrap_err();
        assert!(err.to_string().contains("mass"));
    }

    #[test]
    fn non_finite_state_rejected() {
        assert!(Particle::new([f64::NAN, 0.0], [0.0, 0.0], 1.0).is_err());
        assert!(Particle::new([0.0, 0.0], [0.0, f64::INFINITY], 1.0).is_err());
    }

    #[test]
    fn move_by_drifts_linearly() -> Result<()> {
        let mut p = Particle::new([1.0, 1.0], [2.0, -0.5], 0.1)?;
        p.move_by(2.0);
        assert_eq!(p.position(), [5.0, 0.0]);
        assert_eq!(p.collision_count(), 0);
        Ok(())
    }

    #[test]
    fn vertical_wall_time() -> Result<()> {
        let domain = Domain::new(100.0, 100.0)?;
        let right = Particle::new([5.0, 50.0], [2.0, 0.0], 5.0)?;
        assert!((right.time_to_hit_vertical_wall(&domain) - 45.0).abs() < 1e-12);

        let left = Particle::new([20.0, 50.0], [-3.0, 0.0], 5.0)?;
        assert!((left.time_to_hit_vertical_wall(&domain) - 5.0).abs() < 1e-12);

        let still = Particle::new([20.0, 50.0], [0.0, 1.0], 5.0)?;
        assert!(still.time_to_hit_vertical_wall(&domain).is_infinite());
        Ok(())
    }

    #[test]
    fn horizontal_wall_time() -> Result<()> {
        let domain = Domain::new(100.0, 60.0)?;
        let up = Particle::new([50.0, 10.0], [0.0, 4.0], 2.0)?;
        assert!((up.time_to_hit_horizontal_wall(&domain) - 12.0).abs() < 1e-12);
        let down = Particle::new([50.0, 10.0], [0.0, -4.0], 2.0)?;
        assert!((down.time_to_hit_horizontal_wall(&domain) - 2.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn overlapping_wall_gives_non_positive_time() -> Result<()> {
        let domain = Domain::new(10.0, 10.0)?;
        let p = Particle::new([9.5, 5.0], [1.0, 0.0], 1.0)?;
        assert!(p.time_to_hit_vertical_wall(&domain) <= 0.0);
        Ok(())
    }

    #[test]
    fn head_on_time_to_hit() -> Result<()> {
        let a = Particle::new([0.0, 0.0], [1.0, 0.0], 1.0)?;
        let b = Particle::new([10.0, 0.0], [-1.0, 0.0], 1.0)?;
        assert!((a.time_to_hit(&b) - 4.0).abs() < 1e-12);
        assert!((b.time_to_hit(&a) - 4.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn separating_or_missing_pairs_never_hit() -> Result<()> {
        let a = Particle::new([0.0, 0.0], [-1.0, 0.0], 1.0)?;
        let b = Particle::new([10.0, 0.0], [1.0, 0.0], 1.0)?;
        assert!(a.time_to_hit(&b).is_infinite());

        // Parallel tracks 5 apart with radii summing to 2.
        let c = Particle::new([0.0, 0.0], [1.0, 0.0], 1.0)?;
        let d = Particle::new([10.0, 5.0], [-1.0, 0.0], 1.0)?;
        assert!(c.time_to_hit(&d).is_infinite());

        // Exactly tangential: discriminant is zero.
        let e = Particle::new([0.0, 0.0], [1.0, 0.0], 1.0)?;
        let f = Particle::new([10.0, 2.0], [-1.0, 0.0], 1.0)?;
        assert!(e.time_to_hit(&f).is_infinite());
        Ok(())
    }

    #[test]
    fn self_and_coincident_particles_never_hit() -> Result<()> {
        let a = Particle::new([3.0, 3.0], [1.0, 1.0], 1.0)?;
        let b = a.clone();
        assert!(a.time_to_hit(&a).is_infinite());
        // Coincident, co-moving: no relative motion, so no future root either.
        assert!(b.time_to_hit(&a).is_infinite());
        Ok(())
    }

    #[test]
    fn equal_mass_head_on_swaps_velocities() -> Result<()> {
        let mut a = Particle::with_mass([4.0, 0.0], [1.0, 0.0], 1.0, 1.0)?;
        let mut b = Particle::with_mass([6.0, 0.0], [-1.0, 0.0], 1.0, 1.0)?;
        a.resolve_particle_bounce(&mut b);
        assert_eq!(a.velocity(), [-1.0, 0.0]);
        assert_eq!(b.velocity(), [1.0, 0.0]);
        assert_eq!(a.collision_count(), 1);
        assert_eq!(b.collision_count(), 1);
        Ok(())
    }

    #[test]
    fn oblique_bounce_conserves_momentum_and_energy() -> Result<()> {
        // Contact at distance 3 along a 3-4-5 direction scaled to the radius sum.
        let mut a = Particle::new([0.0, 0.0], [2.0, 1.0], 1.0)?;
        let mut b = Particle::new([1.8, 2.4], [-1.0, -0.5], 2.0)?;
        let p0 = total_momentum(&a, &b);
        let e0 = a.kinetic_energy() + b.kinetic_energy();

        a.resolve_particle_bounce(&mut b);

        let p1 = total_momentum(&a, &b);
        let e1 = a.kinetic_energy() + b.kinetic_energy();
        assert!((p1[0] - p0[0]).abs() < 1e-9, "px drift {} -> {}", p0[0], p1[0]);
        assert!((p1[1] - p0[1]).abs() < 1e-9, "py drift {} -> {}", p0[1], p1[1]);
        assert!((e1 - e0).abs() < 1e-9 * e0, "energy drift {e0} -> {e1}");
        Ok(())
    }

    #[test]
    fn wall_bounce_flips_one_component() -> Result<()> {
        let mut p = Particle::new([5.0, 5.0], [2.0, -3.0], 1.0)?;
        let e0 = p.kinetic_energy();
        p.resolve_wall_bounce(Axis::X);
        assert_eq!(p.velocity(), [-2.0, -3.0]);
        p.resolve_wall_bounce(Axis::Y);
        assert_eq!(p.velocity(), [-2.0, 3.0]);
        assert_eq!(p.collision_count(), 2);
        assert_eq!(p.kinetic_energy(), e0);
        Ok(())
    }
}
