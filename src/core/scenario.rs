use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::core::domain::Domain;
use crate::core::math::{dot, sub, Vec2};
use crate::core::Particle;
use crate::error::{Error, Result};

const MAX_ATTEMPTS: usize = 1_000_000;

/// Attempts after which placement is reported as struggling.
const CROWDED_ATTEMPTS: usize = 10_000;

/// Add the particles described by `config` to `existing`, placing each one with rejection
/// sampling so that no two discs overlap and every disc lies inside `domain`.
///
/// The heavy disc (if any) is placed first, at rest, with the area-rule mass.
pub fn populate(
    domain: &Domain,
    config: &GeneratorConfig,
    existing: Vec<Particle>,
) -> Result<Vec<Particle>> {
    domain.validate()?;
    check_radius(domain, config.radius, "radius")?;
    if let Some(h) = config.heavy_radius {
        check_radius(domain, h, "heavy_radius")?;
    }
    if !config.speed.is_finite() || config.speed < 0.0 {
        return Err(Error::InvalidInput("speed must be finite and >= 0".into()));
    }

    let mut rng: StdRng = match config.seed {
        Some(s) => SeedableRng::seed_from_u64(s),
        None => SeedableRng::seed_from_u64(rng().random()),
    };

    let mut particles = existing;
    particles.reserve(config.count + usize::from(config.heavy_radius.is_some()));

    if let Some(h) = config.heavy_radius {
        let r = place(&mut rng, domain, &particles, h)?;
        particles.push(Particle::new(r, [0.0, 0.0], h)?);
    }

    for _ in 0..config.count {
        let r = place(&mut rng, domain, &particles, config.radius)?;
        let mut v = [0.0_f64; 2];
        if config.speed > 0.0 {
            v.iter_mut()
                .for_each(|x| *x = rng.random_range(-config.speed..=config.speed));
        }
        particles.push(Particle::new(r, v, config.radius)?);
    }

    debug!(
        count = particles.len(),
        width = domain.width,
        height = domain.height,
        "populated scenario"
    );
    Ok(particles)
}

fn check_radius(domain: &Domain, radius: f64, name: &str) -> Result<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(Error::InvalidInput(format!("{name} must be finite and > 0")));
    }
    if 2.0 * radius >= domain.width || 2.0 * radius >= domain.height {
        return Err(Error::InvalidInput(format!(
            "{name} {radius} does not fit in a {}x{} domain",
            domain.width, domain.height
        )));
    }
    Ok(())
}

/// Sample a center in `[radius, L - radius]` on each axis that clears every existing disc.
fn place(rng: &mut StdRng, domain: &Domain, existing: &[Particle], radius: f64) -> Result<Vec2> {
    for attempt in 1..=MAX_ATTEMPTS {
        let r = [
            rng.random_range(radius..=domain.width - radius),
            rng.random_range(radius..=domain.height - radius),
        ];
        if first_overlap(existing, &r, radius).is_none() {
            if attempt > CROWDED_ATTEMPTS {
                warn!(attempt, index = existing.len(), "slow particle placement");
            }
            return Ok(r);
        }
    }
    Err(Error::Placement(format!(
        "failed to place particle {} without overlap; try fewer particles or a smaller radius",
        existing.len()
    )))
}

/// Index of the first disc in `existing` that a disc of `radius` centered at `r` would
/// overlap. Touching is allowed.
pub(crate) fn first_overlap(existing: &[Particle], r: &Vec2, radius: f64) -> Option<usize> {
    existing.iter().position(|p| {
        let d = sub(r, &p.position());
        let min = radius + p.radius();
        dot(&d, &d) < min * min
    })
}
