use brownsim::core::{CollisionSystem, Domain, EventKind, Particle};
use brownsim::error::Result;

/// Two unit discs 10 apart closing at speed 2 touch when their centers are 2 apart: t = 4.
/// Equal masses swap velocities exactly.
#[test]
fn head_on_equal_masses_swap_at_t4() -> Result<()> {
    // Offset from the origin so both discs start inside the box, far from the walls.
    let a = Particle::with_mass([100.0, 100.0], [1.0, 0.0], 1.0, 1.0)?;
    let b = Particle::with_mass([110.0, 100.0], [-1.0, 0.0], 1.0, 1.0)?;
    let mut sim = CollisionSystem::new(vec![a, b], Domain::new(500.0, 200.0)?)?;

    let ev = sim.step()?.expect("pair should collide");
    assert!(matches!(ev.kind(), EventKind::ParticleParticle { .. }));
    assert!((ev.time() - 4.0).abs() < 1e-12, "collision at {}", ev.time());
    assert_eq!(sim.particles()[0].velocity(), [-1.0, 0.0]);
    assert_eq!(sim.particles()[1].velocity(), [1.0, 0.0]);
    Ok(())
}

/// The same pair driven through `advance` instead of `step`.
#[test]
fn head_on_through_advance() -> Result<()> {
    let a = Particle::with_mass([100.0, 100.0], [1.0, 0.0], 1.0, 1.0)?;
    let b = Particle::with_mass([110.0, 100.0], [-1.0, 0.0], 1.0, 1.0)?;
    let mut sim = CollisionSystem::new(vec![a, b], Domain::new(500.0, 200.0)?)?;

    sim.advance(3.5)?;
    assert_eq!(sim.stats().particle_collisions, 0);
    assert_eq!(sim.particles()[0].velocity(), [1.0, 0.0]);

    sim.advance(1.0)?;
    assert_eq!(sim.stats().particle_collisions, 1);
    assert_eq!(sim.time(), 4.5);
    // Half a time unit after contact at x = 104 / 106, moving apart.
    assert!((sim.particles()[0].position()[0] - 103.5).abs() < 1e-12);
    assert!((sim.particles()[1].position()[0] - 106.5).abs() < 1e-12);
    Ok(())
}

/// Radius 5 at x = 5 moving right at 2 in a 100-wide box reaches x = 95 at t = 45.
#[test]
fn single_particle_vertical_wall_at_t45() -> Result<()> {
    let p = Particle::new([5.0, 50.0], [2.0, 0.0], 5.0)?;
    let mut sim = CollisionSystem::new(vec![p], Domain::new(100.0, 100.0)?)?;

    sim.advance(44.0)?;
    assert_eq!(sim.stats().events_applied(), 0);

    let ev = sim.step()?.expect("wall ahead");
    assert_eq!(ev.kind(), EventKind::VerticalWall { particle: 0 });
    assert!((ev.time() - 45.0).abs() < 1e-12);
    assert_eq!(sim.particles()[0].velocity(), [-2.0, 0.0]);
    assert!((sim.particles()[0].position()[0] - 95.0).abs() < 1e-12);

    let stats = sim.stats();
    assert_eq!(stats.vertical_wall_collisions, 1);
    assert_eq!(stats.horizontal_wall_collisions, 0);
    assert_eq!(stats.particle_collisions, 0);
    Ok(())
}

/// A particle that never moves produces no events and simply keeps time.
#[test]
fn resting_particle_has_no_events() -> Result<()> {
    let p = Particle::new([50.0, 50.0], [0.0, 0.0], 5.0)?;
    let mut sim = CollisionSystem::new(vec![p], Domain::new(100.0, 100.0)?)?;
    assert_eq!(sim.pending_events(), 0);
    assert!(sim.step()?.is_none());
    sim.advance(1e6)?;
    assert_eq!(sim.time(), 1e6);
    assert_eq!(sim.particles()[0].position(), [50.0, 50.0]);
    Ok(())
}

/// Scenario loaded from JSON behaves like the hand-built one.
#[test]
fn scenario_from_json() -> Result<()> {
    let config = brownsim::config::ScenarioConfig::from_json_str(
        r#"{
            "domain": { "width": 100.0, "height": 100.0 },
            "particles": [ { "position": [5.0, 50.0], "velocity": [2.0, 0.0], "radius": 5.0 } ]
        }"#,
    )?;
    let mut sim = CollisionSystem::from_config(&config)?;
    let ev = sim.step()?.expect("wall ahead");
    assert!((ev.time() - 45.0).abs() < 1e-12);
    Ok(())
}
