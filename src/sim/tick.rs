//! Fixed timestep simulation tick
//!
//! One call advances the arena by one nominal tick, in a fixed order:
//! ship commands, fire, integrate, wrap, collide, clean up.

use super::collision::collides;
use super::entity::Body;
use super::ship::{Ship, Turn};
use super::state::{Arena, GameEvent};
use crate::tuning::ShipTuning;

/// Player intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start (or keep) rotating
    pub rotate: Option<Turn>,
    /// Stop rotating; applied before `rotate`, so a held turn still wins
    pub stop_rotating: bool,
    /// Thrust along the current heading
    pub thrust: bool,
    /// One-shot brake request
    pub brake: bool,
    /// Fire if the weapon is ready
    pub fire: bool,
}

/// What struck an asteroid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impactor {
    Ship,
    /// Index into `Arena::projectiles`
    Projectile(usize),
}

/// A detected asteroid hit, as indices into the arena's collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    /// Index into `Arena::asteroids`
    pub asteroid: usize,
    pub impactor: Impactor,
}

/// Advance the arena by one fixed tick and report what happened
pub fn tick(arena: &mut Arena, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    arena.time_ticks += 1;
    let tick_rate = arena.tuning.tick_rate;

    if let Some(ship) = arena.ship.as_mut() {
        apply_commands(ship, input, &arena.tuning.ship);
    }

    if input.fire {
        if let Some(id) = arena.fire() {
            events.push(GameEvent::ProjectileFired { id });
        }
    }

    // Integrate
    if let Some(ship) = arena.ship.as_mut() {
        ship.update(tick_rate, &arena.tuning.ship);
    }
    for projectile in &mut arena.projectiles {
        let was_alive = projectile.is_alive();
        projectile.update(tick_rate);
        if was_alive && !projectile.is_alive() {
            events.push(GameEvent::ProjectileExpired { id: projectile.body.id });
        }
    }
    for asteroid in &mut arena.asteroids {
        asteroid.update(tick_rate);
    }

    arena.wrap_all();

    if arena.ship.as_ref().is_some_and(Ship::is_alive) {
        if let Some(collision) = detect_collision(arena) {
            resolve_collision(arena, collision, &mut events);
        }
    }

    arena.remove_dead();
    if let Some(id) = arena.clear_dead_ship() {
        log::info!("Ship #{} lost, awaiting reset (score {})", id.0, arena.score);
    }

    events
}

fn apply_commands(ship: &mut Ship, input: &TickInput, tuning: &ShipTuning) {
    if input.stop_rotating {
        ship.stop_rotating();
    }
    if let Some(turn) = input.rotate {
        ship.rotate(turn, tuning);
    }
    if input.thrust {
        ship.thrust(tuning);
    }
    if input.brake {
        ship.apply_brakes();
    }
}

/// Find the first asteroid hit this tick.
///
/// Asteroids are scanned in collection order; for each one the ship is
/// checked first, then every projectile in order. The scan stops at the first
/// hit, so at most one collision is resolved per tick. Returns `None` when
/// there is no live ship.
pub fn detect_collision(arena: &Arena) -> Option<Collision> {
    let ship = arena.ship.as_ref().filter(|s| s.is_alive())?;

    for (asteroid_idx, asteroid) in arena.asteroids.iter().enumerate() {
        if !asteroid.is_alive() {
            continue;
        }

        if collides(&ship.body, &asteroid.body) {
            return Some(Collision {
                asteroid: asteroid_idx,
                impactor: Impactor::Ship,
            });
        }

        for (projectile_idx, projectile) in arena.projectiles.iter().enumerate() {
            if projectile.is_alive() && collides(&projectile.body, &asteroid.body) {
                return Some(Collision {
                    asteroid: asteroid_idx,
                    impactor: Impactor::Projectile(projectile_idx),
                });
            }
        }
    }

    None
}

/// Destroy, score and fragment the struck asteroid, then destroy the impactor
pub fn resolve_collision(arena: &mut Arena, collision: Collision, events: &mut Vec<GameEvent>) {
    let impactor: Option<Body> = match collision.impactor {
        Impactor::Ship => arena.ship.as_ref().map(|s| s.body.clone()),
        Impactor::Projectile(idx) => arena.projectiles.get(idx).map(|p| p.body.clone()),
    };
    let size = arena.asteroids.get(collision.asteroid).map(|a| a.size);
    let (Some(impactor), Some(size)) = (impactor, size) else {
        log::warn!("Stale collision {:?} ignored", collision);
        return;
    };

    let ids = size.next().map(|_| [arena.next_entity_id(), arena.next_entity_id()]);

    let asteroid = &arena.asteroids[collision.asteroid];
    log::debug!(
        "Collision between {} #{} and {} #{}",
        impactor.kind.name(),
        impactor.id.0,
        asteroid.body.kind.name(),
        asteroid.body.id.0
    );
    let fragments = ids.and_then(|ids| {
        asteroid.fragments(&impactor, ids, &mut arena.rng, &arena.tuning.asteroids)
    });

    let asteroid = &mut arena.asteroids[collision.asteroid];
    asteroid.body.hit();
    let (parent, points) = (asteroid.body.id, asteroid.body.score_value);
    arena.score += u64::from(points);
    events.push(GameEvent::AsteroidDestroyed {
        id: parent,
        size,
        points,
    });

    if let Some([a, b]) = fragments {
        log::debug!(
            "Split {:?} asteroid #{} into #{} and #{}",
            size,
            parent.0,
            a.body.id.0,
            b.body.id.0
        );
        events.push(GameEvent::AsteroidSplit {
            parent,
            children: [a.body.id, b.body.id],
        });
        arena.asteroids.push(a);
        arena.asteroids.push(b);
    }

    match collision.impactor {
        Impactor::Ship => {
            if let Some(ship) = arena.ship.as_mut() {
                ship.body.hit();
                events.push(GameEvent::ShipDestroyed { id: ship.body.id });
            }
        }
        Impactor::Projectile(idx) => {
            if let Some(projectile) = arena.projectiles.get_mut(idx) {
                projectile.body.hit();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::asteroid::{Asteroid, AsteroidSize};
    use crate::sim::projectile::Projectile;
    use crate::sim::state::ScreenBounds;
    use crate::sim::vector::{Position, Velocity};

    fn arena() -> Arena {
        let bounds = ScreenBounds::new(-500.0, 500.0, -500.0, 500.0).unwrap();
        Arena::new(bounds, Tuning::with_seed(12345)).unwrap()
    }

    /// Arena with the belt removed, so only hand-placed asteroids exist
    fn empty_arena() -> Arena {
        let mut arena = arena();
        arena.asteroids.clear();
        arena
    }

    fn place_asteroid(arena: &mut Arena, size: AsteroidSize, pos: Position, vel: Velocity) {
        let id = arena.next_entity_id();
        let tuning = &arena.tuning.asteroids;
        let asteroid = Asteroid::with_velocity(id, size, pos, vel, &mut arena.rng, tuning);
        arena.asteroids.push(asteroid);
    }

    fn place_projectile(arena: &mut Arena, pos: Position, heading: f32) {
        let id = arena.next_entity_id();
        let projectile = Projectile::new(id, pos, heading, &arena.tuning.projectile);
        arena.projectiles.push(projectile);
    }

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_reset_fire_and_expiry_scenario() {
        let mut arena = arena();
        let lifetime = arena.tuning().projectile.lifetime_ticks;
        let center = arena.bounds().center();
        assert_eq!(arena.ship.as_ref().unwrap().body.pos, center);
        assert_eq!(arena.asteroids.len(), 5);
        assert!(arena.asteroids.iter().all(|a| a.size == AsteroidSize::Large));
        assert!(arena.asteroids.iter().all(|a| a.body.pos.distance(center) >= 100.0));

        // Keep the shot clear of the belt
        arena.asteroids.clear();

        let events = tick(&mut arena, &fire());
        assert!(matches!(events[..], [GameEvent::ProjectileFired { .. }]));
        let events = tick(&mut arena, &fire());
        assert!(events.is_empty());
        assert_eq!(arena.projectiles.len(), 1);

        // Spawned and first updated on tick 1, so its last live tick is lifetime - 1
        for _ in 3..lifetime {
            tick(&mut arena, &TickInput::default());
        }
        assert_eq!(arena.time_ticks, u64::from(lifetime - 1));
        assert_eq!(arena.projectiles.len(), 1);
        assert!(arena.projectiles[0].is_alive());

        let events = tick(&mut arena, &TickInput::default());
        assert_eq!(arena.time_ticks, u64::from(lifetime));
        assert!(events.iter().any(|e| matches!(e, GameEvent::ProjectileExpired { .. })));
        assert!(arena.projectiles.is_empty());
    }

    #[test]
    fn test_small_asteroid_scores_exactly_and_leaves_nothing() {
        let mut arena = empty_arena();
        place_asteroid(&mut arena, AsteroidSize::Small, Position::new(0.0, 50.0), Velocity::ZERO);
        place_projectile(&mut arena, Position::new(0.0, 40.0), 0.0);
        let rock = arena.asteroids[0].body.id;
        let worth = arena.asteroids[0].body.score_value;

        let events = tick(&mut arena, &TickInput::default());

        assert_eq!(arena.score, u64::from(worth));
        assert!(arena.asteroids.is_empty());
        assert!(arena.projectiles.is_empty());
        assert!(!events.iter().any(|e| matches!(e, GameEvent::AsteroidSplit { .. })));
        assert!(events.contains(&GameEvent::AsteroidDestroyed {
            id: rock,
            size: AsteroidSize::Small,
            points: worth,
        }));
    }

    #[test]
    fn test_large_asteroid_splits_into_two_medium() {
        let mut arena = empty_arena();
        let rock_vel = Velocity::new(0.5, 0.0);
        place_asteroid(&mut arena, AsteroidSize::Large, Position::new(0.0, 100.0), rock_vel);
        place_projectile(&mut arena, Position::new(0.0, 75.0), 0.0);

        let events = tick(&mut arena, &TickInput::default());

        assert_eq!(arena.score, u64::from(arena.tuning().asteroids.large.score));
        assert_eq!(arena.asteroids.len(), 2);
        assert!(arena.asteroids.iter().all(|a| a.size == AsteroidSize::Medium && a.is_alive()));
        // Fragments start where the parent was after this tick's move
        for a in &arena.asteroids {
            assert_eq!(a.body.pos, Position::new(0.5, 100.0));
        }
        assert!(events.iter().any(|e| matches!(e, GameEvent::AsteroidSplit { .. })));
        assert!(arena.projectiles.is_empty());
    }

    #[test]
    fn test_ship_collision_kills_ship_and_splits() {
        let mut arena = empty_arena();
        let center = arena.bounds().center();
        place_asteroid(&mut arena, AsteroidSize::Medium, center, Velocity::ZERO);

        let events = tick(&mut arena, &TickInput::default());

        assert!(arena.ship.is_none());
        assert!(events.iter().any(|e| matches!(e, GameEvent::ShipDestroyed { .. })));
        assert_eq!(arena.score, u64::from(arena.tuning().asteroids.medium.score));
        assert_eq!(arena.asteroids.len(), 2);
        assert!(arena.asteroids.iter().all(|a| a.size == AsteroidSize::Small));
    }

    #[test]
    fn test_ship_hit_takes_priority_over_projectiles() {
        let mut arena = empty_arena();
        let center = arena.bounds().center();
        place_asteroid(&mut arena, AsteroidSize::Small, center, Velocity::ZERO);
        place_projectile(&mut arena, center, 0.0);

        tick(&mut arena, &TickInput::default());

        assert!(arena.ship.is_none());
        assert_eq!(arena.projectiles.len(), 1);
        assert!(arena.projectiles[0].is_alive());
    }

    #[test]
    fn test_one_collision_resolved_per_tick() {
        let mut arena = empty_arena();
        let (left, right) = (Position::new(-200.0, 50.0), Position::new(200.0, 50.0));
        place_asteroid(&mut arena, AsteroidSize::Small, left, Velocity::ZERO);
        place_asteroid(&mut arena, AsteroidSize::Small, right, Velocity::ZERO);
        place_projectile(&mut arena, Position::new(-200.0, 40.0), 0.0);
        place_projectile(&mut arena, Position::new(200.0, 40.0), 0.0);
        let worth = u64::from(arena.tuning().asteroids.small.score);

        tick(&mut arena, &TickInput::default());
        assert_eq!(arena.score, worth);
        assert_eq!(arena.asteroids.len(), 1);
        assert_eq!(arena.projectiles.len(), 1);

        // The second pair is still overlapping and resolves next tick
        let second = detect_collision(&arena);
        assert!(second.is_some());
    }

    #[test]
    fn test_first_projectile_wins() {
        let mut arena = empty_arena();
        place_asteroid(&mut arena, AsteroidSize::Small, Position::new(0.0, 200.0), Velocity::ZERO);
        place_projectile(&mut arena, Position::new(0.0, 200.0), std::f32::consts::PI);
        place_projectile(&mut arena, Position::new(0.0, 200.0), 0.0);

        let collision = detect_collision(&arena).unwrap();
        assert_eq!(collision.impactor, Impactor::Projectile(0));
    }

    #[test]
    fn test_dead_entities_never_collide() {
        let mut arena = empty_arena();
        place_asteroid(&mut arena, AsteroidSize::Small, Position::new(0.0, 200.0), Velocity::ZERO);
        place_projectile(&mut arena, Position::new(0.0, 200.0), 0.0);
        arena.projectiles[0].body.hit();
        assert!(detect_collision(&arena).is_none());

        place_projectile(&mut arena, Position::new(0.0, 200.0), 0.0);
        arena.asteroids[0].body.hit();
        assert!(detect_collision(&arena).is_none());
    }

    #[test]
    fn test_no_collision_checks_without_ship() {
        let mut arena = empty_arena();
        place_asteroid(&mut arena, AsteroidSize::Small, Position::new(0.0, 200.0), Velocity::ZERO);
        place_projectile(&mut arena, Position::new(0.0, 200.0), 0.0);
        arena.ship = None;

        let events = tick(&mut arena, &fire());
        assert!(events.is_empty());
        assert_eq!(arena.score, 0);
        assert_eq!(arena.asteroids.len(), 1);
    }

    #[test]
    fn test_input_drives_ship() {
        let mut arena = empty_arena();
        let input = TickInput {
            rotate: Some(Turn::Right),
            thrust: true,
            ..Default::default()
        };
        tick(&mut arena, &input);
        let ship = arena.ship.as_ref().unwrap();
        assert!(ship.body.angular_vel < 0.0);
        assert!(ship.body.vel.y() > 0.0);
        // Rotating right from 0 drops below zero and snaps to 2π
        assert_eq!(ship.body.rotation, std::f32::consts::TAU);

        let stop = TickInput {
            stop_rotating: true,
            ..Default::default()
        };
        tick(&mut arena, &stop);
        assert_eq!(arena.ship.as_ref().unwrap().body.angular_vel, 0.0);
    }

    #[test]
    fn test_entities_wrap_during_tick() {
        let mut arena = empty_arena();
        let (pos, vel) = (Position::new(520.0, 0.0), Velocity::new(5.0, 0.0));
        place_asteroid(&mut arena, AsteroidSize::Large, pos, vel);
        tick(&mut arena, &TickInput::default());
        let buffer = arena.tuning().asteroids.large.radius + arena.tuning().wrap_margin;
        // Still inside the right-hand buffer
        assert_eq!(arena.asteroids[0].body.pos.x(), 525.0);
        tick(&mut arena, &TickInput::default());
        assert_eq!(arena.asteroids[0].body.pos.x(), -500.0 - buffer);
    }

    #[test]
    fn test_fast_projectile_tuning_keeps_ticking() {
        let bounds = ScreenBounds::new(-500.0, 500.0, -500.0, 500.0).unwrap();
        let mut tuning = Tuning::with_seed(12345);
        tuning.projectile.speed = 3.0e7;
        let mut arena = Arena::new(bounds, tuning).unwrap();
        for _ in 0..5 {
            tick(&mut arena, &fire());
        }
        assert_eq!(arena.time_ticks, 5);
    }

    #[test]
    fn test_tick_counter_advances() {
        let mut arena = arena();
        tick(&mut arena, &TickInput::default());
        tick(&mut arena, &TickInput::default());
        assert_eq!(arena.time_ticks, 2);
    }

    #[test]
    fn test_determinism() {
        let mut a = arena();
        let mut b = arena();
        let inputs = [
            fire(),
            TickInput {
                rotate: Some(Turn::Left),
                thrust: true,
                ..Default::default()
            },
            fire(),
            TickInput::default(),
        ];
        for _ in 0..50 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
