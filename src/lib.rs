//! Rock Drift - an asteroids arena simulation core
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (kinematics, swept collisions, fragmentation, arena state)
//! - `renderer`: Render-surface seam the core draws through
//! - `tuning`: Data-driven game balance
//! - `error`: Construction-time contract violations

pub mod error;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::SimError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Nominal simulation rate (ticks per second)
    pub const TICK_RATE: f32 = 60.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 2.0;
    pub const SHIP_MASS: f32 = 200.0;
    /// Angular velocity while a rotate command is held (radians per second)
    pub const SHIP_ROTATE_SPEED: f32 = 15.0;
    /// Velocity added per tick of thrust
    pub const SHIP_THRUST: f32 = 2.0;
    /// Fraction of velocity removed by one brake impulse
    pub const SHIP_BRAKE: f32 = 1.0 / 10.0;
    /// Fraction of velocity removed by friction every tick
    pub const SHIP_FRICTION: f32 = 0.1 / 10.0;
    /// Speed above which the automatic limiter applies the brakes
    pub const SHIP_MAX_SPEED: f32 = 50.0;

    /// Weapon defaults
    pub const FIRE_DELAY: f32 = 0.05; // seconds
    pub const PROJECTILE_SPEED: f32 = 10.0; // units per tick
    pub const PROJECTILE_LIFETIME_TICKS: u32 = 20;
    pub const PROJECTILE_MASS: f32 = 5.0;
    pub const PROJECTILE_RADIUS: f32 = 1.0;
    /// Projectiles spawn this many ship radii ahead of the ship
    pub const MUZZLE_OFFSET: f32 = 6.0;

    /// Asteroid field defaults
    pub const INITIAL_ASTEROIDS: u32 = 5;
    /// Minimum distance between a fresh asteroid and the ship spawn point
    pub const SPAWN_BUFFER: f32 = 100.0;
    /// Force applied once to launch a fresh asteroid (velocity = force / mass)
    pub const ASTEROID_LAUNCH_FORCE: f32 = 100.0;
    /// Largest angular deviation between the two fragments of a split
    pub const MAX_SPLIT_ANGLE_DEG: f32 = 15.0;

    pub const LARGE_ASTEROID_RADIUS: f32 = 16.0;
    pub const LARGE_ASTEROID_MASS: f32 = 100.0;
    pub const LARGE_ASTEROID_SPIN: f32 = 2.0;
    pub const LARGE_ASTEROID_SCORE: u32 = 20;

    pub const MEDIUM_ASTEROID_RADIUS: f32 = 8.0;
    pub const MEDIUM_ASTEROID_MASS: f32 = 50.0;
    pub const MEDIUM_ASTEROID_SPIN: f32 = 5.0;
    pub const MEDIUM_ASTEROID_SCORE: u32 = 50;

    pub const SMALL_ASTEROID_RADIUS: f32 = 4.0;
    pub const SMALL_ASTEROID_MASS: f32 = 25.0;
    pub const SMALL_ASTEROID_SPIN: f32 = 10.0;
    pub const SMALL_ASTEROID_SCORE: u32 = 100;

    /// Extra distance past an entity's radius before it wraps
    pub const WRAP_MARGIN: f32 = 10.0;

    /// Screen pixels per simulation unit
    pub const PIXELS_PER_UNIT: f32 = 1.0;

    /// Default RNG seed
    pub const DEFAULT_SEED: u64 = 0x5eed_0f_a57e_401d;
}

/// Convert polar (magnitude, angle) to cartesian.
///
/// Angles are screen headings: 0 points up (+y) and positive angles turn
/// toward +x, so the components are `(m·sin a, m·cos a)`.
#[inline]
pub fn polar_to_cartesian(magnitude: f32, angle: f32) -> Vec2 {
    Vec2::new(magnitude * angle.sin(), magnitude * angle.cos())
}

/// Convert cartesian to polar (magnitude, angle), inverse of [`polar_to_cartesian`]
#[inline]
pub fn cartesian_to_polar(v: Vec2) -> (f32, f32) {
    (v.length(), v.x.atan2(v.y))
}
