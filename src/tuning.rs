//! Game balance values
//!
//! Every gameplay constant the simulation reads lives here so a field can be
//! re-tuned from a JSON file without recompiling. Defaults mirror
//! [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::SimError;
use crate::consts::*;

/// Ship handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    pub radius: f32,
    pub mass: f32,
    /// Radians per second while rotating
    pub rotate_speed: f32,
    /// Velocity added per tick of thrust
    pub thrust: f32,
    /// Fraction of velocity removed per brake impulse
    pub brake: f32,
    /// Fraction of velocity removed every tick
    pub friction: f32,
    /// Speed that trips the automatic brake
    pub max_speed: f32,
    /// Seconds between shots
    pub fire_delay: f32,
    /// Projectile spawn distance ahead of the ship, in ship radii
    pub muzzle_offset: f32,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            radius: SHIP_RADIUS,
            mass: SHIP_MASS,
            rotate_speed: SHIP_ROTATE_SPEED,
            thrust: SHIP_THRUST,
            brake: SHIP_BRAKE,
            friction: SHIP_FRICTION,
            max_speed: SHIP_MAX_SPEED,
            fire_delay: FIRE_DELAY,
            muzzle_offset: MUZZLE_OFFSET,
        }
    }
}

/// Projectile behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub radius: f32,
    pub mass: f32,
    /// Units per tick
    pub speed: f32,
    /// Ticks before the projectile expires
    pub lifetime_ticks: u32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            radius: PROJECTILE_RADIUS,
            mass: PROJECTILE_MASS,
            speed: PROJECTILE_SPEED,
            lifetime_ticks: PROJECTILE_LIFETIME_TICKS,
        }
    }
}

/// Per-size asteroid properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidClass {
    pub radius: f32,
    pub mass: f32,
    /// Upper bound of the spin range; spin is drawn from `[spin / 2, spin]`
    pub spin: f32,
    /// Points awarded when destroyed
    pub score: u32,
}

/// Asteroid field generation and break-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidTuning {
    pub large: AsteroidClass,
    pub medium: AsteroidClass,
    pub small: AsteroidClass,
    /// Launch force for fresh asteroids (speed = force / mass)
    pub launch_force: f32,
    /// Large asteroids spawned by a reset
    pub initial_count: u32,
    /// Keep-out radius around the ship spawn point
    pub spawn_buffer: f32,
    /// Max fragment deviation from the averaged heading (degrees)
    pub max_split_angle_deg: f32,
}

impl Default for AsteroidTuning {
    fn default() -> Self {
        Self {
            large: AsteroidClass {
                radius: LARGE_ASTEROID_RADIUS,
                mass: LARGE_ASTEROID_MASS,
                spin: LARGE_ASTEROID_SPIN,
                score: LARGE_ASTEROID_SCORE,
            },
            medium: AsteroidClass {
                radius: MEDIUM_ASTEROID_RADIUS,
                mass: MEDIUM_ASTEROID_MASS,
                spin: MEDIUM_ASTEROID_SPIN,
                score: MEDIUM_ASTEROID_SCORE,
            },
            small: AsteroidClass {
                radius: SMALL_ASTEROID_RADIUS,
                mass: SMALL_ASTEROID_MASS,
                spin: SMALL_ASTEROID_SPIN,
                score: SMALL_ASTEROID_SCORE,
            },
            launch_force: ASTEROID_LAUNCH_FORCE,
            initial_count: INITIAL_ASTEROIDS,
            spawn_buffer: SPAWN_BUFFER,
            max_split_angle_deg: MAX_SPLIT_ANGLE_DEG,
        }
    }
}

/// Complete game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// RNG seed for spawn positions and split angles
    pub seed: u64,
    /// Ticks per second
    pub tick_rate: f32,
    /// Distance past an entity's radius before it wraps
    pub wrap_margin: f32,
    /// Screen pixels per simulation unit (used by the renderer only)
    pub pixels_per_unit: f32,

    // === Entities ===
    pub ship: ShipTuning,
    pub projectile: ProjectileTuning,
    pub asteroids: AsteroidTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tick_rate: TICK_RATE,
            wrap_margin: WRAP_MARGIN,
            pixels_per_unit: PIXELS_PER_UNIT,
            ship: ShipTuning::default(),
            projectile: ProjectileTuning::default(),
            asteroids: AsteroidTuning::default(),
        }
    }
}

impl Tuning {
    /// Default balance with a different seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Load tuning from a JSON file; missing fields fall back to defaults
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning: Self = serde_json::from_str(&json)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check every value the simulation divides by or relies on being positive
    pub fn validate(&self) -> Result<(), SimError> {
        positive("tick_rate", self.tick_rate)?;
        positive("pixels_per_unit", self.pixels_per_unit)?;
        non_negative("wrap_margin", self.wrap_margin)?;

        body(self.ship.radius, self.ship.mass)?;
        non_negative("ship.rotate_speed", self.ship.rotate_speed)?;
        non_negative("ship.thrust", self.ship.thrust)?;
        fraction("ship.brake", self.ship.brake)?;
        fraction("ship.friction", self.ship.friction)?;
        positive("ship.max_speed", self.ship.max_speed)?;
        non_negative("ship.fire_delay", self.ship.fire_delay)?;
        non_negative("ship.muzzle_offset", self.ship.muzzle_offset)?;

        body(self.projectile.radius, self.projectile.mass)?;
        positive("projectile.speed", self.projectile.speed)?;
        if self.projectile.lifetime_ticks == 0 {
            return Err(SimError::InvalidTuning(
                "projectile.lifetime_ticks must be at least 1".into(),
            ));
        }

        let asteroids = &self.asteroids;
        for class in [&asteroids.large, &asteroids.medium, &asteroids.small] {
            body(class.radius, class.mass)?;
            non_negative("asteroids.spin", class.spin)?;
        }
        non_negative("asteroids.launch_force", asteroids.launch_force)?;
        non_negative("asteroids.spawn_buffer", asteroids.spawn_buffer)?;
        non_negative("asteroids.max_split_angle_deg", asteroids.max_split_angle_deg)?;
        Ok(())
    }
}

fn body(radius: f32, mass: f32) -> Result<(), SimError> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(SimError::InvalidRadius(radius));
    }
    if !(mass.is_finite() && mass > 0.0) {
        return Err(SimError::InvalidMass(mass));
    }
    Ok(())
}

fn positive(name: &str, value: f32) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidTuning(format!("{name} must be positive, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), SimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidTuning(format!("{name} must not be negative, got {value}")))
    }
}

fn fraction(name: &str, value: f32) -> Result<(), SimError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimError::InvalidTuning(format!("{name} must be within [0, 1], got {value}")))
    }
}
