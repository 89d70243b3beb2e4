//! Asteroids and their break-up rules
//!
//! Size drives everything: radius, mass, spin, score and what (if anything)
//! the asteroid breaks into. Large splits into two Medium, Medium into two
//! Small, Small is simply destroyed.

use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityId, EntityKind};
use super::vector::{Force, Position, Velocity};
use crate::tuning::{AsteroidClass, AsteroidTuning};

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Size of the fragments this asteroid breaks into
    pub fn next(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    pub fn class(self, tuning: &AsteroidTuning) -> &AsteroidClass {
        match self {
            AsteroidSize::Large => &tuning.large,
            AsteroidSize::Medium => &tuning.medium,
            AsteroidSize::Small => &tuning.small,
        }
    }
}

/// A drifting asteroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub body: Body,
    pub size: AsteroidSize,
}

impl Asteroid {
    /// Fresh asteroid launched in a random direction.
    ///
    /// Speed comes from applying the launch force to the asteroid's mass for
    /// one tick, so heavier classes drift slower.
    pub fn launch<R: Rng + ?Sized>(
        id: EntityId,
        size: AsteroidSize,
        pos: Position,
        rng: &mut R,
        tuning: &AsteroidTuning,
    ) -> Self {
        let class = size.class(tuning);
        let direction = rng.random_range(0.0..TAU);
        let vel = Force::from_polar(tuning.launch_force, direction)
            .acceleration(class.mass)
            .delta_velocity(1.0);
        Self::with_velocity(id, size, pos, vel, rng, tuning)
    }

    /// Asteroid with a known velocity (fragments)
    pub fn with_velocity<R: Rng + ?Sized>(
        id: EntityId,
        size: AsteroidSize,
        pos: Position,
        vel: Velocity,
        rng: &mut R,
        tuning: &AsteroidTuning,
    ) -> Self {
        let class = size.class(tuning);
        let spin = rng.random_range(class.spin / 2.0..=class.spin);
        let body = Body::spawn(id, EntityKind::Asteroid(size), pos, vel, class.radius, class.mass)
            .with_spin(spin)
            .with_score(class.score);
        Self { body, size }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    pub fn update(&mut self, tick_rate: f32) {
        self.body.update(tick_rate);
    }

    /// Break this asteroid apart after being struck by `impactor`.
    ///
    /// Returns `None` for Small asteroids. Each fragment starts at this
    /// asteroid's position with its velocity plus one of the two offsets from
    /// [`split_offsets`]. Does not kill anything; resolution does that.
    pub fn fragments<R: Rng + ?Sized>(
        &self,
        impactor: &Body,
        ids: [EntityId; 2],
        rng: &mut R,
        tuning: &AsteroidTuning,
    ) -> Option<[Asteroid; 2]> {
        let size = self.size.next()?;
        let deviation = random_deviation(rng, tuning.max_split_angle_deg);
        let (offset_a, offset_b) = split_offsets(&self.body, impactor, deviation);
        let pos = self.body.pos;
        let vel = self.body.vel;
        Some([
            Asteroid::with_velocity(ids[0], size, pos, vel + offset_a, rng, tuning),
            Asteroid::with_velocity(ids[1], size, pos, vel + offset_b, rng, tuning),
        ])
    }
}

/// Offset velocities for the two fragments of a split.
///
/// Momentum here is scalar (`mass * speed`), not a vector sum: the combined
/// speed is total momentum over total mass, and the heading is the plain
/// average of the impactor's and the asteroid's headings. The fragments fan
/// out `deviation` radians to either side of that heading.
pub fn split_offsets(asteroid: &Body, impactor: &Body, deviation: f32) -> (Velocity, Velocity) {
    let total_momentum = asteroid.momentum() + impactor.momentum();
    let total_mass = asteroid.mass() + impactor.mass();
    let speed = total_momentum / total_mass;
    let heading = (impactor.vel.angle_radians() + asteroid.vel.angle_radians()) / 2.0;
    (
        Velocity::from_polar(speed, heading - deviation),
        Velocity::from_polar(speed, heading + deviation),
    )
}

/// Uniform deviation in `[0, max_degrees]`, in radians
pub fn random_deviation<R: Rng + ?Sized>(rng: &mut R, max_degrees: f32) -> f32 {
    rng.random_range(0.0..=max_degrees).to_radians()
}
