//! The player's ship

use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityId, EntityKind};
use super::projectile::Projectile;
use super::vector::{Position, Velocity};
use crate::tuning::{ProjectileTuning, ShipTuning};

/// Rotation direction for the rotate command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    /// Counter-clockwise (positive angular velocity)
    Left,
    /// Clockwise (negative angular velocity)
    Right,
}

/// Player-controlled entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    /// One-shot brake request, cleared after it is applied
    pub brake: bool,
    /// Continuous drag, always on for the player ship
    pub friction: bool,
    /// Seconds until the weapon may fire again
    pub fire_cooldown: f32,
}

impl Ship {
    /// Fresh ship at rest, pointing up
    pub fn new(id: EntityId, pos: Position, tuning: &ShipTuning) -> Self {
        Self {
            body: Body::spawn(
                id,
                EntityKind::Ship,
                pos,
                Velocity::ZERO,
                tuning.radius,
                tuning.mass,
            ),
            brake: false,
            friction: true,
            fire_cooldown: 0.0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    /// Unit vector along the current heading
    #[inline]
    pub fn forward(&self) -> Velocity {
        Velocity::forward(self.body.rotation)
    }

    /// Start rotating; takes effect on the next update
    pub fn rotate(&mut self, turn: Turn, tuning: &ShipTuning) {
        if !self.is_alive() {
            return;
        }
        self.body.angular_vel = match turn {
            Turn::Left => tuning.rotate_speed,
            Turn::Right => -tuning.rotate_speed,
        };
    }

    pub fn stop_rotating(&mut self) {
        self.body.angular_vel = 0.0;
    }

    /// Request a brake impulse on the next update
    pub fn apply_brakes(&mut self) {
        self.brake = true;
    }

    /// Accelerate along the current heading
    pub fn thrust(&mut self, tuning: &ShipTuning) {
        if !self.is_alive() {
            return;
        }
        self.body.vel += self.forward() * tuning.thrust;
    }

    #[inline]
    pub fn can_fire(&self) -> bool {
        self.is_alive() && self.fire_cooldown <= 0.0
    }

    /// Fire a projectile if the weapon is ready, resetting the cooldown.
    ///
    /// The projectile leaves from just ahead of the nose at a fixed speed;
    /// the ship's own velocity is not added.
    pub fn fire(
        &mut self,
        id: EntityId,
        ship: &ShipTuning,
        projectile: &ProjectileTuning,
    ) -> Option<Projectile> {
        if !self.can_fire() {
            return None;
        }
        let heading = self.body.rotation;
        let reach = self.body.radius * ship.muzzle_offset;
        let muzzle = self.body.pos + self.forward().displacement(reach);
        self.fire_cooldown = ship.fire_delay;
        Some(Projectile::new(id, muzzle, heading, projectile))
    }

    /// Per-tick update: base integration, then brakes, friction, cooldown and
    /// the speed limiter
    pub fn update(&mut self, tick_rate: f32, tuning: &ShipTuning) {
        self.body.update(tick_rate);
        if !self.is_alive() {
            return;
        }

        if self.brake {
            self.body.vel += -self.body.vel * tuning.brake;
        }
        self.brake = false;

        if self.friction {
            self.body.vel += -self.body.vel * tuning.friction;
        }

        // Counts down while non-negative, so it settles one step below zero
        if self.fire_cooldown >= 0.0 {
            self.fire_cooldown -= 1.0 / tick_rate;
        }

        // Limiter engages the brakes for the next tick
        if self.body.vel.speed() > tuning.max_speed {
            log::trace!("ship #{} at max speed {}", self.body.id.0, tuning.max_speed);
            self.apply_brakes();
        }
    }
}
