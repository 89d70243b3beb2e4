//! Projectiles fired by the ship

use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityId, EntityKind};
use super::vector::{Position, Velocity};
use crate::tuning::ProjectileTuning;

/// Straight-line shot that expires after a fixed number of ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
}

impl Projectile {
    pub fn new(id: EntityId, pos: Position, heading: f32, tuning: &ProjectileTuning) -> Self {
        let body = Body::spawn(
            id,
            EntityKind::Projectile,
            pos,
            Velocity::forward(heading) * tuning.speed,
            tuning.radius,
            tuning.mass,
        )
        .with_rotation(heading)
        .with_timer(tuning.lifetime_ticks);
        Self { body }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    pub fn update(&mut self, tick_rate: f32) {
        self.body.update(tick_rate);
    }
}
