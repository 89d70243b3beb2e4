//! Moving entity base
//!
//! Every simulated body (ship, projectile, asteroid) carries a [`Body`]: the
//! shared kinematic state plus liveness and an optional self-destruct timer.
//! The variant is a closed [`EntityKind`] tag; behaviour that differs per
//! variant is a `match` on it, or lives on the wrapper type that owns the body.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use super::asteroid::AsteroidSize;
use super::vector::{Position, Velocity};
use crate::SimError;

/// Stable entity identifier, allocated monotonically by the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Closed set of entity variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Projectile,
    Asteroid(AsteroidSize),
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Ship => "ship",
            EntityKind::Projectile => "projectile",
            EntityKind::Asteroid(AsteroidSize::Large) => "large asteroid",
            EntityKind::Asteroid(AsteroidSize::Medium) => "medium asteroid",
            EntityKind::Asteroid(AsteroidSize::Small) => "small asteroid",
        }
    }
}

/// Shared state of a moving entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Position,
    pub vel: Velocity,
    /// Collision radius
    pub radius: f32,
    /// Heading in radians, kept within [0, 2π]
    pub rotation: f32,
    /// Radians per second
    pub angular_vel: f32,
    mass: f32,
    alive: bool,
    /// Ticks left before self-destruct, if armed
    timer: Option<u32>,
    /// Points awarded when this body is destroyed
    pub score_value: u32,
}

impl Body {
    /// Create a body, rejecting a mass or radius that is not finite and positive
    pub fn new(
        id: EntityId,
        kind: EntityKind,
        pos: Position,
        vel: Velocity,
        radius: f32,
        mass: f32,
    ) -> Result<Self, SimError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidRadius(radius));
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidMass(mass));
        }
        Ok(Self::spawn(id, kind, pos, vel, radius, mass))
    }

    /// Construct from values already checked by [`crate::Tuning::validate`]
    pub(crate) fn spawn(
        id: EntityId,
        kind: EntityKind,
        pos: Position,
        vel: Velocity,
        radius: f32,
        mass: f32,
    ) -> Self {
        debug_assert!(radius > 0.0 && mass > 0.0, "unvalidated body: r={radius} m={mass}");
        Self {
            id,
            kind,
            pos,
            vel,
            radius,
            rotation: 0.0,
            angular_vel: 0.0,
            mass,
            alive: true,
            timer: None,
            score_value: 0,
        }
    }

    /// Arm the self-destruct timer
    pub fn with_timer(mut self, ticks: u32) -> Self {
        self.timer = Some(ticks);
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_spin(mut self, angular_vel: f32) -> Self {
        self.angular_vel = angular_vel;
        self
    }

    pub fn with_score(mut self, points: u32) -> Self {
        self.score_value = points;
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn timer(&self) -> Option<u32> {
        self.timer
    }

    /// Scalar momentum, `mass * speed`
    #[inline]
    pub fn momentum(&self) -> f32 {
        self.mass * self.vel.speed()
    }

    /// Destroy the body (no health, any hit is fatal)
    pub fn hit(&mut self) {
        if self.alive {
            log::debug!("{} #{} hit", self.kind.name(), self.id.0);
        }
        self.alive = false;
    }

    /// Base per-tick update: integrate, spin, count down
    pub fn update(&mut self, tick_rate: f32) {
        if !self.alive {
            return;
        }

        self.pos += self.vel;
        self.rotation = wrap_rotation(self.rotation + self.angular_vel / tick_rate);

        if let Some(ticks) = self.timer {
            if ticks <= 1 {
                self.alive = false;
            } else {
                self.timer = Some(ticks - 1);
            }
        }
    }
}

/// Keep a heading inside [0, 2π] by resetting, not by modulo.
///
/// Below zero snaps to exactly 2π and above 2π snaps to exactly 0, so any
/// overshoot past the boundary is discarded. Known quirk, kept on purpose.
#[inline]
pub fn wrap_rotation(rotation: f32) -> f32 {
    if rotation < 0.0 {
        TAU
    } else if rotation > TAU {
        0.0
    } else {
        rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body() -> Body {
        Body::new(
            EntityId(1),
            EntityKind::Projectile,
            Position::new(0.0, 0.0),
            Velocity::new(1.0, -2.0),
            1.0,
            5.0,
        )
        .unwrap()
    }

    #[test]
    fn test_update_integrates_position() {
        let mut b = body();
        b.update(60.0);
        b.update(60.0);
        assert_eq!(b.pos, Position::new(2.0, -4.0));
    }

    #[test]
    fn test_non_positive_mass_rejected() {
        let result = Body::new(
            EntityId(1),
            EntityKind::Ship,
            Position::ZERO,
            Velocity::ZERO,
            1.0,
            0.0,
        );
        assert!(matches!(result, Err(SimError::InvalidMass(_))));

        let result = Body::new(
            EntityId(1),
            EntityKind::Ship,
            Position::ZERO,
            Velocity::ZERO,
            1.0,
            f32::NAN,
        );
        assert!(matches!(result, Err(SimError::InvalidMass(_))));
    }

    #[test]
    fn test_zero_radius_rejected() {
        let result = Body::new(
            EntityId(1),
            EntityKind::Ship,
            Position::ZERO,
            Velocity::ZERO,
            0.0,
            1.0,
        );
        assert!(matches!(result, Err(SimError::InvalidRadius(_))));
    }

    #[test]
    fn test_timer_kills_on_nth_tick() {
        let mut b = body().with_timer(3);
        b.update(60.0);
        assert!(b.is_alive());
        b.update(60.0);
        assert!(b.is_alive());
        b.update(60.0);
        assert!(!b.is_alive());
    }

    #[test]
    fn test_rotation_advances_by_tick_fraction() {
        let mut b = body().with_spin(6.0);
        b.update(60.0);
        assert!((b.rotation - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_reset_quirk() {
        // Crossing 2π snaps to exactly 0 rather than keeping the overshoot
        let mut b = body().with_rotation(TAU - 0.05).with_spin(6.0);
        b.update(60.0);
        assert_eq!(b.rotation, 0.0);

        // Going below zero snaps to exactly 2π
        let mut b = body().with_rotation(0.05).with_spin(-6.0);
        b.update(60.0);
        assert_eq!(b.rotation, TAU);
    }

    #[test]
    fn test_rotation_reset_discards_full_revolutions() {
        // A spin large enough to cover several turns in one tick still lands on 0
        let mut b = body().with_rotation(1.0).with_spin(60.0 * 20.0);
        b.update(60.0);
        assert_eq!(b.rotation, 0.0);
    }

    #[test]
    fn test_hit_marks_dead() {
        let mut b = body();
        b.hit();
        assert!(!b.is_alive());
    }

    #[test]
    fn test_momentum_is_scalar() {
        let b = body();
        assert!((b.momentum() - 5.0 * 5.0f32.sqrt()).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_dead_update_is_noop(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            spin in -20.0f32..20.0,
            timer in proptest::option::of(0u32..100),
        ) {
            let mut b = Body::new(
                EntityId(9),
                EntityKind::Asteroid(AsteroidSize::Medium),
                Position::new(x, y),
                Velocity::new(vx, vy),
                8.0,
                50.0,
            )
            .unwrap()
            .with_spin(spin);
            if let Some(t) = timer {
                b = b.with_timer(t);
            }
            b.hit();
            let before = b.clone();
            b.update(60.0);
            prop_assert_eq!(b, before);
        }

        #[test]
        fn prop_timer_expires_exactly(n in 1u32..200) {
            let mut b = body().with_timer(n);
            for _ in 0..n - 1 {
                b.update(60.0);
            }
            prop_assert!(b.is_alive());
            b.update(60.0);
            prop_assert!(!b.is_alive());
        }
    }
}
