//! Arena state and lifecycle
//!
//! The arena owns every live entity plus score, level and screen bounds. All
//! mutation happens from [`super::tick::tick`], [`Arena::reset`] or
//! [`Arena::advance_level`]; nothing runs in the background.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, AsteroidSize};
use super::entity::{Body, EntityId, EntityKind};
use super::projectile::Projectile;
use super::ship::Ship;
use super::vector::Position;
use crate::{SimError, Tuning};

/// Screen rectangle used for wrapping and spawn placement (y grows upward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl ScreenBounds {
    /// Bounds from two x extents and two y extents.
    ///
    /// Each axis may be given in either order: the smaller x becomes `left`
    /// and the smaller y becomes `bottom`. Zero width or height is rejected.
    pub fn new(x1: f32, x2: f32, y1: f32, y2: f32) -> Result<Self, SimError> {
        let all_finite = [x1, x2, y1, y2].iter().all(|v| v.is_finite());
        if !all_finite {
            return Err(SimError::InvalidBounds("coordinates must be finite".into()));
        }
        if x1 == x2 {
            return Err(SimError::InvalidBounds(format!("zero width at x = {x1}")));
        }
        if y1 == y2 {
            return Err(SimError::InvalidBounds(format!("zero height at y = {y1}")));
        }
        Ok(Self {
            left: x1.min(x2),
            right: x1.max(x2),
            top: y1.max(y2),
            bottom: y1.min(y2),
        })
    }

    /// Logical center of the field
    pub fn center(&self) -> Position {
        Position::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Uniform random point inside the rectangle
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(
            rng.random_range(self.left..self.right),
            rng.random_range(self.bottom..self.top),
        )
    }

    /// Teleport a body that has left the screen to the opposite edge.
    ///
    /// The threshold is the screen edge plus the body's radius plus `margin`.
    /// X and y are checked independently, so a body can wrap on both axes in
    /// one pass but never twice on the same axis.
    pub fn wrap(&self, body: &mut Body, margin: f32) {
        let buffer = body.radius + margin;

        if body.pos.x() < self.left - buffer {
            body.pos.set_x(self.right + buffer);
        } else if body.pos.x() > self.right + buffer {
            body.pos.set_x(self.left - buffer);
        }

        if body.pos.y() < self.bottom - buffer {
            body.pos.set_y(self.top + buffer);
        } else if body.pos.y() > self.top + buffer {
            body.pos.set_y(self.bottom - buffer);
        }
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileFired { id: EntityId },
    AsteroidDestroyed { id: EntityId, size: AsteroidSize, points: u32 },
    AsteroidSplit { parent: EntityId, children: [EntityId; 2] },
    ShipDestroyed { id: EntityId },
    ProjectileExpired { id: EntityId },
}

/// Drawable view of one live entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Position,
    pub rotation: f32,
    pub radius: f32,
}

impl From<&Body> for EntitySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id,
            kind: body.kind,
            pos: body.pos,
            rotation: body.rotation,
            radius: body.radius,
        }
    }
}

/// Read-only frame for the render layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub tick: u64,
    pub score: u64,
    pub level: u32,
    pub bounds: ScreenBounds,
    pub entities: Vec<EntitySnapshot>,
}

/// Owning container and tick driver for all entities
#[derive(Debug, Clone)]
pub struct Arena {
    /// Player ship; `None` while awaiting a reset after death
    pub ship: Option<Ship>,
    /// Live projectiles in spawn order
    pub projectiles: Vec<Projectile>,
    /// Live asteroids in spawn order
    pub asteroids: Vec<Asteroid>,
    pub score: u64,
    pub level: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(super) bounds: ScreenBounds,
    pub(super) tuning: Tuning,
    pub(super) rng: Pcg32,
    next_id: u32,
}

impl Arena {
    /// Validate the tuning and start a new game
    pub fn new(bounds: ScreenBounds, tuning: Tuning) -> Result<Self, SimError> {
        // Re-run checks in case the bounds were built as a literal
        let bounds = ScreenBounds::new(bounds.left, bounds.right, bounds.top, bounds.bottom)?;
        tuning.validate()?;

        let mut arena = Self {
            ship: None,
            projectiles: Vec::new(),
            asteroids: Vec::new(),
            score: 0,
            level: 1,
            time_ticks: 0,
            bounds,
            rng: Pcg32::seed_from_u64(tuning.seed),
            tuning,
            next_id: 1,
        };
        arena.reset();
        Ok(arena)
    }

    #[inline]
    pub fn bounds(&self) -> &ScreenBounds {
        &self.bounds
    }

    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// New game: fresh ship, empty sky of projectiles, new belt, zero score
    pub fn reset(&mut self) {
        self.level = 1;
        self.score = 0;
        self.populate();
        log::info!(
            "New game: {} asteroids, ship at ({}, {})",
            self.asteroids.len(),
            self.bounds.center().x(),
            self.bounds.center().y()
        );
    }

    /// Next level: same as a reset but the score carries over
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.populate();
        log::info!("Level {}: {} asteroids", self.level, self.asteroids.len());
    }

    /// True once every asteroid has been destroyed
    pub fn field_cleared(&self) -> bool {
        !self.asteroids.iter().any(Asteroid::is_alive)
    }

    fn populate(&mut self) {
        self.spawn_ship();
        self.projectiles.clear();
        self.asteroids.clear();
        self.asteroid_belt();
    }

    /// Replace the ship with a fresh one at the center of the field
    pub fn spawn_ship(&mut self) {
        let id = self.next_entity_id();
        self.ship = Some(Ship::new(id, self.bounds.center(), &self.tuning.ship));
    }

    /// Spawn the initial Large asteroids away from the ship spawn point
    fn asteroid_belt(&mut self) {
        let spawn_point = self.bounds.center();
        for _ in 0..self.tuning.asteroids.initial_count {
            let pos = self.clear_spawn_point(spawn_point);
            let id = self.next_entity_id();
            let tuning = &self.tuning.asteroids;
            let asteroid = Asteroid::launch(id, AsteroidSize::Large, pos, &mut self.rng, tuning);
            self.asteroids.push(asteroid);
        }
    }

    /// Random point at least `spawn_buffer` from `keep_out`, redrawn until it is.
    ///
    /// A buffer larger than the field could never be satisfied; it is capped
    /// at half the shorter screen side so the loop always terminates.
    fn clear_spawn_point(&mut self, keep_out: Position) -> Position {
        let cap = self.bounds.width().min(self.bounds.height()) / 2.0;
        let buffer = self.tuning.asteroids.spawn_buffer.min(cap);
        loop {
            let pos = self.bounds.random_point(&mut self.rng);
            if pos.distance(keep_out) >= buffer {
                return pos;
            }
            log::trace!("Spawn ({}, {}) within buffer, redrawing", pos.x(), pos.y());
        }
    }

    /// Fire from the ship if it exists and its weapon is ready
    pub fn fire(&mut self) -> Option<EntityId> {
        let ship = self.ship.as_mut()?;
        if !ship.can_fire() {
            return None;
        }
        let id = EntityId(self.next_id);
        let projectile = ship.fire(id, &self.tuning.ship, &self.tuning.projectile)?;
        self.next_id += 1;
        self.projectiles.push(projectile);
        Some(id)
    }

    /// Wrap every entity across the screen edges
    pub fn wrap_all(&mut self) {
        let margin = self.tuning.wrap_margin;
        let bounds = self.bounds;
        if let Some(ship) = self.ship.as_mut() {
            bounds.wrap(&mut ship.body, margin);
        }
        for p in &mut self.projectiles {
            bounds.wrap(&mut p.body, margin);
        }
        for a in &mut self.asteroids {
            bounds.wrap(&mut a.body, margin);
        }
    }

    /// Remove the first dead projectile and the first dead asteroid.
    ///
    /// At most one entry per collection is reclaimed per call. Several deaths
    /// in one tick drain over the following ticks; dead entries are inert
    /// until then since nothing updates, draws or collides them.
    pub fn remove_dead(&mut self) {
        if let Some(id) = remove_first_dead(&mut self.projectiles, |p| &p.body) {
            log::trace!("Removed projectile #{}", id.0);
        }
        if let Some(id) = remove_first_dead(&mut self.asteroids, |a| &a.body) {
            log::debug!("Removed asteroid #{}", id.0);
        }
    }

    /// Drop the ship if it died; returns its id
    pub fn clear_dead_ship(&mut self) -> Option<EntityId> {
        match &self.ship {
            Some(ship) if !ship.is_alive() => {
                let id = ship.body.id;
                self.ship = None;
                Some(id)
            }
            _ => None,
        }
    }

    /// Every live body: ship first, then projectiles, then asteroids
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.ship
            .iter()
            .map(|s| &s.body)
            .chain(self.projectiles.iter().map(|p| &p.body))
            .chain(self.asteroids.iter().map(|a| &a.body))
            .filter(|b| b.is_alive())
    }

    pub fn snapshot(&self) -> ArenaSnapshot {
        ArenaSnapshot {
            tick: self.time_ticks,
            score: self.score,
            level: self.level,
            bounds: self.bounds,
            entities: self.bodies().map(EntitySnapshot::from).collect(),
        }
    }
}

fn remove_first_dead<T>(items: &mut Vec<T>, body: impl Fn(&T) -> &Body) -> Option<EntityId> {
    let index = items.iter().position(|item| !body(item).is_alive())?;
    Some(body(&items.remove(index)).id)
}
