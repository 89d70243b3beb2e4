//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod collision;
pub mod entity;
pub mod projectile;
pub mod ship;
pub mod state;
pub mod tick;
pub mod vector;

pub use asteroid::{Asteroid, AsteroidSize, random_deviation, split_offsets};
pub use collision::{closest_approach, collides};
pub use entity::{Body, EntityId, EntityKind, wrap_rotation};
pub use projectile::Projectile;
pub use ship::{Ship, Turn};
pub use state::{Arena, ArenaSnapshot, EntitySnapshot, GameEvent, ScreenBounds};
pub use tick::{Collision, Impactor, TickInput, detect_collision, resolve_collision, tick};
pub use vector::{Acceleration, Force, Position, Velocity};
