//! Render-surface seam
//!
//! The simulation never draws directly. A frontend implements
//! [`RenderSurface`] and [`render_frame`] walks the arena once per frame,
//! issuing one draw call per live entity plus the score and level labels.

pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList};

use glam::Vec2;

use crate::sim::entity::EntityKind;
use crate::sim::state::Arena;

/// Label inset from the left edge (world units)
const SCORE_INSET: f32 = 10.0;
/// Label inset from the right edge, wide enough for "Level: NN"
const LEVEL_INSET: f32 = 55.0;
/// Label drop below the top edge
const LABEL_DROP: f32 = 15.0;

/// Drawing primitives a frontend provides, all in pixels
pub trait RenderSurface {
    fn draw_dot(&mut self, pos: Vec2);

    /// Ship glyph with its nose along `heading` (radians, 0 is up)
    fn draw_ship(&mut self, pos: Vec2, heading: f32, size: f32);

    fn draw_asteroid(&mut self, pos: Vec2, radius: f32, rotation: f32);

    fn draw_text(&mut self, pos: Vec2, text: &str);
}

/// Draw every live entity and the HUD labels.
///
/// `scale` is pixels per world unit and applies to positions and sizes alike.
pub fn render_frame<S: RenderSurface + ?Sized>(arena: &Arena, surface: &mut S, scale: f32) {
    for body in arena.bodies() {
        let pos = body.pos.as_vec2() * scale;
        match body.kind {
            EntityKind::Ship => surface.draw_ship(pos, body.rotation, body.radius * scale),
            EntityKind::Projectile => surface.draw_dot(pos),
            EntityKind::Asteroid(_) => {
                surface.draw_asteroid(pos, body.radius * scale, body.rotation)
            }
        }
    }

    let bounds = arena.bounds();
    let score_at = Vec2::new(bounds.left + SCORE_INSET, bounds.top - LABEL_DROP) * scale;
    let level_at = Vec2::new(bounds.right - LEVEL_INSET, bounds.top - LABEL_DROP) * scale;
    surface.draw_text(score_at, &format!("Score: {}", arena.score));
    surface.draw_text(level_at, &format!("Level: {}", arena.level));
}
