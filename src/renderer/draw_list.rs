//! Recording render surface for headless runs and tests

use glam::Vec2;
use serde::Serialize;

use super::RenderSurface;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Dot { pos: Vec2 },
    Ship { pos: Vec2, heading: f32, size: f32 },
    Asteroid { pos: Vec2, radius: f32, rotation: f32 },
    Text { pos: Vec2, text: String },
}

/// Surface that records draw calls in order instead of rasterizing them
#[derive(Debug, Clone, Default, Serialize)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands, keeping the allocation for the next frame
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl RenderSurface for DrawList {
    fn draw_dot(&mut self, pos: Vec2) {
        self.commands.push(DrawCommand::Dot { pos });
    }

    fn draw_ship(&mut self, pos: Vec2, heading: f32, size: f32) {
        self.commands.push(DrawCommand::Ship { pos, heading, size });
    }

    fn draw_asteroid(&mut self, pos: Vec2, radius: f32, rotation: f32) {
        self.commands.push(DrawCommand::Asteroid { pos, radius, rotation });
    }

    fn draw_text(&mut self, pos: Vec2, text: &str) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.to_owned(),
        });
    }
}
