use egui::{Pos2, Rect, Vec2};

pub const MIN_ZOOM: f32 = 0.25;
pub const MAX_ZOOM: f32 = 4.0;

/// Maps world coordinates to screen coordinates inside the canvas rect.
///
/// `screen = rect.min + offset + world * zoom`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    rect: Rect,
    offset: Vec2,
    zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            rect: Rect::ZERO,
            offset: Vec2::splat(20.0),
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn world_to_screen(&self, world: Pos2) -> Pos2 {
        self.rect.min + self.offset + world.to_vec2() * self.zoom
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Pos2 {
        ((screen - self.rect.min - self.offset) / self.zoom).to_pos2()
    }

    /// Scales a world-space length to screen space
    pub fn scale(&self, length: f32) -> f32 {
        length * self.zoom
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zooms by `factor` keeping the world point under `anchor` fixed on screen
    pub fn zoom_at(&mut self, anchor: Pos2, factor: f32) {
        let world = self.screen_to_world(anchor);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset = anchor - self.rect.min - world.to_vec2() * self.zoom;
    }

    pub fn reset(&mut self) {
        *self = Self {
            rect: self.rect,
            ..Self::default()
        };
    }
}
