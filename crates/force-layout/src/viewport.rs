use egui::{Pos2, Rect, Vec2};

/// Smallest width/height the simulation will accept. Anything smaller is
/// clamped up so the centering target stays finite and inside the canvas.
pub const MIN_VIEWPORT_EXTENT: f32 = 64.0;

/// Canvas the layout is centered in, in canvas-local coordinates
/// (origin at the top-left corner).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: clamp_extent(width),
            height: clamp_extent(height),
        }
    }

    pub fn from_size(size: Vec2) -> Self {
        Self::new(size.x, size.y)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center(&self) -> Pos2 {
        Pos2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(self.width, self.height))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 400.0)
    }
}

fn clamp_extent(value: f32) -> f32 {
    if value.is_finite() {
        value.max(MIN_VIEWPORT_EXTENT)
    } else {
        MIN_VIEWPORT_EXTENT
    }
}
