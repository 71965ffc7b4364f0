use glam::Vec2;
use winit::event::MouseScrollDelta;

/// Tracks the cursor position between pointer events so drag gestures can
/// start from the right spot.
#[derive(Default, Debug, Clone)]
pub struct Input {
    pub cursor_position: Vec2,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a cursor move and returns the new position.
    pub fn handle_cursor_move(&mut self, x: f64, y: f64) -> Vec2 {
        self.cursor_position = Vec2::new(x as f32, y as f32);
        self.cursor_position
    }

    /// Normalizes a wheel event to "lines" of scroll.
    #[must_use]
    pub fn wheel_lines(delta: MouseScrollDelta) -> f32 {
        match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            // PixelDelta values are much larger; scale them down.
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
        }
    }
}
