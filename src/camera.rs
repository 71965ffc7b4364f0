//! Orbit camera.
//!
//! Maintains yaw/pitch/distance around a target point, fed by pointer drag
//! deltas and a wheel zoom, and derives the eye position and view matrix
//! each frame. While no drag is active, [`OrbitCamera::tick`] applies a slow
//! idle rotation; a new drag suspends it until release.

use glam::{Mat4, Vec2, Vec3};

// Keep the pitch strictly inside the poles so the look-at basis never
// collapses against the Y-up vector.
const PITCH_EPS: f32 = 0.0001;
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - PITCH_EPS;

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,

    /// Radians of rotation per pixel of drag.
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Idle spin applied by `tick` when not dragging, in radians/second.
    pub auto_rotate_speed: f32,

    dragging: bool,
    last_cursor: Vec2,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    #[must_use]
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            // Slightly above the hat, matching an eye at roughly (0, 2, 5).
            pitch: 0.38,
            distance: 5.0,
            target: Vec3::ZERO,
            rotate_speed: 0.01,
            zoom_speed: 0.05,
            min_distance: 2.0,
            max_distance: 12.0,
            auto_rotate_speed: 0.3,
            dragging: false,
            last_cursor: Vec2::ZERO,
        }
    }

    /// Begins a drag gesture at the given cursor position. Suspends idle
    /// auto-rotation until [`drag_end`](Self::drag_end).
    pub fn drag_start(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.last_cursor = Vec2::new(x, y);
    }

    /// Applies a drag movement. No-op unless a drag is active.
    pub fn drag_move(&mut self, x: f32, y: f32) {
        if !self.dragging {
            return;
        }
        let cursor = Vec2::new(x, y);
        let delta = cursor - self.last_cursor;
        self.last_cursor = cursor;

        self.yaw -= delta.x * self.rotate_speed;
        self.pitch = (self.pitch + delta.y * self.rotate_speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn drag_end(&mut self) {
        self.dragging = false;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Adjusts the orbit distance from a wheel delta (positive zooms in),
    /// clamped to `[min_distance, max_distance]`.
    pub fn zoom(&mut self, delta: f32) {
        if delta == 0.0 {
            return;
        }
        let scale = (1.0 - self.zoom_speed).powf(delta.abs());
        if delta > 0.0 {
            self.distance *= scale;
        } else {
            self.distance /= scale;
        }
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    /// Advances the idle auto-rotation. Does nothing while a drag is active.
    pub fn tick(&mut self, dt: f32) {
        if !self.dragging {
            self.yaw += self.auto_rotate_speed * dt;
        }
    }

    /// The eye position: a point on the sphere of radius `distance` around
    /// `target`, parameterized by yaw/pitch (right-handed, Y-up).
    #[must_use]
    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// The view matrix looking from [`position`](Self::position) toward the
    /// target.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }
}
