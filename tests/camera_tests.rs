//! Orbit Camera Tests
//!
//! Tests for:
//! - Zoom distance clamping under repeated extreme input
//! - Pitch clamping away from the vertical poles
//! - Idle auto-rotation gating by drag state
//! - Spherical eye position derivation

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use milliner::OrbitCamera;

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// Clamping
// ============================================================================

#[test]
fn repeated_zoom_in_never_passes_min_distance() {
    let mut camera = OrbitCamera::new();
    for _ in 0..1000 {
        camera.zoom(5.0);
        assert!(camera.distance >= camera.min_distance);
        assert!(camera.distance <= camera.max_distance);
    }
    assert!(approx(camera.distance, camera.min_distance));
}

#[test]
fn repeated_zoom_out_never_passes_max_distance() {
    let mut camera = OrbitCamera::new();
    for _ in 0..1000 {
        camera.zoom(-5.0);
        assert!(camera.distance <= camera.max_distance);
    }
    assert!(approx(camera.distance, camera.max_distance));
}

#[test]
fn zero_zoom_is_a_no_op() {
    let mut camera = OrbitCamera::new();
    let before = camera.distance;
    camera.zoom(0.0);
    assert!(approx(camera.distance, before));
}

#[test]
fn large_drags_never_push_pitch_past_the_poles() {
    let mut camera = OrbitCamera::new();
    camera.drag_start(0.0, 0.0);
    for i in 0..100 {
        camera.drag_move(0.0, (i * 10_000) as f32);
        assert!(camera.pitch < FRAC_PI_2, "pitch reached the pole");
        assert!(camera.pitch > -FRAC_PI_2);
    }
    for i in 0..100 {
        camera.drag_move(0.0, -(i * 10_000) as f32);
        assert!(camera.pitch > -FRAC_PI_2, "pitch reached the pole");
        assert!(camera.pitch < FRAC_PI_2);
    }
}

// ============================================================================
// Drag Gating
// ============================================================================

#[test]
fn drag_move_without_active_drag_is_ignored() {
    let mut camera = OrbitCamera::new();
    let (yaw, pitch) = (camera.yaw, camera.pitch);
    camera.drag_move(500.0, 500.0);
    assert!(approx(camera.yaw, yaw));
    assert!(approx(camera.pitch, pitch));
}

#[test]
fn idle_tick_advances_yaw_only_when_not_dragging() {
    let mut camera = OrbitCamera::new();
    let yaw = camera.yaw;
    camera.tick(1.0);
    assert!(camera.yaw > yaw, "idle tick should auto-rotate");

    let yaw = camera.yaw;
    camera.drag_start(0.0, 0.0);
    camera.tick(1.0);
    assert!(approx(camera.yaw, yaw), "drag suspends auto-rotation");

    camera.drag_end();
    camera.tick(1.0);
    assert!(camera.yaw > yaw, "release resumes auto-rotation");
}

#[test]
fn auto_rotate_rate_is_per_second() {
    let mut camera = OrbitCamera::new();
    let yaw = camera.yaw;
    camera.tick(2.0);
    assert!(approx(camera.yaw - yaw, camera.auto_rotate_speed * 2.0));
}

// ============================================================================
// Eye Position
// ============================================================================

#[test]
fn position_lies_on_sphere_around_target() {
    let mut camera = OrbitCamera::new();
    camera.target = Vec3::new(1.0, 2.0, 3.0);
    for step in 0..20 {
        camera.yaw = step as f32 * 0.7;
        camera.pitch = (step as f32 * 0.13).sin();
        let eye = camera.position();
        assert!(approx((eye - camera.target).length(), camera.distance));
    }
}

#[test]
fn zero_angles_look_down_positive_z() {
    let mut camera = OrbitCamera::new();
    camera.yaw = 0.0;
    camera.pitch = 0.0;
    let eye = camera.position();
    assert!(approx(eye.x, 0.0));
    assert!(approx(eye.y, 0.0));
    assert!(approx(eye.z, camera.distance));
}

#[test]
fn positive_pitch_raises_the_eye() {
    let mut camera = OrbitCamera::new();
    camera.pitch = 0.5;
    assert!(camera.position().y > 0.0);
}

#[test]
fn view_matrix_is_finite() {
    let mut camera = OrbitCamera::new();
    camera.drag_start(0.0, 0.0);
    camera.drag_move(12_345.0, -6_789.0);
    let matrix = camera.view_matrix();
    assert!(matrix.to_cols_array().iter().all(|v| v.is_finite()));
}
