//! Swim path tests
//!
//! Tests for:
//! - Unit tangents over the whole progress range
//! - Periodicity of wrapped evaluation
//! - Degenerate tangent fallback
//! - Root orientation along the tangent

use glam::{Quat, Vec3};
use finrig::animation::path::{CirclePath, Curve, DEFAULT_FORWARD, WavePath};
use finrig::animation::pose::orientation_along;
use std::f32::consts::{FRAC_PI_2, PI};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

fn samples(count: usize) -> impl Iterator<Item = f32> {
    (0..count).map(move |i| i as f32 / count as f32)
}

// ============================================================================
// WavePath
// ============================================================================

#[test]
fn wave_path_start_point() {
    let path = WavePath::default();
    let sample = path.evaluate(0.0);
    // sin(π/2), sin(0), cos(0)
    assert!(vec3_approx(sample.position, Vec3::new(10.0, 0.0, 10.0)));
}

#[test]
fn wave_path_tangent_is_unit_length() {
    let path = WavePath::default();
    for p in samples(500) {
        let tangent = path.evaluate(p).tangent;
        assert!(approx_eq(tangent.length(), 1.0), "p={p}: |{tangent}| != 1");
    }
}

#[test]
fn wave_path_is_periodic() {
    let path = WavePath::default();
    for p in samples(100) {
        let a = path.evaluate(p);
        let b = path.evaluate(p + 1.0);
        assert!((a.position - b.position).length() < 1e-3, "p={p}");
        assert!(a.tangent.dot(b.tangent) > 0.999, "p={p}");
    }
}

#[test]
fn wave_path_wraps_negative_progress() {
    let path = WavePath::default();
    let a = path.evaluate(0.75);
    let b = path.evaluate(-0.25);
    assert!((a.position - b.position).length() < 1e-3);
}

#[test]
fn wave_path_position_within_magnitude() {
    let path = WavePath::new(3.0, 2.0, FRAC_PI_2, 4.0);
    for p in samples(200) {
        let pos = path.evaluate(p).position;
        assert!(pos.abs().max_element() <= 4.0 + EPSILON);
    }
}

#[test]
fn zero_magnitude_falls_back_to_default_forward() {
    let path = WavePath::new(3.0, 2.0, FRAC_PI_2, 0.0);
    let sample = path.evaluate(0.3);
    assert_eq!(sample.position, Vec3::ZERO);
    assert_eq!(sample.tangent, DEFAULT_FORWARD);
}

#[test]
fn non_finite_progress_evaluates_start() {
    let path = WavePath::default();
    let start = path.evaluate(0.0);
    let nan = path.evaluate(f32::NAN);
    assert_eq!(start, nan);
}

// ============================================================================
// CirclePath
// ============================================================================

#[test]
fn circle_path_stays_on_radius() {
    let path = CirclePath {
        radius: 5.0,
        height: 2.0,
    };
    for p in samples(64) {
        let sample = path.evaluate(p);
        let flat = Vec3::new(sample.position.x, 0.0, sample.position.z);
        assert!(approx_eq(flat.length(), 5.0));
        assert!(approx_eq(sample.position.y, 2.0));
        // Tangent is perpendicular to the radius
        assert!(sample.tangent.dot(flat.normalize()).abs() < 1e-3);
    }
}

#[test]
fn custom_curve_uses_finite_difference_tangent() {
    #[derive(Debug)]
    struct Line;
    impl Curve for Line {
        fn point(&self, progress: f32) -> Vec3 {
            Vec3::new(0.0, 0.0, progress * 8.0)
        }
    }

    let sample = Line.evaluate(0.5);
    assert!(vec3_approx(sample.tangent, Vec3::Z));
    // Endpoint uses a one-sided difference
    assert!(vec3_approx(Line.evaluate(0.0).tangent, Vec3::Z));
}

// ============================================================================
// Orientation
// ============================================================================

#[test]
fn orientation_faces_away_from_tangent_axis() {
    // The asset's nose points along -X, so moving along +X yields a half turn.
    let q = orientation_along(Vec3::X);
    assert!(vec3_approx(q * Vec3::X, Vec3::NEG_X));

    // Whatever the tangent, the asset's -X axis ends up along it.
    for tangent in [Vec3::Y, Vec3::Z, Vec3::new(1.0, 2.0, -3.0).normalize()] {
        let q = orientation_along(tangent);
        assert!(vec3_approx(q * Vec3::NEG_X, tangent), "tangent={tangent}");
    }
}

#[test]
fn orientation_of_zero_tangent_is_default() {
    let q = orientation_along(Vec3::ZERO);
    let expected = Quat::from_rotation_y(PI);
    assert!(q.dot(expected).abs() > 1.0 - EPSILON);
}
