// Host-side tests for viewer constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core_constants {
    include!("../src/core/constants.rs");
}
mod core {
    pub use crate::core_constants::*;
}
mod web_constants {
    include!("../src/constants.rs");
}

use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_constants_are_consistent() {
    assert!(CAMERA_DISTANCE_MIN > 0.0);
    assert!(CAMERA_DISTANCE_MIN < CAMERA_DISTANCE_MAX);
    assert!((CAMERA_DISTANCE_MIN..=CAMERA_DISTANCE_MAX).contains(&CAMERA_DISTANCE));
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_FOV_DEG > 0.0 && CAMERA_FOV_DEG < 180.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn lighting_defaults_are_non_negative() {
    assert!(AMBIENT_INTENSITY >= 0.0);
    assert!(MAIN_LIGHT_INTENSITY >= 0.0);
    assert!(FILL_LIGHT_1_INTENSITY >= 0.0);
    assert!(FILL_LIGHT_2_INTENSITY >= 0.0);
    // the main light dominates
    assert!(MAIN_LIGHT_INTENSITY > FILL_LIGHT_1_INTENSITY);
    assert!(MAIN_LIGHT_INTENSITY > FILL_LIGHT_2_INTENSITY);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn motion_and_animation_defaults() {
    assert!(MODEL_TARGET_SIZE > 0.0);
    assert!(MOVEMENT_SPEED > 0.0);
    assert!(BOUNDS_HALF_HEIGHT > 0.0);
    assert!(BOUNDS_HALF_WIDTH_PER_ASPECT > 0.0);
    assert!(ANIMATION_SPEED >= ANIMATION_SPEED_MIN);
    assert!(ANIMATION_SPEED_MIN > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn confetti_ranges_are_ordered() {
    assert!(CONFETTI_COUNT > 0);
    assert!(CONFETTI_DURATION_SEC > 0.0);
    assert!(CONFETTI_RADIUS_MIN < CONFETTI_RADIUS_MAX);
    assert!(CONFETTI_FALL_SPEED_MIN < CONFETTI_FALL_SPEED_MAX);
    assert!(CONFETTI_TILT_INCREMENT_MIN < CONFETTI_TILT_INCREMENT_MAX);
    assert!(!CONFETTI_PALETTE.is_empty());
    for c in CONFETTI_PALETTE {
        assert!(c.starts_with('#'), "palette entry {} is not a hex color", c);
    }
}

#[test]
fn default_variant_is_a_glb() {
    assert!(DEFAULT_VARIANT.ends_with(".glb"));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn logo_plane_sits_behind_the_model() {
    assert!(LOGO_URL.ends_with(".png"));
    assert!(LOGO_HEIGHT > 0.0);
    // the model is normalized around the origin; the plane stays clear of it
    assert!(LOGO_POSITION[2] < -MODEL_TARGET_SIZE / 2.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn render_targets_use_a_webgpu_sample_count() {
    assert!(matches!(web_constants::MSAA_SAMPLE_COUNT, 1 | 4));
    assert!(web_constants::MSAA_SAMPLE_COUNT > 1);
    assert_eq!(web_constants::CONFETTI_TIMEOUT_MS, 3500);
    assert!(web_constants::MAX_PIXEL_RATIO >= 1.0);
}
