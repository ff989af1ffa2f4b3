// Host-side tests for clip sampling and the open/close state machine.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod clip {
        include!("../src/core/clip.rs");
    }
    pub mod animation {
        include!("../src/core/animation.rs");
    }
}

use crate::core::animation::*;
use crate::core::clip::*;
use crate::core::constants::ANIMATION_SPEED_MIN;
use glam::{Quat, Vec3};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn bound_controller(duration: f32) -> AnimationController {
    let mut c = AnimationController::new(1.0);
    c.bind(Some(ClipPlayer::new(duration)));
    c
}

#[test]
fn vec3_track_interpolates_and_clamps() {
    let tr = TrackVec3 {
        times: vec![0.0, 1.0],
        values: vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)],
    };
    let d = Vec3::splat(9.0);
    assert!(sample_vec3(&tr, 0.5, d).abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-5));
    assert_eq!(sample_vec3(&tr, -1.0, d), Vec3::ZERO);
    assert_eq!(sample_vec3(&tr, 5.0, d), Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn empty_and_single_key_tracks() {
    let d = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(sample_vec3(&TrackVec3::default(), 0.3, d), d);

    let single = TrackVec3 {
        times: vec![0.5],
        values: vec![Vec3::X],
    };
    assert_eq!(sample_vec3(&single, 0.0, d), Vec3::X);
    assert_eq!(sample_vec3(&single, 2.0, d), Vec3::X);
}

#[test]
fn quat_track_slerps() {
    let end = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
    let tr = TrackQuat {
        times: vec![0.0, 2.0],
        values: vec![Quat::IDENTITY, end],
    };
    let mid = sample_quat(&tr, 1.0, Quat::IDENTITY);
    let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_4);
    assert!(mid.abs_diff_eq(expected, 1e-4));
}

#[test]
fn clip_falls_back_to_rest_pose_for_untracked_nodes() {
    let mut clip = AnimClip {
        duration: 1.0,
        ..AnimClip::default()
    };
    clip.translations.insert(
        0,
        TrackVec3 {
            times: vec![0.0, 1.0],
            values: vec![Vec3::ZERO, Vec3::Y],
        },
    );
    let rest = Vec3::new(4.0, 4.0, 4.0);
    assert!(clip.translation(0, 1.0, rest).abs_diff_eq(Vec3::Y, 1e-6));
    assert_eq!(clip.translation(1, 0.5, rest), rest);
    assert_eq!(clip.rotation(0, 0.5, Quat::IDENTITY), Quat::IDENTITY);
    assert_eq!(clip.scale(0, 0.5, Vec3::ONE), Vec3::ONE);
}

#[test]
fn player_runs_forward_once_and_holds() {
    let mut p = ClipPlayer::new(2.0);
    assert!(!p.is_running());
    assert_eq!(p.duration(), 2.0);
    p.play(1.0, 7);
    assert!(p.is_running());
    assert_eq!(p.time_scale(), 1.0);
    assert_eq!(p.advance(1.0), None);
    assert!(approx(p.time(), 1.0));
    assert_eq!(p.advance(5.0), Some(7));
    assert!(approx(p.time(), 2.0));
    assert!(!p.is_running());
    // finished notification is reported once
    assert_eq!(p.advance(1.0), None);
    assert!(approx(p.time(), 2.0));
}

#[test]
fn player_runs_backward_from_end() {
    let mut p = ClipPlayer::new(3.0);
    p.play(-2.0, 1);
    assert!(approx(p.time(), 3.0));
    assert_eq!(p.advance(1.0), None);
    assert!(approx(p.time(), 1.0));
    assert_eq!(p.advance(1.0), Some(1));
    assert!(approx(p.time(), 0.0));
}

#[test]
fn open_then_close_cycle() {
    let mut c = bound_controller(2.0);
    assert_eq!(c.state(), LidState::Closed);
    assert!(!c.is_open());

    assert!(c.trigger());
    assert_eq!(c.state(), LidState::Opening);
    assert!(c.is_open());
    assert!(c.is_playing());
    assert!(c.rate() > 0.0);

    c.advance(2.5);
    assert_eq!(c.state(), LidState::Open);
    assert!(approx(c.clip_time().unwrap_or(-1.0), 2.0));

    assert!(c.trigger());
    assert_eq!(c.state(), LidState::Closing);
    assert!(!c.is_open());
    assert!(c.rate() < 0.0);
    // closing plays from the open pose back to the start
    assert!(approx(c.clip_time().unwrap_or(-1.0), 2.0));

    c.advance(1.0);
    assert_eq!(c.state(), LidState::Closing);
    c.advance(1.0);
    assert_eq!(c.state(), LidState::Closed);
    assert!(approx(c.clip_time().unwrap_or(-1.0), 0.0));
}

#[test]
fn trigger_is_ignored_while_opening() {
    let mut c = bound_controller(2.0);
    assert!(c.trigger());
    c.advance(0.5);
    let generation = c.generation();
    let time = c.clip_time();

    assert!(!c.trigger());
    assert_eq!(c.state(), LidState::Opening);
    assert_eq!(c.generation(), generation);
    assert_eq!(c.clip_time(), time);
    assert!(approx(time.unwrap_or(-1.0), 0.5));
    assert!(c.is_open());
    assert!(approx(c.rate(), 1.0));
}

#[test]
fn trigger_is_ignored_while_closing() {
    let mut c = bound_controller(2.0);
    assert!(c.trigger());
    c.advance(2.5);
    assert_eq!(c.state(), LidState::Open);
    assert!(c.trigger());
    c.advance(0.5);
    let generation = c.generation();
    let time = c.clip_time();

    assert!(!c.trigger());
    assert_eq!(c.state(), LidState::Closing);
    assert_eq!(c.generation(), generation);
    assert_eq!(c.clip_time(), time);
    assert!(approx(time.unwrap_or(-1.0), 1.5));
    assert!(!c.is_open());
    assert!(approx(c.rate(), -1.0));
}

#[test]
fn trigger_without_clip_does_nothing() {
    let mut c = AnimationController::new(1.0);
    assert!(!c.has_clip());
    assert!(!c.trigger());
    assert_eq!(c.state(), LidState::Closed);
    assert_eq!(c.clip_time(), None);
    c.advance(1.0);
    assert_eq!(c.state(), LidState::Closed);
}

#[test]
fn stale_finish_notifications_are_ignored() {
    let mut c = bound_controller(1.0);
    assert!(c.trigger());
    let stale = c.generation() - 1;
    c.on_finished(stale);
    assert_eq!(c.state(), LidState::Opening);
    c.on_finished(c.generation());
    assert_eq!(c.state(), LidState::Open);
}

#[test]
fn rebinding_resets_to_closed() {
    let mut c = bound_controller(1.0);
    assert!(c.trigger());
    let old = c.generation();
    c.bind(Some(ClipPlayer::new(4.0)));
    assert_eq!(c.state(), LidState::Closed);
    assert!(!c.is_playing());
    // the playback started before the switch can no longer settle anything
    c.on_finished(old);
    assert_eq!(c.state(), LidState::Closed);
    assert!(c.trigger());
}

#[test]
fn unbind_stops_playback() {
    let mut c = bound_controller(1.0);
    assert!(c.trigger());
    c.unbind();
    assert!(!c.has_clip());
    assert!(!c.is_playing());
    assert!(!c.trigger());
}

#[test]
fn speed_change_keeps_direction() {
    let mut c = bound_controller(4.0);
    assert!(c.trigger());
    c.advance(4.0);
    assert!(c.trigger());
    assert_eq!(c.state(), LidState::Closing);

    c.set_speed(2.0);
    assert!(approx(c.rate(), -2.0));
    c.advance(1.0);
    assert!(approx(c.clip_time().unwrap_or(-1.0), 2.0));
    c.advance(1.0);
    assert_eq!(c.state(), LidState::Closed);
}

#[test]
fn speed_is_clamped_to_minimum() {
    let mut c = AnimationController::new(0.0);
    assert!(approx(c.speed(), ANIMATION_SPEED_MIN));
    c.set_speed(-3.0);
    assert!(approx(c.speed(), ANIMATION_SPEED_MIN));
    c.set_speed(1.5);
    assert!(approx(c.speed(), 1.5));
}
