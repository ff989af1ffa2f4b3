// Host-side tests for the confetti particle field.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod confetti {
        include!("../src/core/confetti.rs");
    }
}

use crate::core::confetti::*;
use crate::core::constants::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn field(seed: u64) -> ConfettiField {
    let mut rng = StdRng::seed_from_u64(seed);
    ConfettiField::spawn(&mut rng, CONFETTI_COUNT, 800.0, 600.0)
}

#[test]
fn spawn_respects_ranges() {
    let f = field(1);
    assert_eq!(f.particles().len(), CONFETTI_COUNT);
    for p in f.particles() {
        assert!((0.0..800.0).contains(&p.x));
        assert!((-600.0..0.0).contains(&p.y));
        assert!((CONFETTI_RADIUS_MIN..CONFETTI_RADIUS_MAX).contains(&p.radius));
        assert!((CONFETTI_FALL_SPEED_MIN..CONFETTI_FALL_SPEED_MAX).contains(&p.fall_speed));
        assert!(
            (CONFETTI_TILT_INCREMENT_MIN..CONFETTI_TILT_INCREMENT_MAX).contains(&p.tilt_increment)
        );
        assert!(CONFETTI_PALETTE.contains(&p.color));
    }
}

#[test]
fn same_seed_same_field() {
    assert_eq!(field(42).particles(), field(42).particles());
}

#[test]
fn particles_fall_each_tick() {
    let mut f = field(7);
    let before: Vec<f32> = f.particles().iter().map(|p| p.y).collect();
    assert_eq!(f.step(1.0 / 60.0), ConfettiStatus::Running);
    for (p, y0) in f.particles().iter().zip(before) {
        // fall term outweighs the sway term, so every piece moves down
        assert!(p.y > y0, "particle rose from {} to {}", y0, p.y);
    }
}

#[test]
fn particles_recycle_to_top() {
    let mut f = field(3);
    let (w, h) = f.size();
    for _ in 0..2_000 {
        f.step(0.0);
        for p in f.particles() {
            assert!(p.y <= h + CONFETTI_RADIUS_MAX * 2.0 + 10.0);
            assert!(p.x >= -CONFETTI_RADIUS_MAX - 1.0);
            assert!(p.x <= w + CONFETTI_RADIUS_MAX + 1.0);
        }
    }
}

#[test]
fn field_finishes_after_duration() {
    let mut f = field(9);
    let dt = 1.0 / 60.0;
    let mut ticks = 0;
    while f.step(dt) == ConfettiStatus::Running {
        ticks += 1;
        assert!(ticks < 10_000);
    }
    assert!(f.is_expired());
    assert!(f.elapsed() >= CONFETTI_DURATION_SEC);
    // roughly 3.5 s of frames
    assert!((200..=215).contains(&ticks), "ran {} ticks", ticks);
    assert_eq!(f.step(dt), ConfettiStatus::Finished);
}

#[test]
fn segments_follow_particle_geometry() {
    let f = field(11);
    let segs: Vec<Segment> = f.segments().collect();
    assert_eq!(segs.len(), f.particles().len());
    for (s, p) in segs.iter().zip(f.particles()) {
        assert!((s.line_width - p.radius / 2.0).abs() < 1e-6);
        assert!((s.from[0] - (p.x + p.tilt + p.radius / 4.0)).abs() < 1e-4);
        assert!((s.from[1] - p.y).abs() < 1e-6);
        assert!((s.to[0] - (p.x + p.tilt)).abs() < 1e-4);
        assert!((s.to[1] - (p.y + p.tilt + p.radius / 4.0)).abs() < 1e-4);
        assert_eq!(s.color, p.color);
    }
}

#[test]
fn degenerate_canvas_is_clamped() {
    let mut rng = StdRng::seed_from_u64(5);
    let f = ConfettiField::spawn(&mut rng, 10, 0.0, 0.0);
    assert_eq!(f.size(), (1.0, 1.0));
    assert_eq!(f.particles().len(), 10);
}

#[test]
fn second_start_while_running_is_ignored() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut run = ConfettiRun::default();
    assert!(!run.is_running());
    assert!(run.start(&mut rng, 800.0, 600.0));
    let first = run.field().map(|f| f.particles().to_vec());

    assert!(!run.start(&mut rng, 1024.0, 768.0));
    assert!(run.is_running());
    assert_eq!(run.field().map(|f| f.particles().to_vec()), first);
    assert_eq!(run.field().map(ConfettiField::size), Some((800.0, 600.0)));
}

#[test]
fn start_works_again_after_stop() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut run = ConfettiRun::default();
    assert!(run.start(&mut rng, 800.0, 600.0));
    run.stop();
    assert!(!run.is_running());
    assert!(run.field().is_none());

    assert!(run.start(&mut rng, 320.0, 240.0));
    assert_eq!(run.field().map(ConfettiField::size), Some((320.0, 240.0)));
    assert_eq!(run.field().map(|f| f.elapsed()), Some(0.0));
}
