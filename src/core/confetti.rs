// Confetti particle field: spawning, per-tick update and line-segment output.
//
// Motion is per tick rather than per second; only the run's lifetime is
// measured in wall-clock time.

use super::constants::*;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: &'static str,
    pub tilt: f32,
    pub tilt_angle: f32,
    pub tilt_increment: f32,
    pub fall_speed: f32,
    /// Offset into the shared sway oscillator.
    pub phase: f32,
}

/// One stroked confetti piece in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub line_width: f32,
    pub color: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfettiStatus {
    Running,
    Finished,
}

#[derive(Clone, Debug)]
pub struct ConfettiField {
    particles: Vec<Particle>,
    angle: f32,
    width: f32,
    height: f32,
    elapsed: f32,
    duration: f32,
}

impl ConfettiField {
    /// Scatter `count` particles over (and just above) a `width` x `height` canvas.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, count: usize, width: f32, height: f32) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let particles = (0..count)
            .map(|_| Particle {
                x: rng.gen_range(0.0..width),
                y: rng.gen_range(-height..0.0),
                radius: rng.gen_range(CONFETTI_RADIUS_MIN..CONFETTI_RADIUS_MAX),
                color: CONFETTI_PALETTE[rng.gen_range(0..CONFETTI_PALETTE.len())],
                tilt: rng.gen_range(-10.0..0.0),
                tilt_angle: 0.0,
                tilt_increment: rng
                    .gen_range(CONFETTI_TILT_INCREMENT_MIN..CONFETTI_TILT_INCREMENT_MAX),
                fall_speed: rng.gen_range(CONFETTI_FALL_SPEED_MIN..CONFETTI_FALL_SPEED_MAX),
                phase: rng.gen_range(0.0..count.max(1) as f32),
            })
            .collect();
        Self {
            particles,
            angle: 0.0,
            width,
            height,
            elapsed: 0.0,
            duration: CONFETTI_DURATION_SEC,
        }
    }

    /// Advance one tick; `dt_sec` only counts toward the run's lifetime.
    pub fn step(&mut self, dt_sec: f32) -> ConfettiStatus {
        self.elapsed += dt_sec.max(0.0);
        if self.is_expired() {
            return ConfettiStatus::Finished;
        }
        self.angle += CONFETTI_SWAY_STEP;
        let angle = self.angle;
        for (i, p) in self.particles.iter_mut().enumerate() {
            p.tilt_angle += p.tilt_increment;
            p.y += ((angle + p.phase).cos() + p.fall_speed + p.radius / 2.0) / 2.0;
            p.x += angle.sin();
            p.tilt = (p.tilt_angle - i as f32 / 3.0).sin() * CONFETTI_TILT_AMPLITUDE;

            if p.y > self.height + CONFETTI_RADIUS_MAX * 2.0 {
                p.y = -CONFETTI_RADIUS_MAX * 2.0;
            }
            if p.x > self.width + CONFETTI_RADIUS_MAX {
                p.x = -CONFETTI_RADIUS_MAX;
            } else if p.x < -CONFETTI_RADIUS_MAX {
                p.x = self.width + CONFETTI_RADIUS_MAX;
            }
        }
        ConfettiStatus::Running
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Short rotated strokes, one per particle, in draw order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.particles.iter().map(|p| Segment {
            from: [p.x + p.tilt + p.radius / 4.0, p.y],
            to: [p.x + p.tilt, p.y + p.tilt + p.radius / 4.0],
            line_width: p.radius / 2.0,
            color: p.color,
        })
    }
}

/// At most one burst at a time; a start while one runs is ignored.
#[derive(Debug, Default)]
pub struct ConfettiRun {
    field: Option<ConfettiField>,
}

impl ConfettiRun {
    /// Spawn a fresh field unless a burst is already running.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R, width: f32, height: f32) -> bool {
        if self.field.is_some() {
            return false;
        }
        self.field = Some(ConfettiField::spawn(rng, CONFETTI_COUNT, width, height));
        true
    }

    pub fn stop(&mut self) {
        self.field = None;
    }

    pub fn is_running(&self) -> bool {
        self.field.is_some()
    }

    pub fn field(&self) -> Option<&ConfettiField> {
        self.field.as_ref()
    }

    pub fn field_mut(&mut self) -> Option<&mut ConfettiField> {
        self.field.as_mut()
    }
}
