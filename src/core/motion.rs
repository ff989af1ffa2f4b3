// Idle motion of the displayed model: a slow spin plus a drift that bounces
// inside a viewport-dependent rectangle.

use super::constants::{BOUNDS_HALF_HEIGHT, BOUNDS_HALF_WIDTH_PER_ASPECT};
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisBounds {
    pub min: f32,
    pub max: f32,
}

impl AxisBounds {
    pub fn symmetric(half: f32) -> Self {
        Self {
            min: -half,
            max: half,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: AxisBounds,
    pub y: AxisBounds,
}

impl Bounds {
    /// Bounce rectangle for a viewport of the given aspect ratio (width / height).
    pub fn for_aspect(aspect: f32) -> Self {
        Self {
            x: AxisBounds::symmetric(BOUNDS_HALF_WIDTH_PER_ASPECT * aspect),
            y: AxisBounds::symmetric(BOUNDS_HALF_HEIGHT),
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x: AxisBounds::symmetric(BOUNDS_HALF_WIDTH_PER_ASPECT),
            y: AxisBounds::symmetric(BOUNDS_HALF_HEIGHT),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Drift {
    pub position: Vec2,
    pub direction: Vec2,
    pub bounds: Bounds,
}

impl Default for Drift {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            direction: Vec2::ONE,
            bounds: Bounds::default(),
        }
    }
}

impl Drift {
    /// Move by `speed * direction * dt_sec` and reflect off the bounds.
    ///
    /// A sign only flips while the position is past a bound and still heading
    /// outward, so a shrunken rectangle cannot trap the model flipping in place.
    pub fn step(&mut self, speed: f32, dt_sec: f32) {
        self.position += speed * self.direction * dt_sec;
        self.direction.x = reflect(self.position.x, self.direction.x, self.bounds.x);
        self.direction.y = reflect(self.position.y, self.direction.y, self.bounds.y);
    }

    pub fn resize(&mut self, aspect: f32) {
        self.bounds = Bounds::for_aspect(aspect);
    }

    pub fn position3(&self) -> Vec3 {
        self.position.extend(0.0)
    }
}

#[inline]
fn reflect(pos: f32, dir: f32, bounds: AxisBounds) -> f32 {
    if (pos > bounds.max && dir > 0.0) || (pos < bounds.min && dir < 0.0) {
        -dir
    } else {
        dir
    }
}

/// Accumulated Euler angles (radians) advanced by fixed per-tick increments.
#[derive(Clone, Copy, Debug, Default)]
pub struct Spin {
    pub x: f32,
    pub y: f32,
}

impl Spin {
    pub fn step(&mut self, deg_x: f32, deg_y: f32) {
        self.x = (self.x + deg_x.to_radians()) % std::f32::consts::TAU;
        self.y = (self.y + deg_y.to_radians()) % std::f32::consts::TAU;
    }
}
