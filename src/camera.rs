use crate::core::{
    CameraMode, CAMERA_DISTANCE_MAX, CAMERA_DISTANCE_MIN, CAMERA_FAR, CAMERA_FOV_DEG,
    CAMERA_NEAR, FOLLOW_ORBIT_RATE,
};
use glam::{Mat4, Vec3, Vec4};

// Orbit tuning
pub const ORBIT_DAMPING: f32 = 0.05; // fraction of pending rotation applied per tick
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // radius factor per wheel notch
const POLAR_EPS: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub fovy_radians: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new(aspect: f32) -> Self {
        Self {
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            aspect,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect.max(1e-3), self.znear, self.zfar)
    }
}

/// User-driven orbit around a fixed target with damped rotation.
///
/// Spherical convention: `theta` is the azimuth around +Y measured from +Z,
/// `phi` the polar angle from +Y.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
    delta_theta: f32,
    delta_phi: f32,
}

impl OrbitCamera {
    /// Camera on +Z looking at the origin from `distance`.
    pub fn new(distance: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            radius: clamp_distance(distance),
            theta: 0.0,
            phi: std::f32::consts::FRAC_PI_2,
            delta_theta: 0.0,
            delta_phi: 0.0,
        }
    }

    /// Queue a rotation for a pointer drag of `(dx, dy)` pixels.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.delta_theta -= std::f32::consts::TAU * dx / h * ORBIT_ROTATE_SPEED;
        self.delta_phi -= std::f32::consts::TAU * dy / h * ORBIT_ROTATE_SPEED;
    }

    /// Dolly by wheel notches; positive zooms out.
    pub fn zoom(&mut self, notches: f32) {
        self.radius = clamp_distance(self.radius * ORBIT_ZOOM_STEP.powf(-notches));
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.radius = clamp_distance(distance);
    }

    /// Apply a damped share of the pending rotation.
    pub fn update(&mut self) {
        self.theta += self.delta_theta * ORBIT_DAMPING;
        self.phi = (self.phi + self.delta_phi * ORBIT_DAMPING)
            .clamp(POLAR_EPS, std::f32::consts::PI - POLAR_EPS);
        self.delta_theta *= 1.0 - ORBIT_DAMPING;
        self.delta_phi *= 1.0 - ORBIT_DAMPING;
    }

    pub fn eye(&self) -> Vec3 {
        let (st, ct) = self.theta.sin_cos();
        let (sp, cp) = self.phi.sin_cos();
        self.target + self.radius * Vec3::new(sp * st, cp, sp * ct)
    }
}

/// Fixed distance/height camera that circles the model and looks at it.
#[derive(Clone, Debug)]
pub struct FollowCamera {
    pub distance: f32,
    pub height: f32,
    pub angle: f32,
}

impl FollowCamera {
    pub fn new(distance: f32, height: f32) -> Self {
        Self {
            distance: clamp_distance(distance),
            height,
            angle: 0.0,
        }
    }

    pub fn update(&mut self, dt_sec: f32) {
        self.angle = (self.angle + FOLLOW_ORBIT_RATE * dt_sec) % std::f32::consts::TAU;
    }

    pub fn eye(&self, model_pos: Vec3) -> Vec3 {
        let (s, c) = self.angle.sin_cos();
        model_pos + Vec3::new(s * self.distance, self.height, c * self.distance)
    }
}

#[derive(Clone, Debug)]
pub enum CameraRig {
    Orbit(OrbitCamera),
    Follow(FollowCamera),
}

impl CameraRig {
    pub fn new(mode: CameraMode, distance: f32, height: f32) -> Self {
        match mode {
            CameraMode::Orbit => CameraRig::Orbit(OrbitCamera::new(distance)),
            CameraMode::Follow => CameraRig::Follow(FollowCamera::new(distance, height)),
        }
    }

    pub fn update(&mut self, dt_sec: f32) {
        match self {
            CameraRig::Orbit(o) => o.update(),
            CameraRig::Follow(f) => f.update(dt_sec),
        }
    }

    pub fn set_distance(&mut self, distance: f32) {
        match self {
            CameraRig::Orbit(o) => o.set_distance(distance),
            CameraRig::Follow(f) => f.distance = clamp_distance(distance),
        }
    }

    pub fn set_height(&mut self, height: f32) {
        if let CameraRig::Follow(f) = self {
            f.height = height;
        }
    }

    /// `(eye, target)` for the current frame.
    pub fn eye_target(&self, model_pos: Vec3) -> (Vec3, Vec3) {
        match self {
            CameraRig::Orbit(o) => (o.eye(), o.target),
            CameraRig::Follow(f) => (f.eye(model_pos), model_pos),
        }
    }

    pub fn as_orbit_mut(&mut self) -> Option<&mut OrbitCamera> {
        match self {
            CameraRig::Orbit(o) => Some(o),
            CameraRig::Follow(_) => None,
        }
    }
}

#[inline]
fn clamp_distance(d: f32) -> f32 {
    d.clamp(CAMERA_DISTANCE_MIN, CAMERA_DISTANCE_MAX)
}

/// Compute a world-space ray through a point on the canvas.
///
/// - `sx`, `sy`: pixel coordinates in a `width` x `height` canvas
/// - `eye`, `target`: the camera's current look-at
///
/// Returns `(ray_origin, ray_direction)` in world space.
#[inline]
pub fn screen_to_world_ray(
    sx: f32,
    sy: f32,
    width: f32,
    height: f32,
    eye: Vec3,
    target: Vec3,
    projection: &Projection,
) -> (Vec3, Vec3) {
    let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
    let view = Mat4::look_at_rh(eye, target, Vec3::Y);
    let inv = (projection.matrix() * view).inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p1: Vec3 = p_far.truncate() / p_far.w;
    let rd = (p1 - eye).normalize();
    (eye, rd)
}
