// Shared viewer tuning constants used by the core model and the web frontend.

// Model normalization
pub const MODEL_TARGET_SIZE: f32 = 2.0; // largest bounding-box edge after normalization

// Idle motion
pub const ROTATION_SPEED_X_DEG: f32 = 0.05; // degrees per tick
pub const ROTATION_SPEED_Y_DEG: f32 = 0.2; // degrees per tick
pub const MOVEMENT_SPEED: f32 = 0.5; // world units per second
pub const BOUNDS_HALF_WIDTH_PER_ASPECT: f32 = 2.0; // x bound = this * aspect
pub const BOUNDS_HALF_HEIGHT: f32 = 1.0;

// Lighting defaults (intensities)
pub const AMBIENT_INTENSITY: f32 = 1.2;
pub const MAIN_LIGHT_INTENSITY: f32 = 20.0;
pub const FILL_LIGHT_1_INTENSITY: f32 = 2.0;
pub const FILL_LIGHT_2_INTENSITY: f32 = 1.2;

// Light positions; each light shines from its position toward the origin
pub const MAIN_LIGHT_POSITION: [f32; 3] = [5.0, 5.0, 5.0];
pub const FILL_LIGHT_1_POSITION: [f32; 3] = [-5.0, 3.0, -5.0];
pub const FILL_LIGHT_2_POSITION: [f32; 3] = [0.0, -5.0, 0.0];

// Camera
pub const CAMERA_DISTANCE: f32 = 5.0;
pub const CAMERA_HEIGHT: f32 = 1.0; // follow mode only
pub const CAMERA_DISTANCE_MIN: f32 = 0.5;
pub const CAMERA_DISTANCE_MAX: f32 = 50.0;
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const FOLLOW_ORBIT_RATE: f32 = 0.25; // radians per second around the model

// Animation playback
pub const ANIMATION_SPEED: f32 = 1.0;
pub const ANIMATION_SPEED_MIN: f32 = 0.05; // a zero rate would never finish

// Background
pub const BACKGROUND_HEX: &str = "#000000";

// Variants
pub const DEFAULT_VARIANT: &str = "Money_case.glb";

// Logo backdrop: a flat textured plane behind the model
pub const LOGO_URL: &str = "logo.png";
pub const LOGO_HEIGHT: f32 = 2.5; // width follows the image aspect ratio
pub const LOGO_POSITION: [f32; 3] = [0.0, 2.0, -2.5];

// Confetti
pub const CONFETTI_COUNT: usize = 150;
pub const CONFETTI_DURATION_SEC: f32 = 3.5;
pub const CONFETTI_SWAY_STEP: f32 = 0.01; // shared sway angle increment per tick
pub const CONFETTI_TILT_AMPLITUDE: f32 = 15.0;
pub const CONFETTI_RADIUS_MIN: f32 = 4.0;
pub const CONFETTI_RADIUS_MAX: f32 = 10.0;
pub const CONFETTI_FALL_SPEED_MIN: f32 = 1.0;
pub const CONFETTI_FALL_SPEED_MAX: f32 = 3.0;
pub const CONFETTI_TILT_INCREMENT_MIN: f32 = 0.05;
pub const CONFETTI_TILT_INCREMENT_MAX: f32 = 0.12;
pub const CONFETTI_PALETTE: [&str; 8] = [
    "#f9d71c", // gold
    "#ff6b6b",
    "#4ecdc4",
    "#ffe66d",
    "#a29bfe",
    "#fd79a8",
    "#55efc4",
    "#ffffff",
];
