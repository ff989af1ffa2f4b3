// Scene parameters edited from the settings panel, and viewer configuration.

use super::constants::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("invalid number {value:?} for {control:?}")]
    InvalidNumber { control: Control, value: String },
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),
    #[error("invalid camera mode {0:?}, expected orbit or follow")]
    InvalidCameraMode(String),
}

/// Settings-panel inputs, one per editable parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Background,
    AmbientLight,
    MainLight,
    FillLight1,
    FillLight2,
    CameraDistance,
    CameraHeight,
    AnimationSpeed,
}

impl Control {
    pub const ALL: [Control; 8] = [
        Control::Background,
        Control::AmbientLight,
        Control::MainLight,
        Control::FillLight1,
        Control::FillLight2,
        Control::CameraDistance,
        Control::CameraHeight,
        Control::AnimationSpeed,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            Control::Background => "backgroundColor",
            Control::AmbientLight => "ambientLight",
            Control::MainLight => "mainLight",
            Control::FillLight1 => "fillLight1",
            Control::FillLight2 => "fillLight2",
            Control::CameraDistance => "cameraDistance",
            Control::CameraHeight => "cameraHeight",
            Control::AnimationSpeed => "animationSpeed",
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.element_id() == id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneParams {
    pub background_hex: String,
    /// Linear-space clear color derived from `background_hex`.
    pub background: [f32; 3],
    pub ambient: f32,
    pub main_light: f32,
    pub fill_light_1: f32,
    pub fill_light_2: f32,
    pub camera_distance: f32,
    pub camera_height: f32,
    pub animation_speed: f32,
    pub rotation_speed_x_deg: f32,
    pub rotation_speed_y_deg: f32,
    pub movement_speed: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            background_hex: BACKGROUND_HEX.to_string(),
            background: [0.0, 0.0, 0.0],
            ambient: AMBIENT_INTENSITY,
            main_light: MAIN_LIGHT_INTENSITY,
            fill_light_1: FILL_LIGHT_1_INTENSITY,
            fill_light_2: FILL_LIGHT_2_INTENSITY,
            camera_distance: CAMERA_DISTANCE,
            camera_height: CAMERA_HEIGHT,
            animation_speed: ANIMATION_SPEED,
            rotation_speed_x_deg: ROTATION_SPEED_X_DEG,
            rotation_speed_y_deg: ROTATION_SPEED_Y_DEG,
            movement_speed: MOVEMENT_SPEED,
        }
    }
}

impl SceneParams {
    /// Apply a raw input value. On error the parameters are left untouched.
    pub fn apply(&mut self, control: Control, raw: &str) -> Result<(), ParamError> {
        let (slot, min, max) = match control {
            Control::Background => return self.apply_background(raw),
            Control::AmbientLight => (&mut self.ambient, 0.0, f32::MAX),
            Control::MainLight => (&mut self.main_light, 0.0, f32::MAX),
            Control::FillLight1 => (&mut self.fill_light_1, 0.0, f32::MAX),
            Control::FillLight2 => (&mut self.fill_light_2, 0.0, f32::MAX),
            Control::CameraDistance => (
                &mut self.camera_distance,
                CAMERA_DISTANCE_MIN,
                CAMERA_DISTANCE_MAX,
            ),
            Control::CameraHeight => (&mut self.camera_height, f32::MIN, f32::MAX),
            Control::AnimationSpeed => (&mut self.animation_speed, ANIMATION_SPEED_MIN, f32::MAX),
        };
        *slot = parse_number(control, raw)?.clamp(min, max);
        Ok(())
    }

    fn apply_background(&mut self, raw: &str) -> Result<(), ParamError> {
        let rgb = parse_hex_color(raw)?;
        self.background = rgb.map(srgb_to_linear);
        self.background_hex = raw.trim().to_ascii_lowercase();
        Ok(())
    }

    /// `[intensity; 4]` in the order ambient, main, fill 1, fill 2.
    pub fn light_intensities(&self) -> [f32; 4] {
        [
            self.ambient,
            self.main_light,
            self.fill_light_1,
            self.fill_light_2,
        ]
    }
}

fn parse_number(control: Control, raw: &str) -> Result<f32, ParamError> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParamError::InvalidNumber {
            control,
            value: raw.to_string(),
        })
}

/// Parse `#rrggbb` into sRGB components in `[0, 1]`.
pub fn parse_hex_color(raw: &str) -> Result<[f32; 3], ParamError> {
    let invalid = || ParamError::InvalidColor(raw.to_string());
    let hex = raw.trim().strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| invalid())
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    /// User drag/zoom around the origin.
    Orbit,
    /// Fixed distance/height orbit that tracks the drifting model.
    Follow,
}

impl std::str::FromStr for CameraMode {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orbit" => Ok(CameraMode::Orbit),
            "follow" => Ok(CameraMode::Follow),
            _ => Err(ParamError::InvalidCameraMode(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub camera_mode: CameraMode,
    pub click_to_open: bool,
    pub initial_variant: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera_mode: CameraMode::Orbit,
            click_to_open: true,
            initial_variant: DEFAULT_VARIANT.to_string(),
        }
    }
}

impl ViewerConfig {
    /// Build from `data-*` style lookups; missing or malformed values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(raw) = lookup("data-camera-mode") {
            match raw.parse() {
                Ok(mode) => cfg.camera_mode = mode,
                Err(e) => log::warn!("[config] {}", e),
            }
        }
        if let Some(raw) = lookup("data-click-to-open") {
            match raw.trim() {
                "true" | "1" | "" => cfg.click_to_open = true,
                "false" | "0" => cfg.click_to_open = false,
                other => log::warn!("[config] ignoring data-click-to-open={:?}", other),
            }
        }
        if let Some(raw) = lookup("data-initial-variant") {
            let raw = raw.trim();
            if !raw.is_empty() {
                cfg.initial_variant = raw.to_string();
            }
        }
        cfg
    }
}
