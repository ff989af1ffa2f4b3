/// Web-frontend constants: DOM hooks and presentation tuning.
///
/// Element ids are the contract with the hosting page; the viewer logs and
/// carries on when one is missing.
// Canvases
pub const CANVAS_ID: &str = "canvas";
pub const CONFETTI_CANVAS_ID: &str = "confetti-canvas";

// Entry gate
pub const ENTRY_OVERLAY_ID: &str = "overlay";
pub const ENTRY_BUTTON_ID: &str = "grattisBtn";

// Settings panel
pub const CONTROL_PANEL_SELECTOR: &str = ".control-panel";
pub const SETTINGS_BUTTON_ID: &str = "settingsButton";
pub const SETTINGS_PANEL_ID: &str = "settingsPanel";
pub const PANEL_ACTIVE_CLASS: &str = "active";

// Model controls
pub const TOGGLE_ANIMATION_ID: &str = "toggleAnimation";
pub const VARIANT_BUTTON_SELECTOR: &str = ".safe-btn";
pub const VARIANT_ATTRIBUTE: &str = "data-safe";

// Rendering
pub const MAX_PIXEL_RATIO: f64 = 2.0;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
pub const MSAA_SAMPLE_COUNT: u32 = 4; // WebGPU guarantees 1 and 4

// Confetti drawing
pub const CONFETTI_TIMEOUT_MS: i32 = (crate::core::CONFETTI_DURATION_SEC * 1000.0) as i32;
pub const CONFETTI_CANVAS_Z_INDEX: &str = "1000";
