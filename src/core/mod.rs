pub mod animation;
pub mod clip;
pub mod confetti;
pub mod constants;
pub mod logo;
pub mod model;
pub mod motion;
pub mod params;
pub mod pick;
pub mod slot;

pub use animation::*;
pub use clip::*;
pub use confetti::*;
pub use constants::*;
pub use logo::*;
pub use model::*;
pub use motion::*;
pub use params::*;
pub use pick::*;
pub use slot::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
