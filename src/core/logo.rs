// Logo backdrop: decode the image and build a textured quad model for it.

use super::constants::{LOGO_HEIGHT, LOGO_POSITION};
use super::model::{Aabb, LoadError, MeshPart, ModelCpu, Node, TextureCpu, Vertex};
use glam::{Quat, Vec2, Vec3};

/// Decode a PNG into tightly packed RGBA8.
pub fn decode_logo(bytes: &[u8]) -> Result<TextureCpu, LoadError> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?.to_rgba8();
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(LoadError::EmptyImage);
    }
    Ok(TextureCpu {
        rgba: img.into_raw(),
        width,
        height,
    })
}

/// Plane size in world units: `LOGO_HEIGHT` tall, as wide as the image aspect allows.
pub fn logo_size(width_px: u32, height_px: u32) -> Option<Vec2> {
    if width_px == 0 || height_px == 0 {
        return None;
    }
    let aspect = width_px as f32 / height_px as f32;
    Some(Vec2::new(LOGO_HEIGHT * aspect, LOGO_HEIGHT))
}

/// Single-node model holding one camera-facing (+Z) quad at `LOGO_POSITION`.
pub fn logo_model(texture: TextureCpu) -> Option<ModelCpu> {
    let size = logo_size(texture.width, texture.height)?;
    let (hx, hy) = (size.x * 0.5, size.y * 0.5);
    let corner = |x: f32, y: f32, u: f32, v: f32| Vertex {
        pos: [x, y, 0.0],
        nrm: [0.0, 0.0, 1.0],
        uv: [u, v],
    };
    // image rows run top to bottom, so v = 0 sits on the top edge
    let vertices = vec![
        corner(-hx, -hy, 0.0, 1.0),
        corner(hx, -hy, 1.0, 1.0),
        corner(hx, hy, 1.0, 0.0),
        corner(-hx, hy, 0.0, 0.0),
    ];
    let mut model = ModelCpu {
        nodes: vec![Node {
            parent: None,
            translation: Vec3::from(LOGO_POSITION),
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }],
        parts: vec![MeshPart {
            node: 0,
            vertices,
            indices: vec![0, 1, 2, 0, 2, 3],
            base_color: [1.0, 1.0, 1.0, 1.0],
            texture: Some(0),
        }],
        textures: vec![Some(texture)],
        clip: None,
        bounds: Aabb::EMPTY,
    };
    model.bounds = model.bounds_for(&model.node_globals(None));
    Some(model)
}
