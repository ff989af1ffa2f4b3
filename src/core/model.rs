// GLB parsing into a renderer-independent model: node hierarchy, mesh parts,
// base-color textures and the first animation clip.

use super::clip::{AnimClip, TrackQuat, TrackVec3};
use super::constants::MODEL_TARGET_SIZE;
use glam::{Mat4, Quat, Vec3};
use gltf::animation::util::ReadOutputs;
use gltf::animation::{Interpolation, Property};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("glTF import failed: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("asset contains no triangle geometry")]
    NoGeometry,
    #[error("index {index} out of range for {count} vertices")]
    IndexOutOfRange { index: u32, count: usize },
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("image has zero size")]
    EmptyImage,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub nrm: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug)]
pub struct Node {
    pub parent: Option<usize>,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

#[derive(Clone, Debug)]
pub struct MeshPart {
    pub node: usize,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
    /// Index into [`ModelCpu::textures`].
    pub texture: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct TextureCpu {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn extend(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Uniform scale plus recentering that maps the model's rest-pose bounds to a
/// box centered at the origin whose largest edge is `MODEL_TARGET_SIZE`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalization {
    pub scale: f32,
    pub center: Vec3,
}

impl Normalization {
    pub fn from_bounds(bounds: &Aabb) -> Self {
        if bounds.is_empty() {
            return Self {
                scale: 1.0,
                center: Vec3::ZERO,
            };
        }
        let max_dim = bounds.size().max_element();
        let scale = if max_dim > f32::EPSILON {
            MODEL_TARGET_SIZE / max_dim
        } else {
            1.0
        };
        Self {
            scale,
            center: bounds.center(),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.scale)) * Mat4::from_translation(-self.center)
    }
}

#[derive(Clone, Debug)]
pub struct ModelCpu {
    pub nodes: Vec<Node>,
    pub parts: Vec<MeshPart>,
    pub textures: Vec<Option<TextureCpu>>,
    pub clip: Option<AnimClip>,
    /// Rest-pose bounds in model space.
    pub bounds: Aabb,
}

impl ModelCpu {
    pub fn from_glb(bytes: &[u8]) -> Result<Self, LoadError> {
        let (doc, buffers, images) = gltf::import_slice(bytes)?;

        let mut nodes: Vec<Node> = doc
            .nodes()
            .map(|n| {
                let (t, r, s) = n.transform().decomposed();
                Node {
                    parent: None,
                    translation: Vec3::from(t),
                    rotation: Quat::from_array(r).normalize(),
                    scale: Vec3::from(s),
                }
            })
            .collect();
        for n in doc.nodes() {
            for child in n.children() {
                if nodes[child.index()].parent.is_none() {
                    nodes[child.index()].parent = Some(n.index());
                }
            }
        }

        let mesh_nodes: Vec<gltf::Node> = match doc.default_scene().or_else(|| doc.scenes().next()) {
            Some(scene) => {
                let mut out = Vec::new();
                let mut stack: Vec<gltf::Node> = scene.nodes().collect();
                while let Some(n) = stack.pop() {
                    stack.extend(n.children());
                    out.push(n);
                }
                out
            }
            None => doc.nodes().collect(),
        };

        let mut parts = Vec::new();
        for node in mesh_nodes {
            let Some(mesh) = node.mesh() else {
                continue;
            };
            for prim in mesh.primitives() {
                if prim.mode() != gltf::mesh::Mode::Triangles {
                    continue;
                }
                let reader = prim.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
                let Some(positions) = reader.read_positions() else {
                    continue;
                };
                let positions: Vec<[f32; 3]> = positions.collect();
                let indices: Vec<u32> = match reader.read_indices() {
                    Some(ix) => ix.into_u32().collect(),
                    None => (0..positions.len() as u32).collect(),
                };
                if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
                    return Err(LoadError::IndexOutOfRange {
                        index: bad,
                        count: positions.len(),
                    });
                }
                let normals: Vec<[f32; 3]> = match reader.read_normals() {
                    Some(it) => it.collect(),
                    None => smooth_normals(&positions, &indices),
                };
                let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
                    Some(it) => it.into_f32().collect(),
                    None => vec![[0.0, 0.0]; positions.len()],
                };
                let vertices = positions
                    .iter()
                    .enumerate()
                    .map(|(i, &pos)| Vertex {
                        pos,
                        nrm: normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                        uv: uvs.get(i).copied().unwrap_or([0.0, 0.0]),
                    })
                    .collect();
                let pbr = prim.material().pbr_metallic_roughness();
                parts.push(MeshPart {
                    node: node.index(),
                    vertices,
                    indices,
                    base_color: pbr.base_color_factor(),
                    texture: pbr
                        .base_color_texture()
                        .map(|info| info.texture().source().index()),
                });
            }
        }
        if parts.iter().all(|p| p.indices.len() < 3) {
            return Err(LoadError::NoGeometry);
        }

        let textures = images.iter().map(rgba_texture).collect();
        let clip = doc
            .animations()
            .next()
            .map(|anim| read_clip(&anim, &buffers));

        let mut model = ModelCpu {
            nodes,
            parts,
            textures,
            clip,
            bounds: Aabb::EMPTY,
        };
        model.bounds = model.bounds_for(&model.node_globals(None));
        Ok(model)
    }

    /// Model-space matrix of every node, at rest or at `t` seconds into `clip`.
    pub fn node_globals(&self, pose: Option<(&AnimClip, f32)>) -> Vec<Mat4> {
        let locals: Vec<Mat4> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let (t, r, s) = match pose {
                    Some((clip, time)) => (
                        clip.translation(i, time, n.translation),
                        clip.rotation(i, time, n.rotation),
                        clip.scale(i, time, n.scale),
                    ),
                    None => (n.translation, n.rotation, n.scale),
                };
                Mat4::from_scale_rotation_translation(s, r, t)
            })
            .collect();
        let mut globals: Vec<Option<Mat4>> = vec![None; self.nodes.len()];
        for i in 0..self.nodes.len() {
            resolve_global(i, &self.nodes, &locals, &mut globals, 0);
        }
        globals
            .into_iter()
            .map(|g| g.unwrap_or(Mat4::IDENTITY))
            .collect()
    }

    /// Node matrices posed at `time` seconds into the model's clip, or at rest.
    pub fn pose(&self, time: Option<f32>) -> Vec<Mat4> {
        self.node_globals(self.clip.as_ref().zip(time))
    }

    /// Model-space matrix of each mesh part, in part order.
    pub fn part_matrices(&self, globals: &[Mat4]) -> Vec<Mat4> {
        self.parts
            .iter()
            .map(|p| globals.get(p.node).copied().unwrap_or(Mat4::IDENTITY))
            .collect()
    }

    pub(crate) fn bounds_for(&self, globals: &[Mat4]) -> Aabb {
        let mut bounds = Aabb::EMPTY;
        for (part, m) in self.parts.iter().zip(self.part_matrices(globals)) {
            for v in &part.vertices {
                bounds.extend(m.transform_point3(Vec3::from(v.pos)));
            }
        }
        bounds
    }

    pub fn normalization(&self) -> Normalization {
        Normalization::from_bounds(&self.bounds)
    }
}

fn resolve_global(
    i: usize,
    nodes: &[Node],
    locals: &[Mat4],
    globals: &mut [Option<Mat4>],
    depth: usize,
) -> Mat4 {
    if let Some(m) = globals[i] {
        return m;
    }
    let m = match nodes[i].parent {
        // depth cap guards against cyclic hierarchies in malformed files
        Some(p) if depth < nodes.len() => {
            resolve_global(p, nodes, locals, globals, depth + 1) * locals[i]
        }
        _ => locals[i],
    };
    globals[i] = Some(m);
    m
}

fn smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
        let pa = Vec3::from(positions[a]);
        let n = (Vec3::from(positions[b]) - pa).cross(Vec3::from(positions[c]) - pa);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

fn rgba_texture(img: &gltf::image::Data) -> Option<TextureCpu> {
    use gltf::image::Format;
    let rgba = match img.format {
        Format::R8G8B8A8 => img.pixels.clone(),
        Format::R8G8B8 => img
            .pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        Format::R8 => img.pixels.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        Format::R8G8 => img
            .pixels
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        other => {
            log::warn!("[model] unsupported texture format {:?}; using white", other);
            return None;
        }
    };
    Some(TextureCpu {
        rgba,
        width: img.width,
        height: img.height,
    })
}

fn read_clip(anim: &gltf::Animation, buffers: &[gltf::buffer::Data]) -> AnimClip {
    let mut clip = AnimClip {
        name: anim.name().unwrap_or("").to_string(),
        ..AnimClip::default()
    };
    for ch in anim.channels() {
        let node = ch.target().node().index();
        let cubic = ch.sampler().interpolation() == Interpolation::CubicSpline;
        let reader = ch.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
        let (Some(inputs), Some(outputs)) = (reader.read_inputs(), reader.read_outputs()) else {
            continue;
        };
        let times: Vec<f32> = inputs.collect();
        if let Some(&last) = times.last() {
            clip.duration = clip.duration.max(last);
        }
        match (ch.target().property(), outputs) {
            (Property::Translation, ReadOutputs::Translations(it)) => {
                let values = keyframe_values(it.map(Vec3::from).collect(), cubic);
                clip.translations.insert(node, TrackVec3 { times, values });
            }
            (Property::Rotation, ReadOutputs::Rotations(it)) => {
                let values = it
                    .into_f32()
                    .map(|q| Quat::from_array(q).normalize())
                    .collect();
                let values = keyframe_values(values, cubic);
                clip.rotations.insert(node, TrackQuat { times, values });
            }
            (Property::Scale, ReadOutputs::Scales(it)) => {
                let values = keyframe_values(it.map(Vec3::from).collect(), cubic);
                clip.scales.insert(node, TrackVec3 { times, values });
            }
            _ => {}
        }
    }
    clip
}

/// Cubic-spline outputs store (in-tangent, value, out-tangent) per key; keep
/// the values and sample them linearly.
fn keyframe_values<T: Copy>(values: Vec<T>, cubic: bool) -> Vec<T> {
    if cubic {
        values.chunks_exact(3).map(|c| c[1]).collect()
    } else {
        values
    }
}
