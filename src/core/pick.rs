use super::model::{Aabb, ModelCpu};
use glam::{Mat4, Vec3};

/// Slab test; returns the entry distance along the ray (0 when starting inside).
#[inline]
pub fn ray_aabb(ray_origin: Vec3, ray_dir: Vec3, bounds: &Aabb) -> Option<f32> {
    let inv = ray_dir.recip();
    let t0 = (bounds.min - ray_origin) * inv;
    let t1 = (bounds.max - ray_origin) * inv;
    let t_near = t0.min(t1).max_element();
    let t_far = t0.max(t1).min_element();
    if t_far < 0.0 || t_near > t_far || t_near.is_nan() || t_far.is_nan() {
        return None;
    }
    Some(t_near.max(0.0))
}

/// Möller–Trumbore, double sided.
#[inline]
pub fn ray_triangle(ray_origin: Vec3, ray_dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let e1 = b - a;
    let e2 = c - a;
    let p = ray_dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < 1e-8 {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray_origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray_dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

/// Nearest hit distance (world units) between a world-space ray and the
/// model's triangles. `part_world` holds one world matrix per mesh part.
pub fn raycast_model(
    model: &ModelCpu,
    part_world: &[Mat4],
    ray_origin: Vec3,
    ray_dir: Vec3,
) -> Option<f32> {
    let mut best: Option<f32> = None;
    for (part, world) in model.parts.iter().zip(part_world) {
        let det = world.determinant();
        if det.abs() < f32::EPSILON {
            continue;
        }
        let inv = world.inverse();
        let ro = inv.transform_point3(ray_origin);
        let rd = inv.transform_vector3(ray_dir);

        let mut local = Aabb::EMPTY;
        for v in &part.vertices {
            local.extend(Vec3::from(v.pos));
        }
        if ray_aabb(ro, rd, &local).is_none() {
            continue;
        }
        for tri in part.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(part.vertices[i as usize].pos));
            if let Some(t_local) = ray_triangle(ro, rd, a, b, c) {
                let hit_world = world.transform_point3(ro + rd * t_local);
                let t = (hit_world - ray_origin).length();
                if best.map_or(true, |bt| t < bt) {
                    best = Some(t);
                }
            }
        }
    }
    best
}
