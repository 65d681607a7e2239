#![allow(dead_code)]

//! Per-sample path construction and reverse-sweep radiance accumulation.
//! `trace_path` is the inner loop `path_trace_tile` calls once per sample;
//! averaging over samples and writing into the image happens in
//! `crate::render`.

use crate::consts::{MAX_BOUNCES, RADIANCE_CLAMP, SELF_INTERSECTION_EPSILON};
use crate::material::{self, EvalVertex, MaterialSystem, BACKGROUND_MATERIAL};
use crate::math::{clamp, dot, Point, Vector, Xorshift32};
use crate::metrics::PerThreadMetrics;
use crate::scene::{self, Scene};

/// A single interaction point along a path. The background vertex (a path
/// miss) carries a zero normal and `material_id == BACKGROUND_MATERIAL`;
/// its "material" is looked up in the same `MaterialSystem` as any other,
/// so an environment emission texture is just a material registered under
/// that reserved id.
struct PathVertex {
    outgoing_dir: Vector,
    normal: Vector,
    uv: (f32, f32),
    material_id: u32,
}

/// Cosine-weighted hemisphere sample around `normal`, via `normal +
/// unit_random`. Flips to the correct hemisphere rather than rejecting and
/// resampling.
fn cosine_weighted_bounce(normal: Vector, rng: &mut Xorshift32) -> Vector {
    let random_vec = loop {
        let v = Vector::new(rng.next_offset(1.0), rng.next_offset(1.0), rng.next_offset(1.0));
        if v.length2() > 1e-8 {
            break v.normalized();
        }
    };
    let dir = (normal + random_vec).normalized();
    if dot(dir, normal) < 0.0 {
        -dir
    } else {
        dir
    }
}

/// Traces one sample path from `orig`/`dir` and returns its contribution
/// to the pixel's radiance. Does not divide by sample count; the caller
/// accumulates and normalizes across `SAMPLES_PER_PIXEL` calls.
pub fn trace_path(scene: &Scene, materials: &MaterialSystem, mut orig: Point, mut dir: Vector, rng: &mut Xorshift32, metrics: &mut PerThreadMetrics) -> [f32; 3] {
    let mut vertices: Vec<PathVertex> = Vec::with_capacity(MAX_BOUNCES);

    for _ in 0..MAX_BOUNCES {
        metrics.add_ray();
        match scene::ray_intersect_scene(scene, orig, dir, metrics) {
            None => {
                vertices.push(PathVertex {
                    outgoing_dir: -dir,
                    normal: Vector::zero(),
                    uv: (0.0, 0.0),
                    material_id: BACKGROUND_MATERIAL,
                });
                break;
            }
            Some(hit) => {
                let normal = hit.normal.into_vector();
                let geometric_normal = hit.geometric_normal.into_vector();
                let hit_point = orig + (dir * hit.t);
                let bounce_dir = cosine_weighted_bounce(normal, rng);

                vertices.push(PathVertex {
                    outgoing_dir: -dir,
                    normal,
                    uv: hit.uv,
                    material_id: hit.material_id,
                });

                let epsilon_offset = geometric_normal * SELF_INTERSECTION_EPSILON;
                let epsilon_offset = if dot(normal, dir) < 0.0 { -epsilon_offset } else { epsilon_offset };
                orig = hit_point + epsilon_offset;
                dir = bounce_dir;
            }
        }
    }

    let mut radiance = [0.0f32; 3];
    for i in (0..vertices.len()).rev() {
        let vertex = &vertices[i];
        let (albedo, emission) = match materials.material(vertex.material_id) {
            Some(mat) => material::evaluate_material(mat, &EvalVertex { uv: vertex.uv, outgoing_dir: vertex.outgoing_dir }, materials),
            None => ([0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
        };

        let cos_term = if i + 1 < vertices.len() {
            dot(vertex.normal, -vertices[i + 1].outgoing_dir).max(0.0)
        } else {
            0.0
        };

        let mut outgoing = [0.0f32; 3];
        for c in 0..3 {
            outgoing[c] = clamp(emission[c] + (albedo[c] * radiance[c] * cos_term), 0.0, RADIANCE_CLAMP);
        }
        radiance = outgoing;
    }

    radiance
}
