#![allow(dead_code)]

//! The scene object model and its broadphase. A `Scene` is a flat set of
//! parallel arrays, one slot per object, mirroring the instancing layout the
//! old assembly code used -- just without the nested-assembly recursion,
//! since this renderer only ever has one flat instance list.

use crate::accel::BvhTree;
use crate::bbox::Aabb;
use crate::consts::{BROADPHASE_LEAF_BUDGET, DEGENERATE_LENGTH2, SCENE_MAX_OBJECTS};
use crate::math::{Matrix4x4, Normal, Point, Quaternion, Vector};
use crate::mesh::{self, Mesh};
use crate::metrics::PerThreadMetrics;

pub struct Scene {
    meshes: Vec<Mesh>,
    material_ids: Vec<u32>,
    model_matrix: Vec<Matrix4x4>,
    inv_model_matrix: Vec<Matrix4x4>,
    world_bounds: Vec<Aabb>,
    broadphase: BvhTree,
}

/// A confirmed scene-level hit, with the surface data already transformed
/// back into world space.
#[derive(Debug, Copy, Clone)]
pub struct SceneHit {
    pub t: f32,
    pub normal: Normal,
    /// Flat, unsmoothed normal, for the self-intersection offset.
    pub geometric_normal: Normal,
    pub uv: (f32, f32),
    pub material_id: u32,
}

impl Scene {
    pub fn new() -> Scene {
        Scene {
            meshes: Vec::new(),
            material_ids: Vec::new(),
            model_matrix: Vec::new(),
            inv_model_matrix: Vec::new(),
            world_bounds: Vec::new(),
            broadphase: BvhTree::empty(),
        }
    }

    pub fn object_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_broadphase_built(&self) -> bool {
        !self.broadphase.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Scene {
        Scene::new()
    }
}

/// Adds an object built from `mesh` to the scene, placed by a translation,
/// rotation, and uniform scale. The mesh's midphase must already be built.
/// A degenerate transform (zero scale) is still accepted here -- it's
/// skipped at intersection time, not at insertion time, so scene
/// construction never fails on a bad instance.
pub fn add_object_to_scene(scene: &mut Scene, mesh: Mesh, material_id: u32, position: Point, rotation: Quaternion, scale: f32) {
    assert!(scene.meshes.len() < SCENE_MAX_OBJECTS, "scene object capacity exceeded");
    assert!(mesh.is_midphase_built(), "mesh midphase must be built before adding to a scene");

    let model = Matrix4x4::from_trs(position, rotation, scale);
    let inv_model = model.inverse();
    let world_bounds = mesh.local_bounds().transformed(model);

    scene.meshes.push(mesh);
    scene.material_ids.push(material_id);
    scene.model_matrix.push(model);
    scene.inv_model_matrix.push(inv_model);
    scene.world_bounds.push(world_bounds);
}

/// Builds the scene broadphase over every object's world-space bound.
/// Idempotent, like the mesh midphase build: call again after adding more
/// objects to pick them up.
pub fn build_scene_broadphase(scene: &mut Scene) {
    scene.broadphase = BvhTree::build(&scene.world_bounds);
}

/// Traverses the broadphase, transforms the ray into each candidate
/// object's local space, and keeps the closest positive-`t` hit across all
/// objects. A leaf-buffer overflow is treated as a conservative miss of the
/// whole ray, counted in `metrics`.
pub fn ray_intersect_scene(scene: &Scene, orig: Point, dir: Vector, metrics: &mut PerThreadMetrics) -> Option<SceneHit> {
    let mut leaf_hits = [(0u32, 0.0f32); BROADPHASE_LEAF_BUDGET];
    let traversal = scene.broadphase.traverse(orig, dir, f32::INFINITY, &mut leaf_hits);
    metrics.add_aabb_tests(traversal.aabb_test_count);

    if traversal.overflow {
        metrics.add_overflow();
        return None;
    }

    let mut best_t = f32::INFINITY;
    let mut best: Option<SceneHit> = None;

    for &(leaf_index, _entry_t) in &leaf_hits[..traversal.count] {
        let obj = leaf_index as usize;
        let inv_model = scene.inv_model_matrix[obj];

        let local_orig = orig * inv_model;
        let local_dir_unnormalized = dir * inv_model;
        let len2 = local_dir_unnormalized.length2();
        if len2 < DEGENERATE_LENGTH2 {
            continue;
        }
        let local_dir = local_dir_unnormalized * (1.0 / len2.sqrt());

        if let Some(hit) = mesh::ray_intersect_mesh(&scene.meshes[obj], local_orig, local_dir, metrics) {
            let world_t = local_to_world_t(hit.t, local_dir_unnormalized, dir);
            if world_t > 0.0 && world_t < best_t {
                let model = scene.model_matrix[obj];
                let world_normal = (hit.normal.into_vector() * model).into_normal().normalized();
                let world_geometric_normal = (hit.geometric_normal.into_vector() * model).into_normal().normalized();
                best_t = world_t;
                best = Some(SceneHit {
                    t: world_t,
                    normal: world_normal,
                    geometric_normal: world_geometric_normal,
                    uv: hit.uv,
                    material_id: scene.material_ids[obj],
                });
            }
        }
    }

    best
}

/// A hit distance in local space, where the local ray direction has length
/// `|local_dir_unnormalized|`, corresponds to `local_t / |local_dir_unnormalized|`
/// in the space where the direction has unit length along the same line --
/// which is exactly the world-space `t`, since `world_dir` and
/// `local_dir_unnormalized` trace the same line through the transform.
fn local_to_world_t(local_t_at_unit_dir: f32, local_dir_unnormalized: Vector, _world_dir: Vector) -> f32 {
    local_t_at_unit_dir / local_dir_unnormalized.length()
}
