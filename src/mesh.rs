#![allow(dead_code)]

use crate::accel::BvhTree;
use crate::bbox::Aabb;
use crate::consts::MIDPHASE_LEAF_BUDGET;
use crate::math::{Normal, Point, Vector};
use crate::metrics::PerThreadMetrics;
use crate::triangle;

/// Raw geometry handed over by the mesh loader collaborator (`src/assets.rs`
/// consumes it from an external contract, not re-specified here).
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<Point>,
    pub normals: Vec<Normal>,
    pub uvs: Vec<(f32, f32)>,
    pub indices: Vec<u32>,
}

/// A triangle mesh plus its midphase BVH. The midphase starts empty and is
/// populated by [`build_mesh_midphase`].
pub struct Mesh {
    positions: Vec<Point>,
    normals: Vec<Normal>,
    uvs: Vec<(f32, f32)>,
    indices: Vec<u32>,
    smooth_shading: bool,
    midphase: BvhTree,
}

#[derive(Debug, Copy, Clone)]
pub struct MeshHit {
    pub t: f32,
    /// Shading normal: smoothed across the triangle's vertex normals when
    /// the mesh uses smooth shading, otherwise equal to `geometric_normal`.
    /// Used for bounce sampling and lighting.
    pub normal: Normal,
    /// The triangle's flat, unsmoothed normal. Used for the
    /// self-intersection offset, independent of shading normal
    /// interpolation.
    pub geometric_normal: Normal,
    pub uv: (f32, f32),
}

impl Mesh {
    pub fn from_data(data: MeshData, smooth_shading: bool) -> Mesh {
        assert_eq!(data.indices.len() % 3, 0, "mesh index count must be a multiple of 3");
        for &i in &data.indices {
            assert!((i as usize) < data.positions.len(), "mesh index out of range");
        }
        Mesh {
            positions: data.positions,
            normals: data.normals,
            uvs: data.uvs,
            indices: data.indices,
            smooth_shading,
            midphase: BvhTree::empty(),
        }
    }

    /// A single unit-sized triangle, used as the procedural fallback asset.
    pub fn unit_triangle() -> Mesh {
        Mesh::from_data(
            MeshData {
                positions: vec![Point::new(-0.5, -0.5, 0.0), Point::new(0.5, -0.5, 0.0), Point::new(0.0, 0.5, 0.0)],
                normals: vec![Vector::new(0.0, 0.0, 1.0).into_normal(); 3],
                uvs: vec![(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)],
                indices: vec![0, 1, 2],
            },
            false,
        )
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_midphase_built(&self) -> bool {
        !self.midphase.is_empty()
    }

    fn triangle_vertex_indices(&self, tri: usize) -> [usize; 3] {
        [
            self.indices[tri * 3] as usize,
            self.indices[(tri * 3) + 1] as usize,
            self.indices[(tri * 3) + 2] as usize,
        ]
    }

    fn triangle_positions(&self, tri: usize) -> (Point, Point, Point) {
        let idx = self.triangle_vertex_indices(tri);
        (self.positions[idx[0]], self.positions[idx[1]], self.positions[idx[2]])
    }

    /// World/local-space bound of the whole mesh, used when an owning
    /// scene object transforms it into the broadphase.
    pub fn local_bounds(&self) -> Aabb {
        let mut b = Aabb::empty();
        for &p in &self.positions {
            b |= p;
        }
        b
    }
}

/// Builds the per-triangle midphase BVH. Idempotent: rebuilding over
/// unchanged mesh data produces an equivalent tree every time, since the
/// agglomerative build is a deterministic function of the leaf order.
pub fn build_mesh_midphase(mesh: &mut Mesh) {
    let leaf_aabbs: Vec<Aabb> = (0..mesh.triangle_count())
        .map(|tri| {
            let (a, b, c) = mesh.triangle_positions(tri);
            let mut bound = Aabb::from_points(a, a);
            bound |= b;
            bound |= c;
            bound
        })
        .collect();
    mesh.midphase = BvhTree::build(&leaf_aabbs);
}

/// Traverses the midphase, tests every candidate triangle, and keeps the
/// closest positive-`t` hit. Returns `None` on a clean miss or when the
/// midphase traversal overflows its leaf buffer (treated conservatively as
/// a miss, per the traversal-budget-exceeded error policy).
pub fn ray_intersect_mesh(mesh: &Mesh, orig: Point, dir: Vector, metrics: &mut PerThreadMetrics) -> Option<MeshHit> {
    let mut leaf_hits = [(0u32, 0.0f32); MIDPHASE_LEAF_BUDGET];
    let traversal = mesh.midphase.traverse(orig, dir, f32::INFINITY, &mut leaf_hits);
    metrics.add_aabb_tests(traversal.aabb_test_count);

    if traversal.overflow {
        metrics.add_overflow();
        return None;
    }

    let mut best_t = f32::INFINITY;
    let mut best: Option<(usize, triangle::TriHit)> = None;

    for &(leaf_index, _entry_t) in &leaf_hits[..traversal.count] {
        let tri = leaf_index as usize;
        let (a, b, c) = mesh.triangle_positions(tri);
        metrics.add_triangle_test();
        if let Some(hit) = triangle::intersect_ray(orig, dir, (a, b, c), best_t) {
            if hit.t < best_t {
                best_t = hit.t;
                best = Some((tri, hit));
            }
        }
    }

    best.map(|(tri, hit)| {
        let idx = mesh.triangle_vertex_indices(tri);
        let u = hit.barycentric_u;
        let v = hit.barycentric_v;
        let w = 1.0 - u - v;

        let uv0 = mesh.uvs[idx[0]];
        let uv1 = mesh.uvs[idx[1]];
        let uv2 = mesh.uvs[idx[2]];
        let uv = (
            (w * uv0.0) + (u * uv1.0) + (v * uv2.0),
            (w * uv0.1) + (u * uv1.1) + (v * uv2.1),
        );

        let geometric_normal = hit.geometric_normal.into_normal().normalized();
        let normal = if mesh.smooth_shading {
            let blended = (mesh.normals[idx[0]] * w) + (mesh.normals[idx[1]] * u) + (mesh.normals[idx[2]] * v);
            blended.normalized()
        } else {
            geometric_normal
        };

        MeshHit { t: hit.t, normal, geometric_normal, uv }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_triangle() -> Mesh {
        Mesh::from_data(
            MeshData {
                positions: vec![Point::new(0.0, 0.0, -5.0), Point::new(1.0, 0.0, -5.0), Point::new(0.5, 1.0, -5.0)],
                normals: vec![Vector::new(0.0, 0.0, 1.0).into_normal(); 3],
                uvs: vec![(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)],
                indices: vec![0, 1, 2],
            },
            false,
        )
    }

    #[test]
    fn hit_with_interpolated_uv() {
        let mut mesh = flat_triangle();
        build_mesh_midphase(&mut mesh);
        let mut metrics = PerThreadMetrics::new();
        let hit = ray_intersect_mesh(&mesh, Point::new(0.5, 0.5, 0.0), Vector::new(0.0, 0.0, -1.0), &mut metrics).unwrap();
        assert!((hit.t - 5.0).abs() < 1e-4);
        assert!(hit.normal.z() > 0.0);
    }

    #[test]
    fn miss_outside_triangle() {
        let mut mesh = flat_triangle();
        build_mesh_midphase(&mut mesh);
        let mut metrics = PerThreadMetrics::new();
        assert!(ray_intersect_mesh(&mesh, Point::new(10.0, 10.0, 0.0), Vector::new(0.0, 0.0, -1.0), &mut metrics).is_none());
    }

    #[test]
    fn smooth_vs_flat_shading_normals() {
        let data = MeshData {
            positions: vec![Point::new(0.0, 0.0, -5.0), Point::new(1.0, 0.0, -5.0), Point::new(0.5, 1.0, -5.0)],
            normals: vec![
                Vector::new(1.0, 0.0, 0.0).into_normal(),
                Vector::new(0.0, 1.0, 0.0).into_normal(),
                Vector::new(0.0, 0.0, 1.0).into_normal(),
            ],
            uvs: vec![(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)],
            indices: vec![0, 1, 2],
        };

        let mut flat = Mesh::from_data(data.clone(), false);
        build_mesh_midphase(&mut flat);
        let mut smooth = Mesh::from_data(data, true);
        build_mesh_midphase(&mut smooth);

        let mut metrics = PerThreadMetrics::new();
        let flat_a = ray_intersect_mesh(&flat, Point::new(0.5, 0.15, 0.0), Vector::new(0.0, 0.0, -1.0), &mut metrics).unwrap();
        let flat_b = ray_intersect_mesh(&flat, Point::new(0.5, 0.4, 0.0), Vector::new(0.0, 0.0, -1.0), &mut metrics).unwrap();
        assert_eq!(flat_a.normal.x(), flat_b.normal.x());
        assert_eq!(flat_a.normal.y(), flat_b.normal.y());
        assert_eq!(flat_a.normal.z(), flat_b.normal.z());

        let smooth_a = ray_intersect_mesh(&smooth, Point::new(0.5, 0.15, 0.0), Vector::new(0.0, 0.0, -1.0), &mut metrics).unwrap();
        let smooth_b = ray_intersect_mesh(&smooth, Point::new(0.5, 0.4, 0.0), Vector::new(0.0, 0.0, -1.0), &mut metrics).unwrap();
        let diff = (smooth_a.normal.x() - smooth_b.normal.x()).abs()
            + (smooth_a.normal.y() - smooth_b.normal.y()).abs()
            + (smooth_a.normal.z() - smooth_b.normal.z()).abs();
        assert!(diff > 1e-3);
    }

    #[test]
    fn idempotent_rebuild() {
        let mut mesh = flat_triangle();
        build_mesh_midphase(&mut mesh);
        let mut metrics = PerThreadMetrics::new();
        let first = ray_intersect_mesh(&mesh, Point::new(0.5, 0.5, 0.0), Vector::new(0.0, 0.0, -1.0), &mut metrics).unwrap();
        build_mesh_midphase(&mut mesh);
        let second = ray_intersect_mesh(&mesh, Point::new(0.5, 0.5, 0.0), Vector::new(0.0, 0.0, -1.0), &mut metrics).unwrap();
        assert_eq!(first.t, second.t);
    }
}
