#![allow(dead_code)]

//! The worker pool: a fixed number of OS threads drain a pre-populated
//! [`WorkQueue`] of tiles, path-tracing each one and writing directly into
//! disjoint regions of the shared output image.

use std::cell::UnsafeCell;

use crate::camera::Camera;
use crate::consts::{MAX_THREADS, TILE_H, TILE_W};
use crate::image::HdrImage;
use crate::material::MaterialSystem;
use crate::math::Xorshift32;
use crate::metrics::{GlobalMetrics, PerThreadMetrics};
use crate::pathtracer;
use crate::queue::{compute_tiles, Tile, WorkQueue};
use crate::scene::Scene;

/// The read-only state every worker needs to trace a ray.
pub struct RenderContext<'a> {
    pub scene: &'a Scene,
    pub materials: &'a MaterialSystem,
    pub camera: &'a Camera,
}

/// Wraps the output framebuffer so worker threads can hold only a shared
/// reference to it. Sound because tiles partition the pixel grid: two
/// workers never write the same `(x, y)`.
struct TileImage(UnsafeCell<HdrImage>);

unsafe impl Sync for TileImage {}

impl TileImage {
    fn new(image: HdrImage) -> TileImage {
        TileImage(UnsafeCell::new(image))
    }

    fn width(&self) -> usize {
        unsafe { (*self.0.get()).width() }
    }

    fn height(&self) -> usize {
        unsafe { (*self.0.get()).height() }
    }

    /// Caller must guarantee no other thread is concurrently writing
    /// `(x, y)` -- true as long as every caller stays inside its own tile.
    unsafe fn set(&self, x: usize, y: usize, value: [f32; 4]) {
        (*self.0.get()).set(x, y, value);
    }

    fn into_inner(self) -> HdrImage {
        self.0.into_inner()
    }
}

/// Path-traces every pixel in `tile` and writes RGBA32F into `image`.
/// Touches no pixel outside `[tile.min_x, tile.max_x) x [tile.min_y,
/// tile.max_y)`.
fn path_trace_tile(ctx: &RenderContext, tile: Tile, image: &TileImage, samples_per_pixel: usize, rng: &mut Xorshift32, metrics: &mut PerThreadMetrics) {
    let image_width = image.width();
    let image_height = image.height();

    for y in tile.min_y..tile.max_y {
        for x in tile.min_x..tile.max_x {
            let mut accum = [0.0f32; 3];
            for _ in 0..samples_per_pixel {
                let ray = ctx.camera.generate_ray(image_width, image_height, x, y, rng);
                let sample = pathtracer::trace_path(ctx.scene, ctx.materials, ray.orig, ray.dir, rng, metrics);
                for c in 0..3 {
                    accum[c] += sample[c];
                }
            }
            let inv_spp = 1.0 / samples_per_pixel as f32;
            let pixel = [accum[0] * inv_spp, accum[1] * inv_spp, accum[2] * inv_spp, 1.0];
            unsafe {
                image.set(x, y, pixel);
            }
        }
    }
}

/// Renders the full image with a fixed pool of `thread_count` worker
/// threads (clamped to `[1, MAX_THREADS]`), each draining the tile queue
/// until it's empty. Since every tile is enqueued before any worker
/// starts, an empty queue always means the render is complete -- no
/// producer will add more work mid-pass, so workers exit rather than poll
/// and wait.
pub fn render_scene(scene: &Scene, materials: &MaterialSystem, camera: &Camera, image_width: usize, image_height: usize, thread_count: usize, samples_per_pixel: usize) -> (HdrImage, PerThreadMetrics) {
    let thread_count = thread_count.clamp(1, MAX_THREADS);

    let cols = (image_width + TILE_W - 1) / TILE_W;
    let rows = (image_height + TILE_H - 1) / TILE_H;
    let tiles = compute_tiles(image_width, image_height, TILE_W, TILE_H, cols * rows);

    let mut queue = WorkQueue::with_capacity(tiles.len());
    queue.reset(tiles);

    let image = TileImage::new(HdrImage::new(image_width, image_height));
    let global_metrics = GlobalMetrics::new();
    let ctx = RenderContext { scene, materials, camera };

    crossbeam::thread::scope(|scope| {
        for worker_id in 0..thread_count {
            let queue = &queue;
            let image = &image;
            let ctx = &ctx;
            let global_metrics = &global_metrics;
            scope.spawn(move |_| {
                let mut rng = Xorshift32::new_from_worker_id(worker_id as u32);
                let mut local_metrics = PerThreadMetrics::new();
                while let Some(tile) = queue.pop() {
                    path_trace_tile(ctx, tile, image, samples_per_pixel, &mut rng, &mut local_metrics);
                }
                global_metrics.merge(&local_metrics);
            });
        }
    })
    .expect("a render worker thread panicked");

    (image.into_inner(), global_metrics.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Material, BACKGROUND_MATERIAL};
    use crate::math::{Point, Quaternion};
    use crate::mesh::{build_mesh_midphase, Mesh};
    use crate::scene::add_object_to_scene;

    #[test]
    fn render_writes_every_pixel_and_reports_rays() {
        let mut mesh = Mesh::unit_triangle();
        build_mesh_midphase(&mut mesh);
        let mut scene = Scene::default();
        add_object_to_scene(&mut scene, mesh, 0, Point::new(0.0, 0.0, -3.0), Quaternion::identity(), 3.0);
        crate::scene::build_scene_broadphase(&mut scene);

        let mut materials = MaterialSystem::new();
        materials.register_material(0, Material::diffuse([0.8, 0.8, 0.8]));
        materials.register_material(BACKGROUND_MATERIAL, Material::emissive([0.1, 0.1, 0.1]));

        let camera = Camera::new(Point::new(0.0, 0.0, 0.0), Quaternion::identity(), 1.0, 8, 8);

        let (image, metrics) = render_scene(&scene, &materials, &camera, 8, 8, 2, 4);
        assert_eq!(image.width(), 8);
        assert_eq!(image.height(), 8);
        assert!(metrics.rays_traced > 0);

        for y in 0..8 {
            for x in 0..8 {
                let px = image.get(x, y);
                assert!(px[0].is_finite() && px[1].is_finite() && px[2].is_finite());
            }
        }
    }
}
