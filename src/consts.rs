//! Tunable constants. These are compile-time constants rather than
//! environment variables or config-file values, per the external
//! interface contract -- the core is meant to be configured once, at
//! build time, not reconfigured at runtime.

/// Tile width in pixels.
pub const TILE_W: usize = 32;
/// Tile height in pixels.
pub const TILE_H: usize = 32;

/// Maximum number of diffuse bounces per path.
pub const MAX_BOUNCES: usize = 8;
/// Samples taken per pixel.
pub const SAMPLES_PER_PIXEL: usize = 16;

/// Default worker thread count ceiling; `num_cpus::get()` is clamped to
/// this in the driver.
pub const MAX_THREADS: usize = 64;

/// Per-component radiance clamp applied before accumulation, to suppress
/// fireflies.
pub const RADIANCE_CLAMP: f32 = 16.0;

/// Depth bound for the BVH ping-pong traversal stacks.
pub const BVH_STACK_SIZE: usize = 256;

/// Leaf-hit buffer size for midphase (per-mesh) traversal. Bumped past 64
/// because a binary BVH can produce more overlapping leaf hits per ray
/// than a 4-wide tree does for the same geometry.
pub const MIDPHASE_LEAF_BUDGET: usize = 128;

/// Leaf-hit buffer size for broadphase (scene) traversal.
pub const BROADPHASE_LEAF_BUDGET: usize = 128;

/// Hard cap on the number of objects a `Scene` can hold.
pub const SCENE_MAX_OBJECTS: usize = 1 << 16;

/// Self-intersection offset applied to secondary ray origins along the
/// surface normal.
pub const SELF_INTERSECTION_EPSILON: f32 = 1e-4;

/// Minimum squared vector length treated as non-degenerate; below this a
/// direction is considered zero-length.
pub const DEGENERATE_LENGTH2: f32 = 1e-12;

/// Fixed linear-probed capacity of `MaterialSystem`'s id maps.
pub const MATERIAL_SYSTEM_CAPACITY: usize = 32;
