pub mod bvh;

pub use self::bvh::{BvhTree, TraversalResult};
