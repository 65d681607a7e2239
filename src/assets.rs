#![allow(dead_code)]

//! Thin collaborator contracts for mesh and image loading. The actual file
//! parsing lives outside the core (asset formats are explicitly out of
//! scope); this module defines the error type the core propagates and the
//! procedural fallbacks used when no loader is wired up.

use crate::image::HdrImage;
use crate::mesh::{Mesh, MeshData};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssetError {
    NotFound,
    UnsupportedFormat,
    Empty,
}

/// Loads mesh geometry from `path`. Real parsing is an external
/// collaborator's job; this always reports [`AssetError::NotFound`] and
/// leaves callers to fall back to [`Mesh::unit_triangle`].
pub fn load_mesh(path: &str) -> Result<MeshData, AssetError> {
    let _ = path;
    Err(AssetError::NotFound)
}

/// Loads image data from `path`, same external-collaborator caveat as
/// [`load_mesh`].
pub fn load_image(path: &str) -> Result<HdrImage, AssetError> {
    let _ = path;
    Err(AssetError::NotFound)
}

/// Loads a mesh asset, falling back to a procedural placeholder and
/// printing a warning on failure, matching the driver-level error policy
/// in the error-handling design (asset failure aborts before rendering
/// begins only when no usable geometry exists at all).
pub fn load_mesh_or_fallback(path: &str, smooth_shading: bool) -> Mesh {
    match load_mesh(path) {
        Ok(data) if !data.positions.is_empty() => Mesh::from_data(data, smooth_shading),
        _ => {
            eprintln!("warning: could not load mesh '{}', using placeholder geometry", path);
            Mesh::unit_triangle()
        }
    }
}

/// Loads an image asset, falling back to a checkerboard placeholder.
pub fn load_image_or_fallback(path: &str) -> HdrImage {
    match load_image(path) {
        Ok(image) => image,
        Err(_) => {
            eprintln!("warning: could not load image '{}', using placeholder texture", path);
            HdrImage::checkerboard()
        }
    }
}
