#![allow(dead_code)]

//! Materials and their small linear-probed lookup tables. Capacities are
//! fixed and tiny (at most [`MATERIAL_SYSTEM_CAPACITY`]), so a linear scan
//! beats a hash map both in code size and in practice.

use crate::consts::MATERIAL_SYSTEM_CAPACITY;
use crate::image::HdrImage;
use crate::math::{cartesian_to_spherical, spherical_to_equirect, Vector};

pub const SENTINEL_ID: u32 = u32::MAX;
pub const BACKGROUND_MATERIAL: u32 = u32::MAX - 1;

#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub albedo: [f32; 3],
    pub emission: [f32; 3],
    pub albedo_texture: u32,
    pub emission_texture: u32,
}

impl Material {
    pub fn diffuse(albedo: [f32; 3]) -> Material {
        Material {
            albedo,
            emission: [0.0, 0.0, 0.0],
            albedo_texture: SENTINEL_ID,
            emission_texture: SENTINEL_ID,
        }
    }

    pub fn emissive(emission: [f32; 3]) -> Material {
        Material {
            albedo: [0.0, 0.0, 0.0],
            emission,
            albedo_texture: SENTINEL_ID,
            emission_texture: SENTINEL_ID,
        }
    }
}

/// A path vertex's view for material evaluation: surface UV (ignored for
/// the background vertex) and the direction the ray arrived from, from the
/// surface looking back toward the previous bounce / camera.
#[derive(Debug, Copy, Clone)]
pub struct EvalVertex {
    pub uv: (f32, f32),
    pub outgoing_dir: Vector,
}

pub struct MaterialSystem {
    material_ids: Vec<u32>,
    materials: Vec<Material>,
    image_ids: Vec<u32>,
    images: Vec<HdrImage>,
}

impl MaterialSystem {
    pub fn new() -> MaterialSystem {
        MaterialSystem {
            material_ids: Vec::with_capacity(MATERIAL_SYSTEM_CAPACITY),
            materials: Vec::with_capacity(MATERIAL_SYSTEM_CAPACITY),
            image_ids: Vec::with_capacity(MATERIAL_SYSTEM_CAPACITY),
            images: Vec::with_capacity(MATERIAL_SYSTEM_CAPACITY),
        }
    }

    pub fn register_material(&mut self, id: u32, material: Material) {
        assert!(self.material_ids.len() < MATERIAL_SYSTEM_CAPACITY, "material system at capacity");
        match self.material_ids.iter().position(|&existing| existing == id) {
            Some(i) => self.materials[i] = material,
            None => {
                self.material_ids.push(id);
                self.materials.push(material);
            }
        }
    }

    pub fn register_image(&mut self, id: u32, image: HdrImage) {
        assert!(self.image_ids.len() < MATERIAL_SYSTEM_CAPACITY, "material system at capacity");
        match self.image_ids.iter().position(|&existing| existing == id) {
            Some(i) => self.images[i] = image,
            None => {
                self.image_ids.push(id);
                self.images.push(image);
            }
        }
    }

    pub fn material(&self, id: u32) -> Option<&Material> {
        self.material_ids.iter().position(|&existing| existing == id).map(|i| &self.materials[i])
    }

    pub fn image(&self, id: u32) -> Option<&HdrImage> {
        self.image_ids.iter().position(|&existing| existing == id).map(|i| &self.images[i])
    }
}

impl Default for MaterialSystem {
    fn default() -> MaterialSystem {
        MaterialSystem::new()
    }
}

/// Returns `(albedo, emission)` for a path vertex. An emission texture is
/// always treated as an equirectangular environment map sampled by the
/// vertex's outgoing direction, not by surface UV.
pub fn evaluate_material(material: &Material, vertex: &EvalVertex, materials: &MaterialSystem) -> ([f32; 3], [f32; 3]) {
    let albedo = if material.albedo_texture != SENTINEL_ID {
        match materials.image(material.albedo_texture) {
            Some(img) => {
                let [r, g, b, _a] = img.sample_nearest(vertex.uv.0, vertex.uv.1);
                [r, g, b]
            }
            None => material.albedo,
        }
    } else {
        material.albedo
    };

    let emission = if material.emission_texture != SENTINEL_ID {
        match materials.image(material.emission_texture) {
            Some(img) => {
                let (phi, theta) = cartesian_to_spherical(-vertex.outgoing_dir);
                let (u, v) = spherical_to_equirect(phi, theta);
                let [r, g, b, _a] = img.sample_nearest(u, 1.0 - v);
                [r, g, b]
            }
            None => material.emission,
        }
    } else {
        material.emission
    };

    (albedo, emission)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_material_returns_constants() {
        let mat = Material { albedo: [0.5, 0.5, 0.5], emission: [1.0, 0.0, 0.0], albedo_texture: SENTINEL_ID, emission_texture: SENTINEL_ID };
        let systems = MaterialSystem::new();
        let (albedo, emission) = evaluate_material(
            &mat,
            &EvalVertex { uv: (0.0, 0.0), outgoing_dir: Vector::new(0.0, 0.0, 1.0) },
            &systems,
        );
        assert_eq!(albedo, [0.5, 0.5, 0.5]);
        assert_eq!(emission, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn textured_albedo_samples_image() {
        let mut systems = MaterialSystem::new();
        systems.register_image(0, HdrImage::checkerboard());
        let mat = Material { albedo: [0.0, 0.0, 0.0], emission: [0.0, 0.0, 0.0], albedo_texture: 0, emission_texture: SENTINEL_ID };
        let (albedo, _) = evaluate_material(
            &mat,
            &EvalVertex { uv: (0.9, 0.1), outgoing_dir: Vector::new(0.0, 0.0, 1.0) },
            &systems,
        );
        assert_eq!(albedo, [0.1, 0.1, 0.1]);
    }

    #[test]
    fn register_same_id_replaces() {
        let mut systems = MaterialSystem::new();
        systems.register_material(7, Material::diffuse([1.0, 0.0, 0.0]));
        systems.register_material(7, Material::diffuse([0.0, 1.0, 0.0]));
        assert_eq!(systems.material(7).unwrap().albedo, [0.0, 1.0, 0.0]);
    }
}
