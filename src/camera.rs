#![allow(dead_code)]

use crate::math::{Point, Quaternion, Vector, Xorshift32};

/// A primary ray emitted by [`Camera::generate_ray`].
#[derive(Debug, Copy, Clone)]
pub struct CameraRay {
    pub orig: Point,
    pub dir: Vector,
}

/// A pinhole camera oriented by a unit quaternion. Basis vectors are
/// derived from the orientation rather than stored, so they're always
/// orthonormal by construction.
#[derive(Debug, Copy, Clone)]
pub struct Camera {
    position: Point,
    orientation: Quaternion,
    film_distance: f32,
    half_film_width: f32,
    half_film_height: f32,
    half_pixel_width: f32,
    half_pixel_height: f32,
}

impl Camera {
    /// `image_width`/`image_height` size the film so that the longer axis
    /// spans a full extent of 1.0.
    pub fn new(position: Point, orientation: Quaternion, film_distance: f32, image_width: usize, image_height: usize) -> Camera {
        let aspect = image_width as f32 / image_height as f32;
        let (film_width, film_height) = if aspect >= 1.0 { (1.0, 1.0 / aspect) } else { (aspect, 1.0) };

        Camera {
            position,
            orientation: orientation.normalized(),
            film_distance,
            half_film_width: film_width * 0.5,
            half_film_height: film_height * 0.5,
            half_pixel_width: 0.5 / image_width as f32,
            half_pixel_height: 0.5 / image_height as f32,
        }
    }

    fn right(&self) -> Vector {
        self.orientation.rotate(Vector::new(1.0, 0.0, 0.0))
    }

    fn up(&self) -> Vector {
        self.orientation.rotate(Vector::new(0.0, 1.0, 0.0))
    }

    fn forward(&self) -> Vector {
        self.orientation.rotate(Vector::new(0.0, 0.0, -1.0))
    }

    /// Generates a primary ray through pixel `(x, y)` (`0 <= x < image_width`,
    /// `0 <= y < image_height`), jittered within the pixel by `rng`.
    pub fn generate_ray(&self, image_width: usize, image_height: usize, x: usize, y: usize, rng: &mut Xorshift32) -> CameraRay {
        let norm_x = ((x as f32 + 0.5) / image_width as f32 - 0.5) + rng.next_offset(self.half_pixel_width);
        let norm_y = ((y as f32 + 0.5) / image_height as f32 - 0.5) + rng.next_offset(self.half_pixel_height);

        let film_x = norm_x * (self.half_film_width * 2.0);
        let film_y = -norm_y * (self.half_film_height * 2.0);

        let film_center = self.position + (self.forward() * self.film_distance);
        let film_point = film_center + (self.right() * film_x) + (self.up() * film_y);

        CameraRay {
            orig: self.position,
            dir: (film_point - self.position).normalized(),
        }
    }
}
