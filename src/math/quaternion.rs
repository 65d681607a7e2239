use std::ops::Mul;

use super::Vector;

/// A unit quaternion representing a camera or object orientation. The
/// path tracer never needs quaternion interpolation (motion blur is a
/// non-goal), so this only carries the operations the camera and scene
/// object model actually use: composing rotations and rotating a vector.
#[derive(Debug, Copy, Clone)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quaternion {
    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Quaternion {
        Quaternion { w, x, y, z }
    }

    pub fn identity() -> Quaternion {
        Quaternion::new(1.0, 0.0, 0.0, 0.0)
    }

    pub fn from_axis_angle(axis: Vector, angle_radians: f32) -> Quaternion {
        let axis = axis.normalized();
        let half = angle_radians * 0.5;
        let s = half.sin();
        Quaternion::new(half.cos(), axis.x() * s, axis.y() * s, axis.z() * s)
    }

    pub fn length2(&self) -> f32 {
        (self.w * self.w) + (self.x * self.x) + (self.y * self.y) + (self.z * self.z)
    }

    pub fn normalized(&self) -> Quaternion {
        let l = self.length2().sqrt();
        Quaternion::new(self.w / l, self.x / l, self.y / l, self.z / l)
    }

    pub fn conjugate(&self) -> Quaternion {
        Quaternion::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Rotates `v` by this quaternion. Assumes the quaternion is
    /// normalized.
    pub fn rotate(&self, v: Vector) -> Vector {
        let qv = Vector::new(self.x, self.y, self.z);
        let uv = cross(qv, v);
        let uuv = cross(qv, uv);
        v + ((uv * self.w) + uuv) * 2.0
    }

    /// Expands the rotation into a row-major 3x3 matrix, for composing
    /// into a [`super::Matrix4x4`] via `from_trs`.
    pub fn to_mat3(&self) -> [[f32; 3]; 3] {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, xy, xz) = (x * x2, x * y2, x * z2);
        let (yy, yz, zz) = (y * y2, y * z2, z * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);

        [
            [1.0 - (yy + zz), xy - wz, xz + wy],
            [xy + wz, 1.0 - (xx + zz), yz - wx],
            [xz - wy, yz + wx, 1.0 - (xx + yy)],
        ]
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;
    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion::new(
            (self.w * rhs.w) - (self.x * rhs.x) - (self.y * rhs.y) - (self.z * rhs.z),
            (self.w * rhs.x) + (self.x * rhs.w) + (self.y * rhs.z) - (self.z * rhs.y),
            (self.w * rhs.y) - (self.x * rhs.z) + (self.y * rhs.w) + (self.z * rhs.x),
            (self.w * rhs.z) + (self.x * rhs.y) - (self.y * rhs.x) + (self.z * rhs.w),
        )
    }
}

fn cross(a: Vector, b: Vector) -> Vector {
    Vector::new(
        (a.y() * b.z()) - (a.z() * b.y()),
        (a.z() * b.x()) - (a.x() * b.z()),
        (a.x() * b.y()) - (a.y() * b.x()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_rotate_is_noop() {
        let q = Quaternion::identity();
        let v = Vector::new(1.0, 2.0, 3.0);
        assert_eq!(q.rotate(v), v);
    }

    #[test]
    fn quarter_turn_about_z() {
        let q = Quaternion::from_axis_angle(Vector::new(0.0, 0.0, 1.0), FRAC_PI_2);
        let v = q.rotate(Vector::new(1.0, 0.0, 0.0));
        assert!((v.x() - 0.0).abs() < 1e-5);
        assert!((v.y() - 1.0).abs() < 1e-5);
        assert!((v.z() - 0.0).abs() < 1e-5);
    }

    #[test]
    fn is_normalized() {
        let q = Quaternion::from_axis_angle(Vector::new(1.0, 1.0, 1.0), 0.7);
        assert!((q.length2() - 1.0).abs() < 1e-5);
    }
}
