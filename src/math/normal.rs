use std::ops::{Add, Mul, Neg};

use float4::Float4;

use super::{CrossProduct, DotProduct, Matrix4x4, Vector};

/// A surface normal. Transformed as a vector under the model matrix
/// directly rather than by the inverse-transpose: `Scene::add_object_to_scene`
/// only accepts a scalar `scale: f32`, so every object transform is
/// uniform and the two are proportional -- the inverse-transpose's extra
/// matrix inversion would just be wasted work.
#[derive(Debug, Copy, Clone)]
pub struct Normal {
    pub co: Float4,
}

impl Normal {
    pub fn new(x: f32, y: f32, z: f32) -> Normal {
        Normal {
            co: Float4::new(x, y, z, 0.0),
        }
    }

    pub fn x(&self) -> f32 {
        self.co.get_0()
    }
    pub fn y(&self) -> f32 {
        self.co.get_1()
    }
    pub fn z(&self) -> f32 {
        self.co.get_2()
    }

    pub fn length(&self) -> f32 {
        (self.co * self.co).h_sum().sqrt()
    }

    pub fn length2(&self) -> f32 {
        (self.co * self.co).h_sum()
    }

    pub fn normalized(&self) -> Normal {
        let l = self.length();
        Normal { co: self.co / l }
    }

    pub fn into_vector(self) -> Vector {
        Vector::new(self.x(), self.y(), self.z())
    }
}

impl PartialEq for Normal {
    fn eq(&self, other: &Normal) -> bool {
        self.co == other.co
    }
}

impl Add for Normal {
    type Output = Normal;
    fn add(self, other: Normal) -> Normal {
        Normal { co: self.co + other.co }
    }
}

impl Mul<f32> for Normal {
    type Output = Normal;
    fn mul(self, other: f32) -> Normal {
        Normal { co: self.co * other }
    }
}

impl Neg for Normal {
    type Output = Normal;
    fn neg(self) -> Normal {
        Normal { co: self.co * -1.0 }
    }
}

impl Mul<Matrix4x4> for Normal {
    type Output = Normal;
    fn mul(self, other: Matrix4x4) -> Normal {
        Normal {
            co: Float4::new(
                (self.co * other[0]).h_sum(),
                (self.co * other[1]).h_sum(),
                (self.co * other[2]).h_sum(),
                0.0,
            ),
        }
    }
}

impl DotProduct for Normal {
    fn dot(self, other: Normal) -> f32 {
        (self.co * other.co).h_sum()
    }
}

impl CrossProduct for Normal {
    fn cross(self, other: Normal) -> Normal {
        Normal::new(
            (self.y() * other.z()) - (self.z() * other.y()),
            (self.z() * other.x()) - (self.x() * other.z()),
            (self.x() * other.y()) - (self.y() * other.x()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized() {
        let n = Normal::new(3.0, 0.0, 4.0).normalized();
        assert!((n.length() - 1.0).abs() < 0.000_001);
    }

    #[test]
    fn dot_self_is_length2() {
        let n = Normal::new(1.0, 2.0, 2.0);
        assert_eq!(n.dot(n), n.length2());
    }
}
