#![allow(dead_code)]

//! A tuple of four `f32`s, laid out so that auto-vectorization has a shot
//! at turning the array ops below into real SIMD on the target. Used by
//! the accel crate for packed axis-aligned box tests.

use std::cmp::PartialEq;
use std::ops::{
    Add, AddAssign, BitAnd, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign,
};

#[derive(Debug, Copy, Clone)]
pub struct Float4 {
    data: [f32; 4],
}

impl Float4 {
    #[inline(always)]
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Float4 {
        Float4 { data: [a, b, c, d] }
    }

    #[inline(always)]
    pub fn splat(n: f32) -> Float4 {
        Float4 { data: [n, n, n, n] }
    }

    #[inline]
    pub fn h_sum(&self) -> f32 {
        (self.get_0() + self.get_1()) + (self.get_2() + self.get_3())
    }

    #[inline]
    pub fn h_min(&self) -> f32 {
        self.get_0().min(self.get_1()).min(self.get_2().min(self.get_3()))
    }

    #[inline]
    pub fn h_max(&self) -> f32 {
        self.get_0().max(self.get_1()).max(self.get_2().max(self.get_3()))
    }

    #[inline(always)]
    pub fn v_min(&self, other: Float4) -> Float4 {
        Float4::new(
            self.get_0().min(other.get_0()),
            self.get_1().min(other.get_1()),
            self.get_2().min(other.get_2()),
            self.get_3().min(other.get_3()),
        )
    }

    #[inline(always)]
    pub fn v_max(&self, other: Float4) -> Float4 {
        Float4::new(
            self.get_0().max(other.get_0()),
            self.get_1().max(other.get_1()),
            self.get_2().max(other.get_2()),
            self.get_3().max(other.get_3()),
        )
    }

    #[inline(always)]
    pub fn lt(&self, other: Float4) -> Bool4 {
        Bool4 {
            data: [
                self.data[0] < other.data[0],
                self.data[1] < other.data[1],
                self.data[2] < other.data[2],
                self.data[3] < other.data[3],
            ],
        }
    }

    #[inline(always)]
    pub fn lte(&self, other: Float4) -> Bool4 {
        Bool4 {
            data: [
                self.data[0] <= other.data[0],
                self.data[1] <= other.data[1],
                self.data[2] <= other.data[2],
                self.data[3] <= other.data[3],
            ],
        }
    }

    #[inline(always)]
    pub fn gte(&self, other: Float4) -> Bool4 {
        Bool4 {
            data: [
                self.data[0] >= other.data[0],
                self.data[1] >= other.data[1],
                self.data[2] >= other.data[2],
                self.data[3] >= other.data[3],
            ],
        }
    }

    /// Set the nth element to the given value.
    #[inline(always)]
    pub fn set_n(&mut self, n: usize, v: f32) {
        self.data[n] = v;
    }

    #[inline(always)]
    pub fn set_0(&mut self, v: f32) {
        self.set_n(0, v);
    }
    #[inline(always)]
    pub fn set_1(&mut self, v: f32) {
        self.set_n(1, v);
    }
    #[inline(always)]
    pub fn set_2(&mut self, v: f32) {
        self.set_n(2, v);
    }
    #[inline(always)]
    pub fn set_3(&mut self, v: f32) {
        self.set_n(3, v);
    }

    /// Returns the value of the nth element.
    #[inline(always)]
    pub fn get_n(&self, n: usize) -> f32 {
        self.data[n]
    }

    #[inline(always)]
    pub fn get_0(&self) -> f32 {
        self.data[0]
    }
    #[inline(always)]
    pub fn get_1(&self) -> f32 {
        self.data[1]
    }
    #[inline(always)]
    pub fn get_2(&self) -> f32 {
        self.data[2]
    }
    #[inline(always)]
    pub fn get_3(&self) -> f32 {
        self.data[3]
    }
}

impl Index<usize> for Float4 {
    type Output = f32;
    #[inline(always)]
    fn index(&self, n: usize) -> &f32 {
        &self.data[n]
    }
}

impl IndexMut<usize> for Float4 {
    #[inline(always)]
    fn index_mut(&mut self, n: usize) -> &mut f32 {
        &mut self.data[n]
    }
}

impl PartialEq for Float4 {
    #[inline]
    fn eq(&self, other: &Float4) -> bool {
        self.data == other.data
    }
}

impl Add for Float4 {
    type Output = Float4;
    #[inline(always)]
    fn add(self, other: Float4) -> Float4 {
        Float4::new(
            self.data[0] + other.data[0],
            self.data[1] + other.data[1],
            self.data[2] + other.data[2],
            self.data[3] + other.data[3],
        )
    }
}

impl AddAssign for Float4 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Float4) {
        *self = *self + rhs;
    }
}

impl Sub for Float4 {
    type Output = Float4;
    #[inline(always)]
    fn sub(self, other: Float4) -> Float4 {
        Float4::new(
            self.data[0] - other.data[0],
            self.data[1] - other.data[1],
            self.data[2] - other.data[2],
            self.data[3] - other.data[3],
        )
    }
}

impl SubAssign for Float4 {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Float4) {
        *self = *self - rhs;
    }
}

impl Mul for Float4 {
    type Output = Float4;
    #[inline(always)]
    fn mul(self, other: Float4) -> Float4 {
        Float4::new(
            self.data[0] * other.data[0],
            self.data[1] * other.data[1],
            self.data[2] * other.data[2],
            self.data[3] * other.data[3],
        )
    }
}

impl Mul<f32> for Float4 {
    type Output = Float4;
    #[inline(always)]
    fn mul(self, other: f32) -> Float4 {
        Float4::new(
            self.data[0] * other,
            self.data[1] * other,
            self.data[2] * other,
            self.data[3] * other,
        )
    }
}

impl MulAssign for Float4 {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Float4) {
        *self = *self * rhs;
    }
}

impl MulAssign<f32> for Float4 {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div for Float4 {
    type Output = Float4;
    #[inline(always)]
    fn div(self, other: Float4) -> Float4 {
        Float4::new(
            self.data[0] / other.data[0],
            self.data[1] / other.data[1],
            self.data[2] / other.data[2],
            self.data[3] / other.data[3],
        )
    }
}

impl Div<f32> for Float4 {
    type Output = Float4;
    #[inline(always)]
    fn div(self, other: f32) -> Float4 {
        Float4::new(
            self.data[0] / other,
            self.data[1] / other,
            self.data[2] / other,
            self.data[3] / other,
        )
    }
}

impl DivAssign for Float4 {
    #[inline(always)]
    fn div_assign(&mut self, rhs: Float4) {
        *self = *self / rhs;
    }
}

impl DivAssign<f32> for Float4 {
    #[inline(always)]
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

#[inline(always)]
pub fn v_min(a: Float4, b: Float4) -> Float4 {
    a.v_min(b)
}

#[inline(always)]
pub fn v_max(a: Float4, b: Float4) -> Float4 {
    a.v_max(b)
}

/// A tuple of four bools produced by lane-wise `Float4` comparisons.
#[derive(Debug, Copy, Clone)]
pub struct Bool4 {
    data: [bool; 4],
}

impl Bool4 {
    #[inline(always)]
    pub fn get_n(&self, n: usize) -> bool {
        self.data[n]
    }

    #[inline(always)]
    pub fn get_0(&self) -> bool {
        self.data[0]
    }
    #[inline(always)]
    pub fn get_1(&self) -> bool {
        self.data[1]
    }
    #[inline(always)]
    pub fn get_2(&self) -> bool {
        self.data[2]
    }
    #[inline(always)]
    pub fn get_3(&self) -> bool {
        self.data[3]
    }

    /// Packs the four lanes into a 4-bit mask, bit `i` set iff lane `i` is true.
    #[inline]
    pub fn to_bitmask(&self) -> u8 {
        (self.data[0] as u8)
            | ((self.data[1] as u8) << 1)
            | ((self.data[2] as u8) << 2)
            | ((self.data[3] as u8) << 3)
    }
}

impl BitAnd for Bool4 {
    type Output = Bool4;
    #[inline(always)]
    fn bitand(self, rhs: Bool4) -> Bool4 {
        Bool4 {
            data: [
                self.data[0] && rhs.data[0],
                self.data[1] && rhs.data[1],
                self.data[2] && rhs.data[2],
                self.data[3] && rhs.data[3],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set() {
        let mut f = Float4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(f.get_0(), 1.0);
        f.set_2(7.0);
        assert_eq!(f.get_2(), 7.0);
    }

    #[test]
    fn h_sum_min_max() {
        let f = Float4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(f.h_sum(), 10.0);
        assert_eq!(f.h_min(), 1.0);
        assert_eq!(f.h_max(), 4.0);
    }

    #[test]
    fn arithmetic() {
        let f1 = Float4::new(1.0, 2.0, 3.0, 4.0);
        let f2 = Float4::new(2.0, 3.0, 4.0, 5.0);
        assert_eq!(f1 + f2, Float4::new(3.0, 5.0, 7.0, 9.0));
        assert_eq!(f1 - f2, Float4::new(-1.0, -1.0, -1.0, -1.0));
        assert_eq!(f1 * f2, Float4::new(2.0, 6.0, 12.0, 20.0));
        assert_eq!(f1 * 3.0, Float4::new(3.0, 6.0, 9.0, 12.0));
    }

    #[test]
    fn bitmask() {
        let f1 = Float4::new(1.0, 5.0, 1.0, 5.0);
        let f2 = Float4::new(2.0, 2.0, 2.0, 2.0);
        assert_eq!(f1.lt(f2).to_bitmask(), 0b0101);
    }
}
