use image::{Rgb, Rgba};
use nalgebra::{Matrix4, Vector4};
use rand::{Rng, RngCore};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[derive(Clone, Debug, PartialEq, Copy, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn ones() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn gray(v: f64) -> Self {
        Self::new(v, v, v)
    }

    pub fn xyz(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    pub fn squared_length(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn length(&self) -> f64 {
        self.squared_length().sqrt()
    }

    pub fn elemul(lhs: Self, rhs: Self) -> Self {
        Self {
            x: lhs.x * rhs.x,
            y: lhs.y * rhs.y,
            z: lhs.z * rhs.z,
        }
    }

    pub fn cross(lhs: Self, rhs: Self) -> Self {
        Self {
            x: lhs.y * rhs.z - lhs.z * rhs.y,
            y: lhs.z * rhs.x - lhs.x * rhs.z,
            z: lhs.x * rhs.y - lhs.y * rhs.x,
        }
    }

    pub fn unit(&self) -> Vec3 {
        match self {
            v if v.length() == 0. => panic!("normalizing zero vector"),
            _ => self / self.length(),
        }
    }

    pub fn abs(&self) -> Vec3 {
        Vec3::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Mirror `v_in` about `norm`: `v - 2 (v . n) n`.
    pub fn reflect(v_in: Self, norm: Self) -> Self {
        v_in - 2. * (v_in * norm) * norm
    }

    /// Uniform sample inside the unit disk of the xy plane, z = 0.
    pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
        loop {
            let p = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.);
            if p.squared_length() < 1. {
                return p;
            }
        }
    }

    /// Apply an affine matrix to this point (w = 1).
    pub fn transform_point(&self, m: &Matrix4<f64>) -> Vec3 {
        let p = m * Vector4::new(self.x, self.y, self.z, 1.);
        Vec3::new(p.x, p.y, p.z)
    }

    /// Apply an affine matrix to this direction (w = 0, no translation).
    pub fn transform_dir(&self, m: &Matrix4<f64>) -> Vec3 {
        let d = m * Vector4::new(self.x, self.y, self.z, 0.);
        Vec3::new(d.x, d.y, d.z)
    }
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.
}

impl From<Vec3> for Rgb<u8> {
    fn from(item: Vec3) -> Self {
        Self([
            (item.x.clamp(0., 1.) * 255.).floor() as u8,
            (item.y.clamp(0., 1.) * 255.).floor() as u8,
            (item.z.clamp(0., 1.) * 255.).floor() as u8,
        ])
    }
}

impl From<Rgba<u8>> for Vec3 {
    fn from(item: Rgba<u8>) -> Self {
        Vec3::new(
            item.0[0] as f64 / 255.,
            item.0[1] as f64 / 255.,
            item.0[2] as f64 / 255.,
        )
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

/// Dot product.
impl Mul for Vec3 {
    type Output = f64;

    fn mul(self, other: Self) -> Self::Output {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, other: Vec3) -> Self::Output {
        Vec3 {
            x: other.x * self,
            y: other.y * self,
            z: other.z * self,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, other: f64) -> Self::Output {
        other * self
    }
}

impl MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, other: f64) {
        *self = *self * other;
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, other: f64) -> Self::Output {
        Self {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
        }
    }
}

impl Div<f64> for &Vec3 {
    type Output = Vec3;
    fn div(self, other: f64) -> Self::Output {
        *self / other
    }
}

impl DivAssign<f64> for Vec3 {
    fn div_assign(&mut self, other: f64) {
        *self = *self / other;
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix4;

    #[test]
    fn test_add_sub() {
        assert_eq!(
            Vec3::new(1.0, 0.0, -1.0) + Vec3::new(2.0, 4.0, 6.0),
            Vec3::new(3.0, 4.0, 5.0)
        );
        assert_eq!(
            Vec3::new(1.0, 0.0, -1.0) - Vec3::new(2.0, 4.0, 6.0),
            Vec3::new(-1.0, -4.0, -7.0)
        );
    }

    #[test]
    fn test_dot() {
        assert_eq!(Vec3::new(1.0, 0.0, -1.0) * Vec3::ones(), 0.0);
        assert_eq!(Vec3::new(1.0, 2.0, 3.0) * Vec3::new(4.0, 5.0, 6.0), 32.0);
    }

    #[test]
    fn test_cross() {
        assert_eq!(
            Vec3::cross(Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 3.0, 4.0)),
            Vec3::new(8.0 - 9.0, 6.0 - 4.0, 3.0 - 4.0)
        );
    }

    #[test]
    fn test_elemul() {
        assert_eq!(
            Vec3::elemul(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 3.0)),
            Vec3::new(1.0, 4.0, 9.0)
        );
    }

    #[test]
    fn test_unit() {
        assert_eq!(Vec3::new(233.0, 0.0, 0.0).unit(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(
            Vec3::new(-233.0, 0.0, 0.0).unit(),
            Vec3::new(-1.0, 0.0, 0.0)
        );
    }

    #[test]
    #[should_panic]
    fn test_unit_panic() {
        Vec3::new(0.0, 0.0, 0.0).unit();
    }

    #[test]
    fn test_reflect() {
        assert_eq!(
            Vec3::reflect(Vec3::new(1.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
            Vec3::new(1.0, 1.0, 0.0)
        );
    }

    #[test]
    fn test_transform_point_translates() {
        let m = Matrix4::new_translation(&nalgebra::Vector3::new(5.0, 0.0, 0.0));
        assert_eq!(
            Vec3::new(1.0, 2.0, 3.0).transform_point(&m),
            Vec3::new(6.0, 2.0, 3.0)
        );
        // directions ignore translation
        assert_eq!(
            Vec3::new(1.0, 2.0, 3.0).transform_dir(&m),
            Vec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_random_in_unit_disk() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let p = Vec3::random_in_unit_disk(&mut rng);
            assert!(p.squared_length() < 1.);
            assert_eq!(p.z, 0.);
        }
    }
}
