//! Small fixed-size vector types.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A 2D vector, used for gaze offsets and normalized pointer positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Vec2) -> f64 {
        (*self - *other).length()
    }

    /// Clamp each component independently to `[-limit, limit]`.
    pub fn clamp_abs(&self, limit: f64) -> Vec2 {
        let limit = limit.abs();
        Vec2 {
            x: self.x.clamp(-limit, limit),
            y: self.y.clamp(-limit, limit),
        }
    }

    /// Replace non-finite components with zero.
    pub fn finite_or_zero(&self) -> Vec2 {
        Vec2 {
            x: if self.x.is_finite() { self.x } else { 0.0 },
            y: if self.y.is_finite() { self.y } else { 0.0 },
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Linear interpolation between two points.
    pub fn lerp(a: &Vec2, b: &Vec2, t: f64) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        Vec2 {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// A 3D vector in rig-local units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(0.5, -1.0);
        assert_eq!(a + b, Vec2::new(1.5, 1.0));
        assert_eq!(a - b, Vec2::new(0.5, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
    }

    #[test]
    fn test_clamp_abs_is_per_axis() {
        let v = Vec2::new(1.2, -0.1).clamp_abs(0.3);
        assert_eq!(v, Vec2::new(0.3, -0.1));
        let v = Vec2::new(-5.0, 5.0).clamp_abs(0.3);
        assert_eq!(v, Vec2::new(-0.3, 0.3));
    }

    #[test]
    fn test_finite_or_zero() {
        let v = Vec2::new(f64::NAN, 0.4).finite_or_zero();
        assert_eq!(v, Vec2::new(0.0, 0.4));
        assert!(!Vec2::new(f64::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_lerp_clamps_t() {
        let a = Vec2::ZERO;
        let b = Vec2::new(1.0, 1.0);
        assert_eq!(Vec2::lerp(&a, &b, 2.0), b);
        assert_eq!(Vec2::lerp(&a, &b, 0.5), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_vec3_ops() {
        let p = Vec3::new(1.0, 2.0, 3.0) + Vec3::ONE;
        assert_eq!(p, Vec3::new(2.0, 3.0, 4.0));
        assert!(!Vec3::new(0.0, f64::NAN, 0.0).is_finite());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn clamp_abs_never_exceeds_limit(
                x in -1.0e6f64..1.0e6,
                y in -1.0e6f64..1.0e6,
                limit in 0.0f64..10.0,
            ) {
                let v = Vec2::new(x, y).clamp_abs(limit);
                prop_assert!(v.x.abs() <= limit);
                prop_assert!(v.y.abs() <= limit);
            }
        }
    }
}
