//! Linear interpolation and easing.

use glam::Vec3;

/// Trait for types that can be linearly interpolated.
pub trait Lerp: Clone {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for [f32; 3] {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        [
            self[0] + (other[0] - self[0]) * t,
            self[1] + (other[1] - self[1]) * t,
            self[2] + (other[2] - self[2]) * t,
        ]
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec3::lerp(*self, *other, t)
    }
}

/// Cubic Hermite ease `x²(3 - 2x)` of a value already in `[0, 1]`.
#[inline]
pub fn smoothstep(x: f32) -> f32 {
    x * x * (3.0 - 2.0 * x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(Lerp::lerp(&5.0_f32, &10.0, 0.0), 5.0);
        assert_eq!(Lerp::lerp(&5.0_f32, &10.0, 1.0), 10.0);
        assert!((Lerp::lerp(&5.0_f32, &10.0, 0.5) - 7.5).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_array() {
        let mid = [0.0_f32, 0.0, 0.0].lerp(&[1.0, 2.0, 4.0], 0.5);
        assert_eq!(mid, [0.5, 1.0, 2.0]);
    }

    #[test]
    fn test_smoothstep_shape() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
        // Eased: slower than linear near the ends
        assert!(smoothstep(0.1) < 0.1);
        assert!(smoothstep(0.9) > 0.9);
    }
}
