// Vector utilities for ray tracing
//
// Extends glam::Vec3 with the approximate normalization and the optics
// helpers (mirror reflection, Snell refraction) used by the tracer.

use glam::Vec3;

/// Approximate `1 / sqrt(x)` using the classic bit-level estimate
/// refined by two Newton-Raphson steps (relative error below 1e-5).
#[inline]
pub fn fast_inv_sqrt(x: f32) -> f32 {
    let i = 0x5f37_59df_u32.wrapping_sub(x.to_bits() >> 1);
    let mut y = f32::from_bits(i);
    y *= 1.5 - 0.5 * x * y * y;
    y *= 1.5 - 0.5 * x * y * y;
    y
}

/// Extension trait for Vec3 with ray tracing helpers.
pub trait Vec3Ext {
    /// Normalize using [`fast_inv_sqrt`]. A zero vector stays zero.
    fn normalize_fast(self) -> Vec3;

    /// Mirror this direction about a unit normal: `d - 2(d·n)n`.
    fn reflect_about(self, normal: Vec3) -> Vec3;

    /// Refract a unit direction through a surface.
    ///
    /// `normal` must face against the direction and `eta` is n1/n2.
    /// Returns `None` on total internal reflection.
    fn refract_through(self, normal: Vec3, eta: f32) -> Option<Vec3>;

    /// Flip this normal so it points against `direction`.
    fn facing(self, direction: Vec3) -> Vec3;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn normalize_fast(self) -> Vec3 {
        let len_sq = self.length_squared();
        if len_sq == 0.0 {
            return Vec3::ZERO;
        }
        self * fast_inv_sqrt(len_sq)
    }

    #[inline]
    fn reflect_about(self, normal: Vec3) -> Vec3 {
        self - 2.0 * self.dot(normal) * normal
    }

    fn refract_through(self, normal: Vec3, eta: f32) -> Option<Vec3> {
        let cos_i = (-self.dot(normal)).min(1.0);
        let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
        if k < 0.0 {
            return None;
        }
        let refracted = eta * self + (eta * cos_i - k.sqrt()) * normal;
        refracted.try_normalize()
    }

    #[inline]
    fn facing(self, direction: Vec3) -> Vec3 {
        if self.dot(direction) > 0.0 {
            -self
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_unit(rng: &mut StdRng) -> Vec3 {
        loop {
            let v = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if let Some(n) = v.try_normalize() {
                return n;
            }
        }
    }

    #[test]
    fn test_fast_inv_sqrt() {
        for x in [0.25_f32, 1.0, 2.0, 9.0, 1234.5] {
            let expected = 1.0 / x.sqrt();
            assert!((fast_inv_sqrt(x) - expected).abs() / expected < 1e-4, "x={}", x);
        }
    }

    #[test]
    fn test_normalize_fast() {
        let v = Vec3::new(3.0, -4.0, 12.0).normalize_fast();
        assert!((v.length() - 1.0).abs() < 1e-4);
        assert!((v - Vec3::new(3.0, -4.0, 12.0).normalize()).length() < 1e-4);
        assert_eq!(Vec3::ZERO.normalize_fast(), Vec3::ZERO);
    }

    #[test]
    fn test_reflect_preserves_length_and_flips_normal_component() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let d = random_unit(&mut rng);
            let n = random_unit(&mut rng);
            let r = d.reflect_about(n);

            assert!((r.dot(n) + d.dot(n)).abs() < 1e-5);
            assert!((r.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_refract_straight_through() {
        let d = Vec3::new(0.0, -1.0, 0.0);
        let n = Vec3::Y;
        let t = d.refract_through(n, 1.0 / 1.5).unwrap();
        assert!((t - d).length() < 1e-5);
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        // Leaving glass at a grazing angle: sin(theta) * 1.5 > 1
        let d = Vec3::new(0.9, -0.1, 0.0).normalize();
        let n = Vec3::Y;
        assert!(d.refract_through(n, 1.5).is_none());
    }

    #[test]
    fn test_facing() {
        let n = Vec3::Y;
        assert_eq!(n.facing(Vec3::new(0.0, -1.0, 0.0)), Vec3::Y);
        assert_eq!(n.facing(Vec3::new(0.0, 1.0, 0.0)), -Vec3::Y);
    }
}
