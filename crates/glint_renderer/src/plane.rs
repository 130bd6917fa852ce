//! Infinite plane primitive with a tiled texture.

use glint_math::{Interval, Ray, Vec2, Vec3, Vec3Ext};

/// An infinite plane through `anchor` with unit normal `normal`.
///
/// The texture repeats every `tile_size` world units along the plane's
/// (direction, up) axes.
#[derive(Debug, Clone)]
pub struct Plane {
    anchor: Vec3,
    normal: Vec3,
    tile_size: Vec2,
    direction: Vec3,
    up: Vec3,
}

impl Plane {
    /// Create a new plane.
    pub fn new(anchor: Vec3, normal: Vec3, tile_size: Vec2) -> Self {
        let normal = normal.try_normalize().unwrap_or_else(|| {
            log::warn!("Plane at {:?} has a degenerate normal, using +Y", anchor);
            Vec3::Y
        });

        let tile_size = if tile_size.x > 0.0 && tile_size.y > 0.0 {
            tile_size
        } else {
            log::warn!("Plane tile size {:?} is not positive, using 1x1", tile_size);
            Vec2::ONE
        };

        // A normal parallel to +Y makes the first cross product vanish
        let direction = Vec3::Y
            .cross(normal)
            .try_normalize()
            .unwrap_or_else(|| Vec3::X.cross(normal).normalize());
        let up = normal.cross(direction).normalize();

        Self {
            anchor,
            normal,
            tile_size,
            direction,
            up,
        }
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Texture frame as (up, direction).
    pub fn frame(&self) -> (Vec3, Vec3) {
        (self.up, self.direction)
    }

    /// Distance along the ray to the plane, if it lies in front of the origin.
    pub fn hit_distance(&self, ray: &Ray) -> Option<f32> {
        let n = self.normal.facing(ray.direction);

        let numerator = (self.anchor - ray.origin).dot(n);
        let denominator = ray.direction.dot(n);
        if denominator == 0.0 || numerator == 0.0 {
            return None;
        }

        let t = numerator / denominator;
        Interval::FORWARD.surrounds(t).then_some(t)
    }

    /// Texture coordinates for a point on the plane, tiled and wrapped into [0, 1).
    pub fn texture_coords(&self, point: Vec3) -> (f32, f32) {
        let local = point - self.anchor;
        let x = (local.dot(self.direction) / self.tile_size.x).rem_euclid(1.0);
        let y = (local.dot(self.up) / self.tile_size.y).rem_euclid(1.0);

        // Texture rows run top to bottom
        (x, 1.0 - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Plane {
        Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, Vec2::new(2.0, 2.0))
    }

    #[test]
    fn test_plane_hit_from_both_sides() {
        let plane = floor();

        let down = Ray::primary(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y, 1);
        let t = plane.hit_distance(&down).unwrap();
        assert!((t - 2.0).abs() < 1e-4);

        let up = Ray::primary(Vec3::new(0.0, -4.0, 0.0), Vec3::Y, 1);
        let t = plane.hit_distance(&up).unwrap();
        assert!((t - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_plane_parallel_and_behind() {
        let plane = floor();

        let parallel = Ray::primary(Vec3::ZERO, Vec3::X, 1);
        assert!(plane.hit_distance(&parallel).is_none());

        let away = Ray::primary(Vec3::ZERO, Vec3::Y, 1);
        assert!(plane.hit_distance(&away).is_none());
    }

    #[test]
    fn test_frame_is_orthonormal() {
        for normal in [Vec3::Y, -Vec3::Y, Vec3::X, Vec3::new(1.0, 2.0, -3.0)] {
            let plane = Plane::new(Vec3::ZERO, normal, Vec2::ONE);
            let (up, direction) = plane.frame();
            assert!((up.length() - 1.0).abs() < 1e-5);
            assert!((direction.length() - 1.0).abs() < 1e-5);
            assert!(up.dot(direction).abs() < 1e-5);
            assert!(up.dot(plane.normal()).abs() < 1e-5);
            assert!(direction.dot(plane.normal()).abs() < 1e-5);
        }
    }

    #[test]
    fn test_texture_coords_wrap_negative() {
        let plane = floor();
        let (up, direction) = plane.frame();

        let p = plane.anchor() + direction * 0.5 + up * 0.5;
        let (u, v) = plane.texture_coords(p);
        assert!((u - 0.25).abs() < 1e-5);
        assert!((v - 0.75).abs() < 1e-5);

        // One tile over in the negative direction lands on the same texel
        let q = p - direction * 2.0 - up * 2.0;
        let (u2, v2) = plane.texture_coords(q);
        assert!((u2 - u).abs() < 1e-4);
        assert!((v2 - v).abs() < 1e-4);

        let r = plane.anchor() - direction * 0.5;
        let (u3, _) = plane.texture_coords(r);
        assert!((0.0..1.0).contains(&u3));
        assert!((u3 - 0.75).abs() < 1e-5);
    }
}
