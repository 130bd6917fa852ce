//! Triangle primitive for ray tracing.
//!
//! Intersects the supporting plane first, then accepts the point when it is
//! on the inner side of all three edges.

use glint_math::{Interval, Ray, Vec2, Vec3, Vec3Ext};

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    vertices: [Vec3; 3],
    /// Pre-computed face normal (unit length, zero when degenerate)
    normal: Vec3,
    /// Texture frame
    direction: Vec3,
    up: Vec3,
    /// Texture coordinates of each vertex
    uvs: [Vec2; 3],
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let vertices = [v0, v1, v2];

        let Some(normal) = (v1 - v0).cross(v2 - v0).try_normalize() else {
            log::warn!("Triangle {:?} has zero area and will never be hit", vertices);
            return Self {
                vertices,
                normal: Vec3::ZERO,
                direction: Vec3::X,
                up: Vec3::Y,
                uvs: [Vec2::ZERO; 3],
            };
        };

        let direction = (v2 - v1).normalize();
        let up = normal.cross(direction).normalize();

        // Project the vertices onto the texture frame and stretch them over [0, 1]
        let projected = vertices.map(|v| Vec2::new((v - v1).dot(direction), (v - v1).dot(up)));
        let min = projected[0].min(projected[1]).min(projected[2]);
        let max = projected[0].max(projected[1]).max(projected[2]);
        let extent = (max - min).max(Vec2::splat(f32::EPSILON));
        let uvs = projected.map(|p| {
            let local = (p - min) / extent;
            Vec2::new(local.x, 1.0 - local.y)
        });

        Self {
            vertices,
            normal,
            direction,
            up,
            uvs,
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        self.vertices
    }

    /// Face normal, following the winding order of the vertices.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Texture frame as (up, direction).
    pub fn frame(&self) -> (Vec3, Vec3) {
        (self.up, self.direction)
    }

    /// Distance along the ray to the triangle, if it is hit in front of the origin.
    pub fn hit_distance(&self, ray: &Ray) -> Option<f32> {
        if self.normal == Vec3::ZERO {
            return None;
        }

        let n = self.normal.facing(ray.direction);
        let denominator = ray.direction.dot(n);
        if denominator == 0.0 {
            return None;
        }

        let t = (self.vertices[0] - ray.origin).dot(n) / denominator;
        if !Interval::FORWARD.surrounds(t) {
            return None;
        }

        self.contains_coplanar(ray.at(t)).then_some(t)
    }

    /// Same-sign edge test for a point on the triangle's plane.
    fn contains_coplanar(&self, p: Vec3) -> bool {
        let [a, b, c] = self.vertices;
        let n = self.normal;

        (b - a).cross(p - a).dot(n) >= 0.0
            && (c - b).cross(p - b).dot(n) >= 0.0
            && (a - c).cross(p - c).dot(n) >= 0.0
    }

    /// Barycentric weights of a coplanar point, one per vertex.
    pub fn barycentric(&self, p: Vec3) -> [f32; 3] {
        let [a, b, c] = self.vertices;
        let n = self.normal;

        let area = (b - a).cross(c - a).dot(n);
        if area == 0.0 {
            return [1.0, 0.0, 0.0];
        }

        let wa = (c - b).cross(p - b).dot(n) / area;
        let wb = (a - c).cross(p - c).dot(n) / area;
        [wa, wb, 1.0 - wa - wb]
    }

    /// Texture coordinates for a point on the triangle.
    pub fn texture_coords(&self, point: Vec3) -> (f32, f32) {
        let [wa, wb, wc] = self.barycentric(point);
        let uv = self.uvs[0] * wa + self.uvs[1] * wb + self.uvs[2] * wc;
        (uv.x, uv.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy_triangle() -> Triangle {
        // Triangle in XY plane at z=-1
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = xy_triangle();

        // Ray pointing at triangle center
        let ray = Ray::primary(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 1);
        let t = tri.hit_distance(&ray).unwrap();
        assert!((t - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_triangle_hit_from_behind() {
        let tri = xy_triangle();

        let ray = Ray::primary(Vec3::new(0.0, 0.0, -3.0), Vec3::Z, 1);
        let t = tri.hit_distance(&ray).unwrap();
        assert!((t - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = xy_triangle();

        // Ray pointing away
        let ray = Ray::primary(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), 1);
        assert!(tri.hit_distance(&ray).is_none());

        // Passes beside the triangle
        let ray = Ray::primary(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), 1);
        assert!(tri.hit_distance(&ray).is_none());
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        let ray = Ray::primary(Vec3::new(0.5, 1.0, 0.0), -Vec3::Y, 1);
        assert!(tri.hit_distance(&ray).is_none());
    }

    #[test]
    fn test_barycentric_weights() {
        let tri = xy_triangle();
        let [a, b, c] = tri.vertices();

        let w = tri.barycentric(a);
        assert!((w[0] - 1.0).abs() < 1e-5 && w[1].abs() < 1e-5 && w[2].abs() < 1e-5);

        let centroid = (a + b + c) / 3.0;
        for weight in tri.barycentric(centroid) {
            assert!((weight - 1.0 / 3.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_texture_coords_in_unit_square() {
        let tri = xy_triangle();
        let [a, b, c] = tri.vertices();

        for p in [a, b, c, (a + b + c) / 3.0, (a + b) / 2.0] {
            let (u, v) = tri.texture_coords(p);
            assert!((-1e-5..=1.0 + 1e-5).contains(&u), "u={}", u);
            assert!((-1e-5..=1.0 + 1e-5).contains(&v), "v={}", v);
        }
    }
}
