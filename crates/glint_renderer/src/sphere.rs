//! Sphere primitive for ray tracing.

use glint_math::{Interval, Ray, Vec3, Vec3Ext};
use std::f32::consts::PI;

/// A sphere, textured with a latitude/longitude mapping around +Y.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Texture frame up axis.
    pub const UP: Vec3 = Vec3::Y;
    /// Texture frame forward axis.
    pub const DIRECTION: Vec3 = Vec3::X;

    /// Create a new sphere. A non-positive radius never reports a hit.
    pub fn new(center: Vec3, radius: f32) -> Self {
        if !(radius > 0.0) {
            log::warn!("Sphere at {:?} has degenerate radius {}", center, radius);
        }
        Self { center, radius }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Distance along the ray to the nearest forward intersection.
    ///
    /// Solves |O + tD - C|^2 = r^2 and returns the smallest strictly
    /// positive root, so a ray starting inside resolves to the exit point.
    pub fn hit_distance(&self, ray: &Ray) -> Option<f32> {
        if !(self.radius > 0.0) {
            return None;
        }

        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let half_b = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let near = (-half_b - sqrtd) / a;
        let far = (-half_b + sqrtd) / a;

        [near, far]
            .into_iter()
            .find(|&t| Interval::FORWARD.surrounds(t))
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize_fast()
    }

    /// Texture coordinates for a point on the surface.
    pub fn texture_coords(&self, point: Vec3) -> (f32, f32) {
        let n = self.normal(point);
        let u = n.x.atan2(n.z) / (2.0 * PI) + 0.5;
        let v = (1.0 - n.y) / 2.0;
        (u, v)
    }

    /// Whether a point lies strictly inside the sphere.
    pub fn contains(&self, point: Vec3) -> bool {
        (point - self.center).length() < self.radius
    }
}
