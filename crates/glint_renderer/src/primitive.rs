//! Primitive and Intersection types for ray-object intersection.
//!
//! The set of shapes is closed, so dispatch goes through the [`Shape`] enum
//! rather than a trait object.

use crate::{Color, MaterialKind, Plane, Sphere, Surface, Triangle};
use glint_math::{Ray, Vec3};

/// Geometry of a primitive.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

/// Result of intersecting a ray with the scene.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Surface color at the hit, ambient on a miss, light color for a lit shadow ray
    pub color: Color,
    /// Distance along the ray, `f32::NEG_INFINITY` on a miss
    pub distance: f32,
    /// The primitive that was hit
    pub primitive: Option<&'a Primitive>,
    /// A shadow ray reached its light unobstructed
    pub is_light: bool,
}

impl<'a> Intersection<'a> {
    /// Nothing was hit.
    pub fn miss(ambient: Color) -> Self {
        Self {
            color: ambient,
            distance: f32::NEG_INFINITY,
            primitive: None,
            is_light: false,
        }
    }

    /// A primitive was hit.
    pub fn hit(color: Color, distance: f32, primitive: &'a Primitive) -> Self {
        Self {
            color,
            distance,
            primitive: Some(primitive),
            is_light: false,
        }
    }

    /// A shadow ray reached its light.
    pub fn light(color: Color, distance: f32) -> Self {
        Self {
            color,
            distance,
            primitive: None,
            is_light: true,
        }
    }

    /// Whether a primitive was hit.
    pub fn is_hit(&self) -> bool {
        self.primitive.is_some()
    }
}

/// A shape with a surface.
#[derive(Debug, Clone)]
pub struct Primitive {
    shape: Shape,
    surface: Surface,
}

impl Primitive {
    /// Create a new primitive.
    pub fn new(shape: impl Into<Shape>, surface: Surface) -> Self {
        Self {
            shape: shape.into(),
            surface,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn material(&self) -> MaterialKind {
        self.surface.kind
    }

    /// Position anchor: sphere center, plane anchor, or first triangle vertex.
    pub fn position(&self) -> Vec3 {
        match &self.shape {
            Shape::Sphere(s) => s.center(),
            Shape::Plane(p) => p.anchor(),
            Shape::Triangle(t) => t.vertices()[0],
        }
    }

    /// Texture frame as (up, direction); unit length and mutually orthogonal.
    pub fn frame(&self) -> (Vec3, Vec3) {
        match &self.shape {
            Shape::Sphere(_) => (Sphere::UP, Sphere::DIRECTION),
            Shape::Plane(p) => p.frame(),
            Shape::Triangle(t) => t.frame(),
        }
    }

    pub fn is_sphere(&self) -> bool {
        matches!(self.shape, Shape::Sphere(_))
    }

    /// Distance to the nearest forward hit, without sampling the texture.
    pub fn hit_distance(&self, ray: &Ray) -> Option<f32> {
        match &self.shape {
            Shape::Sphere(s) => s.hit_distance(ray),
            Shape::Plane(p) => p.hit_distance(ray),
            Shape::Triangle(t) => t.hit_distance(ray),
        }
    }

    /// Intersect a ray with this primitive.
    pub fn intersect(&self, ray: &Ray, ambient: Color) -> Intersection<'_> {
        match self.hit_distance(ray) {
            Some(t) => self.intersection_at(ray, t),
            None => Intersection::miss(ambient),
        }
    }

    /// Build the hit record for a distance already known to hit.
    pub(crate) fn intersection_at(&self, ray: &Ray, t: f32) -> Intersection<'_> {
        Intersection::hit(self.sample_color(ray.at(t)), t, self)
    }

    /// Outward geometric normal at a point on the surface.
    pub fn normal(&self, point: Vec3) -> Vec3 {
        match &self.shape {
            Shape::Sphere(s) => s.normal(point),
            Shape::Plane(p) => p.normal(),
            Shape::Triangle(t) => t.normal(),
        }
    }

    /// Texture coordinates of a point on the surface.
    pub fn texture_coords(&self, point: Vec3) -> (f32, f32) {
        match &self.shape {
            Shape::Sphere(s) => s.texture_coords(point),
            Shape::Plane(p) => p.texture_coords(point),
            Shape::Triangle(t) => t.texture_coords(point),
        }
    }

    /// Texture color at a point on the surface.
    pub fn sample_color(&self, point: Vec3) -> Color {
        if self.surface.texture().is_solid() {
            return self.surface.average_color();
        }
        let (u, v) = self.texture_coords(point);
        self.surface.color_at(u, v)
    }

    /// Whether a point is inside the primitive's volume. Planes and
    /// triangles have no volume.
    pub fn contains(&self, point: Vec3) -> bool {
        match &self.shape {
            Shape::Sphere(s) => s.contains(point),
            Shape::Plane(_) | Shape::Triangle(_) => false,
        }
    }
}
