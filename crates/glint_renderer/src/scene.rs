//! Scene container: primitives, lights and the ambient term.

use crate::{Color, Intersection, Light, Primitive};
use glint_math::{Interval, Ray};

/// Default ambient light.
pub const DEFAULT_AMBIENT: Color = Color::splat(0.01);

/// Everything a render pass reads. Read-only while a pass is running.
#[derive(Debug, Clone)]
pub struct Scene {
    primitives: Vec<Primitive>,
    lights: Vec<Light>,
    ambient: Color,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            lights: Vec::new(),
            ambient: DEFAULT_AMBIENT,
        }
    }

    /// Set the ambient light.
    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    /// Add a primitive.
    pub fn add_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Add a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut [Light] {
        &mut self.lights
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    /// Nearest forward hit over all primitives (linear scan).
    pub fn nearest_hit(&self, ray: &Ray) -> Intersection<'_> {
        match self.closest_within(ray, Interval::FORWARD) {
            Some((primitive, t)) => primitive.intersection_at(ray, t),
            None => Intersection::miss(self.ambient),
        }
    }

    /// Nearest primitive strictly between the ray origin and `max_distance`.
    pub fn nearest_blocker(&self, ray: &Ray, max_distance: f32) -> Option<(&Primitive, f32)> {
        self.closest_within(ray, Interval::new(0.0, max_distance))
    }

    fn closest_within(&self, ray: &Ray, range: Interval) -> Option<(&Primitive, f32)> {
        let mut closest: Option<(&Primitive, f32)> = None;

        for primitive in &self.primitives {
            let Some(t) = primitive.hit_distance(ray) else {
                continue;
            };
            if range.surrounds(t) && closest.map_or(true, |(_, best)| t < best) {
                closest = Some((primitive, t));
            }
        }

        closest
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
