//! Recursive Whitted-style shading.
//!
//! [`Shader::trace`] follows a ray into the scene and returns the color it
//! sees:
//! - Misses return the skybox color for the ray direction
//! - Hits with no bounce budget left return black
//! - Everything else branches on the surface material, spawning shadow,
//!   mirror and refracted rays as needed

use crate::{Color, Intersection, Light, MaterialKind, Primitive, Scene, Skybox, Surface, TraceLog};
use glint_math::{Ray, RayKind, Vec3, Vec3Ext};

/// Offset applied to spawned ray origins to avoid self-intersection.
pub const EPSILON: f32 = 1e-3;

/// Schlick's approximation of the Fresnel reflectance.
///
/// `cos_i` is the cosine between the incoming ray and the ray-facing normal,
/// `n1` and `n2` the refractive indices on the incoming and outgoing side.
pub fn schlick(cos_i: f32, n1: f32, n2: f32) -> f32 {
    let r0 = ((n1 - n2) / (n1 + n2)).powi(2);
    let mut cos = cos_i.clamp(0.0, 1.0);

    // Leaving a denser medium: use the transmitted angle
    if n1 > n2 {
        let eta = n1 / n2;
        let sin2_t = eta * eta * (1.0 - cos * cos);
        if sin2_t > 1.0 {
            return 1.0;
        }
        cos = (1.0 - sin2_t).sqrt();
    }

    r0 + (1.0 - r0) * (1.0 - cos).powi(5)
}

/// Shades rays against a scene and skybox.
#[derive(Debug, Clone, Copy)]
pub struct Shader<'a> {
    scene: &'a Scene,
    skybox: &'a Skybox,
}

impl<'a> Shader<'a> {
    pub fn new(scene: &'a Scene, skybox: &'a Skybox) -> Self {
        Self { scene, skybox }
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// Color seen along `ray`, without collecting debug rays.
    pub fn shade(&self, ray: &Ray) -> Color {
        self.trace(ray, &mut TraceLog::new())
    }

    /// Color seen along `ray`. Rays carrying the debug flag are recorded
    /// in `log`, and so are all rays they spawn.
    pub fn trace(&self, ray: &Ray, log: &mut TraceLog) -> Color {
        let hit = self.scene.nearest_hit(ray);
        let Some(primitive) = hit.primitive else {
            log.record(ray, None);
            return self.skybox.sample(ray.direction);
        };
        log.record(ray, Some(hit.distance));

        if ray.bounces_left == 0 {
            return Color::ZERO;
        }

        let point = ray.at(hit.distance);
        let normal = primitive.normal(point).facing(ray.direction);
        let color = hit.color;
        let surface = primitive.surface();

        match surface.kind {
            MaterialKind::Mirror => self.reflect(ray, point, normal, log) * surface.reflectiveness * color,
            MaterialKind::Diffuse => self.direct_lighting(ray, point, normal, color, surface, false, log),
            MaterialKind::Gloss => self.direct_lighting(ray, point, normal, color, surface, true, log),
            MaterialKind::DiffuseMirror => {
                let diffuse = self.direct_lighting(ray, point, normal, color, surface, false, log);
                let mirror = self.reflect(ray, point, normal, log);
                diffuse + mirror * surface.reflectiveness * surface.reflectiveness * color
            }
            MaterialKind::Transparent => self.transmit(ray, primitive, point, normal, color, log),
        }
    }

    /// Color arriving along the mirror direction.
    fn reflect(&self, ray: &Ray, point: Vec3, normal: Vec3, log: &mut TraceLog) -> Color {
        let direction = ray.direction.reflect_about(normal);
        let bounce = ray.spawn(point + normal * EPSILON, direction, RayKind::Secondary, 1);
        self.trace(&bounce, log)
    }

    /// Sum of the ambient, diffuse and (optionally) Phong terms over all lights.
    #[allow(clippy::too_many_arguments)]
    fn direct_lighting(
        &self,
        ray: &Ray,
        point: Vec3,
        normal: Vec3,
        color: Color,
        surface: &Surface,
        specular: bool,
        log: &mut TraceLog,
    ) -> Color {
        let ambient = self.scene.ambient();
        let view = -ray.direction;
        let origin = point + normal * EPSILON;
        let mut result = Color::ZERO;

        for light in self.scene.lights() {
            let Some(light_position) = light.position_for(point) else {
                continue;
            };
            let to_light = light_position - origin;
            let distance_squared = to_light.length_squared();
            if distance_squared == 0.0 {
                continue;
            }

            result += ambient * color;

            let shadow = ray.spawn(origin, to_light, RayKind::Shadow, 1);
            let arrival = self.resolve_shadow(&shadow, light, distance_squared.sqrt(), log);
            if !arrival.is_light {
                continue;
            }

            let incoming = arrival.color / distance_squared;
            let l = shadow.direction;
            result += incoming * normal.dot(l).max(0.0) * color;

            if specular {
                let r = (-l).reflect_about(normal);
                result += incoming * view.dot(r).max(0.0).powf(surface.specularity) * surface.specular_color;
            }
        }

        result
    }

    /// Follow a shadow ray to its light.
    ///
    /// Returns a light intersection carrying the light color when nothing
    /// lies strictly between the origin and the light, otherwise the
    /// nearest blocker.
    fn resolve_shadow(&self, shadow: &Ray, light: &Light, distance: f32, log: &mut TraceLog) -> Intersection<'a> {
        match self.scene.nearest_blocker(shadow, distance) {
            Some((blocker, t)) => {
                log.record(shadow, Some(t));
                blocker.intersection_at(shadow, t)
            }
            None => {
                log.record(shadow, Some(distance));
                Intersection::light(light.color(), distance)
            }
        }
    }

    /// Fresnel-weighted mix of reflection and refraction.
    fn transmit(
        &self,
        ray: &Ray,
        primitive: &Primitive,
        point: Vec3,
        normal: Vec3,
        color: Color,
        log: &mut TraceLog,
    ) -> Color {
        let ior = primitive.surface().refractive_index;
        let (n1, n2) = if primitive.contains(ray.origin) {
            (ior, 1.0)
        } else {
            (1.0, ior)
        };

        let Some(refracted) = ray.direction.refract_through(normal, n1 / n2) else {
            // Total internal reflection
            return self.reflect(ray, point, normal, log) * color;
        };

        let r = schlick(-ray.direction.dot(normal), n1, n2);
        let reflected = self.reflect(ray, point, normal, log);

        // A sphere is entered and left again
        let cost = if primitive.is_sphere() { 2 } else { 1 };
        let through = ray.spawn(point - normal * EPSILON, refracted, RayKind::Refracted, cost);
        let transmitted = self.trace(&through, log);

        (r * reflected + (1.0 - r) * transmitted) * color
    }
}
