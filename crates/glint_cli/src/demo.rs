//! Built-in demo scene.

use std::sync::Arc;

use glint_core::Texture;
use glint_math::{Vec2, Vec3};
use glint_renderer::{Color, Light, MaterialKind, Plane, Primitive, Scene, Sphere, Surface, Triangle};

/// Two-tone floor used when no floor texture is configured.
fn checkerboard() -> Surface {
    let light = Color::splat(0.8);
    let dark = Color::splat(0.2);
    match Texture::new(2, 2, vec![light, dark, dark, light], "<checkerboard>") {
        Ok(texture) => Surface::textured(Arc::new(texture), MaterialKind::DiffuseMirror),
        Err(_) => Surface::new(Color::splat(0.5), MaterialKind::DiffuseMirror),
    }
}

/// A row of spheres, one per material, standing on a floor and lit from above.
pub fn build_scene(floor_texture: Option<Arc<Texture>>) -> Scene {
    let mut scene = Scene::new();

    let sphere = |center: Vec3, radius: f32, surface: Surface| Primitive::new(Sphere::new(center, radius), surface);

    scene.add_primitive(sphere(
        Vec3::new(5.0, 0.0, 0.0),
        1.0,
        Surface::new(Color::new(1.0, 0.0, 0.0), MaterialKind::Diffuse),
    ));
    scene.add_primitive(sphere(
        Vec3::new(5.0, 0.0, 3.0),
        1.0,
        Surface::new(Color::new(0.0, 1.0, 0.0), MaterialKind::Gloss).with_specularity(20.0),
    ));
    scene.add_primitive(sphere(
        Vec3::new(5.0, 0.0, -3.0),
        1.0,
        Surface::new(Color::ONE, MaterialKind::Mirror).with_reflectiveness(0.9),
    ));
    scene.add_primitive(sphere(
        Vec3::new(5.0, 3.0, -3.0),
        1.0,
        Surface::new(Color::new(1.0, 0.0, 1.0), MaterialKind::Gloss),
    ));
    scene.add_primitive(sphere(
        Vec3::new(3.0, -0.4, 1.5),
        0.6,
        Surface::new(Color::new(0.9, 0.95, 1.0), MaterialKind::Transparent).with_refractive_index(1.5),
    ));

    let floor_surface = match floor_texture {
        Some(texture) => Surface::textured(texture, MaterialKind::DiffuseMirror),
        None => checkerboard(),
    }
    .with_reflectiveness(0.3);
    scene.add_primitive(Primitive::new(
        Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, Vec2::splat(2.0)),
        floor_surface,
    ));

    scene.add_primitive(Primitive::new(
        Triangle::new(
            Vec3::new(8.0, -1.0, -1.5),
            Vec3::new(8.0, -1.0, 1.5),
            Vec3::new(8.0, 2.0, 0.0),
        ),
        Surface::new(Color::new(1.0, 0.8, 0.2), MaterialKind::Diffuse),
    ));

    scene.add_light(Light::point(Vec3::new(0.0, 5.0, 0.0), Color::ONE, 100.0));
    scene.add_light(Light::point(Vec3::new(0.0, 2.0, 4.0), Color::ONE, 10.0));
    scene.add_light(Light::plane(Vec3::new(0.0, 12.0, 0.0), -Vec3::Y, Color::new(1.0, 0.95, 0.9), 40.0));

    scene
}
