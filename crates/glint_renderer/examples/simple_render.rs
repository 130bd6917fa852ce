//! Minimal ray tracer example.
//!
//! Renders a lit sphere over a mirror floor and saves it in PPM format.

use glint_core::RenderConfig;
use glint_renderer::{
    Camera, Color, Light, MaterialKind, Plane, Primitive, Scene, Skybox, Sphere, Surface, TileRenderer, Vec3,
};
use glint_math::Vec2;
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Glint - Simple Example");
    println!("======================");

    let mut scene = Scene::new();
    scene.add_primitive(Primitive::new(
        Sphere::new(Vec3::new(3.0, 0.0, 0.0), 1.0),
        Surface::new(Color::new(1.0, 0.0, 0.0), MaterialKind::Gloss),
    ));
    scene.add_primitive(Primitive::new(
        Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, Vec2::ONE),
        Surface::new(Color::splat(0.8), MaterialKind::DiffuseMirror),
    ));
    scene.add_light(Light::point(Vec3::new(0.0, 10.0, 0.0), Color::ONE, 50.0));

    let config = RenderConfig {
        width: 400,
        height: 225,
        supersampling: 2,
        ..RenderConfig::default()
    };
    let camera = Camera::new(config.width, config.height, Vec3::ZERO, Vec3::X, Vec3::Y, 90.0);
    let skybox = Skybox::gradient(128);

    println!("Rendering {}x{} @ {}x{} samples...", config.width, config.height, config.supersampling, config.supersampling);

    let renderer = TileRenderer::new(config)?;
    let (frame, report) = renderer.render(&scene, &skybox, &camera)?;
    println!("Rendered {} tiles in {:?}", report.tiles_rendered, report.elapsed);

    let filename = "output.ppm";
    let mut file = BufWriter::new(File::create(filename)?);
    writeln!(file, "P3")?;
    writeln!(file, "{} {}", frame.width, frame.height)?;
    writeln!(file, "255")?;
    for rgb in frame.to_rgb8().chunks_exact(3) {
        writeln!(file, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    println!("Saved to {}", filename);
    Ok(())
}
