//! Background for rays that escape the scene.

use std::f32::consts::TAU;
use std::sync::Arc;

use crate::Color;
use glint_core::Texture;
use glint_math::Vec3;

/// Equirectangular environment texture, sampled by ray direction.
#[derive(Debug, Clone)]
pub struct Skybox {
    texture: Arc<Texture>,
}

impl Skybox {
    /// Create a skybox from an equirectangular texture.
    pub fn new(texture: Arc<Texture>) -> Self {
        Self { texture }
    }

    /// A single background color.
    pub fn solid(color: Color) -> Self {
        Self::new(Arc::new(Texture::solid_color(color)))
    }

    /// Vertical white-to-blue gradient, blue at the zenith.
    pub fn gradient(rows: u32) -> Self {
        let rows = rows.max(2);
        let white = Color::ONE;
        let blue = Color::new(0.5, 0.7, 1.0);

        let pixels = (0..rows)
            .map(|row| {
                // Row 0 is the zenith (v = 0)
                let a = 1.0 - row as f32 / (rows - 1) as f32;
                white * (1.0 - a) + blue * a
            })
            .collect();

        match Texture::new(1, rows, pixels, "<gradient>") {
            Ok(texture) => Self::new(Arc::new(texture)),
            Err(_) => Self::solid(blue),
        }
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Background color seen along `direction`.
    pub fn sample(&self, direction: Vec3) -> Color {
        let d = direction.normalize_or_zero();
        let u = (d.x.atan2(d.z) / TAU + 0.5).rem_euclid(1.0);
        let v = (1.0 - d.y) / 2.0;
        self.texture.sample(u, v)
    }
}

impl Default for Skybox {
    fn default() -> Self {
        Self::solid(Color::ZERO)
    }
}
