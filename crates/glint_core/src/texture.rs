//! Textures for surfaces and the skybox.
//!
//! A texture is a 2-D array of normalized RGB colors. A 1x1 texture is how
//! flat-colored surfaces are represented, so every surface goes through the
//! same sampling path.

use std::path::Path;

use glint_math::{Interval, Vec3};
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Texture is {width}x{height} but has {len} pixels")]
    InvalidDimensions { width: u32, height: u32, len: usize },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A texture with pixel data.
///
/// Pixels are RGB in the 0-1 range, row-major, with row 0 at the top.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
    path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<Vec3>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        if width == 0 || height == 0 || pixels.len() != (width as usize) * (height as usize) {
            return Err(TextureError::InvalidDimensions {
                width,
                height,
                len: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
            path: path.into(),
        })
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Vec3) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
            path: "<solid>".to_string(),
        }
    }

    /// Load a texture from an image file.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let rgb = image::load_from_memory(&bytes)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        let pixels = rgb
            .pixels()
            .map(|p| {
                Vec3::new(
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                )
            })
            .collect();

        let texture = Self::new(width, height, pixels, path.to_string_lossy())?;
        log::debug!("Loaded texture: {} ({}x{})", texture.path, width, height);
        Ok(texture)
    }

    /// Texture width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel data, row-major order.
    pub fn pixels(&self) -> &[Vec3] {
        &self.pixels
    }

    /// Original file path (for debugging).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this texture is a single flat color.
    pub fn is_solid(&self) -> bool {
        self.width == 1 && self.height == 1
    }

    /// Get the pixel at integer coordinates, clamped to the texture bounds.
    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        let x = x.min(self.width.saturating_sub(1)) as usize;
        let y = y.min(self.height.saturating_sub(1)) as usize;
        self.pixels
            .get(y * self.width as usize + x)
            .copied()
            .unwrap_or(Vec3::ZERO)
    }

    /// Sample the nearest texel at normalized coordinates.
    ///
    /// `(0, 0)` is the top-left texel and `(1, 1)` the bottom-right one.
    /// Coordinates outside [0, 1] (or NaN) are clamped.
    pub fn sample(&self, u: f32, v: f32) -> Vec3 {
        let u = if u.is_nan() { 0.0 } else { Interval::UNIT.clamp(u) };
        let v = if v.is_nan() { 0.0 } else { Interval::UNIT.clamp(v) };

        let x = (u * self.width.saturating_sub(1) as f32).round() as u32;
        let y = (v * self.height.saturating_sub(1) as f32).round() as u32;
        self.get(x, y)
    }

    /// Average color over all pixels.
    pub fn average(&self) -> Vec3 {
        let sum: Vec3 = self.pixels.iter().copied().sum();
        sum / self.pixels.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Texture {
        // 2x2: red, green / blue, white
        Texture::new(
            2,
            2,
            vec![
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::ONE,
            ],
            "<checker>",
        )
        .unwrap()
    }

    #[test]
    fn test_solid_color_texture() {
        let tex = Texture::solid_color(Vec3::new(1.0, 0.5, 0.0));
        assert!(tex.is_solid());

        let sample = tex.sample(0.5, 0.5);
        assert!((sample.x - 1.0).abs() < 0.001);
        assert!((sample.y - 0.5).abs() < 0.001);
        assert!((sample.z - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_sample_corners() {
        let tex = checker();
        assert_eq!(tex.sample(0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample(1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(tex.sample(0.0, 1.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(tex.sample(1.0, 1.0), Vec3::ONE);
    }

    #[test]
    fn test_sample_out_of_range_is_clamped() {
        let tex = checker();
        assert_eq!(tex.sample(-3.0, -0.5), tex.get(0, 0));
        assert_eq!(tex.sample(7.0, 2.0), tex.get(1, 1));
        assert_eq!(tex.sample(f32::NAN, f32::NAN), tex.get(0, 0));
        assert_eq!(tex.get(99, 99), Vec3::ONE);
    }

    #[test]
    fn test_average() {
        let avg = checker().average();
        assert!((avg - Vec3::splat(0.5)).length() < 1e-6);
    }

    #[test]
    fn test_invalid_dimensions() {
        let result = Texture::new(2, 2, vec![Vec3::ONE], "<bad>");
        assert!(matches!(
            result,
            Err(TextureError::InvalidDimensions { width: 2, height: 2, len: 1 })
        ));
        assert!(Texture::new(0, 0, Vec::new(), "<empty>").is_err());
    }

    #[test]
    fn test_accessors() {
        let tex = checker();
        assert_eq!((tex.width(), tex.height()), (2, 2));
        assert_eq!(tex.pixels().len(), 4);
        assert_eq!(tex.pixels()[3], Vec3::ONE);
        assert_eq!(tex.path(), "<checker>");
    }

    #[test]
    fn test_rejected_texture_cannot_be_sampled() {
        // Zero-sized textures never get built, so sampling stays in bounds
        assert!(Texture::new(0, 3, Vec::new(), "<flat>").is_err());
        assert!(Texture::new(3, 0, Vec::new(), "<flat>").is_err());

        let tex = Texture::solid_color(Vec3::splat(0.25));
        assert_eq!(tex.get(u32::MAX, u32::MAX), Vec3::splat(0.25));
        assert_eq!(tex.sample(f32::INFINITY, f32::NEG_INFINITY), Vec3::splat(0.25));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Texture::load("definitely/not/here.png");
        assert!(matches!(result, Err(TextureError::Io(_))));
    }
}
