//! Surface description: texture plus how light interacts with it.

use std::sync::Arc;

use glint_core::Texture;
use glint_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// How the shader continues a ray that hits a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Lambertian shading from every visible light
    Diffuse,
    /// Diffuse plus a Phong highlight
    Gloss,
    /// Perfect reflection tinted by the surface color
    Mirror,
    /// Diffuse shading plus a weaker mirror bounce
    DiffuseMirror,
    /// Fresnel blend of reflection and refraction
    Transparent,
}

/// Material properties of a primitive.
#[derive(Debug, Clone)]
pub struct Surface {
    texture: Arc<Texture>,
    average_color: Color,
    /// Material kind
    pub kind: MaterialKind,
    /// Strength of mirror bounces, in [0, 1]
    pub reflectiveness: f32,
    /// Phong exponent for gloss highlights
    pub specularity: f32,
    /// Index of refraction for transparent surfaces
    pub refractive_index: f32,
    /// Color of gloss highlights
    pub specular_color: Color,
}

impl Surface {
    /// Create a flat-colored surface.
    pub fn new(color: Color, kind: MaterialKind) -> Self {
        Self::textured(Arc::new(Texture::solid_color(color)), kind)
    }

    /// Create a surface from a (possibly shared) texture.
    pub fn textured(texture: Arc<Texture>, kind: MaterialKind) -> Self {
        let average_color = texture.average();
        Self {
            texture,
            average_color,
            kind,
            reflectiveness: 0.5,
            specularity: 10.0,
            refractive_index: 1.6,
            specular_color: Color::ONE,
        }
    }

    /// Set reflectiveness (clamped to [0, 1]).
    pub fn with_reflectiveness(mut self, reflectiveness: f32) -> Self {
        self.reflectiveness = reflectiveness.clamp(0.0, 1.0);
        self
    }

    /// Set the Phong exponent.
    pub fn with_specularity(mut self, specularity: f32) -> Self {
        self.specularity = specularity.max(0.0);
        self
    }

    /// Set the index of refraction.
    pub fn with_refractive_index(mut self, refractive_index: f32) -> Self {
        if refractive_index > 0.0 {
            self.refractive_index = refractive_index;
        } else {
            log::warn!("Ignoring non-positive refractive index {}", refractive_index);
        }
        self
    }

    /// Set the highlight color.
    pub fn with_specular_color(mut self, specular_color: Color) -> Self {
        self.specular_color = specular_color;
        self
    }

    /// The surface texture.
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Average texture color, cached at construction.
    pub fn average_color(&self) -> Color {
        self.average_color
    }

    /// Texture color at normalized texture coordinates.
    pub fn color_at(&self, u: f32, v: f32) -> Color {
        self.texture.sample(u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let surface = Surface::new(Color::new(1.0, 0.0, 0.0), MaterialKind::Diffuse);
        assert_eq!(surface.kind, MaterialKind::Diffuse);
        assert_eq!(surface.reflectiveness, 0.5);
        assert_eq!(surface.specularity, 10.0);
        assert_eq!(surface.refractive_index, 1.6);
        assert_eq!(surface.average_color(), Color::new(1.0, 0.0, 0.0));
        assert_eq!(surface.color_at(0.3, 0.9), Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_reflectiveness_is_clamped() {
        let surface = Surface::new(Color::ONE, MaterialKind::Mirror).with_reflectiveness(1.7);
        assert_eq!(surface.reflectiveness, 1.0);

        let surface = Surface::new(Color::ONE, MaterialKind::Mirror).with_reflectiveness(-0.2);
        assert_eq!(surface.reflectiveness, 0.0);
    }

    #[test]
    fn test_shared_texture_average() {
        let texture = Arc::new(
            Texture::new(2, 1, vec![Color::ZERO, Color::ONE], "<ramp>").unwrap(),
        );
        let surface = Surface::textured(texture.clone(), MaterialKind::Gloss);
        assert_eq!(surface.average_color(), Color::splat(0.5));
        assert_eq!(Arc::strong_count(&texture), 2);
    }
}
