//! Point and plane lights.

use crate::Color;
use glint_math::Vec3;

/// Where light comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Emits from a single position
    Point { position: Vec3 },
    /// Emits from an infinite plane; each query point is lit from its
    /// perpendicular foot on the plane
    Plane { anchor: Vec3, normal: Vec3 },
}

/// A light source.
#[derive(Debug, Clone)]
pub struct Light {
    kind: LightKind,
    /// Emitted color at the current intensity
    color: Color,
    /// Color at unit intensity
    base_color: Color,
    intensity: f32,
}

impl Light {
    /// Create a point light.
    pub fn point(position: Vec3, color: Color, intensity: f32) -> Self {
        Self::new(LightKind::Point { position }, color, intensity)
    }

    /// Create a plane light.
    pub fn plane(anchor: Vec3, normal: Vec3, color: Color, intensity: f32) -> Self {
        let normal = normal.try_normalize().unwrap_or_else(|| {
            log::warn!("Plane light at {:?} has a degenerate normal", anchor);
            Vec3::ZERO
        });
        Self::new(LightKind::Plane { anchor, normal }, color, intensity)
    }

    fn new(kind: LightKind, base_color: Color, intensity: f32) -> Self {
        Self {
            kind,
            color: base_color * intensity,
            base_color,
            intensity,
        }
    }

    pub fn kind(&self) -> LightKind {
        self.kind
    }

    /// Emitted color.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Rescale the emitted color, keeping its hue.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
        self.color = self.base_color * intensity;
    }

    /// Position the light shines from, as seen from `query`.
    ///
    /// Returns `None` when a plane light has no valid projection, in which
    /// case the light does not reach the query point.
    pub fn position_for(&self, query: Vec3) -> Option<Vec3> {
        match self.kind {
            LightKind::Point { position } => Some(position),
            LightKind::Plane { anchor, normal } => {
                let denominator = (-normal).dot(normal);
                if denominator == 0.0 {
                    return None;
                }
                let t = (anchor - query).dot(normal) / denominator;
                let foot = query - normal * t;
                foot.is_finite().then_some(foot)
            }
        }
    }
}
