use crate::{Vec3, Vec3Ext};

/// What spawned a ray. Only used for diagnostics.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RayKind {
    /// Cast from the camera through a pixel
    Primary,
    /// Mirror bounce
    Secondary,
    /// Visibility test towards a light
    Shadow,
    /// Transmitted through a transparent surface
    Refracted,
}

/// A ray in 3D space.
///
/// The direction is normalized on construction. `bounces_left` is the
/// remaining recursion budget for this ray's lineage; children spawned with
/// [`Ray::spawn`] get one less, never going below zero.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub bounces_left: u32,
    pub kind: RayKind,
    /// Record this ray (and its children) for the debug overlay.
    pub trace_for_debug: bool,
}

impl Ray {
    /// Create a new ray. `direction` does not need to be unit length.
    pub fn new(origin: Vec3, direction: Vec3, bounces_left: u32, kind: RayKind) -> Self {
        Self {
            origin,
            direction: direction.normalize_fast(),
            bounces_left,
            kind,
            trace_for_debug: false,
        }
    }

    /// Create a primary ray.
    pub fn primary(origin: Vec3, direction: Vec3, bounces_left: u32) -> Self {
        Self::new(origin, direction, bounces_left, RayKind::Primary)
    }

    /// Set the debug flag.
    pub fn with_debug(mut self, trace_for_debug: bool) -> Self {
        self.trace_for_debug = trace_for_debug;
        self
    }

    /// Spawn a child ray with `cost` fewer bounces, inheriting the debug flag.
    pub fn spawn(&self, origin: Vec3, direction: Vec3, kind: RayKind, cost: u32) -> Ray {
        Ray::new(origin, direction, self.bounces_left.saturating_sub(cost), kind)
            .with_debug(self.trace_for_debug)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
