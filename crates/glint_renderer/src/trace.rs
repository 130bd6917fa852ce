//! Side channel for the debug ray overlay.

use glint_math::{Ray, RayKind, Vec3};

/// A ray that was flagged for debugging, together with where it ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracedRay {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Distance to whatever stopped the ray, `None` if it escaped
    pub distance: Option<f32>,
    pub kind: RayKind,
}

/// Collects traced rays during shading.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    rays: Vec<TracedRay>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `ray` if it carries the debug flag.
    pub fn record(&mut self, ray: &Ray, distance: Option<f32>) {
        if !ray.trace_for_debug {
            return;
        }
        self.rays.push(TracedRay {
            origin: ray.origin,
            direction: ray.direction,
            distance,
            kind: ray.kind,
        });
    }

    pub fn rays(&self) -> &[TracedRay] {
        &self.rays
    }

    pub fn into_rays(self) -> Vec<TracedRay> {
        self.rays
    }

    pub fn len(&self) -> usize {
        self.rays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }
}
