//! Camera for ray generation.
//!
//! The camera keeps an orthonormal (direction, up, right) frame and a
//! virtual image plane in front of it. The plane spans 2 units vertically
//! and `2 * aspect` units horizontally, placed so that its horizontal
//! extent subtends the field of view.

use glint_core::{CameraConfig, CameraMove};
use glint_math::{Ray, Vec3};

/// Smallest allowed field of view in degrees.
pub const MIN_FOV: f32 = 60.0;
/// Largest allowed field of view in degrees.
pub const MAX_FOV: f32 = 120.0;

/// Camera for generating primary rays.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    image_width: u32,
    image_height: u32,
    aspect_ratio: f32,

    // Camera positioning
    position: Vec3,
    direction: Vec3,
    up: Vec3,
    right: Vec3,

    // Lens settings
    fov: f32, // Horizontal field of view in degrees
    distance_to_plane: f32,

    // Image plane (recomputed on every change)
    p0: Vec3, // top-left
    p1: Vec3, // top-right
    p2: Vec3, // bottom-left
    plane_x: Vec3,
    plane_y: Vec3,
}

impl Camera {
    /// Create a new camera.
    pub fn new(width: u32, height: u32, position: Vec3, direction: Vec3, up: Vec3, fov: f32) -> Self {
        let mut camera = Self {
            image_width: width.max(1),
            image_height: height.max(1),
            aspect_ratio: 1.0,
            position,
            direction,
            up,
            right: Vec3::Z,
            fov,
            distance_to_plane: 1.0,
            p0: Vec3::ZERO,
            p1: Vec3::ZERO,
            p2: Vec3::ZERO,
            plane_x: Vec3::ZERO,
            plane_y: Vec3::ZERO,
        };
        camera.aspect_ratio = camera.image_width as f32 / camera.image_height as f32;
        camera.set_fov(fov);
        camera
    }

    /// Create a camera from configuration.
    pub fn from_config(config: &CameraConfig, width: u32, height: u32) -> Self {
        Self::new(
            width,
            height,
            Vec3::from_array(config.position),
            Vec3::from_array(config.direction),
            Vec3::from_array(config.up),
            config.fov,
        )
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Horizontal field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn distance_to_plane(&self) -> f32 {
        self.distance_to_plane
    }

    /// Image plane corners: (top-left, top-right, bottom-left).
    pub fn plane_corners(&self) -> (Vec3, Vec3, Vec3) {
        (self.p0, self.p1, self.p2)
    }

    /// Change the output resolution.
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.image_width = width.max(1);
        self.image_height = height.max(1);
        self.aspect_ratio = self.image_width as f32 / self.image_height as f32;
        self.set_fov(self.fov);
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_vectors();
    }

    /// Point the camera along `direction` with `up` as the roll reference.
    pub fn set_orientation(&mut self, direction: Vec3, up: Vec3) {
        self.direction = direction;
        self.up = up;
        self.update_vectors();
    }

    /// Set the field of view, clamped to [`MIN_FOV`, `MAX_FOV`].
    pub fn set_fov(&mut self, degrees: f32) {
        self.fov = degrees.clamp(MIN_FOV, MAX_FOV);
        self.distance_to_plane = self.aspect_ratio / (self.fov.to_radians() / 2.0).tan();
        self.update_vectors();
    }

    /// Widen (positive) or narrow (negative) the field of view.
    pub fn change_fov(&mut self, delta_degrees: f32) {
        self.set_fov(self.fov + delta_degrees);
    }

    /// Move and rotate the camera.
    ///
    /// `translation` is in camera space (x forward, y up, z right). The steps
    /// run in order translation, roll, pitch, yaw, FOV, and each one sees
    /// the frame left by the previous step.
    pub fn move_camera(&mut self, translation: Vec3, pitch: f32, yaw: f32, roll: f32, fov_delta: f32) {
        self.position += translation.x * self.direction + translation.y * self.up + translation.z * self.right;
        self.update_vectors();

        let (sin, cos) = roll.to_radians().sin_cos();
        self.up = cos * self.up + sin * self.up.cross(self.direction);
        self.update_vectors();

        let (sin, cos) = pitch.to_radians().sin_cos();
        let up = cos * self.up + sin * self.up.cross(self.right);
        let direction = cos * self.direction + sin * self.direction.cross(self.right);
        self.up = up;
        self.direction = direction;
        self.update_vectors();

        let (sin, cos) = yaw.to_radians().sin_cos();
        self.direction = cos * self.direction + sin * self.direction.cross(self.up);
        self.update_vectors();

        self.change_fov(fov_delta);
    }

    /// Apply a scripted camera step.
    pub fn apply_move(&mut self, step: &CameraMove) {
        self.move_camera(
            Vec3::from_array(step.translation),
            step.pitch,
            step.yaw,
            step.roll,
            step.fov,
        );
    }

    /// Re-derive the orthonormal frame and the image plane.
    fn update_vectors(&mut self) {
        self.direction = self.direction.try_normalize().unwrap_or(Vec3::X);
        self.right = self
            .direction
            .cross(self.up)
            .try_normalize()
            .unwrap_or_else(|| self.direction.any_orthonormal_vector());
        self.up = self.right.cross(self.direction);

        let center = self.position + self.distance_to_plane * self.direction;
        let half_width = self.aspect_ratio * self.right;
        self.p0 = center + self.up - half_width;
        self.p1 = center + self.up + half_width;
        self.p2 = center - self.up - half_width;
        self.plane_x = self.p1 - self.p0;
        self.plane_y = self.p2 - self.p0;
    }

    /// Generate the primary ray through a (possibly fractional) pixel coordinate.
    pub fn ray_for_pixel(&self, x: f32, y: f32, bounce_budget: u32, trace_for_debug: bool) -> Ray {
        let target = self.p0
            + (x / self.image_width as f32) * self.plane_x
            + (y / self.image_height as f32) * self.plane_y;

        Ray::primary(self.position, target - self.position, bounce_budget).with_debug(trace_for_debug)
    }
}
