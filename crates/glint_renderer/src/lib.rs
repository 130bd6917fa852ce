//! Glint renderer - recursive Whitted-style CPU ray tracing
//!
//! Spheres, planes and triangles lit by point and plane lights, shaded
//! with mirror, diffuse, gloss and transparent materials against a skybox.
//! Frames are split into tiles that worker threads claim atomically.

mod camera;
mod light;
mod material;
mod plane;
mod primitive;
mod renderer;
mod scene;
mod shader;
mod skybox;
mod sphere;
mod tile;
mod trace;
mod triangle;

pub use camera::{Camera, MAX_FOV, MIN_FOV};
pub use light::{Light, LightKind};
pub use material::{Color, MaterialKind, Surface};
pub use plane::Plane;
pub use primitive::{Intersection, Primitive, Shape};
pub use renderer::{
    pack_rgb, render_pixel, unpack_rgb, FrameBuffer, PassReport, RenderError, RenderResult, TileRenderer,
};
pub use scene::{Scene, DEFAULT_AMBIENT};
pub use shader::{schlick, Shader, EPSILON};
pub use skybox::Skybox;
pub use sphere::Sphere;
pub use tile::{generate_tiles, render_tile, screen_divisions, Tile, TileClaim, TileGrid, TileResult, TileState};
pub use trace::{TraceLog, TracedRay};
pub use triangle::Triangle;

/// Re-export math types from glint_math
pub use glint_math::{Interval, Ray, RayKind, Vec3};
