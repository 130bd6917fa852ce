//! Glint Core - Textures and configuration for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Textures**: `Texture`, a 2-D array of normalized RGB colors with
//!   clamped nearest-texel sampling and image-file loading
//! - **Configuration**: `RenderConfig`, `CameraConfig` and `SessionConfig`,
//!   loaded from JSON
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{SessionConfig, Texture};
//!
//! let session = SessionConfig::load("session.json")?;
//! let sky = Texture::load("textures/sky.png")?;
//! println!("{}x{} @ {} bounces", session.render.width, session.render.height,
//!     session.render.bounce_limit);
//! ```

pub mod config;
pub mod texture;

// Re-export commonly used types
pub use config::{
    CameraConfig, CameraMove, ConfigError, ConfigResult, RenderConfig, SessionConfig, MAX_SUPERSAMPLING,
};
pub use texture::{Texture, TextureError, TextureResult};
