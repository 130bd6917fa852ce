//! Render and session configuration.
//!
//! Everything here deserializes from JSON and every field has a default, so
//! an empty object `{}` is a valid session.

use std::path::{Path, PathBuf};

use glint_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Largest supersampling factor a render pass accepts.
pub const MAX_SUPERSAMPLING: u32 = 16;

/// Settings for a render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Recursion budget given to each primary ray
    pub bounce_limit: u32,
    /// Supersampling factor k; each pixel averages k*k samples
    pub supersampling: u32,
    /// Worker threads (defaults to the available hardware threads)
    pub workers: Option<usize>,
    /// Ambient light added for every light at diffuse surfaces
    pub ambient: [f32; 3],
    /// Pixel row whose primary rays are recorded for the debug overlay
    pub debug_row: Option<u32>,
    /// Record every n-th column of the debug row
    pub debug_stride: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            bounce_limit: 5,
            supersampling: 1,
            workers: None,
            ambient: [0.01, 0.01, 0.01],
            debug_row: None,
            debug_stride: 16,
        }
    }
}

impl RenderConfig {
    /// Check the values a render pass cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.supersampling == 0 || self.supersampling > MAX_SUPERSAMPLING {
            return Err(ConfigError::Invalid(format!(
                "supersampling must be between 1 and {}, got {}",
                MAX_SUPERSAMPLING, self.supersampling
            )));
        }
        if self.debug_stride == 0 {
            return Err(ConfigError::Invalid("debug_stride must be at least 1".into()));
        }
        if self.workers == Some(0) {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        Ok(())
    }

    /// Number of worker threads to render with.
    pub fn worker_count(&self) -> usize {
        self.workers
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
            .max(1)
    }

    /// Ambient light as a color.
    pub fn ambient_color(&self) -> Vec3 {
        Vec3::from_array(self.ambient)
    }
}

/// Initial camera placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub direction: [f32; 3],
    pub up: [f32; 3],
    /// Horizontal field of view in degrees (clamped to 60-120 by the camera)
    pub fov: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            direction: [1.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov: 100.0,
        }
    }
}

/// One scripted camera step, applied between render passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraMove {
    /// Movement in camera space: x forward, y up, z right
    pub translation: [f32; 3],
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub fov: f32,
}

/// A full rendering session: what to render, from where, and where to put it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub render: RenderConfig,
    pub camera: CameraConfig,
    /// Equirectangular skybox image
    pub skybox: Option<PathBuf>,
    /// Image tiled across the floor plane
    pub floor_texture: Option<PathBuf>,
    /// Camera steps; one extra frame is rendered after each
    pub moves: Vec<CameraMove>,
    /// Output file pattern, `{}` is replaced by the frame number
    pub output: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
            skybox: None,
            floor_texture: None,
            moves: Vec::new(),
            output: "frame_{}.png".to_string(),
        }
    }
}

impl SessionConfig {
    /// Load a session from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let session = Self::from_json(&text)?;
        log::debug!("Loaded session config from {}", path.as_ref().display());
        Ok(session)
    }

    /// Parse a session from a JSON string.
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let session: SessionConfig = serde_json::from_str(text)?;
        session.render.validate()?;
        Ok(session)
    }

    /// Output path for a frame number.
    pub fn output_path(&self, frame: usize) -> PathBuf {
        PathBuf::from(self.output.replace("{}", &frame.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let session = SessionConfig::from_json("{}").unwrap();
        assert_eq!(session, SessionConfig::default());
        assert_eq!(session.render.bounce_limit, 5);
        assert_eq!(session.camera.fov, 100.0);
    }

    #[test]
    fn test_partial_override() {
        let session = SessionConfig::from_json(
            r#"{
                "render": { "width": 32, "height": 16, "supersampling": 2 },
                "moves": [ { "yaw": 10.0 }, { "translation": [1.0, 0.0, 0.0] } ]
            }"#,
        )
        .unwrap();

        assert_eq!(session.render.width, 32);
        assert_eq!(session.render.height, 16);
        assert_eq!(session.render.supersampling, 2);
        assert_eq!(session.render.bounce_limit, 5);
        assert_eq!(session.moves.len(), 2);
        assert_eq!(session.moves[0].yaw, 10.0);
        assert_eq!(session.moves[1].translation, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = SessionConfig::from_json(r#"{ "render": { "width": 0 } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = SessionConfig::from_json(r#"{ "render": { "supersampling": 0 } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = SessionConfig::from_json(r#"{ "render": { "supersampling": 65536 } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = SessionConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_supersampling_bounds() {
        let mut config = RenderConfig {
            supersampling: MAX_SUPERSAMPLING,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_ok());

        config.supersampling = MAX_SUPERSAMPLING + 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.supersampling = u32::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_worker_count() {
        let config = RenderConfig {
            workers: Some(3),
            ..Default::default()
        };
        assert_eq!(config.worker_count(), 3);
        assert!(RenderConfig::default().worker_count() >= 1);
    }

    #[test]
    fn test_output_path() {
        let session = SessionConfig::default();
        assert_eq!(session.output_path(3), PathBuf::from("frame_3.png"));
    }
}
