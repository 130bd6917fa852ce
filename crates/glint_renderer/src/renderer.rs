//! Frame rendering.
//!
//! Implements:
//! - Supersampled pixel shading on a fixed k x k grid
//! - Packing of colors into `0x00RRGGBB` pixels
//! - Parallel passes over a [`TileGrid`] on a rayon thread pool

use std::time::{Duration, Instant};

use rayon::prelude::*;
use thiserror::Error;

use crate::tile::{render_tile, Tile, TileGrid, TileResult};
use crate::{Camera, Color, Scene, Shader, Skybox, TraceLog, TracedRay};
use glint_core::{ConfigError, RenderConfig, MAX_SUPERSAMPLING};
use glint_math::Interval;

/// Errors that can occur while setting up or running a render pass.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Frame buffer is {actual:?}, expected {expected:?}")]
    InvalidResolution { expected: (u32, u32), actual: (u32, u32) },
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Clamp a color to [0, 1] per channel and pack it as `0x00RRGGBB`.
pub fn pack_rgb(color: Color) -> u32 {
    let channel = |c: f32| (Interval::UNIT.clamp(c) * 255.0) as u32;
    (channel(color.x) << 16) | (channel(color.y) << 8) | channel(color.z)
}

/// Split a packed pixel into its red, green and blue bytes.
pub fn unpack_rgb(pixel: u32) -> [u8; 3] {
    [(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8]
}

/// Render a single pixel with k x k supersampling.
///
/// Samples sit at `((i + 0.5) / k, (j + 0.5) / k)` inside the pixel. Only
/// the first sample of a debug pixel is flagged for tracing.
pub fn render_pixel(
    shader: &Shader,
    camera: &Camera,
    x: u32,
    y: u32,
    config: &RenderConfig,
    log: &mut TraceLog,
) -> u32 {
    let k = config.supersampling.clamp(1, MAX_SUPERSAMPLING);
    let debug = config.debug_row == Some(y) && x % config.debug_stride.max(1) == 0;

    let mut pixel_color = Color::ZERO;
    for j in 0..k {
        for i in 0..k {
            let sx = x as f32 + (i as f32 + 0.5) / k as f32;
            let sy = y as f32 + (j as f32 + 0.5) / k as f32;
            let first = i == 0 && j == 0;
            let ray = camera.ray_for_pixel(sx, sy, config.bounce_limit, debug && first);
            pixel_color += shader.trace(&ray, log);
        }
    }

    pack_rgb(pixel_color / (k * k) as f32)
}

/// Packed RGB output of a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Set the pixel at (x, y). Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, pixel: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = self.index(x, y);
        self.pixels[index] = pixel;
    }

    /// Copy a tile's row-major pixels into place.
    pub fn write_tile(&mut self, tile: &Tile, pixels: &[u32]) {
        let width = tile.width as usize;
        for (row, line) in pixels.chunks_exact(width.max(1)).enumerate().take(tile.height as usize) {
            let y = tile.y + row as u32;
            if y >= self.height || tile.x + tile.width > self.width {
                continue;
            }
            let start = self.index(tile.x, y);
            self.pixels[start..start + width].copy_from_slice(line);
        }
    }

    /// Row-major packed `0x00RRGGBB` pixels.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Raw view of the packed pixels, in native byte order.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Convert to tightly packed RGB bytes (for saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for &pixel in &self.pixels {
            bytes.extend_from_slice(&unpack_rgb(pixel));
        }
        bytes
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// What a render pass did.
#[derive(Debug, Clone, Default)]
pub struct PassReport {
    pub tiles_rendered: usize,
    pub elapsed: Duration,
    /// Debug rays grouped by the tile that traced them
    pub traces: Vec<(Tile, Vec<TracedRay>)>,
}

impl PassReport {
    /// Number of debug rays over all tiles.
    pub fn traced_rays(&self) -> usize {
        self.traces.iter().map(|(_, rays)| rays.len()).sum()
    }
}

/// Renders frames by splitting them into tiles claimed by worker threads.
pub struct TileRenderer {
    pool: rayon::ThreadPool,
    grid: TileGrid,
    config: RenderConfig,
    workers: usize,
}

impl TileRenderer {
    /// Create a renderer with its own worker pool.
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        let workers = config.worker_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("glint-worker-{}", i))
            .build()?;
        let grid = TileGrid::new(config.width, config.height, workers);

        log::debug!(
            "Renderer ready: {}x{}, {} workers, {} tiles",
            config.width,
            config.height,
            workers,
            grid.len()
        );

        Ok(Self {
            pool,
            grid,
            config,
            workers,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Render one frame into a new frame buffer.
    pub fn render(&self, scene: &Scene, skybox: &Skybox, camera: &Camera) -> RenderResult<(FrameBuffer, PassReport)> {
        let mut frame = FrameBuffer::new(self.config.width, self.config.height);
        let report = self.render_into(scene, skybox, camera, &mut frame)?;
        Ok((frame, report))
    }

    /// Render one frame into an existing frame buffer of the configured size.
    pub fn render_into(
        &self,
        scene: &Scene,
        skybox: &Skybox,
        camera: &Camera,
        frame: &mut FrameBuffer,
    ) -> RenderResult<PassReport> {
        let expected = (self.config.width, self.config.height);
        let actual = (frame.width, frame.height);
        if expected != actual {
            return Err(RenderError::InvalidResolution { expected, actual });
        }

        // The pass sees the camera as it was when the pass started
        let mut camera = camera.clone();
        if (camera.image_width(), camera.image_height()) != expected {
            log::debug!(
                "Camera is {}x{}, rendering at {}x{}",
                camera.image_width(),
                camera.image_height(),
                expected.0,
                expected.1
            );
            camera.set_resolution(expected.0, expected.1);
        }

        let start = Instant::now();
        self.grid.reset();
        let shader = Shader::new(scene, skybox);

        let slots = self.grid.len();
        let results: Vec<TileResult> = self.pool.install(|| {
            (0..slots)
                .into_par_iter()
                .flat_map_iter(|_| self.drain_tiles(&shader, &camera))
                .collect()
        });

        let mut report = PassReport {
            tiles_rendered: results.len(),
            ..PassReport::default()
        };
        for result in results {
            frame.write_tile(&result.tile, &result.pixels);
            if !result.traced.is_empty() {
                report.traces.push((result.tile, result.traced));
            }
        }
        report.traces.sort_by_key(|(tile, _)| tile.index);
        report.elapsed = start.elapsed();

        log::debug!(
            "Rendered {} tiles in {:.2?} ({} debug rays)",
            report.tiles_rendered,
            report.elapsed,
            report.traced_rays()
        );

        Ok(report)
    }

    /// Keep claiming and rendering tiles until none are free.
    fn drain_tiles(&self, shader: &Shader, camera: &Camera) -> Vec<TileResult> {
        let mut results = Vec::new();
        while let Some(claim) = self.grid.claim() {
            let result = render_tile(&claim.tile(), shader, camera, &self.config);
            claim.complete();
            results.push(result);
        }
        results
    }
}
