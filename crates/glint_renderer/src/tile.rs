//! Tile scheduling for parallel rendering.
//!
//! The image is split into a `divisions x divisions` grid of tiles. Workers
//! claim tiles through a [`TileGrid`] of atomic states, render each claimed
//! tile into its own buffer, and hand the result back for stitching.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::renderer::render_pixel;
use crate::{Camera, Shader, TraceLog, TracedRay};
use glint_core::RenderConfig;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// X coordinate of the tile's top-left corner
    pub x: u32,
    /// Y coordinate of the tile's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Row-major index in the grid
    pub index: usize,
}

impl Tile {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Number of divisions per axis for a worker count: `ceil(sqrt(workers))`.
pub fn screen_divisions(workers: usize) -> u32 {
    ((workers.max(1) as f64).sqrt().ceil() as u32).max(1)
}

/// Split an image into a row-major grid of tiles.
///
/// Divisions are clamped per axis so no tile is empty. The last row and
/// column absorb the remainder when the size does not divide evenly.
pub fn generate_tiles(width: u32, height: u32, divisions: u32) -> Vec<Tile> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let columns = divisions.clamp(1, width);
    let rows = divisions.clamp(1, height);
    let tile_width = width / columns;
    let tile_height = height / rows;

    let mut tiles = Vec::with_capacity((columns * rows) as usize);
    for row in 0..rows {
        for column in 0..columns {
            let x = column * tile_width;
            let y = row * tile_height;
            let w = if column == columns - 1 { width - x } else { tile_width };
            let h = if row == rows - 1 { height - y } else { tile_height };
            tiles.push(Tile::new(x, y, w, h, tiles.len()));
        }
    }

    tiles
}

/// Claim state of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TileState {
    Free = 0,
    Claimed = 1,
    Rendered = 2,
}

impl TileState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => TileState::Claimed,
            2 => TileState::Rendered,
            _ => TileState::Free,
        }
    }
}

/// Tiles of an image plus their atomic claim states.
#[derive(Debug)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    states: Vec<AtomicU8>,
    divisions: u32,
}

impl TileGrid {
    /// Grid for an image rendered by `workers` threads.
    pub fn new(width: u32, height: u32, workers: usize) -> Self {
        let divisions = screen_divisions(workers);
        let tiles = generate_tiles(width, height, divisions);
        let states = tiles.iter().map(|_| AtomicU8::new(TileState::Free as u8)).collect();
        Self {
            tiles,
            states,
            divisions,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    pub fn state(&self, index: usize) -> Option<TileState> {
        self.states
            .get(index)
            .map(|state| TileState::from_u8(state.load(Ordering::Acquire)))
    }

    /// Claim the first free tile in row-major order.
    pub fn claim(&self) -> Option<TileClaim<'_>> {
        self.states.iter().enumerate().find_map(|(index, state)| {
            state
                .compare_exchange(
                    TileState::Free as u8,
                    TileState::Claimed as u8,
                    Ordering::AcqRel,
                    Ordering::Relaxed,
                )
                .ok()
                .map(|_| TileClaim {
                    grid: self,
                    index,
                    completed: false,
                })
        })
    }

    /// Mark every tile free for the next pass.
    pub fn reset(&self) {
        for state in &self.states {
            state.store(TileState::Free as u8, Ordering::Release);
        }
    }

    pub fn all_rendered(&self) -> bool {
        self.states
            .iter()
            .all(|state| state.load(Ordering::Acquire) == TileState::Rendered as u8)
    }
}

/// Exclusive claim on one tile.
///
/// Dropping the claim without calling [`TileClaim::complete`] puts the tile
/// back up for grabs.
#[derive(Debug)]
pub struct TileClaim<'a> {
    grid: &'a TileGrid,
    index: usize,
    completed: bool,
}

impl TileClaim<'_> {
    pub fn tile(&self) -> Tile {
        self.grid.tiles[self.index]
    }

    /// Mark the tile rendered.
    pub fn complete(mut self) {
        self.grid.states[self.index].store(TileState::Rendered as u8, Ordering::Release);
        self.completed = true;
    }
}

impl Drop for TileClaim<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.grid.states[self.index].store(TileState::Free as u8, Ordering::Release);
        }
    }
}

/// Result of rendering a tile.
#[derive(Debug, Clone)]
pub struct TileResult {
    pub tile: Tile,
    /// Packed `0x00RRGGBB` pixels in row-major order within the tile
    pub pixels: Vec<u32>,
    /// Debug rays traced while rendering the tile
    pub traced: Vec<TracedRay>,
}

/// Render a single tile.
pub fn render_tile(tile: &Tile, shader: &Shader, camera: &Camera, config: &RenderConfig) -> TileResult {
    let mut pixels = Vec::with_capacity(tile.pixel_count());
    let mut log = TraceLog::new();

    for local_y in 0..tile.height {
        for local_x in 0..tile.width {
            let x = tile.x + local_x;
            let y = tile.y + local_y;
            pixels.push(render_pixel(shader, camera, x, y, config, &mut log));
        }
    }

    TileResult {
        tile: *tile,
        pixels,
        traced: log.into_rays(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::AtomicUsize;

    fn assert_covers(tiles: &[Tile], width: u32, height: u32) {
        let mut seen = vec![0u8; (width * height) as usize];
        for tile in tiles {
            assert!(tile.width > 0 && tile.height > 0);
            for y in tile.y..tile.y + tile.height {
                for x in tile.x..tile.x + tile.width {
                    seen[(y * width + x) as usize] += 1;
                }
            }
        }
        assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn test_screen_divisions() {
        assert_eq!(screen_divisions(0), 1);
        assert_eq!(screen_divisions(1), 1);
        assert_eq!(screen_divisions(2), 2);
        assert_eq!(screen_divisions(4), 2);
        assert_eq!(screen_divisions(5), 3);
        assert_eq!(screen_divisions(9), 3);
        assert_eq!(screen_divisions(16), 4);
        assert_eq!(screen_divisions(17), 5);
    }

    #[test]
    fn test_tiles_cover_image_once() {
        assert_covers(&generate_tiles(128, 128, 4), 128, 128);
        assert_covers(&generate_tiles(100, 37, 3), 100, 37);
        assert_covers(&generate_tiles(641, 359, 5), 641, 359);
    }

    #[test]
    fn test_last_tile_absorbs_remainder() {
        let tiles = generate_tiles(10, 7, 3);
        assert_eq!(tiles.len(), 9);
        assert_eq!(tiles[0], Tile::new(0, 0, 3, 2, 0));
        assert_eq!(tiles[2], Tile::new(6, 0, 4, 2, 2));
        assert_eq!(tiles[8], Tile::new(6, 4, 4, 3, 8));
    }

    #[test]
    fn test_tiny_image_clamps_divisions() {
        let tiles = generate_tiles(2, 1, 4);
        assert_eq!(tiles.len(), 2);
        assert_covers(&tiles, 2, 1);
        assert!(generate_tiles(0, 10, 4).is_empty());
    }

    #[test]
    fn test_claims_in_row_major_order() {
        let grid = TileGrid::new(64, 64, 4);
        assert_eq!(grid.len(), 4);

        let first = grid.claim().unwrap();
        let second = grid.claim().unwrap();
        assert_eq!(first.tile().index, 0);
        assert_eq!(second.tile().index, 1);
        assert_eq!(grid.state(0), Some(TileState::Claimed));

        first.complete();
        assert_eq!(grid.state(0), Some(TileState::Rendered));
        drop(second);
        assert_eq!(grid.state(1), Some(TileState::Free));

        // Released tile is claimable again
        assert_eq!(grid.claim().unwrap().tile().index, 1);
    }

    #[test]
    fn test_reset_frees_everything() {
        let grid = TileGrid::new(32, 32, 2);
        while let Some(claim) = grid.claim() {
            claim.complete();
        }
        assert!(grid.all_rendered());
        assert!(grid.claim().is_none());

        grid.reset();
        assert!(!grid.all_rendered());
        assert_eq!(grid.state(3), Some(TileState::Free));
        assert_eq!(grid.state(4), None);
    }

    #[test]
    fn test_concurrent_claims_are_exclusive() {
        let grid = TileGrid::new(300, 200, 16);
        let claimed = std::sync::Mutex::new(Vec::new());
        let attempts = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    while let Some(claim) = grid.claim() {
                        attempts.fetch_add(1, Ordering::Relaxed);
                        claimed.lock().unwrap().push(claim.tile().index);
                        claim.complete();
                    }
                });
            }
        });

        let claimed = claimed.into_inner().unwrap();
        let unique: HashSet<_> = claimed.iter().copied().collect();
        assert_eq!(claimed.len(), grid.len());
        assert_eq!(unique.len(), grid.len());
        assert_eq!(attempts.load(Ordering::Relaxed), grid.len());
        assert!(grid.all_rendered());
    }
}
