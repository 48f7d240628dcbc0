//! Rotate-to-solve puzzle grid.
//!
//! Tiles never leave their slot: each one is placed at its target position
//! when the puzzle is built, and the player only turns them. The puzzle is
//! solved once every tile is upright.

use crate::error::HuntError;
use crate::stage::PuzzleManifest;
use crate::types::Rotation;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, instrument};

/// One rotatable cell of the puzzle grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PuzzleTile {
    target_position: usize,
    position: usize,
    rotation: Rotation,
    asset: Option<String>,
}

impl PuzzleTile {
    /// Grid slot this tile belongs in.
    pub fn target_position(&self) -> usize {
        self.target_position
    }

    /// Grid slot this tile currently occupies.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current orientation.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Asset identifier from the manifest, if built from one.
    pub fn asset(&self) -> Option<&str> {
        self.asset.as_deref()
    }

    /// Returns true if the tile is in its slot and upright.
    pub fn is_solved(&self) -> bool {
        self.position == self.target_position && self.rotation == Rotation::Upright
    }
}

/// The live puzzle of a puzzle stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PuzzleState {
    tiles: Vec<PuzzleTile>,
    columns: usize,
    rotations_made: usize,
}

impl PuzzleState {
    /// Creates `tile_count` anonymous tiles on the smallest square grid that fits them.
    #[instrument(skip(rng))]
    pub fn initialize<R: Rng>(tile_count: usize, rng: &mut R) -> Result<Self, HuntError> {
        let columns = square_columns(tile_count);
        Self::build(vec![None; tile_count], columns, rng)
    }

    /// Creates one tile per manifest entry.
    #[instrument(skip(manifest, rng), fields(tiles = manifest.len(), columns = manifest.columns()))]
    pub fn from_manifest<R: Rng>(manifest: &PuzzleManifest, rng: &mut R) -> Result<Self, HuntError> {
        let assets = manifest.tiles().iter().cloned().map(Some).collect();
        Self::build(assets, *manifest.columns(), rng)
    }

    fn build<R: Rng>(
        assets: Vec<Option<String>>,
        columns: usize,
        rng: &mut R,
    ) -> Result<Self, HuntError> {
        if assets.is_empty() {
            return Err(HuntError::InvalidArgument {
                collection: "tiles",
                index: 0,
                len: 0,
            });
        }
        if columns == 0 {
            return Err(HuntError::InvalidArgument {
                collection: "columns",
                index: 0,
                len: 0,
            });
        }

        let tiles = assets
            .into_iter()
            .enumerate()
            .map(|(slot, asset)| PuzzleTile {
                target_position: slot,
                position: slot,
                rotation: Rotation::random(rng),
                asset,
            })
            .collect::<Vec<_>>();

        debug!(
            tiles = tiles.len(),
            scrambled = tiles.iter().filter(|t| !t.is_solved()).count(),
            "Puzzle initialized"
        );

        Ok(Self {
            tiles,
            columns,
            rotations_made: 0,
        })
    }

    /// Turns one tile a quarter turn clockwise and returns its new orientation.
    ///
    /// Out-of-range indices leave every tile unchanged.
    #[instrument(skip(self))]
    pub fn rotate(&mut self, tile_index: usize) -> Result<Rotation, HuntError> {
        let len = self.tiles.len();
        let tile = self
            .tiles
            .get_mut(tile_index)
            .ok_or(HuntError::InvalidArgument {
                collection: "tiles",
                index: tile_index,
                len,
            })?;
        tile.rotation = tile.rotation.next();
        self.rotations_made += 1;
        debug!(rotation = %tile.rotation, "Tile rotated");
        Ok(tile.rotation)
    }

    /// Returns true if every tile is in its slot and upright.
    #[instrument(skip(self))]
    pub fn is_complete(&self) -> bool {
        self.tiles.iter().all(PuzzleTile::is_solved)
    }

    /// Returns the tile at `index`.
    pub fn tile(&self, index: usize) -> Option<&PuzzleTile> {
        self.tiles.get(index)
    }

    /// Returns all tiles in slot order.
    pub fn tiles(&self) -> &[PuzzleTile] {
        &self.tiles
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false; a puzzle has at least one tile.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Grid width.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Grid height (the last row may be partial).
    pub fn rows(&self) -> usize {
        self.tiles.len().div_ceil(self.columns)
    }

    /// Total rotations applied since the puzzle was built.
    pub fn rotations_made(&self) -> usize {
        self.rotations_made
    }

    /// Formats the grid as rows of tile rotations.
    pub fn display(&self) -> String {
        self.tiles
            .chunks(self.columns)
            .map(|row| {
                row.iter()
                    .map(|tile| format!("{:>4}", tile.rotation.to_string()))
                    .collect::<Vec<_>>()
                    .join(" |")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Smallest column count whose square holds `tile_count` tiles.
fn square_columns(tile_count: usize) -> usize {
    let mut columns = 1;
    while columns * columns < tile_count {
        columns += 1;
    }
    columns
}
