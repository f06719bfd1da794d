pub mod block;
pub mod key;
pub mod position;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slotmap::{DenseSlotMap, new_key_type};

use crate::error::{Error, Result};
use block::Block;
use key::CoordPolicy;
use position::{BlockPos, ColumnPos};

new_key_type! {
    /// Handle for a live block in the dense storage.
    pub struct BlockKey;
}

/// Tuning for a [`VoxelWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Handling of coordinates outside the 21-bit key window.
    pub coords: CoordPolicy,
    /// Lowest y searched when a column's top block is removed.
    pub floor_y: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            coords: CoordPolicy::Wrap,
            floor_y: -64,
        }
    }
}

/// The block store: one flat sparse map of cells, no chunking.
///
/// Three structures are kept in lockstep by every mutation:
/// - `cells`: packed cell key -> slot, the single source of truth for occupancy,
/// - `blocks`: dense storage the renderer iterates each frame,
/// - `heights`: packed column key -> highest occupied y.
///
/// Removal swaps the last dense entry into the freed slot, so iteration order
/// is only stable between mutations.
pub struct VoxelWorld {
    cells: HashMap<u64, BlockKey>,
    blocks: DenseSlotMap<BlockKey, Block>,
    heights: HashMap<u64, i32>,
    config: WorldConfig,
}

impl VoxelWorld {
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            cells: HashMap::new(),
            blocks: DenseSlotMap::with_key(),
            heights: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Place `block` at its cell, replacing whatever was there.
    ///
    /// Returns the replaced block, if any. Fails only when the cell is out of
    /// range and the world is configured with [`CoordPolicy::Reject`].
    pub fn add_block(&mut self, mut block: Block) -> Result<Option<Block>> {
        let pos = self
            .config
            .coords
            .resolve(block.pos())
            .ok_or(Error::CoordinateOutOfRange { pos: block.pos() })?;
        block.relocate(pos);

        let cell = key::pack(pos);
        let replaced = match self.cells.get(&cell).copied() {
            Some(slot) => self.blocks.get_mut(slot).map(|old| std::mem::replace(old, block)),
            None => {
                let slot = self.blocks.insert(block);
                self.cells.insert(cell, slot);
                None
            }
        };

        let column = key::pack_column(pos.column());
        let height = self.heights.entry(column).or_insert(pos.y);
        if pos.y > *height {
            *height = pos.y;
        }

        if replaced.is_some() {
            tracing::debug!("Replaced block at {}", pos);
        }
        Ok(replaced)
    }

    /// Remove the block at `pos`, keeping the column height exact.
    ///
    /// If the removed block was the column's top, the column is rescanned
    /// downward to `floor_y`; below that bound the column counts as empty.
    pub fn remove_block(&mut self, pos: BlockPos) -> Option<Block> {
        let pos = self.config.coords.resolve(pos)?;
        let slot = self.cells.remove(&key::pack(pos))?;
        let removed = self.blocks.remove(slot)?;

        let column = key::pack_column(pos.column());
        if self.heights.get(&column) == Some(&pos.y) {
            match self.scan_down(pos.column(), pos.y - 1) {
                Some(y) => {
                    self.heights.insert(column, y);
                }
                None => {
                    self.heights.remove(&column);
                    tracing::debug!("Column ({}, {}) is now empty", pos.x, pos.z);
                }
            }
        }

        Some(removed)
    }

    fn scan_down(&self, column: ColumnPos, from_y: i32) -> Option<i32> {
        let floor = self.config.floor_y;
        (floor..=from_y)
            .rev()
            .find(|&y| self.cells.contains_key(&key::pack(column.at(y))))
    }

    pub fn has_block(&self, pos: BlockPos) -> bool {
        self.slot(pos).is_some()
    }

    pub fn get_block(&self, pos: BlockPos) -> Option<&Block> {
        self.slot(pos).and_then(|slot| self.blocks.get(slot))
    }

    /// Mutable access for in-place texture changes. The position cannot be
    /// changed through this reference.
    pub fn get_block_mut(&mut self, pos: BlockPos) -> Option<&mut Block> {
        let slot = self.slot(pos)?;
        self.blocks.get_mut(slot)
    }

    fn slot(&self, pos: BlockPos) -> Option<BlockKey> {
        let pos = self.config.coords.resolve(pos)?;
        self.cells.get(&key::pack(pos)).copied()
    }

    /// Highest occupied y in column (x, z), or `None` if the column is empty.
    pub fn height_at(&self, x: i32, z: i32) -> Option<i32> {
        let col = self.config.coords.resolve(BlockPos::new(x, 0, z))?.column();
        self.heights.get(&key::pack_column(col)).copied()
    }

    /// Every live block. Read once per frame by the renderer.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.values()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of columns with at least one block.
    pub fn column_count(&self) -> usize {
        self.heights.len()
    }
}

impl Default for VoxelWorld {
    fn default() -> Self {
        Self::new()
    }
}
