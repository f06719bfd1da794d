use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::position::BlockPos;

/// Opaque texture/material identifier. The engine stores these without
/// interpreting them; the renderer maps them to texture layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureId(pub u16);

/// A placed voxel: where it is and what it looks like.
///
/// The position is fixed for the lifetime of the entry. Moving a block means
/// removing it and adding a new one; only the texture may be changed in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pos: BlockPos,
    texture: TextureId,
}

impl Block {
    pub const fn new(pos: BlockPos, texture: TextureId) -> Self {
        Self { pos, texture }
    }

    /// A block at the cell containing `point`.
    pub fn at_point(point: Vec3, texture: TextureId) -> Self {
        Self::new(BlockPos::containing(point), texture)
    }

    pub const fn pos(&self) -> BlockPos {
        self.pos
    }

    pub const fn texture(&self) -> TextureId {
        self.texture
    }

    pub fn set_texture(&mut self, texture: TextureId) {
        self.texture = texture;
    }

    pub(crate) fn relocate(&mut self, pos: BlockPos) {
        self.pos = pos;
    }
}
