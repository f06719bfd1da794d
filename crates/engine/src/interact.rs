//! First-person editing: aim with yaw/pitch, target a cell, place or break.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::body::KinematicBody;
use crate::error::Result;
use crate::raycast::{self, RaycastHit};
use crate::world::VoxelWorld;
use crate::world::block::{Block, TextureId};
use crate::world::position::BlockPos;

/// How far the player can reach, in blocks.
pub const DEFAULT_REACH: f32 = 5.0;

/// Pitch is kept strictly inside ±90° so the look vector never degenerates.
pub const PITCH_LIMIT: f32 = 89.0;

/// Look direction as yaw/pitch in degrees.
///
/// Yaw 0 looks along +X, yaw -90 along -Z; positive pitch looks up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for LookAngles {
    fn default() -> Self {
        Self {
            yaw: -90.0,
            pitch: 0.0,
        }
    }
}

impl LookAngles {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }

    pub fn turn(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Unit look vector.
    pub fn direction(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize()
    }
}

/// The cell the body is looking at, if any is within `reach`.
pub fn target(
    world: &VoxelWorld,
    body: &KinematicBody,
    look: &LookAngles,
    reach: f32,
) -> Result<Option<RaycastHit>> {
    raycast::cast(world, body.eye_position(), look.direction(), reach)
}

/// Outcome of trying to place a block against a targeted face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Placed(BlockPos),
    /// The ray started inside a block, so there is no face to build on.
    NoFace,
    /// The new block would overlap the body.
    Obstructed(BlockPos),
    Occupied(BlockPos),
}

/// Place a block in front of the hit face unless something is in the way.
pub fn place_against(
    world: &mut VoxelWorld,
    body: &KinematicBody,
    hit: &RaycastHit,
    texture: TextureId,
) -> Result<Placement> {
    let Some(pos) = hit.adjacent() else {
        return Ok(Placement::NoFace);
    };
    if body.intersects_cell(pos) {
        return Ok(Placement::Obstructed(pos));
    }
    if world.has_block(pos) {
        return Ok(Placement::Occupied(pos));
    }
    world.add_block(Block::new(pos, texture))?;
    Ok(Placement::Placed(pos))
}

/// Remove the targeted block.
pub fn break_target(world: &mut VoxelWorld, hit: &RaycastHit) -> Option<Block> {
    world.remove_block(hit.pos)
}
