//! The starter arena: a three-layer 10x10 floor and a small tower.

use blockyard_engine::Result;
use blockyard_engine::world::VoxelWorld;
use blockyard_engine::world::block::{Block, TextureId};
use blockyard_engine::world::position::BlockPos;

/// Feet position that stands on the arena floor.
pub const ARENA_SPAWN: [f32; 3] = [0.0, 1.0, 0.0];

/// Half extent of the floor: x and z run over `-ARENA_HALF..ARENA_HALF`.
pub const ARENA_HALF: i32 = 5;

/// Tower column (x, z); it rises from y = 1 to `TOWER_HEIGHT`.
pub const TOWER: (i32, i32) = (3, 3);
pub const TOWER_HEIGHT: i32 = 5;

/// Add the arena to `world` and return how many blocks were placed.
pub fn seed_arena(world: &mut VoxelWorld, texture: TextureId) -> Result<usize> {
    let mut count = 0;
    for y in [0, -1, -2] {
        for x in -ARENA_HALF..ARENA_HALF {
            for z in -ARENA_HALF..ARENA_HALF {
                world.add_block(Block::new(BlockPos::new(x, y, z), texture))?;
                count += 1;
            }
        }
    }

    let (tx, tz) = TOWER;
    for y in 1..=TOWER_HEIGHT {
        world.add_block(Block::new(BlockPos::new(tx, y, tz), texture))?;
        count += 1;
    }

    tracing::debug!("Arena seeded with {} blocks", count);
    Ok(count)
}
