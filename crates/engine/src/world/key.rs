//! Packed 64-bit cell keys.
//!
//! Each axis is masked to 21 bits. A cell key holds x in bits 0..=20, y in
//! 21..=41 and z in 42..=62; a column key holds x in 0..=20 and z in 21..=41.

use serde::{Deserialize, Serialize};

use super::position::{BlockPos, ColumnPos};

const BITS: u32 = 21;
const MASK: u64 = (1 << BITS) - 1;

/// Smallest coordinate representable without wrapping.
pub const COORD_MIN: i32 = -(1 << (BITS - 1));
/// Largest coordinate representable without wrapping.
pub const COORD_MAX: i32 = (1 << (BITS - 1)) - 1;

/// What the world does with coordinates outside `COORD_MIN..=COORD_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordPolicy {
    /// Fold into the 21-bit window. Aliased cells are the same cell.
    #[default]
    Wrap,
    /// Refuse insertion; queries for such cells report nothing.
    Reject,
}

#[inline]
pub const fn in_range(v: i32) -> bool {
    v >= COORD_MIN && v <= COORD_MAX
}

/// Sign-extend the low 21 bits of `v`, i.e. the coordinate the mask maps it to.
#[inline]
pub const fn wrap(v: i32) -> i32 {
    (v << (32 - BITS)) >> (32 - BITS)
}

#[inline]
pub const fn pack(pos: BlockPos) -> u64 {
    (pos.x as u64 & MASK) | ((pos.y as u64 & MASK) << BITS) | ((pos.z as u64 & MASK) << (2 * BITS))
}

#[inline]
pub const fn pack_column(col: ColumnPos) -> u64 {
    (col.x as u64 & MASK) | ((col.z as u64 & MASK) << BITS)
}

impl CoordPolicy {
    /// Canonical cell for `pos`, or `None` if this policy refuses it.
    pub fn resolve(self, pos: BlockPos) -> Option<BlockPos> {
        if in_range(pos.x) && in_range(pos.y) && in_range(pos.z) {
            return Some(pos);
        }
        match self {
            CoordPolicy::Wrap => Some(BlockPos::new(wrap(pos.x), wrap(pos.y), wrap(pos.z))),
            CoordPolicy::Reject => None,
        }
    }
}
