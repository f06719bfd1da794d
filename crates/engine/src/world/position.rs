use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Integer cell coordinates in the world lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The cell containing a continuous world-space point (component-wise floor).
    pub fn containing(point: Vec3) -> Self {
        let cell = point.floor();
        Self::new(cell.x as i32, cell.y as i32, cell.z as i32)
    }

    /// The (x, z) column this cell belongs to.
    pub const fn column(&self) -> ColumnPos {
        ColumnPos {
            x: self.x,
            z: self.z,
        }
    }

    /// The cell one step across `face`.
    pub const fn offset(&self, face: Face) -> BlockPos {
        let [dx, dy, dz] = face.step();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// World-space corner of the cell with the smallest coordinates.
    pub fn min_corner(&self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A vertical column of cells, addressed by (x, z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnPos {
    pub x: i32,
    pub z: i32,
}

impl ColumnPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub const fn at(&self, y: i32) -> BlockPos {
        BlockPos::new(self.x, y, self.z)
    }
}

/// One of the six axis-aligned faces of a cell, named by its outward normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// -Z
    North,
    /// +Z
    South,
    /// +X
    East,
    /// -X
    West,
    /// +Y
    Top,
    /// -Y
    Bottom,
}

impl Face {
    /// Outward normal as an integer step.
    pub const fn step(&self) -> [i32; 3] {
        match self {
            Face::North => [0, 0, -1],
            Face::South => [0, 0, 1],
            Face::East => [1, 0, 0],
            Face::West => [-1, 0, 0],
            Face::Top => [0, 1, 0],
            Face::Bottom => [0, -1, 0],
        }
    }

    /// The face a ray enters through when it steps along `axis` in direction `sign`.
    ///
    /// Stepping +X enters through the cell's -X face, and so on: the entry face
    /// always opposes the step.
    pub const fn entered_by(axis: usize, sign: i32) -> Face {
        match (axis, sign > 0) {
            (0, true) => Face::West,
            (0, false) => Face::East,
            (1, true) => Face::Bottom,
            (1, false) => Face::Top,
            (_, true) => Face::North,
            (_, false) => Face::South,
        }
    }
}
