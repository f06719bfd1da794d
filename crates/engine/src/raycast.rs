//! Grid traversal ("DDA") raycasting against a [`VoxelWorld`].
//!
//! The ray is stepped from cell to cell across grid boundaries, one axis at a
//! time, so the cost is proportional to the number of cells visited.

use glam::Vec3;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::world::VoxelWorld;
use crate::world::key;
use crate::world::position::{BlockPos, Face};

/// Allowed deviation of a direction's length from 1.
pub const NORMALIZED_TOLERANCE: f32 = 1e-3;

/// A half-line: origin plus unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }
}

/// The first occupied cell along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub pos: BlockPos,
    /// Face the ray entered through; `None` if the origin cell itself is occupied.
    pub face: Option<Face>,
    /// Distance along the ray at the boundary crossing that reached `pos`.
    ///
    /// This is where the ray entered the cell's slab on the stepping axis, not
    /// an exact ray/cube intersection.
    pub distance: f32,
}

impl RaycastHit {
    /// The empty cell in front of the hit face, where a new block would go.
    pub fn adjacent(&self) -> Option<BlockPos> {
        self.face.map(|face| self.pos.offset(face))
    }
}

/// Cast a ray through `world` and return the first occupied cell within
/// `max_distance`.
///
/// `direction` must be finite and normalized: distances are reported in
/// direction units and callers treat them as world units. The origin must lie
/// in the addressable coordinate range, and the ray ends where it leaves that
/// range.
pub fn cast(
    world: &VoxelWorld,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Result<Option<RaycastHit>> {
    validate(origin, direction, max_distance)?;

    let mut cell = BlockPos::containing(origin);
    let mut t_max = [0.0f32; 3];
    let mut t_delta = [f32::INFINITY; 3];
    let mut step = [0i32; 3];

    for axis in 0..3 {
        let (s, d) = (origin[axis], direction[axis]);
        if d > 0.0 {
            step[axis] = 1;
            t_max[axis] = (s.floor() + 1.0 - s) / d;
            t_delta[axis] = 1.0 / d;
        } else if d < 0.0 {
            step[axis] = -1;
            t_max[axis] = (s - s.floor()) / -d;
            t_delta[axis] = 1.0 / -d;
        } else {
            t_max[axis] = f32::INFINITY;
        }
    }

    let mut face = None;
    let mut distance = 0.0;

    while distance < max_distance {
        if world.has_block(cell) {
            return Ok(Some(RaycastHit {
                pos: cell,
                face,
                distance,
            }));
        }

        // Ties go to the lower axis: X, then Y, then Z.
        let axis = if t_max[0] <= t_max[1] && t_max[0] <= t_max[2] {
            0
        } else if t_max[1] <= t_max[2] {
            1
        } else {
            2
        };

        distance = t_max[axis];
        t_max[axis] += t_delta[axis];
        let coord = match axis {
            0 => &mut cell.x,
            1 => &mut cell.y,
            _ => &mut cell.z,
        };
        *coord += step[axis];
        // Cells past the key window would alias cells on the far side.
        if !key::in_range(*coord) {
            return Ok(None);
        }
        face = Some(Face::entered_by(axis, step[axis]));
    }

    Ok(None)
}

/// Cast many independent rays in parallel.
///
/// The world is only read, so this is safe as long as no mutation is in flight,
/// which the shared borrow guarantees.
pub fn cast_batch(
    world: &VoxelWorld,
    rays: &[Ray],
    max_distance: f32,
) -> Vec<Result<Option<RaycastHit>>> {
    rays.par_iter()
        .map(|ray| cast(world, ray.origin, ray.direction, max_distance))
        .collect()
}

fn validate(origin: Vec3, direction: Vec3, max_distance: f32) -> Result<()> {
    if !origin.is_finite() {
        return Err(Error::NonFiniteOrigin);
    }
    let cell = origin.floor();
    if cell.min_element() < key::COORD_MIN as f32 || cell.max_element() > key::COORD_MAX as f32 {
        return Err(Error::OriginOutOfRange { origin });
    }
    if !direction.is_finite() || direction == Vec3::ZERO {
        return Err(Error::DegenerateDirection);
    }
    let length = direction.length();
    if (length - 1.0).abs() > NORMALIZED_TOLERANCE {
        return Err(Error::UnnormalizedDirection { length });
    }
    if !max_distance.is_finite() || max_distance < 0.0 {
        return Err(Error::InvalidMaxDistance(max_distance));
    }
    Ok(())
}
