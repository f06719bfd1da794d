//! Sparse voxel world with a DDA raycaster and a kinematic body.
//!
//! The three pieces:
//!
//! - [`world::VoxelWorld`] stores blocks by cell and keeps a per-column height index.
//! - [`raycast::cast`] walks a ray through the grid and reports the first occupied cell;
//!   [`raycast::cast_batch`] runs many casts in parallel.
//! - [`body::KinematicBody`] falls under gravity and resolves collisions one axis at a time.
//!
//! [`interact`] glues them together the way a first-person editor does: look,
//! target, then place or break.

pub mod body;
pub mod error;
pub mod interact;
pub mod raycast;
pub mod world;

pub use error::{Error, Result};
