use glam::Vec3;

use crate::world::position::BlockPos;

/// Precondition violations reported by the engine.
///
/// "Nothing there" is never an error: a raycast miss or removing an empty cell
/// comes back as `None`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A cell lies outside the 21-bit key window and the world rejects it.
    #[error("cell {pos} is outside the addressable range")]
    CoordinateOutOfRange { pos: BlockPos },

    #[error("ray origin is not finite")]
    NonFiniteOrigin,

    /// The ray starts in a cell outside the 21-bit key window.
    #[error("ray origin {origin} is outside the addressable range")]
    OriginOutOfRange { origin: Vec3 },

    /// Zero-length or non-finite ray direction.
    #[error("ray direction is zero or not finite")]
    DegenerateDirection,

    #[error("ray direction must be normalized (length {length})")]
    UnnormalizedDirection { length: f32 },

    #[error("max distance must be finite and non-negative (got {0})")]
    InvalidMaxDistance(f32),
}

pub type Result<T> = std::result::Result<T, Error>;
