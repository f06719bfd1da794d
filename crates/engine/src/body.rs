//! A player-like kinematic body with per-axis collision against the world.
//!
//! The body is an axis-aligned box standing on its feet position. Each update
//! integrates gravity and then moves along Y, X and Z in turn, snapping out of
//! the first occupied cell it overlaps on each axis. This is discrete, not
//! swept: a fast enough body can pass through thin geometry.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::world::VoxelWorld;
use crate::world::position::BlockPos;

/// Physical constants and dimensions. Units are blocks and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Vertical acceleration (negative is down).
    pub gravity: f32,
    pub jump_speed: f32,
    /// Most negative vertical velocity allowed.
    pub terminal_velocity: f32,
    pub move_speed: f32,
    pub half_width: f32,
    pub height: f32,
    /// Eye height above the feet.
    pub eye_height: f32,
    /// Gap left between the body and a surface it was pushed out of.
    pub epsilon: f32,
    /// Horizontal velocity multiplier applied once per grounded tick.
    pub ground_damping: f32,
    /// Per-axis displacements smaller than this are skipped.
    pub min_step: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            gravity: -20.0,
            jump_speed: 8.0,
            terminal_velocity: -50.0,
            move_speed: 5.0,
            half_width: 0.25,
            height: 0.9,
            eye_height: 0.75,
            epsilon: 0.01,
            ground_damping: 0.8,
            min_step: 1e-4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Resolution order used by [`KinematicBody::update`].
    pub const RESOLVE_ORDER: [Axis; 3] = [Axis::Y, Axis::X, Axis::Z];

    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KinematicBody {
    position: Vec3,
    velocity: Vec3,
    grounded: bool,
    config: BodyConfig,
}

impl KinematicBody {
    pub fn new(position: Vec3) -> Self {
        Self::with_config(position, BodyConfig::default())
    }

    pub fn with_config(position: Vec3, config: BodyConfig) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            grounded: false,
            config,
        }
    }

    /// Feet position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn config(&self) -> &BodyConfig {
        &self.config
    }

    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.config.eye_height, 0.0)
    }

    /// Advance one tick: gravity, then collision-resolved movement on Y, X, Z.
    ///
    /// Ground damping is a fixed multiplier per call, independent of `dt`, so
    /// friction depends on the tick rate.
    pub fn update(&mut self, dt: f32, world: &VoxelWorld) {
        self.velocity.y += self.config.gravity * dt;
        if self.velocity.y < self.config.terminal_velocity {
            self.velocity.y = self.config.terminal_velocity;
        }

        self.grounded = false;
        for axis in Axis::RESOLVE_ORDER {
            let delta = self.velocity[axis.index()] * dt;
            self.move_axis(axis, delta, world);
        }

        if self.grounded {
            self.velocity.x *= self.config.ground_damping;
            self.velocity.z *= self.config.ground_damping;
        }

        tracing::trace!(
            "body at {:?} vel {:?} grounded={}",
            self.position,
            self.velocity,
            self.grounded
        );
    }

    fn move_axis(&mut self, axis: Axis, delta: f32, world: &VoxelWorld) {
        if delta.abs() < self.config.min_step {
            return;
        }
        self.position[axis.index()] += delta;

        let (min, max) = self.cell_bounds();
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    let cell = BlockPos::new(x, y, z);
                    if world.has_block(cell) {
                        self.push_out(axis, delta, cell);
                        return;
                    }
                }
            }
        }
    }

    /// Inclusive range of cells the body's box touches.
    fn cell_bounds(&self) -> (BlockPos, BlockPos) {
        let hw = self.config.half_width;
        let p = self.position;
        let min = Vec3::new(p.x - hw, p.y, p.z - hw);
        let max = Vec3::new(p.x + hw, p.y + self.config.height, p.z + hw);
        (BlockPos::containing(min), BlockPos::containing(max))
    }

    fn push_out(&mut self, axis: Axis, delta: f32, cell: BlockPos) {
        let hw = self.config.half_width;
        let eps = self.config.epsilon;
        let i = axis.index();
        let lo = cell.min_corner()[i];

        self.position[i] = match (axis, delta > 0.0) {
            (Axis::Y, true) => lo - self.config.height - eps,
            (Axis::Y, false) => {
                self.grounded = true;
                lo + 1.0 + eps
            }
            (_, true) => lo - hw - eps,
            (_, false) => lo + 1.0 + hw + eps,
        };
        self.velocity[i] = 0.0;
    }

    /// Set horizontal velocity from movement input.
    ///
    /// `forward` and `strafe` are in [-1, 1]; `yaw` is in degrees, with 0 facing +X
    /// and 90 facing +Z. The velocity is set outright; there is no acceleration.
    pub fn walk(&mut self, forward: f32, strafe: f32, yaw: f32, _dt: f32) {
        let yaw = yaw.to_radians();
        let heading = Vec2::new(yaw.cos(), yaw.sin());
        let side = Vec2::new(-heading.y, heading.x);

        let mut dir = Vec2::ZERO;
        if forward != 0.0 {
            dir += heading * forward;
        }
        if strafe != 0.0 {
            dir += side * strafe;
        }

        let len = dir.length();
        if len > 0.01 {
            dir /= len;
        }

        self.velocity.x = dir.x * self.config.move_speed;
        self.velocity.z = dir.y * self.config.move_speed;
    }

    pub fn jump(&mut self) {
        if self.grounded {
            self.velocity.y = self.config.jump_speed;
            self.grounded = false;
        }
    }

    /// Teleport with zero velocity, airborne.
    pub fn reset(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
        self.grounded = false;
    }

    /// Whether the body's box overlaps the unit cell at `pos` (touching does not count).
    pub fn intersects_cell(&self, pos: BlockPos) -> bool {
        let hw = self.config.half_width;
        let p = self.position;
        let c = pos.min_corner();
        c.x + 1.0 > p.x - hw
            && c.x < p.x + hw
            && c.y + 1.0 > p.y
            && c.y < p.y + self.config.height
            && c.z + 1.0 > p.z - hw
            && c.z < p.z + hw
    }
}
