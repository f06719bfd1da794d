//! One player in one world, advanced a fixed tick at a time.
//!
//! Each tick runs in the same order as an interactive client: apply input,
//! step the body, re-target from the eye, then apply the edit action.

use blockyard_engine::Result;
use blockyard_engine::body::KinematicBody;
use blockyard_engine::interact::{self, LookAngles, Placement};
use blockyard_engine::raycast::{self, Ray, RaycastHit};
use blockyard_engine::world::VoxelWorld;
use blockyard_engine::world::block::TextureId;
use glam::Vec3;

use crate::config::{Action, SandboxConfig, ScriptStep};
use crate::scene;

/// Input for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickInput {
    pub forward: f32,
    pub strafe: f32,
    pub turn_yaw: f32,
    pub turn_pitch: f32,
    pub jump: bool,
    pub action: Option<Action>,
}

/// Expand a script into per-tick inputs. The action of a step fires only on
/// its first tick.
pub fn script_inputs(script: &[ScriptStep]) -> impl Iterator<Item = TickInput> + '_ {
    script.iter().flat_map(|step| {
        (0..step.ticks).map(move |i| TickInput {
            forward: step.forward,
            strafe: step.strafe,
            turn_yaw: step.turn[0],
            turn_pitch: step.turn[1],
            jump: step.jump,
            action: if i == 0 { step.action } else { None },
        })
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub ticks: u64,
    pub grounded_ticks: u64,
    pub placed: u64,
    pub removed: u64,
    /// Edit actions that found no target or were refused.
    pub refused: u64,
}

pub struct Session {
    world: VoxelWorld,
    body: KinematicBody,
    look: LookAngles,
    target: Option<RaycastHit>,
    reach: f32,
    texture: TextureId,
    stats: SessionStats,
}

impl Session {
    /// Seed the arena and spawn the body as configured.
    pub fn from_config(config: &SandboxConfig) -> Result<Self> {
        let mut world = VoxelWorld::with_config(config.world);
        let texture = TextureId(config.texture);
        scene::seed_arena(&mut world, texture)?;

        let body = KinematicBody::with_config(Vec3::from_array(config.spawn), config.body);
        let look = LookAngles::new(config.look[0], config.look[1]);
        Ok(Self::new(world, body, look, config.reach, texture))
    }

    pub fn new(
        world: VoxelWorld,
        body: KinematicBody,
        look: LookAngles,
        reach: f32,
        texture: TextureId,
    ) -> Self {
        Self {
            world,
            body,
            look,
            target: None,
            reach,
            texture,
            stats: SessionStats::default(),
        }
    }

    pub fn world(&self) -> &VoxelWorld {
        &self.world
    }

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    pub fn look(&self) -> &LookAngles {
        &self.look
    }

    /// Block under the crosshair after the last tick.
    pub fn target(&self) -> Option<&RaycastHit> {
        self.target.as_ref()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Put the body back at `feet` with no velocity.
    pub fn respawn(&mut self, feet: Vec3) {
        self.body.reset(feet);
        self.target = None;
    }

    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Result<()> {
        self.look.turn(input.turn_yaw, input.turn_pitch);
        self.body.walk(input.forward, input.strafe, self.look.yaw, dt);
        if input.jump {
            self.body.jump();
        }

        self.body.update(dt, &self.world);
        self.target = interact::target(&self.world, &self.body, &self.look, self.reach)?;

        if let Some(action) = input.action {
            self.apply(action)?;
        }

        self.stats.ticks += 1;
        if self.body.is_grounded() {
            self.stats.grounded_ticks += 1;
        }
        Ok(())
    }

    fn apply(&mut self, action: Action) -> Result<()> {
        let Some(hit) = self.target else {
            tracing::debug!("{:?} with nothing targeted", action);
            self.stats.refused += 1;
            return Ok(());
        };

        match action {
            Action::Place => {
                match interact::place_against(&mut self.world, &self.body, &hit, self.texture)? {
                    Placement::Placed(pos) => {
                        tracing::info!("Placed block at {}", pos);
                        self.stats.placed += 1;
                    }
                    refused => {
                        tracing::debug!("Placement refused: {:?}", refused);
                        self.stats.refused += 1;
                    }
                }
            }
            Action::Break => {
                if let Some(block) = interact::break_target(&mut self.world, &hit) {
                    tracing::info!("Removed block at {}", block.pos());
                    self.stats.removed += 1;
                }
                self.target = None;
            }
        }
        Ok(())
    }

    /// Cast a fan of `count` rays spread over `spread` degrees of yaw around
    /// the current look direction, all at the current pitch. Returns each
    /// ray's yaw and hit.
    pub fn probe(&self, count: usize, spread: f32) -> Result<Vec<(f32, Option<RaycastHit>)>> {
        let origin = self.body.eye_position();
        let yaws: Vec<f32> = (0..count)
            .map(|i| {
                let t = if count > 1 {
                    i as f32 / (count - 1) as f32 - 0.5
                } else {
                    0.0
                };
                self.look.yaw + t * spread
            })
            .collect();
        let rays: Vec<Ray> = yaws
            .iter()
            .map(|&yaw| Ray::new(origin, LookAngles::new(yaw, self.look.pitch).direction()))
            .collect();

        raycast::cast_batch(&self.world, &rays, self.reach)
            .into_iter()
            .zip(yaws)
            .map(|(hit, yaw)| hit.map(|hit| (yaw, hit)))
            .collect()
    }
}
