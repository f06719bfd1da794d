//! Sandbox configuration, loaded from a JSON file.
//!
//! Every field has a default, so a partial file (or none at all) is fine:
//!
//! ```json
//! { "tick_rate": 60, "ticks": 600, "body": { "move_speed": 6.0 } }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use blockyard_engine::body::BodyConfig;
use blockyard_engine::interact::DEFAULT_REACH;
use blockyard_engine::world::WorldConfig;
use serde::{Deserialize, Serialize};

use crate::scene::ARENA_SPAWN;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Ticks to run before exiting.
    pub ticks: u64,
    /// Initial feet position.
    pub spawn: [f32; 3],
    /// Initial look yaw/pitch in degrees.
    pub look: [f32; 2],
    pub reach: f32,
    /// Texture used for placed blocks.
    pub texture: u16,
    pub world: WorldConfig,
    pub body: BodyConfig,
    /// Scripted input; the session idles once it runs out.
    pub script: Vec<ScriptStep>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            ticks: 600,
            spawn: ARENA_SPAWN,
            look: [-90.0, 0.0],
            reach: DEFAULT_REACH,
            texture: 0,
            world: WorldConfig::default(),
            body: BodyConfig::default(),
            script: default_script(),
        }
    }
}

impl SandboxConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: SandboxConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.tick_rate > 0, "tick_rate must be positive");
        ensure!(
            self.reach.is_finite() && self.reach >= 0.0,
            "reach must be finite and non-negative (got {})",
            self.reach
        );
        ensure!(
            self.spawn.iter().all(|c| c.is_finite()),
            "spawn position must be finite"
        );
        Ok(())
    }

    /// Fixed step in seconds.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

/// An edit applied to the targeted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Place,
    Break,
}

/// Input held for `ticks` consecutive ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptStep {
    pub ticks: u32,
    pub forward: f32,
    pub strafe: f32,
    /// Yaw/pitch change per tick, in degrees.
    pub turn: [f32; 2],
    /// Jump on every tick of the step (only lands when grounded).
    pub jump: bool,
    /// Fired once, on the step's first tick.
    pub action: Option<Action>,
}

impl Default for ScriptStep {
    fn default() -> Self {
        Self {
            ticks: 1,
            forward: 0.0,
            strafe: 0.0,
            turn: [0.0, 0.0],
            jump: false,
            action: None,
        }
    }
}

/// Walk toward the arena tower, hop, knock a block out of it and put one back.
fn default_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep {
            ticks: 30,
            ..ScriptStep::default()
        },
        // Face +X and walk toward the tower at (3, y, 3).
        ScriptStep {
            ticks: 1,
            turn: [90.0, 0.0],
            ..ScriptStep::default()
        },
        ScriptStep {
            ticks: 20,
            forward: 1.0,
            strafe: 1.0,
            ..ScriptStep::default()
        },
        ScriptStep {
            ticks: 40,
            jump: true,
            ..ScriptStep::default()
        },
        ScriptStep {
            ticks: 10,
            turn: [4.5, 0.0],
            ..ScriptStep::default()
        },
        ScriptStep {
            action: Some(Action::Break),
            ..ScriptStep::default()
        },
        ScriptStep {
            ticks: 5,
            ..ScriptStep::default()
        },
        ScriptStep {
            action: Some(Action::Place),
            ..ScriptStep::default()
        },
    ]
}
