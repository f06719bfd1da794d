use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use blockyard_sandbox::config::SandboxConfig;
use blockyard_sandbox::session::{self, Session, TickInput};
use glam::Vec3;

/// Ticks between progress reports.
const REPORT_EVERY: u64 = 60;

/// Rays in the `--probe` fan and their total spread in degrees.
const PROBE_RAYS: usize = 9;
const PROBE_SPREAD: f32 = 80.0;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config_path: Option<PathBuf> = std::env::args()
        .skip_while(|a| a != "--config")
        .nth(1)
        .map(PathBuf::from);
    let ticks_override: Option<u64> = std::env::args()
        .skip_while(|a| a != "--ticks")
        .nth(1)
        .and_then(|s| s.parse().ok());
    let realtime = std::env::args().any(|a| a == "--realtime");
    let probe = std::env::args().any(|a| a == "--probe");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = match &config_path {
        Some(path) => SandboxConfig::load(path)?,
        None => SandboxConfig::default(),
    };
    if let Some(ticks) = ticks_override {
        config.ticks = ticks;
    }

    tracing::info!("Blockyard sandbox -- {} ticks at {} Hz", config.ticks, config.tick_rate);

    let mut session = Session::from_config(&config).context("seeding arena")?;
    tracing::info!(
        "Arena ready: {} blocks in {} columns",
        session.world().len(),
        session.world().column_count()
    );

    let dt = config.dt();
    let spawn = Vec3::from_array(config.spawn);
    let mut inputs =
        session::script_inputs(&config.script).chain(std::iter::repeat(TickInput::default()));
    let started = Instant::now();

    if realtime {
        let mut interval = tokio::time::interval(Duration::from_secs_f32(dt));
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        for _ in 0..config.ticks {
            tokio::select! {
                _ = interval.tick() => {}
                _ = &mut shutdown => {
                    tracing::info!("Ctrl+C received, stopping...");
                    break;
                }
            }
            let input = inputs.next().unwrap_or_default();
            step(&mut session, &input, dt, &config, spawn, probe)?;
        }
    } else {
        for _ in 0..config.ticks {
            let input = inputs.next().unwrap_or_default();
            step(&mut session, &input, dt, &config, spawn, probe)?;
        }
    }

    let stats = session.stats();
    tracing::info!(
        "Done in {:?}: {} ticks ({} grounded), {} placed, {} removed, {} refused",
        started.elapsed(),
        stats.ticks,
        stats.grounded_ticks,
        stats.placed,
        stats.removed,
        stats.refused
    );
    tracing::info!("Final feet position {:?}", session.body().position());
    Ok(())
}

fn step(
    session: &mut Session,
    input: &TickInput,
    dt: f32,
    config: &SandboxConfig,
    spawn: Vec3,
    probe: bool,
) -> Result<()> {
    session.tick(input, dt)?;

    // Falling out of the world is the driver's problem, not the body's.
    if session.body().position().y < config.world.floor_y as f32 {
        tracing::warn!("Body fell below y = {}, respawning", config.world.floor_y);
        session.respawn(spawn);
    }

    let tick = session.stats().ticks;
    if tick % REPORT_EVERY != 0 {
        return Ok(());
    }

    let body = session.body();
    tracing::info!(
        "tick {}: feet {:?} grounded={} target {:?}",
        tick,
        body.position(),
        body.is_grounded(),
        session.target().map(|hit| hit.pos)
    );

    if probe {
        for (yaw, hit) in session.probe(PROBE_RAYS, PROBE_SPREAD)? {
            match hit {
                Some(hit) => tracing::info!(
                    "  probe yaw {:>7.1}: {} at {:.2} via {:?}",
                    yaw,
                    hit.pos,
                    hit.distance,
                    hit.face
                ),
                None => tracing::info!("  probe yaw {:>7.1}: clear", yaw),
            }
        }
    }
    Ok(())
}
