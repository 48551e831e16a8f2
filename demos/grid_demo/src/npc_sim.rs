//! npc_sim: a handful of NPCs wandering a small grid in real time.
//!
//! Loads `npc_sim.toml` (or the file named by the first argument, or the
//! built-in defaults), spawns the realtime scheduler, and logs every
//! position update that comes out of the broadcast channel until the run
//! time is up.
//!
//! ```text
//! RUST_LOG=info cargo run --bin npc_sim -- demos/grid_demo/npc_sim.toml
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use gn_agent::RandomWalkableGoal;
use gn_core::{Cell, SchedulerConfig, SessionId};
use gn_grid::{AStarPathfinder, parse_grid_str};
use gn_net::ChannelBroadcaster;
use gn_sim::{NoopObserver, RealtimeScheduler, SchedulerBuilder};

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DemoConfig {
    scheduler:        SchedulerConfig,
    /// Digit rows, 1 = blocked.
    grid:             Vec<String>,
    agents:           Vec<Cell>,
    run_secs:         u64,
    session:          u32,
    channel_capacity: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            scheduler:        SchedulerConfig { initial_delay_ms: 500, ..SchedulerConfig::default() },
            grid:             ["11111", "10111", "10111", "10001", "10100"].map(String::from).to_vec(),
            agents:           vec![Cell::new(1, 1), Cell::new(3, 3)],
            run_secs:         5,
            session:          0,
            channel_capacity: 256,
        }
    }
}

impl DemoConfig {
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::load(Path::new(&path))?,
        None if Path::new("npc_sim.toml").exists() => DemoConfig::load(Path::new("npc_sim.toml"))?,
        None => {
            info!("using built-in configuration");
            DemoConfig::default()
        }
    };

    let grid = Arc::new(parse_grid_str(&config.grid.join("\n")).context("building grid")?);
    info!(width = grid.width(), height = grid.height(), walkable = grid.walkable_count(), "grid loaded");

    let (broadcaster, updates) = ChannelBroadcaster::bounded(config.channel_capacity);
    let goals = RandomWalkableGoal::from_config(&config.scheduler);
    let scheduler = SchedulerBuilder::new(config.scheduler.clone(), grid, AStarPathfinder::new(), goals, broadcaster)
        .session(SessionId(config.session))
        .build()?;

    let driver = RealtimeScheduler::spawn(scheduler, NoopObserver)?;
    for &spawn in &config.agents {
        match driver.register(spawn) {
            Ok(id) => info!(agent = %id, %spawn, "npc spawned"),
            Err(e) => warn!(%spawn, error = %e, "npc not spawned"),
        }
    }

    // ── Consume updates until the run time is up ──────────────────────────
    let deadline = Instant::now() + Duration::from_secs(config.run_secs);
    let mut received = 0u64;
    while let Ok(envelope) = updates.recv_deadline(deadline) {
        received += 1;
        let u = envelope.update;
        info!(agent = %u.agent, x = u.x, y = u.y, session = %envelope.session, "position update");
    }

    let (scheduler, _) = driver.shutdown()?;
    for agent in scheduler.agents() {
        info!(agent = %agent.id(), position = %agent.position(), state = ?agent.state(), "final state");
    }
    info!(received, dropped = scheduler.broadcaster().dropped(), "run complete");
    Ok(())
}
