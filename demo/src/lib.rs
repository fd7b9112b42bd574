//! Library side of the `tilenav` demo: configuration and the run loop.

pub mod config;

use std::io::{self, Write};

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tilenav_core::NavError;
use tilenav_paths::find_path;
use tilenav_rl::{MapGen, compute_visible, render_path, render_visible};

pub use config::DemoConfig;

/// Errors surfaced by the demo.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("cannot read config: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid seed {0:?}")]
    Seed(String),
    #[error(transparent)]
    Nav(#[from] NavError),
}

/// Generate the configured terrain, then print a path across it and the
/// field of view from the configured viewpoint.
pub fn run(cfg: &DemoConfig, out: &mut impl Write) -> Result<(), DemoError> {
    let seed = cfg.seed.unwrap_or_else(rand::random);
    info!("terrain seed {seed}");
    let terrain = MapGen::new(StdRng::seed_from_u64(seed)).terrain(&cfg.terrain)?;

    let start = terrain.tile(cfg.start)?;
    let goal = terrain.tile(cfg.goal)?;
    let path = find_path(&terrain, start, goal)?;
    if path.is_empty() {
        warn!("no path from {} to {}", cfg.start, cfg.goal);
        writeln!(out, "No path found!")?;
    } else {
        writeln!(
            out,
            "=== PATH {} -> {} (cost {}, {} tiles) ===",
            cfg.start,
            cfg.goal,
            path.cost(),
            path.len()
        )?;
        write!(out, "{}", render_path(&terrain, &path))?;
    }

    let visible = compute_visible(&terrain, cfg.viewpoint, cfg.view_radius)?;
    writeln!(
        out,
        "=== {} TILES VISIBLE FROM {} ===",
        visible.len(),
        cfg.viewpoint
    )?;
    write!(out, "{}", render_visible(&terrain, &visible))?;
    Ok(())
}
