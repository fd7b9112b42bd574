//! Pathfinding and field-of-view demo.
//!
//! Run: cargo run --bin tilenav -- [config.json]
//!
//! Set `RUST_LOG=debug` to see search details and `TILENAV_SEED` to
//! reproduce a terrain.

use tracing_subscriber::EnvFilter;

use tilenav_demo::{DemoConfig, run};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let result = DemoConfig::load(std::env::args_os().nth(1).as_deref())
        .and_then(|cfg| run(&cfg, &mut std::io::stdout().lock()));

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
