mod session;

use std::io::{self, BufRead};
use std::path::PathBuf;

use dreamer_engine::{Dreamer, EngineConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use session::Session;

const DEFAULT_CONFIG: &str = "dreamer.toml";

fn load_config() -> EngineConfig {
    let path = std::env::var_os("DREAMER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    if !path.exists() {
        return EngineConfig::default();
    }
    match EngineConfig::load(&path) {
        Ok(config) => {
            info!(path = %path.display(), "loaded engine config");
            config
        }
        Err(e) => {
            warn!("{e}; using defaults");
            EngineConfig::default()
        }
    }
}

fn main() -> io::Result<()> {
    // stdout belongs to the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let mut session = Session::new(Dreamer::with_config(load_config()));
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if !session.handle(line.trim(), &mut stdout)? {
            break;
        }
    }
    Ok(())
}
