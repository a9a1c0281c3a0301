/// Desktop viewer for the galaxy field
/// Usage: galaxy_viewer [config.toml]
use anyhow::Context;
use galaxy_field::{viewer, GalaxyConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GalaxyConfig::load(&path).with_context(|| format!("loading config from {}", path))?,
        None => GalaxyConfig::default(),
    };

    log::info!(
        "Starting galaxy viewer: {} particles, {} branches, {} fps cap",
        config.particle_count,
        config.branches,
        config.target_fps
    );
    viewer::run(config)
}
