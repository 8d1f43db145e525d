mod app_state;
mod cli;

use std::path::{Path, PathBuf};

use hostview_common::HostviewError;
use hostview_config::HostviewConfig;
use hostview_embed::launcher::candidate_list;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("Hostview panicked: {info}");
        default_hook(info);
    }));
}

fn init_logging(directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(directive.parse().unwrap_or_else(|_| LevelFilter::INFO.into())),
        )
        .init();
}

/// Explicit renderer path first, then configured candidates, then the
/// built-in search list.
fn renderer_candidates(args: &cli::Args, config: &HostviewConfig, cwd: &Path) -> Vec<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| cwd.to_path_buf());

    let explicit = args
        .renderer
        .iter()
        .chain(config.renderer.candidates.iter())
        .map(PathBuf::from);

    candidate_list(explicit, &exe_dir, cwd, &config.renderer.executable_name)
}

/// Explicit `--config` path first, then the per-user file.
fn load_settings(args: &cli::Args) -> hostview_common::Result<HostviewConfig> {
    let config = match args.config {
        Some(ref path) => hostview_config::load_config_from(Path::new(path))?,
        None => hostview_config::load_config()?,
    };
    Ok(config)
}

fn run(args: cli::Args) -> hostview_common::Result<()> {
    if let Some(ref dir) = args.directory {
        if let Err(e) = std::env::set_current_dir(dir) {
            eprintln!("Failed to change directory to {dir}: {e}");
        }
    }

    let loaded = load_settings(&args);
    let config = loaded.as_ref().cloned().unwrap_or_default();

    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_logging(&directive);

    tracing::info!("Hostview v{} starting...", env!("CARGO_PKG_VERSION"));
    match (&loaded, &args.config) {
        (Ok(_), Some(path)) => tracing::info!("Using config override: {path}"),
        (Ok(_), None) => tracing::info!("Config loaded"),
        (Err(e), _) => tracing::warn!("Config load failed, using defaults: {e}"),
    }

    let cwd = std::env::current_dir()?;
    let candidates = renderer_candidates(&args, &config, &cwd);
    tracing::debug!(count = candidates.len(), "Renderer candidates prepared");

    let event_loop = EventLoop::new()
        .map_err(|e| HostviewError::Other(format!("failed to create event loop: {e}")))?;
    let api = hostview_platform::create_window_api();
    let mut app = app_state::HostviewApp::new(config, api, candidates, cwd);

    tracing::info!("Entering event loop");
    event_loop
        .run_app(&mut app)
        .map_err(|e| HostviewError::Other(format!("event loop error: {e}")))?;
    tracing::info!("Shutdown complete");
    Ok(())
}

fn main() {
    install_panic_hook();

    if let Err(e) = run(cli::parse()) {
        tracing::error!("{e}");
        eprintln!("hostview: {e}");
        std::process::exit(1);
    }
}
