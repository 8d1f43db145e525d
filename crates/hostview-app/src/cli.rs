use clap::Parser;

/// Hostview: editor shell that embeds an external renderer window.
#[derive(Parser, Debug)]
#[command(name = "hostview", version, about)]
pub struct Args {
    /// Working directory to start in.
    #[arg(short = 'd', long)]
    pub directory: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Renderer executable, tried before the configured candidates.
    #[arg(long)]
    pub renderer: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
