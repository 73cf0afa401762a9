pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "graftfs")]
#[command(about = "Composable filesystem namespaces served over HTTP")]
pub struct Args {
    /// Base URL of the daemon API (defaults to the configured port)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the graftfs config directory (defaults to ~/.graftfs)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
