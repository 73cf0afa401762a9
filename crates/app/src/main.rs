// CLI modules
mod cli;

use clap::{Parser, Subcommand};
use cli::{
    args::Args, op::Op, Cat, Df, Health, Link, Ls, Mkdir, Mv, Rm, Rmdir, Serve, Stat, Touch,
    Truncate, Version, Write,
};

command_enum! {
    (Cat, Cat),
    (Df, Df),
    (Health, Health),
    (Link, Link),
    (Ls, Ls),
    (Mkdir, Mkdir),
    (Mv, Mv),
    (Rm, Rm),
    (Rmdir, Rmdir),
    (Serve, Serve),
    (Stat, Stat),
    (Touch, Touch),
    (Truncate, Truncate),
    (Version, Version),
    (Write, Write),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Resolve remote URL: explicit flag > config api_port > hardcoded 8080
    let remote = cli::op::resolve_remote(args.remote, args.config_path.clone());

    // Build context - always has API client initialized
    let ctx = match cli::op::OpContext::new(remote, args.config_path) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: Failed to create API client: {}", e);
            std::process::exit(1);
        }
    };

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
