mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{collect, render, scan, CollectArgs, RenderArgs, ScanArgs};

/// Backstage CLI - inspect and render admin-editable pages
#[derive(Parser, Debug)]
#[command(name = "backstage")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the editable elements a page exposes, by role
    Scan(ScanArgs),

    /// Print the snapshot JSON a save on this page would write
    Collect(CollectArgs),

    /// Render a page with a stored snapshot applied
    Render(RenderArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Scan(args) => scan(args),
        Command::Collect(args) => collect(args),
        Command::Render(args) => render(args),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}
