//! create-connectkit CLI entry point.
//!
//! Parses arguments, runs the scaffolding workflow, and turns failures into
//! the right kind of exit: classified errors get a friendly colored message
//! and a deliberate exit code (1 for user mistakes, the child's code for
//! external-process failures), while unexpected errors propagate with their
//! full context chain so tool bugs are distinguishable from usage mistakes.

use anyhow::Result;
use create_connectkit::cli::Cli;
use create_connectkit::core::user_friendly_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse_lenient(std::env::args_os());

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(err) => match user_friendly_error(err) {
            Ok(ctx) => {
                ctx.display();
                std::process::exit(ctx.exit_code());
            }
            // Unclassified: re-throw for the full diagnostic trace.
            Err(unexpected) => Err(unexpected),
        },
    }
}
