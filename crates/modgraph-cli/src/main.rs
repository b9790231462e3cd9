//! modgraph entry point.
//!
//! ```bash
//! modgraph --whitelist resolver=default src/*.js
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use modgraph_cli::{Cli, EXIT_FATAL};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match execute(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("modgraph: {err:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn execute(cli: &Cli) -> anyhow::Result<u8> {
    let invocation_dir = std::env::current_dir()?;
    let runtime = tokio::runtime::Runtime::new()?;
    let mut stdout = std::io::stdout().lock();
    runtime.block_on(modgraph_cli::run(cli, &invocation_dir, &mut stdout))
}
