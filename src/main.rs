use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use sdn::cli::{self, Cli};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let code = cli::run(cli)?;
    Ok(ExitCode::from(code))
}

/// Diagnostics go to stderr. `RUST_LOG` overrides the default filter.
fn init_tracing(debug: bool) {
    let default = if debug { "sdn=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
