//! hubops - decrypt cluster secrets and deploy support and hub layers.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hubops::cli::output;
use hubops::cli::{execute, Cli, LogFormat};
use hubops::core::constants;
use hubops::error::{Error, LayoutError, SecretError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.global.verbose {
            EnvFilter::new("hubops=debug")
        } else {
            EnvFilter::new("hubops=warn")
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    match cli.global.log_format {
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Layout(LayoutError::MissingCredentials(_)) => Some("run: hubops decrypt"),
            Error::Layout(LayoutError::MissingDirectory(_)) => {
                Some("check --root, --cluster and --hub")
            }
            Error::Secret(SecretError::DegenerateMarker(_)) => {
                Some("encrypted files must contain '.enc.' in their name")
            }
            Error::Secret(SecretError::RepeatedMarker(_) | SecretError::NonUtf8Name(_)) => {
                Some("rename the file so its name is UTF-8 with a single '.enc.'")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(e.exit_code());
    }
}
