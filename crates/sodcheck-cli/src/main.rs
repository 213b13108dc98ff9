#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::error::ErrorKind as UsageErrorKind;
use clap::Parser;
use sodcheck_core::{Config, Error, ErrorKind};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Fail when a pull request was approved by one of its own committers.
///
/// Reads GITHUB_REPOSITORY (owner/repo), PR_NUMBER and GITHUB_TOKEN from the
/// environment. GITHUB_API_URL overrides the API endpoint, RUST_LOG the log filter.
#[derive(Parser)]
#[command(name = "sodcheck", version)]
struct Cli {}

fn main() {
    if let Err(e) = Cli::try_parse() {
        let _ = e.print();
        std::process::exit(usage_exit_code(e.kind()));
    }

    let subscriber = build_subscriber();
    let code = tracing::subscriber::with_default(subscriber, run);
    std::process::exit(code);
}

/// Log lines go to stderr as `timestamp LEVEL message`, `info` unless RUST_LOG says otherwise
fn build_subscriber() -> impl tracing::Subscriber + Send + Sync {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .finish()
}

fn run() -> i32 {
    // Validate before touching the network
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => return report(&e),
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build();
    let rt = match rt {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to create runtime: {e}");
            return 1;
        }
    };

    match rt.block_on(sodcheck_core::check_pull_request(&config)) {
        Ok(()) => 0,
        Err(e) => report(&e),
    }
}

/// Log the failure as a single line and pick the exit code
fn report(err: &Error) -> i32 {
    match err.kind() {
        ErrorKind::Transient => tracing::error!("Unexpected error: {err}"),
        ErrorKind::Configuration | ErrorKind::PolicyViolation => tracing::error!("{err}"),
    }
    exit_code(err.kind())
}

/// `--help`/`--version` succeed; bad arguments fail like any other error
fn usage_exit_code(kind: UsageErrorKind) -> i32 {
    match kind {
        UsageErrorKind::DisplayHelp | UsageErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Configuration | ErrorKind::PolicyViolation | ErrorKind::Transient => 1,
    }
}
