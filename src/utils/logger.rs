use tracing_subscriber::fmt::layer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// RUST_LOG always wins; the directives here are only the fallback.
fn filter_or(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// Human-oriented terminal output. Quiet runs show the crate at info and
/// silence dependency chatter below warn; `--verbose` opens the crate up to
/// trace and lets dependencies speak at info.
pub fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        filter_or("score_sync=trace,info")
    } else {
        filter_or("score_sync=info,warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer().with_target(false).compact())
        .init();
}

/// JSON output for scheduled (cron/systemd-timer) invocations, where the
/// run's logs end up in a collector rather than a terminal. Targets are kept
/// so collector queries can filter by module.
pub fn init_job_logger() {
    tracing_subscriber::registry()
        .with(filter_or("score_sync=info"))
        .with(layer().json())
        .init();
}
