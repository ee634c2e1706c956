use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_DIRECTIVES: &str = "byma_alert_check=info,hyper=warn,hyper_util=warn,rustls=warn";

/// Install the global subscriber: `RUST_LOG` if set, else [`DEFAULT_DIRECTIVES`].
///
/// Lines go to stdout with timestamp, level and target, which is what the
/// cron host captures. Calling this twice keeps the first subscriber.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let registry = tracing_subscriber::registry().with(env_filter);
    let layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true);

    let _ = registry.with(layer).try_init();
}
