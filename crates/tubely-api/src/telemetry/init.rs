use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "tubely=debug,tower_http=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Install the global tracing subscriber.
///
/// Console output is compact by default; `json` switches to one JSON object per line.
/// Calling this twice keeps the first subscriber.
pub fn init_telemetry(json: bool) {
    let result = if json {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        let console_fmt = tracing_subscriber::fmt::layer().event_format(
            Format::default()
                .compact()
                .with_target(false)
                .without_time(),
        );
        tracing_subscriber::registry()
            .with(env_filter())
            .with(console_fmt)
            .try_init()
    };

    match result {
        Ok(()) => tracing::info!(json, "Tracing initialized"),
        Err(e) => tracing::debug!(error = %e, "Tracing subscriber already installed"),
    }
}
