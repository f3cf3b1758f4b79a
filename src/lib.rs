pub mod chart;
pub mod config;
pub mod pipeline;
pub mod series;
pub mod sink;
pub mod table;
pub mod transform;

pub use config::ReportConfig;
pub use pipeline::{run, ReportOutcome};

/// Shared tracing setup for unit tests.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,country_report=debug")),
        )
        .with_test_writer()
        .finish();
    // ignore the error when another test already installed it
    let _ = tracing::subscriber::set_global_default(subscriber);
}
