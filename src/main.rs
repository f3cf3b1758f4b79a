use anyhow::Result;
use country_report::{
    config::{ReportConfig, DEFAULT_CONFIG_FILE},
    pipeline, sink,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,country_report=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    println!("Creating an interactive country report of COVID19 cases");

    // ─── 2) configuration ────────────────────────────────────────────
    let cfg = ReportConfig::load_or_default(DEFAULT_CONFIG_FILE)?;
    info!(country = %cfg.country, cutoff = %cfg.cutoff, "startup");

    // ─── 3) load → filter → transform → render → save ────────────────
    let outcome = pipeline::run(&cfg)?;
    info!(
        path = %outcome.path.display(),
        points = outcome.series.len(),
        "report written"
    );

    // ─── 4) display ──────────────────────────────────────────────────
    if cfg.open_viewer {
        sink::present(&outcome.path)?;
    }

    info!("all done");
    Ok(())
}
