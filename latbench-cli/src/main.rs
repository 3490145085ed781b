use anyhow::Result;
use latbench_cli::LatbenchRuntime;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("latbench=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let runtime = LatbenchRuntime::new().with_args();
    if let Some(addr) = runtime.cli().prometheus {
        PrometheusBuilder::new().with_http_listener(addr).install()?;
        info!("Serving metrics on {addr}");
    }

    let summary = runtime.run().await?;
    if !summary.all_completed() {
        anyhow::bail!(
            "{} of {} scenarios failed",
            summary.failed,
            summary.total()
        );
    }
    Ok(())
}
