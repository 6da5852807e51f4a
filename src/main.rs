use anyhow::Context;
use pgprobe_app::Connector;
use pgprobe_kernel::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load pgprobe settings")?;

    pgprobe_telemetry::init(&settings.telemetry)?;

    tracing::debug!(database = ?settings.database, "settings loaded");
    tracing::info!(env = ?settings.environment, "pgprobe-app starting");

    let connector = Connector::from_settings(&settings.database);
    let mut stdout = std::io::stdout();

    // A failed probe has already been reported on stdout; the exit status
    // stays successful.
    if let Err(err) = connector.run(&mut stdout).await {
        tracing::debug!(error = %err, "probe failed");
    }

    Ok(())
}
