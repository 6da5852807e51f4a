use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use pgprobe_app::Connector;
use pgprobe_kernel::{LogFormat, Settings};

/// Connect to PostgreSQL, print the server version banner, disconnect.
///
/// Connection values come from HOST, DB, USER and PASSWD (plus PGPROBE_*
/// settings); the flags below override them. The password is only read
/// from the environment.
#[derive(Debug, Parser)]
#[command(name = "pgprobe", version, about, long_about = None)]
struct Cli {
    /// Server host
    #[arg(long)]
    host: Option<String>,

    /// Server port
    #[arg(long)]
    port: Option<u16>,

    /// Database name
    #[arg(long)]
    dbname: Option<String>,

    /// Role to connect as
    #[arg(long)]
    user: Option<String>,

    /// Give up connecting after this many seconds
    #[arg(long, value_name = "SECS")]
    connect_timeout: Option<u64>,

    /// Diagnostic log format on stderr
    #[arg(long, value_enum)]
    log_format: Option<LogFormatArg>,

    /// Exit with status 1 when the probe fails
    #[arg(long)]
    fail_on_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        let database = &mut settings.database;
        if let Some(host) = &self.host {
            database.host = Some(host.clone());
        }
        if let Some(port) = self.port {
            database.port = Some(port);
        }
        if let Some(dbname) = &self.dbname {
            database.name = Some(dbname.clone());
        }
        if let Some(user) = &self.user {
            database.user = Some(user.clone());
        }
        if let Some(secs) = self.connect_timeout {
            database.connect_timeout_secs = Some(secs);
        }
        if let Some(format) = self.log_format {
            settings.telemetry.log_format = format.into();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load pgprobe settings")?;
    cli.apply(&mut settings);

    pgprobe_telemetry::init(&settings.telemetry)?;

    tracing::debug!(database = ?settings.database, "settings loaded");
    tracing::info!(
        env = ?settings.environment,
        fail_on_error = cli.fail_on_error,
        "pgprobe starting"
    );

    let connector = Connector::from_settings(&settings.database);
    let mut stdout = std::io::stdout();

    match connector.run(&mut stdout).await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err) if cli.fail_on_error => {
            tracing::debug!(error = %err, "probe failed");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            tracing::debug!(error = %err, "probe failed; exiting with success status");
            Ok(ExitCode::SUCCESS)
        }
    }
}
