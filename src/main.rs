use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fault_translator::{
    api::create_router,
    config::{Config, LogFormat},
    ApplicationBuilder,
};

/// Demo server answering every failure with a translated error envelope
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Address to listen on (overrides LISTEN_ADDR)
    #[arg(long)]
    listen_addr: Option<String>,

    /// Locale messages are resolved in (overrides DEFAULT_LOCALE)
    #[arg(long)]
    locale: Option<String>,

    /// TOML catalog merged over the bundled messages (overrides MESSAGES_PATH)
    #[arg(long)]
    messages: Option<PathBuf>,

    /// Log output format: pretty or json (overrides LOG_FORMAT)
    #[arg(long)]
    log_format: Option<String>,

    /// Log client faults at warn level (overrides LOG_CLIENT_ERRORS)
    #[arg(long)]
    log_client_errors: bool,
}

impl Args {
    fn apply(self, mut config: Config) -> Config {
        if let Some(listen_addr) = self.listen_addr {
            config.listen_addr = listen_addr;
        }
        if let Some(locale) = self.locale {
            config.default_locale = locale;
        }
        if let Some(messages) = self.messages {
            config.messages_path = Some(messages);
        }
        if let Some(log_format) = self.log_format {
            config.log_format = log_format;
        }
        config.log_client_errors |= self.log_client_errors;
        config
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Args::parse().apply(Config::from_env());
    config.validate()?;
    init_tracing(config.log_format()?);

    info!(
        listen_addr = %config.listen_addr,
        locale = %config.default_locale,
        "Starting fault translator demo"
    );

    let dispatcher = ApplicationBuilder::new(config.clone())
        .with_catalog()?
        .build()?;
    let app = create_router(dispatcher);

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    info!("Listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
