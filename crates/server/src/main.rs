use std::future::IntoFuture;
use std::path::Path;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use sitedesk_server::api::{AppState, router};
use sitedesk_server::config::SiteConfig;

/// sitedesk HTTP server.
#[derive(Parser, Debug)]
#[command(
    name = "sitedesk-server",
    about = "Email relay and content publishing backend for a static site"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "sitedesk.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load and validate the configuration, print it with secrets redacted, then exit.
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let config_found = Path::new(&cli.config).exists();
    let mut config = if config_found {
        SiteConfig::from_toml(&std::fs::read_to_string(&cli.config)?)?
    } else {
        SiteConfig::from_toml("")?
    };
    config.apply_env(|key| std::env::var(key).ok())?;

    // CLI overrides take precedence over file and environment.
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    config.validate()?;

    if let Some(Commands::CheckConfig) = cli.command {
        println!("{config:#?}");
        println!(
            "configuration OK (email: {}, storage: {})",
            configured(config.email_configured()),
            configured(config.storage_configured())
        );
        return Ok(());
    }

    sitedesk_server::telemetry::init(&config.logging);

    if !config_found {
        info!(path = %cli.config, "config file not found, using defaults");
    }
    if !config.email_configured() {
        warn!("no email provider credential; /api/send-email will answer 500 until RESEND_API_KEY is set");
    }
    if !config.storage_configured() {
        warn!(
            "no GitHub credential; /api/save-post and /api/save-testimonial will answer 500 until GITHUB_TOKEN and GITHUB_REPO are set"
        );
    }

    let state = AppState::from_config(&config)?;
    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "sitedesk-server listening");

    // Serve with graceful shutdown on SIGINT / SIGTERM, bounded by the
    // configured timeout once the signal arrives.
    let (signalled_tx, mut signalled_rx) = tokio::sync::watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signalled_tx.send(true);
        })
        .into_future();

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
    let deadline = async move {
        if signalled_rx.wait_for(|signalled| *signalled).await.is_ok() {
            tokio::time::sleep(shutdown_timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => result?,
        () = deadline => {
            warn!(
                timeout_secs = config.server.shutdown_timeout_seconds,
                "shutdown timeout exceeded, dropping in-flight requests"
            );
        }
    }

    info!("sitedesk-server shut down");
    Ok(())
}

fn configured(yes: bool) -> &'static str {
    if yes { "configured" } else { "not configured" }
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
