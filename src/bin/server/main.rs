#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Transactional email service for the storefront

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use storefront_mailer::{
    domain::orders::notifications::{EmailMetrics, TransactionalEmailService},
    infrastructure::{
        email::{EmailConfig, ProviderMailer},
        http::{state::AppState, HttpServer, HttpServerConfig},
    },
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The email delivery configuration
    #[clap(flatten)]
    pub email: EmailConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load environment: {}", e);

            return Err(e.into());
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let settings = args.email.delivery_settings();

    if settings.provider_configured {
        info!(provider = ?args.email.provider, sender = %settings.sender, "email delivery enabled");
    } else {
        warn!(provider = ?args.email.provider, "email provider credentials missing, sends will be skipped");
    }

    let metrics = Arc::new(EmailMetrics::new()?);
    let mailer = Arc::new(ProviderMailer::from_config(&args.email)?);
    let emails = TransactionalEmailService::new(mailer, metrics.clone(), settings);

    let state = AppState::new(emails, metrics);

    HttpServer::new(state, &args.server).await?.run().await
}
