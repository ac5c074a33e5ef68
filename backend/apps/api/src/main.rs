//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but request-level
//! errors should use `forms::FormError` / `kernel::error::AppError`.

use anyhow::Context;
use axum::{
    Router, http,
    http::{Method, header},
};
use forms::infra::build_http_client;
use forms::{
    Environment, FormKind, FormsAppState, FormsConfig, HttpFormRelay, RecaptchaVerifier,
    forms_router,
};
use platform::clock::SystemClock;
use platform::store::MemoryRateLimitStore;
use platform::sweeper::spawn_sweeper;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,forms=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let forms_config = load_forms_config(|key| env::var(key).ok())?;

    tracing::info!(
        environment = %forms_config.environment,
        captcha_configured = forms_config.recaptcha_secret.is_some(),
        contact_relay = forms_config.contact.relay_url.is_some(),
        newsletter_relay = forms_config.newsletter.relay_url.is_some(),
        wholesale_relay = forms_config.wholesale.relay_url.is_some(),
        trusted_proxies = forms_config.trusted_proxies.len(),
        "Forms configuration loaded"
    );

    // Outbound adapters share one client and its timeout
    let http_client = build_http_client(forms_config.outbound_timeout)?;
    let verifier = RecaptchaVerifier::from_config(http_client.clone(), &forms_config);
    let relay = HttpFormRelay::from_config(http_client, &forms_config);

    let sweep_interval = forms_config.sweep_interval;
    let state = FormsAppState::new(
        forms_config,
        verifier,
        relay,
        Arc::new(SystemClock::new()),
        MemoryRateLimitStore::new,
    );

    let sweeper = spawn_sweeper(state.limiters.all(), sweep_interval);

    // CORS configuration
    let frontend_origins =
        env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([Method::POST, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]));

    // Build router
    let app = Router::new()
        .nest("/api", forms_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .context("BIND_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    sweeper.shutdown().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Build the forms configuration from environment lookups.
///
/// `APP_ENV` defaults to development in debug builds and production otherwise.
fn load_forms_config(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<FormsConfig> {
    let non_empty = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let environment = match non_empty("APP_ENV") {
        Some(raw) => raw.parse::<Environment>()?,
        None if cfg!(debug_assertions) => Environment::Development,
        None => Environment::Production,
    };

    let mut config = FormsConfig {
        environment,
        ..FormsConfig::default()
    };

    config.recaptcha_secret = non_empty("RECAPTCHA_SECRET_KEY");
    if let Some(url) = non_empty("RECAPTCHA_VERIFY_URL") {
        config.recaptcha_verify_url = url;
    }

    for (form, key) in [
        (FormKind::Contact, "CONTACT_RELAY_URL"),
        (FormKind::Newsletter, "NEWSLETTER_RELAY_URL"),
        (FormKind::Wholesale, "WHOLESALE_RELAY_URL"),
    ] {
        config.policy_mut(form).relay_url = non_empty(key);
    }

    if let Some(raw) = non_empty("OUTBOUND_TIMEOUT_SECS") {
        let secs: u64 = raw
            .parse()
            .with_context(|| format!("OUTBOUND_TIMEOUT_SECS must be whole seconds, got {raw:?}"))?;
        anyhow::ensure!(secs > 0, "OUTBOUND_TIMEOUT_SECS must be at least 1");
        config.outbound_timeout = Duration::from_secs(secs);
    }

    if let Some(raw) = non_empty("TRUSTED_PROXIES") {
        config.trusted_proxies = raw
            .parse()
            .with_context(|| format!("TRUSTED_PROXIES must be comma-separated IPs, got {raw:?}"))?;
    }

    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
