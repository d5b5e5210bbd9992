//! LoanDesk Backend Server
//!
//! Serves loan application intake, reviewer decisions, portfolio statistics
//! and risk assessments over a JSON API.

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use loandesk_server::auth::TokenVerifier;
use loandesk_server::config::{Config, DEVELOPMENT_JWT_SECRET};
use loandesk_server::db;
use loandesk_server::loan_service::LoanService;
use loandesk_server::middleware::SubmissionThrottle;
use loandesk_server::routes::app_router;
use loandesk_server::state::AppState;
use loandesk_server::store::{InMemoryLoanStore, LoanApplicationStore, PgLoanStore};

/// Idle time after which a client's submission budget is forgotten
const THROTTLE_IDLE_TTL: Duration = Duration::from_secs(600);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!(environment = config.environment.as_str(), "Starting LoanDesk");

    if config.jwt_secret == DEVELOPMENT_JWT_SECRET {
        tracing::warn!("JWT_SECRET not set, using the development secret");
    }

    let store: Arc<dyn LoanApplicationStore> = match config.database_url {
        Some(_) => {
            let pool = db::create_pool(&config).await?;
            db::run_migrations(&pool).await?;
            Arc::new(PgLoanStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, applications are kept in memory only");
            Arc::new(InMemoryLoanStore::new())
        }
    };

    let loan_service = Arc::new(LoanService::new(store));
    let token_verifier = Arc::new(TokenVerifier::new(&config.jwt_secret));
    let submission_throttle = SubmissionThrottle::new(config.submission_rate_limit_per_minute);

    let pruned_throttle = submission_throttle.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(THROTTLE_IDLE_TTL);
        loop {
            interval.tick().await;
            pruned_throttle.prune(THROTTLE_IDLE_TTL).await;
        }
    });

    let app_state = AppState::new(loan_service, token_verifier, submission_throttle);

    let app = app_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(configure_cors(config.cors_allowed_origins.as_deref()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check at http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

fn configure_cors(allowed_origins: Option<&str>) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .unwrap_or_default()
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
