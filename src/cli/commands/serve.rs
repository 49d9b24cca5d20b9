use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::app::app;
use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, Repository};
use crate::services::Service;
use crate::state::AppState;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    // Refuse to start without signing material
    let tokens = TokenService::new(&config.security.jwt_secret, config.security.token_ttl_hours)?;

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    if config.database.run_migrations {
        DatabaseManager::migrate(&pool)
            .await
            .context("failed to apply migrations")?;
    }

    let repo = Repository::postgres(pool.clone());
    let services = Service::new(&repo, tokens, config.security.password_salt.clone());
    let router = app(AppState::new(services, Some(pool.clone())), &config);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("filmhub listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut signal) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            signal.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
