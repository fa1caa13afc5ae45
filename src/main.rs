use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wedlock::{
    config::Config,
    db::Database,
    payments::{PaymentProvider, StripeClient},
    seed, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = Database::new_with_pool_config(&config.database_url, config.db_max_connections, 2).await?;
    info!("Connected to database");

    info!("Running SQLx migrations...");
    db.migrate().await?;
    info!("SQLx migrations completed successfully");

    if let Err(e) = seed::seed_admin_user(&db, &config).await {
        warn!("Failed to seed admin user: {:#}", e);
    }

    let payments: Option<Arc<dyn PaymentProvider>> = match StripeClient::from_config(&config)? {
        Some(client) => {
            info!("Stripe payments enabled via {}", config.stripe_api_base);
            Some(Arc::new(client))
        }
        None => {
            warn!("STRIPE_SECRET_KEY not set; /create-payment-intent will answer 503");
            None
        }
    };

    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        payments,
    });

    let app = wedlock::app(state.clone());

    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    info!("Server starting on {}", config.server_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.db.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
