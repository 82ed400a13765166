use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use tracing::info;

use story_service::config::Config;
use story_service::handlers;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("🔧 Starting story-service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "✅ Configuration loaded: env={}, http_port={}",
        config.app.env, config.app.http_port
    );

    // Initialize database pool
    let db_config = db_pool::DbConfig::from_env("story-service")
        .map_err(|e| anyhow::anyhow!("Failed to load database configuration: {}", e))?;
    db_config.log_config();

    let pool = db_pool::create_pool(db_config)
        .await
        .context("Failed to connect to database")?;

    // Run database migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    info!("✅ Database migrations completed");

    let http_addr = format!("{}:{}", config.app.host, config.app.http_port);
    info!("🚀 HTTP server listening on http://{}", http_addr);

    let server_pool = pool.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(server_pool.clone()))
            .route("/health", web::get().to(|| async { "OK" }))
            .route("/ready", web::get().to(|| async { "READY" }))
            .configure(handlers::configure)
    })
    .bind(&http_addr)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")?;

    info!("🛑 story-service shutting down");
    Ok(())
}
