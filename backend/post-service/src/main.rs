use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;

use post_service::config::Config;
use post_service::handlers;
use post_service::metrics;
use post_service::middleware::RequireAuth;

async fn health(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "post-service",
            "version": env!("CARGO_PKG_VERSION"),
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "post-service",
        })),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting post-service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Configuration loaded: env={}, port={}",
        config.app.env, config.app.port
    );

    // Install the token validation key before serving any request
    auth_token::initialize_validation_key(&config.auth.jwt_public_key_pem)
        .context("Failed to install JWT validation key")?;
    info!("JWT validation key installed");

    // Initialize database pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    // Verify database connection
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("Failed to verify database connection")?;
    info!("Database pool created and verified");

    // Run database migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations completed");

    let addr = format!("{}:{}", config.app.host, config.app.port);
    info!("HTTP server listening on http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(pool.clone()))
            .route("/health", web::get().to(health))
            .route("/ready", web::get().to(|| async { "READY" }))
            .route("/metrics", web::get().to(metrics::serve_metrics))
            .service(
                web::scope("/api/posts")
                    .wrap(RequireAuth)
                    .route("", web::post().to(handlers::create_post))
                    .route("", web::get().to(handlers::list_posts))
                    .route("/topic", web::post().to(handlers::search_by_topics))
                    .route("/topic/{topic}", web::get().to(handlers::get_by_topic))
                    .route("/active/all", web::get().to(handlers::list_active))
                    .route(
                        "/active/{topic}",
                        web::get().to(handlers::list_active_by_topic),
                    )
                    .route("/expired/all", web::get().to(handlers::list_expired))
                    .route(
                        "/expired/{topic}",
                        web::get().to(handlers::list_expired_by_topic),
                    )
                    .route(
                        "/highest-interest",
                        web::post().to(handlers::highest_interest),
                    )
                    .route("/{post_id}", web::get().to(handlers::get_post))
                    .route("/{post_id}/like", web::post().to(handlers::like_post))
                    .route("/{post_id}/dislike", web::post().to(handlers::dislike_post))
                    .route("/{post_id}/comment", web::post().to(handlers::comment_post))
                    .route(
                        "/{post_id}/comments",
                        web::get().to(handlers::list_post_comments),
                    ),
            )
    })
    .bind(&addr)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")?;

    info!("post-service shutting down");
    Ok(())
}
