//! Biblion Server - Library Catalog Web Application

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblion_server::{api, config::AppConfig, error, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("biblion_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Biblion Server v{}", env!("CARGO_PKG_VERSION"));

    // Error responses carry full detail outside production
    error::set_verbose_errors(!config.is_production());

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog = Router::new()
        // Landing page
        .route("/", get(api::home::index))
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authors
        .route("/authors", get(api::authors::list_authors))
        .route(
            "/authors/create",
            get(api::authors::create_author_form).post(api::authors::create_author),
        )
        .route("/authors/:id", get(api::authors::get_author))
        .route(
            "/authors/:id/update",
            get(api::authors::update_author_form).post(api::authors::update_author),
        )
        .route(
            "/authors/:id/delete",
            get(api::authors::delete_author_view).post(api::authors::delete_author),
        )
        // Books
        .route("/books", get(api::books::list_books))
        .route(
            "/books/create",
            get(api::books::create_book_form).post(api::books::create_book),
        )
        .route("/books/:id", get(api::books::get_book))
        .route(
            "/books/:id/update",
            get(api::books::update_book_form).post(api::books::update_book),
        )
        .route(
            "/books/:id/delete",
            get(api::books::delete_book_view).post(api::books::delete_book),
        )
        // Genres
        .route("/genres", get(api::genres::list_genres))
        .route(
            "/genres/create",
            get(api::genres::create_genre_form).post(api::genres::create_genre),
        )
        .route("/genres/:id", get(api::genres::get_genre))
        .route(
            "/genres/:id/update",
            get(api::genres::update_genre_form).post(api::genres::update_genre),
        )
        .route(
            "/genres/:id/delete",
            get(api::genres::delete_genre_view).post(api::genres::delete_genre),
        )
        // Book instances
        .route("/bookinstances", get(api::book_instances::list_instances))
        .route(
            "/bookinstances/create",
            get(api::book_instances::create_instance_form).post(api::book_instances::create_instance),
        )
        .route("/bookinstances/:id", get(api::book_instances::get_instance))
        .route(
            "/bookinstances/:id/update",
            get(api::book_instances::update_instance_form).post(api::book_instances::update_instance),
        )
        .route(
            "/bookinstances/:id/delete",
            get(api::book_instances::delete_instance_view).post(api::book_instances::delete_instance),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(catalog)
        .merge(openapi)
        // Unmatched paths forward to the generic not-found response
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
