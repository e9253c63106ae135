//! Caravela Tarification Server
//!
//! Backend service for travel-agency pricing: tarification computation,
//! season/rate resolution, payment schedules, and room demand, over an
//! external dossier backend API.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use caravela_api::handlers::{
    configure_invoice_config, configure_payment_terms, configure_rate_lookup,
    configure_room_demand, configure_tarification,
};
use caravela_client::DossierBackendClient;
use caravela_core::{traits::DossierBackend, AppConfig};
use caravela_services::{SessionStore, TarificationEngine};
use std::env;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "caravela",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Configure API routes
fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Health check
            .route("/health", web::get().to(health_check))
            // Tarification compute and save
            .configure(configure_tarification)
            // Payment terms validation, resolution, presets, save
            .configure(configure_payment_terms)
            // Room demand operations
            .configure(configure_room_demand)
            // Season/rate lookup
            .configure(configure_rate_lookup)
            // Tenant invoice configuration proxy
            .configure(configure_invoice_config),
    );
}

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "caravela={},caravela_api={},caravela_services={},caravela_client={},actix_web=info",
            log_level, log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    init_tracing();

    info!("Starting Caravela v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Dossier backend client (shared, trait-object so handlers stay testable)
    let backend = DossierBackendClient::new(&config.backend)
        .expect("Failed to create dossier backend client");
    let backend: Arc<dyn DossierBackend> = Arc::new(backend);
    let backend_data = web::Data::from(backend);

    info!(
        "Dossier backend configured at {} ({}ms timeout)",
        config.backend.base_url, config.backend.timeout_ms
    );

    // Pricing engine and compute sessions
    let engine = web::Data::new(TarificationEngine::new(&config.pricing));
    let sessions = web::Data::new(SessionStore::new());

    let bind_addr = config.server_addr();
    let workers = config.server.workers;
    let cors_origins = config.server.cors_origins.clone();

    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    HttpServer::new(move || {
        // Configure CORS - clone cors_origins for each worker
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origins: Vec<&str> = cors_origins_inner.split(',').collect();
                if let Ok(origin_str) = origin.to_str() {
                    origins.iter().any(|o| o.trim() == origin_str)
                } else {
                    false
                }
            })
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            // Shared state
            .app_data(backend_data.clone())
            .app_data(engine.clone())
            .app_data(sessions.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let error_message = err.to_string();
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(serde_json::json!({
                        "error": "invalid_body",
                        "message": error_message
                    })),
                )
                .into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                let error_message = err.to_string();
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(serde_json::json!({
                        "error": "invalid_query",
                        "message": error_message
                    })),
                )
                .into()
            }))
            // Middleware
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(middleware::Logger::new("%a \"%r\" %s %b %Dms"))
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            // Configure routes
            .configure(configure_routes)
            // Root redirect to health
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/api/v1/health"))
                        .finish()
                }),
            )
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
