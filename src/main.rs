mod api;
mod models;
mod services;
mod storage;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use storage::JsonStore;

// Local dev origins of the chat and admin pages.
const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://127.0.0.1:5500,http://localhost:5500,http://localhost:8000";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let data_file = env::var("DATA_FILE").unwrap_or_else(|_| "data.json".to_string());
    let allowed_origins: Vec<String> = env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string())
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect();

    log::info!("🚀 Starting Transcript Service...");
    log::info!("🗄️ Data file: {}", data_file);

    let store = JsonStore::new(data_file);
    let store_data = web::Data::new(store);

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/", web::get().to(api::health::index))
            .route("/health", web::get().to(api::health::health_check))
            // User data collection
            .route("/save_name", web::post().to(api::users::save_name))
            .route(
                "/save_conversation",
                web::post().to(api::conversations::save_conversation),
            )
            .route("/save_feedback", web::post().to(api::feedback::save_feedback))
            // Admin export
            .route("/fetch_all", web::get().to(api::admin::fetch_all))
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
