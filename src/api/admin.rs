use actix_web::{web, HttpResponse};

use crate::{models::Document, services::user_service, storage::JsonStore};

#[utoipa::path(
    get,
    path = "/fetch_all",
    tag = "Admin",
    responses(
        (status = 200, description = "The full stored document", body = Document),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn fetch_all(store: web::Data<JsonStore>) -> HttpResponse {
    log::info!("📋 GET /fetch_all");

    match user_service::fetch_all(&store).await {
        Ok(doc) => {
            log::info!("✅ Fetched document with {} users", doc.users.len());
            HttpResponse::Ok().json(doc)
        }
        Err(e) => {
            log::error!("❌ Error in fetch_all: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            }))
        }
    }
}
