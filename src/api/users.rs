use actix_web::{web, HttpResponse};

use crate::{
    services::user_service::{self, SaveNameRequest, SaveNameResponse},
    storage::JsonStore,
    utils::error::AppError,
};

#[utoipa::path(
    post,
    path = "/save_name",
    tag = "Users",
    request_body = SaveNameRequest,
    responses(
        (status = 201, description = "User created", body = SaveNameResponse),
        (status = 400, description = "Name is missing or empty"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn save_name(
    store: web::Data<JsonStore>,
    request: web::Json<SaveNameRequest>,
) -> HttpResponse {
    log::info!("📝 POST /save_name");

    match user_service::create_user(&store, request.into_inner()).await {
        Ok(response) => {
            log::info!("✅ User created: {} ({})", response.name, response.user_id);
            HttpResponse::Created().json(response)
        }
        Err(AppError::InvalidRequest(msg)) => {
            log::warn!("⚠️ Rejected save_name: {}", msg);
            HttpResponse::BadRequest().json(serde_json::json!({ "error": msg }))
        }
        Err(e) => {
            log::error!("❌ Error in save_name: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            }))
        }
    }
}
