use actix_web::{web, HttpResponse};

use crate::{
    services::user_service::{self, SaveFeedbackRequest, SaveResponse},
    storage::JsonStore,
    utils::error::AppError,
};

#[utoipa::path(
    post,
    path = "/save_feedback",
    tag = "Feedback",
    request_body = SaveFeedbackRequest,
    responses(
        (status = 201, description = "Feedback appended", body = SaveResponse),
        (status = 400, description = "User ID or feedback text is missing"),
        (status = 404, description = "User ID not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn save_feedback(
    store: web::Data<JsonStore>,
    request: web::Json<SaveFeedbackRequest>,
) -> HttpResponse {
    log::info!("📣 POST /save_feedback");

    match user_service::append_feedback(&store, request.into_inner()).await {
        Ok(response) => {
            log::info!("✅ Feedback saved for user {}", response.user_id);
            HttpResponse::Created().json(response)
        }
        Err(AppError::InvalidRequest(msg)) => {
            log::warn!("⚠️ Rejected save_feedback: {}", msg);
            HttpResponse::BadRequest().json(serde_json::json!({ "error": msg }))
        }
        Err(AppError::NotFound(msg)) => {
            log::warn!("⚠️ save_feedback for unknown user");
            HttpResponse::NotFound().json(serde_json::json!({ "error": msg }))
        }
        Err(e) => {
            log::error!("❌ Error in save_feedback: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            }))
        }
    }
}
