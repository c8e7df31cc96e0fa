use actix_web::{web, HttpResponse};

use crate::{
    services::user_service::{self, SaveConversationRequest, SaveResponse},
    storage::JsonStore,
    utils::error::AppError,
};

#[utoipa::path(
    post,
    path = "/save_conversation",
    tag = "Conversations",
    request_body = SaveConversationRequest,
    responses(
        (status = 201, description = "Conversation appended", body = SaveResponse),
        (status = 400, description = "User ID or conversation is missing"),
        (status = 404, description = "User ID not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn save_conversation(
    store: web::Data<JsonStore>,
    request: web::Json<SaveConversationRequest>,
) -> HttpResponse {
    log::info!("💬 POST /save_conversation");

    match user_service::append_conversation(&store, request.into_inner()).await {
        Ok(response) => {
            log::info!("✅ Conversation saved for user {}", response.user_id);
            HttpResponse::Created().json(response)
        }
        Err(AppError::InvalidRequest(msg)) => {
            log::warn!("⚠️ Rejected save_conversation: {}", msg);
            HttpResponse::BadRequest().json(serde_json::json!({ "error": msg }))
        }
        Err(AppError::NotFound(msg)) => {
            log::warn!("⚠️ save_conversation for unknown user");
            HttpResponse::NotFound().json(serde_json::json!({ "error": msg }))
        }
        Err(e) => {
            log::error!("❌ Error in save_conversation: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            }))
        }
    }
}
