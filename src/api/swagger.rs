use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Transcript Service API",
        version = "0.1.0",
        description = "Minimal backend storing users, their conversation transcripts and feedback in a flat JSON document on disk.\n\n**Storage:** a single JSON file is the source of truth; every mutation rewrites it in full.\n\n**Features:**\n- User creation with generated IDs\n- Append-only conversation transcripts\n- Append-only feedback entries\n- Full document export for the admin page",
        contact(
            name = "Transcript Service Team"
        )
    ),
    paths(
        crate::api::health::index,
        crate::api::health::health_check,
        crate::api::users::save_name,
        crate::api::conversations::save_conversation,
        crate::api::feedback::save_feedback,
        crate::api::admin::fetch_all,
    ),
    components(
        schemas(
            crate::api::health::StatusResponse,
            crate::api::health::HealthResponse,
            crate::services::user_service::SaveNameRequest,
            crate::services::user_service::SaveNameResponse,
            crate::services::user_service::SaveConversationRequest,
            crate::services::user_service::SaveFeedbackRequest,
            crate::services::user_service::SaveResponse,
            crate::models::user::Document,
            crate::models::user::User,
        )
    ),
    tags(
        (name = "Health", description = "Liveness endpoints for monitoring service status."),
        (name = "Users", description = "User creation. Each user gets a random generated ID."),
        (name = "Conversations", description = "Append conversation transcripts to an existing user."),
        (name = "Feedback", description = "Append feedback entries to an existing user."),
        (name = "Admin", description = "Full data export consumed by the admin page."),
    )
)]
pub struct ApiDoc;
