use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root object persisted to disk. `users` is kept in insertion order and is
/// always present, even when empty.
#[derive(Debug, Serialize, Deserialize, Clone, Default, utoipa::ToSchema)]
pub struct Document {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct User {
    pub user_id: String,  // PRIMARY IDENTIFIER - random UUID, not derived from name
    pub name: String,
    /// Opaque transcript payloads, append-only.
    #[schema(value_type = Vec<Object>)]
    pub conversations: Vec<Value>,
    /// Free-form feedback strings, append-only.
    pub feedback: Vec<String>,
}

impl User {
    pub fn new(user_id: String, name: String) -> Self {
        Self {
            user_id,
            name,
            conversations: Vec::new(),
            feedback: Vec::new(),
        }
    }
}
