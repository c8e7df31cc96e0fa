use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::{Document, User};
use crate::storage::JsonStore;
use crate::utils::error::AppError;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SaveNameRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SaveNameResponse {
    pub user_id: String,
    pub name: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SaveConversationRequest {
    pub user_id: Option<String>,
    /// Opaque payload, stored verbatim.
    #[schema(value_type = Option<Object>)]
    pub conversation: Option<Value>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SaveFeedbackRequest {
    pub user_id: Option<String>,
    pub feedback_text: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SaveResponse {
    pub success: bool,
    pub user_id: String,
}

// Empty containers, empty strings, zero, false and null all count as absent.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn persist_or_log(store: &JsonStore, doc: &Document) {
    // Write failures are swallowed: the caller already got its answer and
    // the file keeps its previous contents.
    if let Err(e) = store.persist(doc) {
        log::error!("Error writing {}: {}", store.path().display(), e);
    }
}

pub async fn create_user(
    store: &JsonStore,
    request: SaveNameRequest,
) -> Result<SaveNameResponse, AppError> {
    let name = match request.name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(AppError::InvalidRequest("Name is required".to_string())),
    };

    let user_id = Uuid::new_v4().to_string();

    let _guard = store.lock_writes().await;
    let mut doc = store.load();
    doc.users.push(User::new(user_id.clone(), name.clone()));
    persist_or_log(store, &doc);

    log::debug!("Saved user: {}, ID: {}", name, user_id);
    Ok(SaveNameResponse { user_id, name })
}

pub async fn append_conversation(
    store: &JsonStore,
    request: SaveConversationRequest,
) -> Result<SaveResponse, AppError> {
    let user_id = match request.user_id {
        Some(id) if !id.is_empty() => id,
        _ => {
            return Err(AppError::InvalidRequest(
                "User ID and conversation are required".to_string(),
            ))
        }
    };
    let conversation = match request.conversation {
        Some(payload) if !is_falsy(&payload) => payload,
        _ => {
            return Err(AppError::InvalidRequest(
                "User ID and conversation are required".to_string(),
            ))
        }
    };

    let _guard = store.lock_writes().await;
    let mut doc = store.load();
    // First match wins; duplicate IDs are not expected.
    let user = match doc.users.iter_mut().find(|u| u.user_id == user_id) {
        Some(user) => user,
        None => return Err(AppError::NotFound("User ID not found".to_string())),
    };
    user.conversations.push(conversation);
    persist_or_log(store, &doc);

    log::debug!("Saved conversation for user ID: {}", user_id);
    Ok(SaveResponse {
        success: true,
        user_id,
    })
}

pub async fn append_feedback(
    store: &JsonStore,
    request: SaveFeedbackRequest,
) -> Result<SaveResponse, AppError> {
    let user_id = match request.user_id {
        Some(id) if !id.is_empty() => id,
        _ => {
            return Err(AppError::InvalidRequest(
                "User ID and feedback text are required".to_string(),
            ))
        }
    };
    let feedback_text = match request.feedback_text {
        Some(text) if !text.is_empty() => text,
        _ => {
            return Err(AppError::InvalidRequest(
                "User ID and feedback text are required".to_string(),
            ))
        }
    };

    let _guard = store.lock_writes().await;
    let mut doc = store.load();
    let user = match doc.users.iter_mut().find(|u| u.user_id == user_id) {
        Some(user) => user,
        None => return Err(AppError::NotFound("User ID not found".to_string())),
    };
    user.feedback.push(feedback_text);
    persist_or_log(store, &doc);

    log::debug!("Saved feedback for user ID: {}", user_id);
    Ok(SaveResponse {
        success: true,
        user_id,
    })
}

pub async fn fetch_all(store: &JsonStore) -> Result<Document, AppError> {
    Ok(store.load())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonStore {
        JsonStore::new(dir.path().join("data.json"))
    }

    async fn named_user(store: &JsonStore, name: &str) -> String {
        create_user(
            store,
            SaveNameRequest {
                name: Some(name.to_string()),
            },
        )
        .await
        .unwrap()
        .user_id
    }

    #[tokio::test]
    async fn create_then_fetch_returns_the_user() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let created = create_user(
            &store,
            SaveNameRequest {
                name: Some("Alice".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(created.name, "Alice");

        let doc = fetch_all(&store).await.unwrap();
        assert_eq!(doc.users.len(), 1);
        assert_eq!(doc.users[0].user_id, created.user_id);
        assert_eq!(doc.users[0].name, "Alice");
        assert!(doc.users[0].conversations.is_empty());
        assert!(doc.users[0].feedback.is_empty());
    }

    #[tokio::test]
    async fn missing_or_empty_name_is_rejected_without_writing() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let err = create_user(&store, SaveNameRequest { name: None })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));

        let err = create_user(
            &store,
            SaveNameRequest {
                name: Some(String::new()),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));

        assert!(!dir.path().join("data.json").exists());
    }

    #[tokio::test]
    async fn feedback_accumulates_in_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let user_id = named_user(&store, "Alice").await;

        for text in ["good", "great"] {
            append_feedback(
                &store,
                SaveFeedbackRequest {
                    user_id: Some(user_id.clone()),
                    feedback_text: Some(text.to_string()),
                },
            )
            .await
            .unwrap();
        }

        let doc = fetch_all(&store).await.unwrap();
        assert_eq!(
            doc.users[0].feedback,
            vec!["good".to_string(), "great".to_string()]
        );
    }

    #[tokio::test]
    async fn unknown_user_is_not_found_and_leaves_document_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        named_user(&store, "Alice").await;
        let before = serde_json::to_value(fetch_all(&store).await.unwrap()).unwrap();

        let err = append_conversation(
            &store,
            SaveConversationRequest {
                user_id: Some("missing".to_string()),
                conversation: Some(json!({"q": "hi"})),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let after = serde_json::to_value(fetch_all(&store).await.unwrap()).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn falsy_conversation_payloads_are_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let user_id = named_user(&store, "Alice").await;

        for payload in [
            json!(null),
            json!(false),
            json!(0),
            json!(""),
            json!([]),
            json!({}),
        ] {
            let err = append_conversation(
                &store,
                SaveConversationRequest {
                    user_id: Some(user_id.clone()),
                    conversation: Some(payload),
                },
            )
            .await
            .unwrap_err();
            assert!(matches!(err, AppError::InvalidRequest(_)));
        }

        let doc = fetch_all(&store).await.unwrap();
        assert!(doc.users[0].conversations.is_empty());
    }

    #[tokio::test]
    async fn duplicate_ids_only_mutate_the_first_match() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut doc = Document::default();
        doc.users
            .push(User::new("dup".to_string(), "First".to_string()));
        doc.users
            .push(User::new("dup".to_string(), "Second".to_string()));
        store.persist(&doc).unwrap();

        append_feedback(
            &store,
            SaveFeedbackRequest {
                user_id: Some("dup".to_string()),
                feedback_text: Some("hello".to_string()),
            },
        )
        .await
        .unwrap();

        let doc = fetch_all(&store).await.unwrap();
        assert_eq!(doc.users[0].feedback, vec!["hello".to_string()]);
        assert!(doc.users[1].feedback.is_empty());
    }

    #[tokio::test]
    async fn appends_across_users_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let alice = named_user(&store, "Alice").await;
        let bob = named_user(&store, "Bob").await;

        for payload in [json!({"turn": 1}), json!({"turn": 2})] {
            append_conversation(
                &store,
                SaveConversationRequest {
                    user_id: Some(alice.clone()),
                    conversation: Some(payload),
                },
            )
            .await
            .unwrap();
        }
        append_conversation(
            &store,
            SaveConversationRequest {
                user_id: Some(bob.clone()),
                conversation: Some(json!(["hi", "there"])),
            },
        )
        .await
        .unwrap();
        append_feedback(
            &store,
            SaveFeedbackRequest {
                user_id: Some(bob.clone()),
                feedback_text: Some("great".to_string()),
            },
        )
        .await
        .unwrap();

        let doc = fetch_all(&store).await.unwrap();
        assert_eq!(doc.users.len(), 2);
        assert_eq!(doc.users[0].conversations.len(), 2);
        assert!(doc.users[0].feedback.is_empty());
        assert_eq!(doc.users[1].conversations.len(), 1);
        assert_eq!(doc.users[1].feedback.len(), 1);
    }
}
