//! Core traits for jot abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Request for creating a new note.
#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

/// Request for updating a note. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Request for listing notes.
#[derive(Debug, Clone, Default)]
pub struct ListNotesRequest {
    /// Maximum results
    pub limit: Option<i64>,
    /// Pagination offset
    pub offset: Option<i64>,
}

/// Repository for note CRUD operations.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note, returning its id.
    async fn insert(&self, req: CreateNoteRequest) -> Result<Uuid>;

    /// Fetch a full note by ID.
    async fn fetch(&self, id: Uuid) -> Result<Note>;

    /// List notes newest-first.
    async fn list(&self, req: ListNotesRequest) -> Result<Vec<NoteSummary>>;

    /// Update title and/or content.
    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Note>;

    /// Permanently delete a note. Linked tasks keep their note reference
    /// cleared by the schema's ON DELETE SET NULL.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

// =============================================================================
// TASK REPOSITORY
// =============================================================================

/// Request for creating a new task.
#[derive(Debug, Clone)]
pub struct CreateTaskRequest {
    pub text: String,
    pub color: Option<String>,
    pub area_id: Option<Uuid>,
    pub note_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Request for updating a task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub area_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Repository for task CRUD operations.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task, returning its id.
    async fn insert(&self, req: CreateTaskRequest) -> Result<Uuid>;

    /// Fetch a task by ID.
    async fn fetch(&self, id: Uuid) -> Result<Task>;

    /// List tasks newest-first, optionally restricted to one note.
    async fn list(&self, note_id: Option<Uuid>) -> Result<Vec<Task>>;

    /// Update task fields.
    async fn update(&self, id: Uuid, req: UpdateTaskRequest) -> Result<Task>;

    /// Permanently delete a task.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

// =============================================================================
// AREA REPOSITORY
// =============================================================================

/// Request for creating a new area.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAreaRequest {
    pub name: String,
    pub icon: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// Repository for area operations.
#[async_trait]
pub trait AreaRepository: Send + Sync {
    /// Insert a new area, returning its id.
    async fn insert(&self, req: CreateAreaRequest) -> Result<Uuid>;

    /// Fetch an area by ID.
    async fn get(&self, id: Uuid) -> Result<Option<Area>>;

    /// List areas in creation order. The extractor treats this list as an
    /// immutable lookup table for one call.
    async fn list(&self) -> Result<Vec<Area>>;

    /// Delete an area, first reassigning its tasks to `reassign_to` (or
    /// clearing their area when `None`).
    async fn delete(&self, id: Uuid, reassign_to: Option<Uuid>) -> Result<()>;

    /// The default area, if one is flagged.
    async fn find_default(&self) -> Result<Option<Area>>;
}

// =============================================================================
// CHAT BACKEND
// =============================================================================

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Per-call sampling and formatting options.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Model override; the backend's configured model when `None`.
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Ask the provider to constrain output to a JSON object, when supported.
    pub json_object: bool,
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A completed chat response.
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    pub content: String,
    pub usage: Option<ChatUsage>,
}

/// Interface to a chat-completion provider.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send a chat completion request.
    ///
    /// Fails with [`crate::Error::EmptyCompletion`] when the provider returns
    /// no choices or empty content; transport and provider failures surface
    /// as their own typed variants.
    async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<ChatCompletion>;

    /// The backend's configured default model.
    fn model_name(&self) -> &str;

    /// Check that the provider is reachable and credentials are accepted.
    async fn health_check(&self) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_constructors() {
        let sys = ChatMessage::system("be terse");
        assert_eq!(sys.role, "system");
        assert_eq!(sys.content, "be terse");

        let user = ChatMessage::user("hello");
        assert_eq!(user.role, "user");
    }

    #[test]
    fn test_chat_options_default() {
        let opts = ChatOptions::default();
        assert!(opts.model.is_none());
        assert!(opts.temperature.is_none());
        assert!(opts.max_tokens.is_none());
        assert!(!opts.json_object);
    }

    #[test]
    fn test_update_task_request_camel_case() {
        let req: UpdateTaskRequest =
            serde_json::from_str(r#"{"completed":true,"areaId":"00000000-0000-0000-0000-000000000000"}"#)
                .unwrap();
        assert_eq!(req.completed, Some(true));
        assert!(req.area_id.is_some());
        assert!(req.text.is_none());
    }
}
