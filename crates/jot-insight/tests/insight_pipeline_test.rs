//! End-to-end pipeline tests: a scripted chat backend drives the extractor,
//! and in-memory repositories receive what the materializer persists.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use jot_core::{
    Area, ChatBackend, CreateNoteRequest, CreateTaskRequest, Error, ListNotesRequest, Note,
    NoteSummary, Result, Task, UpdateNoteRequest, UpdateTaskRequest,
};
use jot_core::{NoteRepository, TaskRepository};
use jot_inference::mock::MockChatBackend;
use jot_insight::{InsightExtractor, TaskMaterializer};

const STUB_REPLY: &str = r#"{"title":"Plan the launch event now","summary":"s","tags":["work","idea"],"actionItems":["Book venue","Send invites"]}"#;

fn area(id: Uuid, name: &str) -> Area {
    Area {
        id,
        name: name.to_string(),
        icon: None,
        is_default: false,
        created_at: Utc::now(),
    }
}

fn extractor(backend: &MockChatBackend) -> InsightExtractor {
    InsightExtractor::new(Arc::new(backend.clone()))
}

// ─── In-memory repositories ────────────────────────────────────────────────

#[derive(Default)]
struct MemNoteRepo {
    inserted: Mutex<Vec<CreateNoteRequest>>,
}

#[async_trait]
impl NoteRepository for MemNoteRepo {
    async fn insert(&self, req: CreateNoteRequest) -> Result<Uuid> {
        self.inserted.lock().unwrap().push(req);
        Ok(jot_core::new_v7())
    }

    async fn fetch(&self, id: Uuid) -> Result<Note> {
        Err(Error::NoteNotFound(id))
    }

    async fn list(&self, _req: ListNotesRequest) -> Result<Vec<NoteSummary>> {
        Ok(vec![])
    }

    async fn update(&self, id: Uuid, _req: UpdateNoteRequest) -> Result<Note> {
        Err(Error::NoteNotFound(id))
    }

    async fn delete(&self, _id: Uuid) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct MemTaskRepo {
    inserted: Mutex<Vec<CreateTaskRequest>>,
}

#[async_trait]
impl TaskRepository for MemTaskRepo {
    async fn insert(&self, req: CreateTaskRequest) -> Result<Uuid> {
        self.inserted.lock().unwrap().push(req);
        Ok(jot_core::new_v7())
    }

    async fn fetch(&self, id: Uuid) -> Result<Task> {
        Err(Error::TaskNotFound(id))
    }

    async fn list(&self, _note_id: Option<Uuid>) -> Result<Vec<Task>> {
        Ok(vec![])
    }

    async fn update(&self, id: Uuid, _req: UpdateTaskRequest) -> Result<Task> {
        Err(Error::TaskNotFound(id))
    }

    async fn delete(&self, _id: Uuid) -> Result<()> {
        Ok(())
    }
}

// ─── Extraction round trips ────────────────────────────────────────────────

#[tokio::test]
async fn test_round_trip_without_areas() {
    let backend = MockChatBackend::new().with_response(STUB_REPLY);
    let insight = extractor(&backend).extract("some note", &[]).await.unwrap();

    // 5-word stub title is clamped to the first 4 words.
    assert_eq!(insight.title, "Plan the launch event");
    assert_eq!(insight.summary, "s");
    assert_eq!(insight.tags, vec!["work", "idea"]);
    assert_eq!(insight.action_items, vec!["Book venue", "Send invites"]);
    assert_eq!(insight.area_id, None);
}

#[tokio::test]
async fn test_round_trip_with_valid_area_choice() {
    let a1 = Uuid::new_v4();
    let a2 = Uuid::new_v4();
    let areas = vec![area(a1, "Work"), area(a2, "Home")];

    let reply = format!(
        r#"{{"title":"t","summary":"s","tags":[],"actionItems":[],"areaId":"{}"}}"#,
        a1
    );
    let backend = MockChatBackend::new().with_response(reply);
    let insight = extractor(&backend).extract("some note", &areas).await.unwrap();

    assert_eq!(insight.area_id, Some(a1));
}

#[tokio::test]
async fn test_round_trip_with_bogus_area_substitutes_first() {
    let a1 = Uuid::new_v4();
    let a2 = Uuid::new_v4();
    let areas = vec![area(a1, "Work"), area(a2, "Home")];

    let backend = MockChatBackend::new()
        .with_response(r#"{"title":"t","summary":"s","tags":[],"actionItems":[],"areaId":"bogus"}"#);
    let insight = extractor(&backend).extract("some note", &areas).await.unwrap();

    assert_eq!(insight.area_id, Some(a1));
}

#[tokio::test]
async fn test_fixed_sampling_options_are_sent() {
    let backend = MockChatBackend::new().with_response(STUB_REPLY);
    extractor(&backend).extract("some note", &[]).await.unwrap();

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    let options = &calls[0].options;
    assert_eq!(options.temperature, Some(0.3));
    assert_eq!(options.max_tokens, Some(2048));
    assert!(options.json_object);
    assert!(options.model.is_none());
}

#[tokio::test]
async fn test_system_prompt_lists_areas_only_when_supplied() {
    let backend = MockChatBackend::new().with_response(STUB_REPLY);
    extractor(&backend).extract("n", &[]).await.unwrap();

    let a1 = Uuid::new_v4();
    extractor(&backend)
        .extract("n", &[area(a1, "Work")])
        .await
        .unwrap();

    let calls = backend.calls();
    let bare_system = &calls[0].messages[0].content;
    let area_system = &calls[1].messages[0].content;
    assert!(!bare_system.contains("areaId"));
    assert!(area_system.contains("areaId"));
    assert!(area_system.contains(&a1.to_string()));
}

#[tokio::test]
async fn test_blank_note_sends_placeholder_to_model() {
    let backend = MockChatBackend::new().with_response(STUB_REPLY);
    extractor(&backend).extract("   ", &[]).await.unwrap();

    let calls = backend.calls();
    assert_eq!(calls[0].messages[1].content, "(empty note)");
}

// ─── Extraction failure propagation ────────────────────────────────────────

#[tokio::test]
async fn test_provider_failure_propagates_unchanged() {
    let backend = MockChatBackend::new();
    backend.push_error(Error::RateLimited("back off".to_string()));

    let result = extractor(&backend).extract("note", &[]).await;
    assert!(matches!(result, Err(Error::RateLimited(_))));
}

#[tokio::test]
async fn test_declined_and_garbage_are_distinct_errors() {
    let backend = MockChatBackend::new();
    backend.push_error(Error::EmptyCompletion);
    backend.push_response("exuberant prose, not json");

    let declined = extractor(&backend).extract("note", &[]).await;
    assert!(matches!(declined, Err(Error::EmptyCompletion)));

    let garbage = extractor(&backend).extract("note", &[]).await;
    assert!(matches!(garbage, Err(Error::Extraction(_))));
}

#[tokio::test]
async fn test_array_reply_is_malformed_response() {
    let backend = MockChatBackend::new().with_response("[1,2,3]");
    let result = extractor(&backend).extract("note", &[]).await;
    assert!(matches!(result, Err(Error::MalformedResponse(_))));
}

// ─── Extraction into materialization ───────────────────────────────────────

#[tokio::test]
async fn test_pipeline_persists_original_content_not_placeholder() {
    let backend = MockChatBackend::new()
        .with_response(r#"{"title":"","summary":"","tags":[],"actionItems":[]}"#);
    let insight = extractor(&backend).extract("   ", &[]).await.unwrap();

    let notes = Arc::new(MemNoteRepo::default());
    let tasks = Arc::new(MemTaskRepo::default());
    let outcome = TaskMaterializer::new(notes.clone(), tasks)
        .materialize("   ", &insight)
        .await;

    assert!(outcome.note_id.is_some());
    let stored = notes.inserted.lock().unwrap();
    assert_eq!(stored[0].content, "   ");
    assert_ne!(stored[0].content, "(empty note)");
}

#[tokio::test]
async fn test_pipeline_creates_linked_tasks_in_display_order() {
    let backend = MockChatBackend::new().with_response(STUB_REPLY);
    let insight = extractor(&backend).extract("some note", &[]).await.unwrap();

    let notes = Arc::new(MemNoteRepo::default());
    let tasks = Arc::new(MemTaskRepo::default());
    let outcome = TaskMaterializer::new(notes, tasks.clone())
        .materialize("some note", &insight)
        .await;

    assert_eq!(outcome.created_tasks, 2);
    let created = tasks.inserted.lock().unwrap();
    // Created in reverse so a newest-first list reads in original order.
    assert_eq!(created[0].text, "Send invites");
    assert_eq!(created[1].text, "Book venue");
    assert!(created.iter().all(|t| t.note_id == outcome.note_id));
}
