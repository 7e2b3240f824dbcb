//! Orchestration tests: partial-failure accounting and graceful
//! degradation when the generative backend is unreachable.

use chrono::{TimeZone, Utc};
use dayflow_common::chat::ChatAction;
use dayflow_common::model::TaskDraft;
use dayflowd::chat;
use dayflowd::config::DaemonConfig;
use dayflowd::persist;
use dayflowd::server::AppState;
use dayflowd::store::DataStore;
use tokio::sync::RwLock;

/// Nothing listens on port 9; every capability call fails fast.
fn unreachable_state() -> AppState {
    let mut config = DaemonConfig::defaults();
    config.llm.base_url = "http://127.0.0.1:9".to_string();
    config.llm.timeout_secs = 1;
    AppState::new(&config)
}

fn valid_draft(title: &str, day: u32) -> TaskDraft {
    TaskDraft {
        title: Some(title.to_string()),
        start_time: Some(Utc.with_ymd_and_hms(2025, 4, day, 10, 0, 0).unwrap()),
        duration: Some(60),
        ..Default::default()
    }
}

#[tokio::test]
async fn five_valid_one_invalid_reports_five_created() {
    let store = RwLock::new(DataStore::new());

    let mut drafts: Vec<TaskDraft> = (1..=5).map(|d| valid_draft(&format!("t{d}"), d)).collect();
    // Structurally invalid: negative duration.
    drafts.push(TaskDraft {
        duration: Some(-10),
        ..valid_draft("broken", 6)
    });

    let outcome = persist::persist_tasks(&store, drafts).await;

    assert_eq!(outcome.created.len(), 5);
    assert_eq!(outcome.failed, 1);

    let stored = store.read().await.tasks(None);
    assert_eq!(stored.len(), 5);
    assert!(stored.iter().all(|t| t.title != "broken"));
}

#[tokio::test]
async fn failure_mid_batch_does_not_block_later_drafts() {
    let store = RwLock::new(DataStore::new());

    let drafts = vec![
        valid_draft("first", 1),
        TaskDraft::default(), // rejected
        valid_draft("after the failure", 2),
    ];

    let outcome = persist::persist_tasks(&store, drafts).await;
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.created.len(), 2);
    // Order and ids reflect the sequential loop: 1 then 2.
    assert_eq!(outcome.created[0].title, "first");
    assert_eq!(outcome.created[1].title, "after the failure");
    assert_eq!(outcome.created[1].id, outcome.created[0].id + 1);
}

#[tokio::test]
async fn unreachable_backend_degrades_to_question_answer() {
    let state = unreachable_state();

    let outcome = chat::handle_message(&state, "hello").await;

    assert_eq!(outcome.action, ChatAction::Question);
    assert!(!outcome.response.trim().is_empty());
    assert!(outcome.tasks_created.is_none());
}

#[tokio::test]
async fn unreachable_backend_never_writes_to_the_store() {
    let state = unreachable_state();

    for message in ["Create a weekly workout plan", "I want to learn Spanish"] {
        let _ = chat::handle_message(&state, message).await;
    }

    let store = state.store.read().await;
    assert!(store.tasks(None).is_empty());
    assert!(store.goals().is_empty());
}
