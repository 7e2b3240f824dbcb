//! Persistence adapter: validated drafts go into the store one at a time.
//!
//! Partial success is expected and normal. A draft that fails validation
//! is tallied and logged; the remaining drafts still get their turn. The
//! loop is sequential by contract - ordering and the failure count both
//! depend on it.

use dayflow_common::model::{Goal, GoalDraft, Task, TaskDraft};
use dayflow_common::validate;
use tokio::sync::RwLock;
use tracing::warn;

use crate::store::DataStore;

/// Outcome of persisting one batch of task drafts.
#[derive(Debug, Default)]
pub struct PersistOutcome {
    pub created: Vec<Task>,
    pub failed: usize,
}

/// Validate and store each draft in order. Never returns an error.
pub async fn persist_tasks(store: &RwLock<DataStore>, drafts: Vec<TaskDraft>) -> PersistOutcome {
    let mut outcome = PersistOutcome::default();

    for draft in drafts {
        match validate::validate_task(&draft) {
            Ok(new_task) => {
                let task = store.write().await.create_task(new_task);
                outcome.created.push(task);
            }
            Err(errors) => {
                warn!(
                    "Skipping invalid task draft {:?}: {}",
                    draft.title,
                    errors
                        .iter()
                        .map(|e| e.to_string())
                        .collect::<Vec<_>>()
                        .join("; ")
                );
                outcome.failed += 1;
            }
        }
    }

    outcome
}

/// Validate and store a single goal draft. `None` when the draft is
/// rejected - the caller composes a response either way.
pub async fn persist_goal(store: &RwLock<DataStore>, draft: GoalDraft) -> Option<Goal> {
    match validate::validate_goal(&draft) {
        Ok(new_goal) => Some(store.write().await.create_goal(new_goal)),
        Err(errors) => {
            warn!(
                "Skipping invalid goal draft {:?}: {}",
                draft.title,
                errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ")
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn valid_draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: Some(title.to_string()),
            start_time: Some(Utc.with_ymd_and_hms(2025, 3, 11, 9, 0, 0).unwrap()),
            duration: Some(30),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn batch_with_one_invalid_draft_partially_succeeds() {
        let store = RwLock::new(DataStore::new());

        let mut drafts: Vec<TaskDraft> = (0..5).map(|i| valid_draft(&format!("t{i}"))).collect();
        drafts.insert(2, TaskDraft::default()); // no title, no start, no duration

        let outcome = persist_tasks(&store, drafts).await;
        assert_eq!(outcome.created.len(), 5);
        assert_eq!(outcome.failed, 1);

        // The invalid draft never reached the store.
        assert_eq!(store.read().await.tasks(None).len(), 5);
    }

    #[tokio::test]
    async fn created_tasks_have_increasing_ids_in_draft_order() {
        let store = RwLock::new(DataStore::new());
        let drafts: Vec<TaskDraft> = (0..4).map(|i| valid_draft(&format!("t{i}"))).collect();

        let outcome = persist_tasks(&store, drafts).await;
        let ids: Vec<i64> = outcome.created.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(outcome.created[0].title, "t0");
    }

    #[tokio::test]
    async fn goal_rejection_returns_none() {
        let store = RwLock::new(DataStore::new());
        assert!(persist_goal(&store, GoalDraft::default()).await.is_none());
        assert!(store.read().await.goals().is_empty());

        let goal = persist_goal(
            &store,
            GoalDraft {
                title: Some("Learn Spanish".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(goal.id, 1);
    }
}
