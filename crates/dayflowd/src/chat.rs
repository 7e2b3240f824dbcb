//! Conversational orchestrator.
//!
//! One message runs one sequential pipeline:
//!
//! ```text
//! Classifying -> GeneratingTasks -> PersistingTasks -> Composing
//!             -> GeneratingGoal  -> PersistingGoal  -> Composing
//!             -> AnsweringQuestion                  -> Composing
//! ```
//!
//! Every path terminates in a normal `ChatOutcome`; upstream failures
//! degrade to fixed fallback text along the way and never escape.

use chrono::Utc;
use dayflow_common::chat::{ChatAction, ChatOutcome};
use tracing::info;

use crate::classifier;
use crate::generator;
use crate::persist;
use crate::prompts;
use crate::server::AppState;

/// Apology used when the question path itself fails.
const QUESTION_FALLBACK: &str =
    "I'm sorry, I couldn't process your request right now. Please try again in a moment.";

/// Run the full pipeline for one user message.
pub async fn handle_message(state: &AppState, message: &str) -> ChatOutcome {
    let decision = classifier::classify(&state.llm, message).await;

    if decision.takes(ChatAction::CreateTasks) {
        return create_tasks(state, message).await;
    }
    if decision.takes(ChatAction::CreateGoal) {
        return create_goal(state, message).await;
    }

    answer_question(state, message).await
}

async fn create_tasks(state: &AppState, message: &str) -> ChatOutcome {
    let generated = generator::generate_tasks(&state.llm, message, Utc::now()).await;
    let outcome = persist::persist_tasks(&state.store, generated.drafts).await;

    info!(
        "Chat created {} task(s), {} draft(s) rejected",
        outcome.created.len(),
        outcome.failed
    );

    let response = if outcome.created.is_empty() {
        generated.message
    } else {
        format!(
            "I've created {} tasks for your schedule. Check your calendar to see them!",
            outcome.created.len()
        )
    };

    ChatOutcome {
        response,
        action: ChatAction::CreateTasks,
        tasks_created: Some(outcome.created.len()),
    }
}

async fn create_goal(state: &AppState, message: &str) -> ChatOutcome {
    let generated = generator::generate_goal(&state.llm, message, Utc::now()).await;

    let response = match generated.draft {
        Some(draft) => match persist::persist_goal(&state.store, draft).await {
            Some(goal) => {
                info!("Chat created goal {} \"{}\"", goal.id, goal.title);
                generated.message
            }
            None => "I couldn't create a goal from that request.".to_string(),
        },
        None => generated.message,
    };

    ChatOutcome {
        response,
        action: ChatAction::CreateGoal,
        tasks_created: None,
    }
}

/// Question path: render the current store as context and make one
/// free-text call. A failed call becomes a fixed apology, never an error.
async fn answer_question(state: &AppState, message: &str) -> ChatOutcome {
    let (goals, tasks) = {
        let store = state.store.read().await;
        (store.goals(), store.tasks(None))
    };

    let instructions = prompts::question_instructions(&goals, &tasks);
    let response = match state.llm.complete_text(&instructions, message).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => QUESTION_FALLBACK.to_string(),
        Err(e) => {
            info!("Question path degraded to apology: {e:#}");
            QUESTION_FALLBACK.to_string()
        }
    };

    ChatOutcome::question(response)
}
