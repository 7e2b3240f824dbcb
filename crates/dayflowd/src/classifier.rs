//! Intent classification for incoming chat messages.
//!
//! One capability call decides whether a message asks for tasks, a goal,
//! or just an answer. Classification never fails: an unreachable backend
//! or an unusable reply degrades to the question path at half confidence.

use dayflow_common::chat::ChatAction;
use serde_json::Value;
use tracing::{info, warn};

use crate::llm::{extract_json, LlmClient};
use crate::prompts;

/// Confidence a create branch must exceed. Fixed design constant.
pub const CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Confidence reported when the backend reply was unusable.
const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Classifier output consumed by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntentDecision {
    pub action: ChatAction,
    pub confidence: f64,
}

impl IntentDecision {
    /// Safe default when classification is impossible.
    pub fn fallback() -> Self {
        Self {
            action: ChatAction::Question,
            confidence: FALLBACK_CONFIDENCE,
        }
    }

    /// Branch rule: a create branch is taken only when the action matches
    /// AND confidence clears the threshold strictly. Pure function of
    /// `(action, confidence)`.
    pub fn takes(&self, action: ChatAction) -> bool {
        self.action == action && self.confidence > CONFIDENCE_THRESHOLD
    }
}

/// Classify one message. Never returns an error.
pub async fn classify(llm: &LlmClient, message: &str) -> IntentDecision {
    let reply = match llm.complete_json(prompts::CLASSIFY_INTENT, message).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Intent classification call failed, taking question path: {e:#}");
            return IntentDecision::fallback();
        }
    };

    let decision = parse_intent(&reply).unwrap_or_else(|| {
        warn!("Unusable intent reply, taking question path: {reply}");
        IntentDecision::fallback()
    });

    info!(
        "Classified intent: {} (confidence {:.2})",
        decision.action, decision.confidence
    );
    decision
}

/// Parse the backend reply. `action` is required and must be one of the
/// three known values; a missing confidence defaults to 0.5.
fn parse_intent(text: &str) -> Option<IntentDecision> {
    let value: Value = serde_json::from_str(extract_json(text)).ok()?;

    let action = match value.get("action").and_then(|a| a.as_str())? {
        "question" => ChatAction::Question,
        "create_tasks" => ChatAction::CreateTasks,
        "create_goal" => ChatAction::CreateGoal,
        other => {
            warn!("Unknown intent action '{other}'");
            return None;
        }
    };

    let confidence = value
        .get("confidence")
        .and_then(|c| c.as_f64())
        .unwrap_or(FALLBACK_CONFIDENCE)
        .clamp(0.0, 1.0);

    Some(IntentDecision { action, confidence })
}
