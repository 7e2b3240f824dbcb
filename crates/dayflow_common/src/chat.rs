//! Wire types for the conversational endpoint.

use serde::{Deserialize, Serialize};

/// What the orchestrator decided to do with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Question,
    CreateTasks,
    CreateGoal,
}

impl ChatAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::CreateTasks => "create_tasks",
            Self::CreateGoal => "create_goal",
        }
    }
}

impl std::fmt::Display for ChatAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terminal output of the chat pipeline, identical shape on every path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatOutcome {
    pub response: String,
    pub action: ChatAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks_created: Option<usize>,
}

impl ChatOutcome {
    pub fn question(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            action: ChatAction::Question,
            tasks_created: None,
        }
    }
}
