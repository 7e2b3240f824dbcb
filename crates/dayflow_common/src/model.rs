//! Calendar entity model: goals, tasks, suggestions.
//!
//! Wire format is camelCase JSON (`startTime`, `isCompleted`) to match the
//! HTTP surface. Entities carry store-assigned ids and creation timestamps;
//! drafts carry neither - the store stamps both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default calendar color applied when a draft omits one.
pub const DEFAULT_TASK_COLOR: &str = "#6366F1";

/// Priority level shared by goals and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Parse from the wire spelling. Returns `None` for anything outside
    /// the three-value set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A long-running objective the user is working toward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    /// Completion percentage, 0-100.
    pub progress: i32,
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// A scheduled calendar entry, optionally linked to a goal.
///
/// `goal_id` is a soft reference: it is never checked against the goal
/// collection, and deleting a goal leaves dependent tasks in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub goal_id: Option<i64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Length in minutes, >= 1.
    pub duration: i64,
    pub priority: Priority,
    pub is_completed: bool,
    pub is_ai_generated: bool,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

/// An assistant-produced hint shown in the suggestions panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: i64,
    pub content: String,
    /// Open enumeration: "scheduling", "optimization", "task_breakdown", ...
    #[serde(rename = "type")]
    pub kind: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Drafts - unvalidated candidate entities
// ============================================================================
//
// Every field is optional so a draft deserializes from whatever a caller or
// the language model produced; the validator decides what is required and
// fills defaults. Unknown extra fields are ignored.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub progress: Option<i64>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub goal_id: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<i64>,
    pub priority: Option<String>,
    pub is_completed: Option<bool>,
    pub is_ai_generated: Option<bool>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionDraft {
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub is_read: Option<bool>,
}

// ============================================================================
// Normalized drafts - validated, defaults filled, ready for the store
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub progress: i32,
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub goal_id: Option<i64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: i64,
    pub priority: Priority,
    pub is_completed: bool,
    pub is_ai_generated: bool,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSuggestion {
    pub content: String,
    pub kind: String,
    pub is_read: bool,
}

// ============================================================================
// Patches - validated partial updates
// ============================================================================
//
// A patch only carries the fields the caller supplied; the store applies it
// field by field, leaving everything else untouched.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub progress: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub goal_id: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<i64>,
    pub priority: Option<Priority>,
    pub is_completed: Option<bool>,
    pub is_ai_generated: Option<bool>,
    pub color: Option<String>,
}
