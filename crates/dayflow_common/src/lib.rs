//! Shared types for Dayflow - entity model, draft validation, errors,
//! and the chat wire protocol.

pub mod chat;
pub mod error;
pub mod model;
pub mod validate;

pub use chat::{ChatAction, ChatOutcome};
pub use error::{DayflowError, FieldError};
pub use model::{
    Goal, GoalDraft, GoalPatch, NewGoal, NewSuggestion, NewTask, Priority, Suggestion,
    SuggestionDraft, Task, TaskDraft, TaskPatch, DEFAULT_TASK_COLOR,
};

/// Crate version, shared by the daemon health endpoint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
