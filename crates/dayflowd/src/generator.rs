//! Structured draft generation from free-text requests.
//!
//! Every capability reply goes through a strict tagged parse: either the
//! declared shape comes back (`Parsed`) or the whole reply is discarded
//! (`Malformed`). Consumers pattern-match the tag instead of trusting
//! field presence. A malformed reply or a failed call yields an empty
//! draft set plus a generic inability message - nothing is raised past
//! this module.

use chrono::{DateTime, Duration, Utc};
use dayflow_common::model::{Goal, GoalDraft, Task, TaskDraft};
use serde::Deserialize;
use tracing::{info, warn};

use crate::llm::{extract_json, LlmClient};
use crate::prompts;

/// Outcome of checking a capability reply against its declared shape.
#[derive(Debug)]
pub enum DraftParse<T> {
    Parsed(T),
    Malformed,
}

/// Task batch produced for a `create_tasks` request.
#[derive(Debug, Clone)]
pub struct GeneratedTasks {
    pub drafts: Vec<TaskDraft>,
    pub message: String,
}

/// Goal draft produced for a `create_goal` request.
#[derive(Debug, Clone)]
pub struct GeneratedGoal {
    pub draft: Option<GoalDraft>,
    pub message: String,
}

/// Advisory schedule rework - suggested drafts are not persisted.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOptimization {
    pub suggested_tasks: Vec<TaskDraft>,
    pub suggestions: Vec<String>,
    pub reasoning: String,
}

const TASKS_FALLBACK_MESSAGE: &str = "I couldn't generate tasks from that request.";
const GOAL_FALLBACK_MESSAGE: &str = "I couldn't create a goal from that request.";

#[derive(Debug, Deserialize)]
struct TasksPayload {
    tasks: Vec<TaskDraft>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoalPayload {
    goal: Option<GoalDraft>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptimizePayload {
    #[serde(default)]
    suggested_tasks: Vec<TaskDraft>,
    #[serde(default)]
    suggestions: Vec<String>,
    reasoning: Option<String>,
}

/// Generate 3-7 scheduled task drafts for a free-text request.
pub async fn generate_tasks(
    llm: &LlmClient,
    message: &str,
    now: DateTime<Utc>,
) -> GeneratedTasks {
    let user_text = prompts::dated_request(now, message);
    let reply = match llm.complete_json(prompts::GENERATE_TASKS, &user_text).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Task generation call failed: {e:#}");
            return GeneratedTasks {
                drafts: vec![],
                message: TASKS_FALLBACK_MESSAGE.to_string(),
            };
        }
    };

    match parse_tasks_payload(&reply) {
        DraftParse::Parsed(mut generated) => {
            // Everything drafted here is model-produced by definition.
            for draft in &mut generated.drafts {
                draft.is_ai_generated = Some(true);
            }
            info!("Generated {} task draft(s)", generated.drafts.len());
            generated
        }
        DraftParse::Malformed => {
            warn!("Malformed task generation reply: {reply}");
            GeneratedTasks {
                drafts: vec![],
                message: TASKS_FALLBACK_MESSAGE.to_string(),
            }
        }
    }
}

/// Generate a single goal draft for a free-text request.
pub async fn generate_goal(llm: &LlmClient, message: &str, now: DateTime<Utc>) -> GeneratedGoal {
    let user_text = prompts::dated_request(now, message);
    let reply = match llm.complete_json(prompts::GENERATE_GOAL, &user_text).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Goal generation call failed: {e:#}");
            return GeneratedGoal {
                draft: None,
                message: GOAL_FALLBACK_MESSAGE.to_string(),
            };
        }
    };

    match parse_goal_payload(&reply) {
        DraftParse::Parsed(generated) => generated,
        DraftParse::Malformed => {
            warn!("Malformed goal generation reply: {reply}");
            GeneratedGoal {
                draft: None,
                message: GOAL_FALLBACK_MESSAGE.to_string(),
            }
        }
    }
}

/// Break an existing goal into 3-5 task drafts scheduled on consecutive
/// upcoming days. The model proposes title/description/duration/priority;
/// scheduling is decided here.
pub async fn generate_tasks_for_goal(
    llm: &LlmClient,
    goal: &Goal,
    now: DateTime<Utc>,
) -> Vec<TaskDraft> {
    let user_text = prompts::goal_breakdown_request(goal);
    let reply = match llm.complete_json(prompts::BREAK_DOWN_GOAL, &user_text).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Goal breakdown call failed: {e:#}");
            return vec![];
        }
    };

    let drafts = match parse_tasks_payload(&reply) {
        DraftParse::Parsed(generated) => generated.drafts,
        DraftParse::Malformed => {
            warn!("Malformed goal breakdown reply: {reply}");
            return vec![];
        }
    };

    schedule_breakdown(drafts, goal.id, now)
}

/// Ask for an advisory schedule rework over the current store contents.
pub async fn optimize_schedule(
    llm: &LlmClient,
    goals: &[Goal],
    tasks: &[Task],
) -> ScheduleOptimization {
    let empty = ScheduleOptimization {
        suggested_tasks: vec![],
        suggestions: vec![],
        reasoning: "No reasoning provided".to_string(),
    };

    let user_text = prompts::optimize_request(goals, tasks);
    let reply = match llm.complete_json(prompts::OPTIMIZE_SCHEDULE, &user_text).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Schedule optimization call failed: {e:#}");
            return empty;
        }
    };

    match serde_json::from_str::<OptimizePayload>(extract_json(&reply)) {
        Ok(payload) => ScheduleOptimization {
            suggested_tasks: payload.suggested_tasks,
            suggestions: payload.suggestions,
            reasoning: payload
                .reasoning
                .unwrap_or_else(|| "No reasoning provided".to_string()),
        },
        Err(e) => {
            warn!("Malformed optimization reply ({e}): {reply}");
            empty
        }
    }
}

/// Assign start/end times to breakdown drafts: one per day starting
/// tomorrow, end derived from the draft's duration.
fn schedule_breakdown(drafts: Vec<TaskDraft>, goal_id: i64, now: DateTime<Utc>) -> Vec<TaskDraft> {
    drafts
        .into_iter()
        .enumerate()
        .map(|(i, mut draft)| {
            let start = now + Duration::days(i as i64 + 1);
            let minutes = draft.duration.filter(|d| *d >= 1).unwrap_or(60);
            draft.start_time = Some(start);
            draft.end_time = Some(start + Duration::minutes(minutes));
            draft.duration = Some(minutes);
            draft.goal_id = Some(goal_id);
            draft.is_ai_generated = Some(true);
            draft
        })
        .collect()
}

fn parse_tasks_payload(text: &str) -> DraftParse<GeneratedTasks> {
    match serde_json::from_str::<TasksPayload>(extract_json(text)) {
        Ok(payload) => DraftParse::Parsed(GeneratedTasks {
            drafts: payload.tasks,
            message: payload
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| TASKS_FALLBACK_MESSAGE.to_string()),
        }),
        Err(_) => DraftParse::Malformed,
    }
}

fn parse_goal_payload(text: &str) -> DraftParse<GeneratedGoal> {
    match serde_json::from_str::<GoalPayload>(extract_json(text)) {
        Ok(payload) => DraftParse::Parsed(GeneratedGoal {
            draft: payload.goal,
            message: payload
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GOAL_FALLBACK_MESSAGE.to_string()),
        }),
        Err(_) => DraftParse::Malformed,
    }
}
