//! Instruction templates for every capability call.
//!
//! Each template fixes the exact JSON shape the backend must return; the
//! parsers in classifier/generator treat anything else as malformed.

use chrono::{DateTime, Utc};
use dayflow_common::model::{Goal, Task};

/// Intent classification instruction. One object, two fields, nothing else.
pub const CLASSIFY_INTENT: &str = r#"You are an AI assistant that determines if a user message requires creating calendar tasks or a goal, or is just a question.

Respond with JSON only in this exact format:
{
  "action": "create_tasks" | "create_goal" | "question",
  "confidence": 0.0-1.0
}

Examples:
- "Create a weekly workout plan" -> {"action": "create_tasks", "confidence": 0.9}
- "Schedule my morning routine" -> {"action": "create_tasks", "confidence": 0.8}
- "What's the best time for focused work?" -> {"action": "question", "confidence": 0.9}
- "I want to learn Spanish this year" -> {"action": "create_goal", "confidence": 0.8}"#;

/// Task batch generation instruction.
pub const GENERATE_TASKS: &str = r#"You are a calendar assistant that creates structured tasks. Based on the user's request, generate specific calendar tasks with realistic timing.

Respond with JSON only in this exact format:
{
  "tasks": [
    {
      "title": "Task Name",
      "description": "Brief description",
      "startTime": "2024-01-15T09:00:00.000Z",
      "duration": 60,
      "priority": "high" | "medium" | "low",
      "goalId": null
    }
  ],
  "message": "I've created X tasks for your schedule..."
}

Rules:
- Use realistic dates starting from tomorrow
- Duration in minutes (30, 60, 90, 120 typical)
- Create 3-7 specific, actionable tasks
- Spread tasks across the week appropriately
- Use ISO 8601 date format"#;

/// Single goal generation instruction.
pub const GENERATE_GOAL: &str = r#"You are a goal-setting assistant. Based on the user's request, create a structured goal.

Respond with JSON only in this exact format:
{
  "goal": {
    "title": "Goal Name",
    "description": "Detailed description",
    "dueDate": "2024-06-15T00:00:00.000Z",
    "priority": "high" | "medium" | "low",
    "progress": 0
  },
  "message": "I've created a goal for you..."
}

Rules:
- Set realistic due dates (weeks to months in the future)
- Progress starts at 0
- Use ISO 8601 date format"#;

/// Goal breakdown instruction - tasks without times, scheduling is local.
pub const BREAK_DOWN_GOAL: &str = r#"You are an AI assistant that breaks down goals into actionable tasks.

Respond with JSON only in this exact format:
{
  "tasks": [
    {
      "title": "Specific task name",
      "description": "Detailed task description",
      "duration": 60,
      "priority": "high" | "medium" | "low"
    }
  ]
}

Rules:
- Create 3-5 specific, actionable tasks
- Consider the current progress and remaining work needed
- Do not include startTime or endTime - these are scheduled separately"#;

/// Schedule optimization instruction - advisory only.
pub const OPTIMIZE_SCHEDULE: &str = r#"You are an AI productivity assistant. Analyze the user's goals and existing tasks to suggest an optimized schedule.

Respond with JSON only in this exact format:
{
  "suggestedTasks": [
    {
      "title": "Task name",
      "description": "Task description",
      "startTime": "2024-03-15T14:00:00.000Z",
      "duration": 60,
      "priority": "high" | "medium" | "low",
      "goalId": null
    }
  ],
  "suggestions": ["Suggestion 1", "Suggestion 2"],
  "reasoning": "Explanation of the optimization strategy"
}"#;

/// User message for the generation calls: the request stamped with today.
pub fn dated_request(now: DateTime<Utc>, message: &str) -> String {
    format!("Current date: {}. Request: {}", now.to_rfc3339(), message)
}

/// User message for goal breakdown.
pub fn goal_breakdown_request(goal: &Goal) -> String {
    let due = goal
        .due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "No deadline".to_string());

    format!(
        "Break down this goal into actionable tasks:\n\n\
         Goal: {}\nDescription: {}\nPriority: {}\nCurrent Progress: {}%\nDue Date: {}",
        goal.title,
        goal.description.as_deref().unwrap_or("(none)"),
        goal.priority,
        goal.progress,
        due,
    )
}

/// System instruction for the question path, carrying the store contents
/// as compact context.
pub fn question_instructions(goals: &[Goal], tasks: &[Task]) -> String {
    let goal_context = if goals.is_empty() {
        "None set".to_string()
    } else {
        goals
            .iter()
            .map(|g| format!("\"{}\" ({} priority, {}% complete)", g.title, g.priority, g.progress))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let task_context = if tasks.is_empty() {
        "None scheduled".to_string()
    } else {
        tasks
            .iter()
            .map(|t| format!("\"{}\" on {}", t.title, t.start_time.format("%Y-%m-%d %H:%M")))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "You are an AI productivity assistant specialized in task management and scheduling optimization.\n\n\
         Current user context:\n- Goals: {goal_context}\n- Tasks: {task_context}\n\n\
         Provide helpful, actionable advice about productivity, time management, and scheduling. Be concise and specific."
    )
}

/// User message for schedule optimization, listing current state.
pub fn optimize_request(goals: &[Goal], tasks: &[Task]) -> String {
    let mut out = String::from("Goals:\n");
    for g in goals {
        out.push_str(&format!(
            "- {}: {} (Priority: {}, Progress: {}%)\n",
            g.title,
            g.description.as_deref().unwrap_or(""),
            g.priority,
            g.progress
        ));
    }
    out.push_str("\nExisting Tasks:\n");
    for t in tasks {
        out.push_str(&format!(
            "- {}: {} - {}\n",
            t.title,
            t.start_time.format("%Y-%m-%d %H:%M"),
            t.end_time.format("%Y-%m-%d %H:%M")
        ));
    }
    out
}
