//! Draft validation - the only gate between candidate entities and the store.
//!
//! Pure functions: a draft goes in, either a normalized value (required
//! fields checked, defaults filled) or a list of field errors comes out.
//! Nothing here touches storage.

use crate::error::FieldError;
use crate::model::{
    GoalDraft, GoalPatch, NewGoal, NewSuggestion, NewTask, Priority, SuggestionDraft, TaskDraft,
    TaskPatch, DEFAULT_TASK_COLOR,
};
use chrono::Duration;

/// Progress bounds for goals, inclusive.
const PROGRESS_MIN: i64 = 0;
const PROGRESS_MAX: i64 = 100;

fn require_text(errors: &mut Vec<FieldError>, field: &str, value: &Option<String>) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.clone(),
        Some(_) => {
            errors.push(FieldError::new(field, "must not be empty"));
            String::new()
        }
        None => {
            errors.push(FieldError::new(field, "is required"));
            String::new()
        }
    }
}

fn check_priority(errors: &mut Vec<FieldError>, value: &Option<String>) -> Priority {
    match value {
        Some(s) => Priority::parse(s).unwrap_or_else(|| {
            errors.push(FieldError::new(
                "priority",
                format!("must be one of low, medium, high (got \"{s}\")"),
            ));
            Priority::default()
        }),
        None => Priority::default(),
    }
}

fn check_progress(errors: &mut Vec<FieldError>, value: Option<i64>) -> i32 {
    match value {
        Some(p) if (PROGRESS_MIN..=PROGRESS_MAX).contains(&p) => p as i32,
        Some(p) => {
            errors.push(FieldError::new(
                "progress",
                format!("must be between 0 and 100 (got {p})"),
            ));
            0
        }
        None => 0,
    }
}

fn check_duration(errors: &mut Vec<FieldError>, value: Option<i64>) -> i64 {
    match value {
        Some(d) if d >= 1 => d,
        Some(d) => {
            errors.push(FieldError::new(
                "duration",
                format!("must be at least 1 minute (got {d})"),
            ));
            0
        }
        None => {
            errors.push(FieldError::new("duration", "is required"));
            0
        }
    }
}

/// Validate a goal draft into a normalized `NewGoal`.
pub fn validate_goal(draft: &GoalDraft) -> Result<NewGoal, Vec<FieldError>> {
    let mut errors = Vec::new();

    let title = require_text(&mut errors, "title", &draft.title);
    let priority = check_priority(&mut errors, &draft.priority);
    let progress = check_progress(&mut errors, draft.progress);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewGoal {
        title,
        description: draft.description.clone(),
        priority,
        progress,
        due_date: draft.due_date,
        is_completed: draft.is_completed.unwrap_or(false),
    })
}

/// Validate a task draft into a normalized `NewTask`.
///
/// `duration` is authoritative: when `endTime` is absent it is derived as
/// `startTime + duration` minutes. When both boundaries are supplied the
/// end must lie strictly after the start.
pub fn validate_task(draft: &TaskDraft) -> Result<NewTask, Vec<FieldError>> {
    let mut errors = Vec::new();

    let title = require_text(&mut errors, "title", &draft.title);
    let priority = check_priority(&mut errors, &draft.priority);
    let duration = check_duration(&mut errors, draft.duration);

    // Placeholder is never observable: a missing start always produces Err.
    let start_time = match draft.start_time {
        Some(t) => t,
        None => {
            errors.push(FieldError::new("startTime", "is required"));
            chrono::DateTime::<chrono::Utc>::UNIX_EPOCH
        }
    };

    let end_time = match draft.end_time {
        Some(end) => {
            if draft.start_time.is_some() && end <= start_time {
                errors.push(FieldError::new("endTime", "must be after startTime"));
            }
            end
        }
        None => start_time + Duration::minutes(duration.max(1)),
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewTask {
        title,
        description: draft.description.clone(),
        goal_id: draft.goal_id,
        start_time,
        end_time,
        duration,
        priority,
        is_completed: draft.is_completed.unwrap_or(false),
        is_ai_generated: draft.is_ai_generated.unwrap_or(false),
        color: draft
            .color
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TASK_COLOR.to_string()),
    })
}

/// Validate a suggestion draft.
pub fn validate_suggestion(draft: &SuggestionDraft) -> Result<NewSuggestion, Vec<FieldError>> {
    let mut errors = Vec::new();

    let content = require_text(&mut errors, "content", &draft.content);
    let kind = require_text(&mut errors, "type", &draft.kind);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewSuggestion {
        content,
        kind,
        is_read: draft.is_read.unwrap_or(false),
    })
}

/// Validate a partial goal update. Only supplied fields are checked; absent
/// fields stay absent in the patch and untouched in the entity.
pub fn validate_goal_patch(draft: &GoalDraft) -> Result<GoalPatch, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut patch = GoalPatch::default();

    if let Some(title) = &draft.title {
        if title.trim().is_empty() {
            errors.push(FieldError::new("title", "must not be empty"));
        } else {
            patch.title = Some(title.clone());
        }
    }
    if draft.priority.is_some() {
        patch.priority = Some(check_priority(&mut errors, &draft.priority));
    }
    if draft.progress.is_some() {
        patch.progress = Some(check_progress(&mut errors, draft.progress));
    }
    patch.description = draft.description.clone();
    patch.due_date = draft.due_date;
    patch.is_completed = draft.is_completed;

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

/// Validate a partial task update.
///
/// The merge is literal: patching `duration` without `endTime` does not
/// rederive the end boundary. Cross-field ordering is only checked when the
/// patch itself supplies both boundaries.
pub fn validate_task_patch(draft: &TaskDraft) -> Result<TaskPatch, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut patch = TaskPatch::default();

    if let Some(title) = &draft.title {
        if title.trim().is_empty() {
            errors.push(FieldError::new("title", "must not be empty"));
        } else {
            patch.title = Some(title.clone());
        }
    }
    if draft.priority.is_some() {
        patch.priority = Some(check_priority(&mut errors, &draft.priority));
    }
    if draft.duration.is_some() {
        patch.duration = Some(check_duration(&mut errors, draft.duration));
    }
    if let (Some(start), Some(end)) = (draft.start_time, draft.end_time) {
        if end <= start {
            errors.push(FieldError::new("endTime", "must be after startTime"));
        }
    }
    patch.description = draft.description.clone();
    patch.goal_id = draft.goal_id;
    patch.start_time = draft.start_time;
    patch.end_time = draft.end_time;
    patch.is_completed = draft.is_completed;
    patch.is_ai_generated = draft.is_ai_generated;
    if let Some(color) = &draft.color {
        if !color.trim().is_empty() {
            patch.color = Some(color.clone());
        }
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task_draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: Some(title.to_string()),
            start_time: Some(Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()),
            duration: Some(60),
            ..Default::default()
        }
    }

    #[test]
    fn goal_defaults_fill_in() {
        let draft = GoalDraft {
            title: Some("Learn Spanish".to_string()),
            ..Default::default()
        };
        let goal = validate_goal(&draft).unwrap();
        assert_eq!(goal.priority, Priority::Medium);
        assert_eq!(goal.progress, 0);
        assert!(!goal.is_completed);
        assert!(goal.due_date.is_none());
    }

    #[test]
    fn goal_missing_title_rejected() {
        let errors = validate_goal(&GoalDraft::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn goal_blank_title_rejected() {
        let draft = GoalDraft {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(validate_goal(&draft).is_err());
    }

    #[test]
    fn goal_progress_out_of_range_rejected() {
        let draft = GoalDraft {
            title: Some("Ship it".to_string()),
            progress: Some(150),
            ..Default::default()
        };
        let errors = validate_goal(&draft).unwrap_err();
        assert_eq!(errors[0].field, "progress");
    }

    #[test]
    fn goal_unknown_priority_rejected() {
        let draft = GoalDraft {
            title: Some("Ship it".to_string()),
            priority: Some("urgent".to_string()),
            ..Default::default()
        };
        let errors = validate_goal(&draft).unwrap_err();
        assert_eq!(errors[0].field, "priority");
    }

    #[test]
    fn task_end_derived_from_duration() {
        let task = validate_task(&task_draft("Workout")).unwrap();
        assert_eq!(task.end_time - task.start_time, Duration::minutes(60));
        assert_eq!(task.color, DEFAULT_TASK_COLOR);
    }

    #[test]
    fn task_explicit_end_kept() {
        let mut draft = task_draft("Workout");
        draft.end_time = Some(Utc.with_ymd_and_hms(2025, 3, 10, 11, 30, 0).unwrap());
        let task = validate_task(&draft).unwrap();
        assert_eq!(task.end_time, draft.end_time.unwrap());
    }

    #[test]
    fn task_end_before_start_rejected() {
        let mut draft = task_draft("Workout");
        draft.end_time = Some(Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap());
        let errors = validate_task(&draft).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "endTime"));
    }

    #[test]
    fn task_zero_duration_rejected() {
        let mut draft = task_draft("Workout");
        draft.duration = Some(0);
        let errors = validate_task(&draft).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "duration"));
    }

    #[test]
    fn task_collects_all_errors() {
        let draft = TaskDraft {
            priority: Some("asap".to_string()),
            ..Default::default()
        };
        let errors = validate_task(&draft).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"startTime"));
        assert!(fields.contains(&"duration"));
        assert!(fields.contains(&"priority"));
    }

    #[test]
    fn task_dangling_goal_id_accepted() {
        let mut draft = task_draft("Workout");
        draft.goal_id = Some(9999);
        let task = validate_task(&draft).unwrap();
        assert_eq!(task.goal_id, Some(9999));
    }

    #[test]
    fn suggestion_requires_content_and_type() {
        let errors = validate_suggestion(&SuggestionDraft::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn goal_patch_checks_only_supplied_fields() {
        let draft = GoalDraft {
            progress: Some(80),
            ..Default::default()
        };
        let patch = validate_goal_patch(&draft).unwrap();
        assert_eq!(patch.progress, Some(80));
        assert!(patch.title.is_none());
    }

    #[test]
    fn goal_patch_rejects_bad_progress() {
        let draft = GoalDraft {
            progress: Some(-5),
            ..Default::default()
        };
        assert!(validate_goal_patch(&draft).is_err());
    }

    #[test]
    fn task_patch_does_not_rederive_end() {
        let draft = TaskDraft {
            duration: Some(90),
            ..Default::default()
        };
        let patch = validate_task_patch(&draft).unwrap();
        assert_eq!(patch.duration, Some(90));
        assert!(patch.end_time.is_none());
    }
}
