//! In-memory entity store for goals, tasks, and suggestions.
//!
//! One `DataStore` instance lives behind an `RwLock` in the app state.
//! Each collection has its own id counter starting at 1; counters only
//! move forward, so ids are strictly increasing and never reused even
//! after deletion. `created_at` is stamped here and nowhere else.

use chrono::{DateTime, Local, NaiveDate, Utc};
use dayflow_common::model::{
    Goal, GoalPatch, NewGoal, NewSuggestion, NewTask, Suggestion, Task, TaskPatch,
};
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct DataStore {
    goals: BTreeMap<i64, Goal>,
    tasks: BTreeMap<i64, Task>,
    suggestions: BTreeMap<i64, Suggestion>,
    next_goal_id: i64,
    next_task_id: i64,
    next_suggestion_id: i64,
}

impl DataStore {
    pub fn new() -> Self {
        Self {
            goals: BTreeMap::new(),
            tasks: BTreeMap::new(),
            suggestions: BTreeMap::new(),
            next_goal_id: 1,
            next_task_id: 1,
            next_suggestion_id: 1,
        }
    }

    // ========================================================================
    // Goals
    // ========================================================================

    pub fn goals(&self) -> Vec<Goal> {
        self.goals.values().cloned().collect()
    }

    pub fn goal(&self, id: i64) -> Option<Goal> {
        self.goals.get(&id).cloned()
    }

    pub fn create_goal(&mut self, new: NewGoal) -> Goal {
        let id = self.next_goal_id;
        self.next_goal_id += 1;

        let goal = Goal {
            id,
            title: new.title,
            description: new.description,
            priority: new.priority,
            progress: new.progress,
            due_date: new.due_date,
            is_completed: new.is_completed,
            created_at: Utc::now(),
        };
        self.goals.insert(id, goal.clone());
        goal
    }

    /// Shallow-merge a patch over an existing goal. Absent patch fields
    /// leave the stored value untouched.
    pub fn update_goal(&mut self, id: i64, patch: GoalPatch) -> Option<Goal> {
        let goal = self.goals.get_mut(&id)?;

        if let Some(title) = patch.title {
            goal.title = title;
        }
        if let Some(description) = patch.description {
            goal.description = Some(description);
        }
        if let Some(priority) = patch.priority {
            goal.priority = priority;
        }
        if let Some(progress) = patch.progress {
            goal.progress = progress;
        }
        if let Some(due_date) = patch.due_date {
            goal.due_date = Some(due_date);
        }
        if let Some(is_completed) = patch.is_completed {
            goal.is_completed = is_completed;
        }

        Some(goal.clone())
    }

    /// Remove a goal. Dependent tasks keep their `goal_id` - references are
    /// soft and never cascaded.
    pub fn delete_goal(&mut self, id: i64) -> bool {
        self.goals.remove(&id).is_some()
    }

    // ========================================================================
    // Tasks
    // ========================================================================

    /// All tasks, or only those whose start falls on `date`.
    ///
    /// The day filter is an exact calendar-date match in local wall-clock
    /// terms (year/month/day equality), not a time-range comparison. A task
    /// starting at 23:59 belongs to that date alone.
    pub fn tasks(&self, date: Option<NaiveDate>) -> Vec<Task> {
        match date {
            None => self.tasks.values().cloned().collect(),
            Some(day) => self
                .tasks
                .values()
                .filter(|t| local_date(t.start_time) == day)
                .cloned()
                .collect(),
        }
    }

    pub fn task(&self, id: i64) -> Option<Task> {
        self.tasks.get(&id).cloned()
    }

    pub fn tasks_for_goal(&self, goal_id: i64) -> Vec<Task> {
        self.tasks
            .values()
            .filter(|t| t.goal_id == Some(goal_id))
            .cloned()
            .collect()
    }

    pub fn create_task(&mut self, new: NewTask) -> Task {
        let id = self.next_task_id;
        self.next_task_id += 1;

        let task = Task {
            id,
            title: new.title,
            description: new.description,
            goal_id: new.goal_id,
            start_time: new.start_time,
            end_time: new.end_time,
            duration: new.duration,
            priority: new.priority,
            is_completed: new.is_completed,
            is_ai_generated: new.is_ai_generated,
            color: new.color,
            created_at: Utc::now(),
        };
        self.tasks.insert(id, task.clone());
        task
    }

    /// Shallow-merge a patch over an existing task. The merge is literal:
    /// a patched `duration` does not rederive `end_time`.
    pub fn update_task(&mut self, id: i64, patch: TaskPatch) -> Option<Task> {
        let task = self.tasks.get_mut(&id)?;

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(goal_id) = patch.goal_id {
            task.goal_id = Some(goal_id);
        }
        if let Some(start_time) = patch.start_time {
            task.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            task.end_time = end_time;
        }
        if let Some(duration) = patch.duration {
            task.duration = duration;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(is_completed) = patch.is_completed {
            task.is_completed = is_completed;
        }
        if let Some(is_ai_generated) = patch.is_ai_generated {
            task.is_ai_generated = is_ai_generated;
        }
        if let Some(color) = patch.color {
            task.color = color;
        }

        Some(task.clone())
    }

    pub fn delete_task(&mut self, id: i64) -> bool {
        self.tasks.remove(&id).is_some()
    }

    // ========================================================================
    // Suggestions
    // ========================================================================

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.suggestions.values().cloned().collect()
    }

    pub fn suggestion(&self, id: i64) -> Option<Suggestion> {
        self.suggestions.get(&id).cloned()
    }

    pub fn create_suggestion(&mut self, new: NewSuggestion) -> Suggestion {
        let id = self.next_suggestion_id;
        self.next_suggestion_id += 1;

        let suggestion = Suggestion {
            id,
            content: new.content,
            kind: new.kind,
            is_read: new.is_read,
            created_at: Utc::now(),
        };
        self.suggestions.insert(id, suggestion.clone());
        suggestion
    }

    pub fn mark_suggestion_read(&mut self, id: i64) -> bool {
        match self.suggestions.get_mut(&id) {
            Some(s) => {
                s.is_read = true;
                true
            }
            None => false,
        }
    }

    pub fn delete_suggestion(&mut self, id: i64) -> bool {
        self.suggestions.remove(&id).is_some()
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Calendar date of a timestamp in the machine's local timezone.
fn local_date(t: DateTime<Utc>) -> NaiveDate {
    t.with_timezone(&Local).date_naive()
}
