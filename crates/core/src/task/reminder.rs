//! Reminder detection
//!
//! One-shot sweep over the collection for reminders coming up soon.
//! The sweep never mutates tasks and does not reschedule itself; the
//! caller runs it once at startup.

use chrono::{DateTime, Duration, Utc};

use super::model::Task;

/// Lookahead window for the reminder sweep, in minutes
pub const REMINDER_WINDOW_MINUTES: i64 = 30;

/// Tasks whose reminder falls strictly between `now` and the window end
///
/// Past reminders and reminders at or beyond `now + 30min` are excluded.
pub fn upcoming_reminders(tasks: &[Task], now: DateTime<Utc>) -> Vec<&Task> {
    let window_end = now + Duration::minutes(REMINDER_WINDOW_MINUTES);
    tasks
        .iter()
        .filter(|task| {
            task.reminder
                .is_some_and(|reminder| reminder > now && reminder < window_end)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_with_reminder(name: &str, reminder: DateTime<Utc>) -> Task {
        Task::new(name).with_reminder(reminder)
    }

    #[test]
    fn test_reminder_inside_window_included() {
        let now = Utc::now();
        let tasks = vec![task_with_reminder("Soon", now + Duration::minutes(10))];

        let upcoming = upcoming_reminders(&tasks, now);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].name, "Soon");
    }

    #[test]
    fn test_reminder_beyond_window_excluded() {
        let now = Utc::now();
        let tasks = vec![task_with_reminder("Later", now + Duration::minutes(40))];

        assert!(upcoming_reminders(&tasks, now).is_empty());
    }

    #[test]
    fn test_past_reminder_excluded() {
        let now = Utc::now();
        let tasks = vec![task_with_reminder("Missed", now - Duration::minutes(5))];

        assert!(upcoming_reminders(&tasks, now).is_empty());
    }

    #[test]
    fn test_window_bounds_are_strict() {
        let now = Utc::now();
        let tasks = vec![
            task_with_reminder("At now", now),
            task_with_reminder(
                "At edge",
                now + Duration::minutes(REMINDER_WINDOW_MINUTES),
            ),
        ];

        assert!(upcoming_reminders(&tasks, now).is_empty());
    }

    #[test]
    fn test_tasks_without_reminder_excluded() {
        let now = Utc::now();
        let tasks = vec![Task::new("No reminder")];

        assert!(upcoming_reminders(&tasks, now).is_empty());
    }
}
