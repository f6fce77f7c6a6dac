//! crates/study_assistant_core/src/planner.rs
//!
//! Pure progress and due-date triage functions over a plan's task list.
//! Everything here is stateless: callers pass the reference `now`, so the
//! same inputs always classify the same way.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{StudyPlan, Task, TaskStatus};

/// How far ahead a pending task's due date may lie to count as upcoming.
const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Completion percentage of a task list: `round(100 * completed / total)`,
/// or 0 for an empty list. Rounds half-up, so 1 of 8 tasks reads as 13.
pub fn compute_progress(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let completed = tasks
        .iter()
        .filter(|task| task.status == TaskStatus::Completed)
        .count();
    ((completed as f64 / tasks.len() as f64) * 100.0).round() as u8
}

/// A pending task whose due date has already passed.
///
/// Only `pending` tasks are ever classified: a task that is in progress is
/// neither overdue nor upcoming, no matter its due date. The dashboard counts
/// rely on that.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    task.status == TaskStatus::Pending
        && task.due_date.is_some_and(|due| due < now)
}

/// A pending task due within the next seven days, `now` itself included.
/// A task due exactly at `now` is upcoming, not overdue.
pub fn is_upcoming(task: &Task, now: DateTime<Utc>) -> bool {
    let window_end = now + Duration::days(UPCOMING_WINDOW_DAYS);
    task.status == TaskStatus::Pending
        && task
            .due_date
            .is_some_and(|due| now <= due && due <= window_end)
}

/// All overdue tasks across the given plans, each paired with its plan title.
pub fn overdue_tasks<'a>(
    plans: &'a [StudyPlan],
    now: DateTime<Utc>,
) -> Vec<(&'a Task, &'a str)> {
    triage(plans, |task| is_overdue(task, now))
}

/// All upcoming tasks across the given plans, each paired with its plan title.
pub fn upcoming_tasks<'a>(
    plans: &'a [StudyPlan],
    now: DateTime<Utc>,
) -> Vec<(&'a Task, &'a str)> {
    triage(plans, |task| is_upcoming(task, now))
}

fn triage<'a, F>(plans: &'a [StudyPlan], matches: F) -> Vec<(&'a Task, &'a str)>
where
    F: Fn(&Task) -> bool,
{
    plans
        .iter()
        .flat_map(|plan| {
            plan.tasks
                .iter()
                .filter(|task| matches(task))
                .map(move |task| (task, plan.title.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewStudyPlan, Priority};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn task(status: TaskStatus, due_date: Option<DateTime<Utc>>) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "task".to_string(),
            description: None,
            due_date,
            status,
            priority: Priority::Medium,
            estimated_hours: 1.0,
            completed_at: None,
        }
    }

    fn plan_with_tasks(title: &str, tasks: Vec<Task>) -> StudyPlan {
        StudyPlan::new(
            NewStudyPlan {
                user_id: Uuid::new_v4(),
                title: title.to_string(),
                subject: "Math".to_string(),
                description: None,
                start_date: now(),
                end_date: now() + Duration::days(30),
                priority: Priority::Medium,
                estimated_hours: 0.0,
                tasks,
                reminders: vec![],
                tags: vec![],
            },
            now(),
        )
        .unwrap()
    }

    #[test]
    fn progress_is_zero_for_empty_task_list() {
        assert_eq!(compute_progress(&[]), 0);
    }

    #[test]
    fn progress_is_one_hundred_when_everything_is_done() {
        let tasks = vec![
            task(TaskStatus::Completed, None),
            task(TaskStatus::Completed, None),
        ];
        assert_eq!(compute_progress(&tasks), 100);
    }

    #[test]
    fn progress_tracks_completed_fraction() {
        let mut tasks = vec![
            task(TaskStatus::Completed, None),
            task(TaskStatus::Pending, None),
            task(TaskStatus::Pending, None),
            task(TaskStatus::Pending, None),
        ];
        assert_eq!(compute_progress(&tasks), 25);

        tasks[1].status = TaskStatus::Completed;
        tasks[2].status = TaskStatus::Completed;
        assert_eq!(compute_progress(&tasks), 75);
    }

    #[test]
    fn progress_rounds_half_up() {
        // 1/8 = 12.5% -> 13, 1/3 = 33.3% -> 33, 2/3 = 66.7% -> 67
        let mut tasks = vec![task(TaskStatus::Completed, None)];
        tasks.extend((0..7).map(|_| task(TaskStatus::Pending, None)));
        assert_eq!(compute_progress(&tasks), 13);

        let thirds = vec![
            task(TaskStatus::Completed, None),
            task(TaskStatus::Pending, None),
            task(TaskStatus::Pending, None),
        ];
        assert_eq!(compute_progress(&thirds), 33);

        let two_thirds = vec![
            task(TaskStatus::Completed, None),
            task(TaskStatus::Completed, None),
            task(TaskStatus::Pending, None),
        ];
        assert_eq!(compute_progress(&two_thirds), 67);
    }

    #[test]
    fn progress_never_decreases_as_tasks_complete() {
        let mut tasks = vec![
            task(TaskStatus::Pending, None),
            task(TaskStatus::InProgress, None),
            task(TaskStatus::Pending, None),
        ];
        let mut last = compute_progress(&tasks);
        for i in 0..tasks.len() {
            tasks[i].status = TaskStatus::Completed;
            let next = compute_progress(&tasks);
            assert!(next >= last);
            last = next;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn only_pending_tasks_are_ever_overdue() {
        let past = now() - Duration::days(2);
        assert!(is_overdue(&task(TaskStatus::Pending, Some(past)), now()));
        assert!(!is_overdue(&task(TaskStatus::InProgress, Some(past)), now()));
        assert!(!is_overdue(&task(TaskStatus::Completed, Some(past)), now()));
        assert!(!is_overdue(&task(TaskStatus::Pending, None), now()));
    }

    #[test]
    fn due_exactly_now_is_upcoming_not_overdue() {
        let at_now = task(TaskStatus::Pending, Some(now()));
        assert!(!is_overdue(&at_now, now()));
        assert!(is_upcoming(&at_now, now()));
    }

    #[test]
    fn upcoming_window_is_inclusive_at_seven_days() {
        let at_limit = task(TaskStatus::Pending, Some(now() + Duration::days(7)));
        let past_limit = task(
            TaskStatus::Pending,
            Some(now() + Duration::days(7) + Duration::seconds(1)),
        );
        assert!(is_upcoming(&at_limit, now()));
        assert!(!is_upcoming(&past_limit, now()));
    }

    #[test]
    fn in_progress_tasks_are_never_upcoming() {
        let soon = now() + Duration::days(1);
        assert!(!is_upcoming(&task(TaskStatus::InProgress, Some(soon)), now()));
    }

    #[test]
    fn triage_flattens_plans_and_carries_titles() {
        let plans = vec![
            plan_with_tasks(
                "Biology",
                vec![
                    task(TaskStatus::Pending, Some(now() - Duration::days(3))),
                    task(TaskStatus::Pending, Some(now() + Duration::days(2))),
                ],
            ),
            plan_with_tasks(
                "History",
                vec![task(TaskStatus::Pending, Some(now() - Duration::hours(1)))],
            ),
        ];

        let overdue = overdue_tasks(&plans, now());
        let titles: Vec<&str> = overdue.iter().map(|(_, title)| *title).collect();
        assert_eq!(titles, vec!["Biology", "History"]);

        let upcoming = upcoming_tasks(&plans, now());
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].1, "Biology");
    }

    #[test]
    fn task_three_days_overdue_is_not_upcoming() {
        let plans = vec![plan_with_tasks(
            "Chemistry",
            vec![task(TaskStatus::Pending, Some(now() - Duration::days(3)))],
        )];
        assert_eq!(overdue_tasks(&plans, now()).len(), 1);
        assert!(upcoming_tasks(&plans, now()).is_empty());
    }
}
