use crate::domain::enums::SortKey;
use crate::domain::filter::FilterState;
use crate::domain::task::Task;
use chrono::{DateTime, Local};
use std::cmp::Ordering;

/// Filter a task snapshot against the given criteria, preserving order.
///
/// A task passes only when every active criterion holds. The overdue and
/// due-soon toggles form one union clause: with either active, a task must
/// match at least one of the active toggles, and undated tasks are out.
pub fn filter_tasks(tasks: &[Task], filter: &FilterState, now: DateTime<Local>) -> Vec<Task> {
    let now = now.naive_local();
    tasks
        .iter()
        .filter(|task| {
            if !filter.status.matches(task.completed) {
                return false;
            }
            if !filter.priority.matches(task.priority) {
                return false;
            }
            if !filter
                .selected_tag_ids
                .iter()
                .all(|id| task.tags.iter().any(|tag| tag == id))
            {
                return false;
            }
            if filter.date_from.is_some() || filter.date_to.is_some() {
                let Some(due) = task.due_date else {
                    return false;
                };
                if filter.date_from.is_some_and(|from| due < from) {
                    return false;
                }
                if filter.date_to.is_some_and(|to| due > to) {
                    return false;
                }
            }
            if filter.overdue || filter.due_soon {
                let overdue_hit = filter.overdue && task.is_overdue(now);
                let due_soon_hit = filter.due_soon && task.is_due_soon(now);
                if !overdue_hit && !due_soon_hit {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Order a task snapshot by the given key. The sort is stable: tasks that
/// compare equal keep their original relative order.
pub fn sort_tasks(tasks: &[Task], key: SortKey) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| compare(a, b, key));
    sorted
}

fn compare(a: &Task, b: &Task, key: SortKey) -> Ordering {
    match key {
        SortKey::CreatedDesc => b.created_at.cmp(&a.created_at),
        SortKey::CreatedAsc => a.created_at.cmp(&b.created_at),
        SortKey::TitleAsc => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::TitleDesc => b.title.to_lowercase().cmp(&a.title.to_lowercase()),
        SortKey::DueDateAsc => compare_due_dates(a, b, false),
        SortKey::DueDateDesc => compare_due_dates(a, b, true),
        SortKey::PriorityDesc => b.priority.cmp(&a.priority),
        SortKey::PriorityAsc => a.priority.cmp(&b.priority),
    }
}

/// Undated tasks sort after all dated tasks regardless of direction
fn compare_due_dates(a: &Task, b: &Task, descending: bool) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(da), Some(db)) => {
            if descending {
                db.cmp(&da)
            } else {
                da.cmp(&db)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Keep tasks whose title or description contains `query`, ignoring case.
/// A blank query matches everything.
pub fn search_tasks(tasks: &[Task], query: &str) -> Vec<Task> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return tasks.to_vec();
    }

    tasks
        .iter()
        .filter(|task| {
            task.title.to_lowercase().contains(&needle)
                || task
                    .description
                    .as_ref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
