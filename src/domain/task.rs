use super::enums::Priority;
use crate::error::Error;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum task title length after trimming
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum task description length
pub const MAX_DESCRIPTION_LEN: usize = 1000;
/// Maximum tag name length after trimming
pub const MAX_TAG_NAME_LEN: usize = 30;

/// Default tag color when none is picked
pub const DEFAULT_TAG_COLOR: &str = "#6B7280";

/// Colors offered by the tag creation form. Arbitrary #RRGGBB values are
/// accepted too.
pub const TAG_COLOR_PALETTE: &[&str] = &[
    "#8B5CF6", "#EC4899", "#EF4444", "#F59E0B", "#10B981",
    "#3B82F6", "#6366F1", "#14B8A6", "#F97316", "#A855F7",
];

/// A single to-do item.
///
/// Field names follow the backend wire contract (camelCase), so snapshots
/// fetched by the presentation layer deserialize directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    /// Tag identifiers, insertion-ordered, unique within the task
    #[serde(default)]
    pub tags: Vec<String>,
    pub completed: bool,
    /// Set exactly when `completed` flips false -> true, cleared on true -> false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<DateTime<Local>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Clock time for the due date; meaningless without `due_date`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_time: Option<NaiveTime>,
    pub created_at: DateTime<Local>,
    /// True when this task was materialized from a recurrence rule
    #[serde(default)]
    pub is_recurring_instance: bool,
}

impl Task {
    /// Create a new pending task, validating title bounds
    pub fn new(title: &str, priority: Priority) -> Result<Self, Error> {
        let title = validate_title(title)?;

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            description: None,
            priority,
            tags: Vec::new(),
            completed: false,
            completion_date: None,
            due_date: None,
            due_time: None,
            created_at: Local::now(),
            is_recurring_instance: false,
        })
    }

    /// Set or clear the description, enforcing the length bound
    pub fn set_description(&mut self, description: Option<&str>) -> Result<(), Error> {
        match description {
            Some(text) if text.chars().count() > MAX_DESCRIPTION_LEN => {
                Err(Error::DescriptionTooLong {
                    len: text.chars().count(),
                    max: MAX_DESCRIPTION_LEN,
                })
            }
            Some(text) => {
                self.description = Some(text.to_string());
                Ok(())
            }
            None => {
                self.description = None;
                Ok(())
            }
        }
    }

    /// Attach a tag id, keeping insertion order and skipping duplicates
    pub fn add_tag(&mut self, tag_id: &str) {
        if !self.tags.iter().any(|t| t == tag_id) {
            self.tags.push(tag_id.to_string());
        }
    }

    /// Flip the completion flag, maintaining the completion-date invariant
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Local>) {
        if completed && !self.completed {
            self.completion_date = Some(now);
        } else if !completed && self.completed {
            self.completion_date = None;
        }
        self.completed = completed;
    }

    /// The moment this task falls due: the due date combined with its due
    /// time, or midnight when no time is set. `None` for undated tasks.
    pub fn due_moment(&self) -> Option<NaiveDateTime> {
        self.due_date
            .map(|date| date.and_time(self.due_time.unwrap_or(NaiveTime::MIN)))
    }

    /// Whether the due moment has already passed
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        match self.due_moment() {
            Some(due) => due < now,
            None => false,
        }
    }

    /// Whether the due moment lies within the next three days (inclusive)
    /// and has not yet passed
    pub fn is_due_soon(&self, now: NaiveDateTime) -> bool {
        match self.due_moment() {
            Some(due) => {
                let left = due.signed_duration_since(now);
                left >= chrono::Duration::zero() && left <= chrono::Duration::days(3)
            }
            None => false,
        }
    }
}

fn validate_title(title: &str) -> Result<String, Error> {
    let trimmed = title.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > MAX_TITLE_LEN {
        return Err(Error::InvalidTitle {
            len,
            max: MAX_TITLE_LEN,
        });
    }
    Ok(trimmed.to_string())
}

/// A user-defined label that tasks reference by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    /// #RRGGBB hex value
    pub color: String,
}

impl Tag {
    /// Create a tag, validating the trimmed name bound and color shape
    pub fn new(name: &str, color: &str) -> Result<Self, Error> {
        let trimmed = name.trim();
        let len = trimmed.chars().count();
        if len == 0 || len > MAX_TAG_NAME_LEN {
            return Err(Error::InvalidTagName {
                len,
                max: MAX_TAG_NAME_LEN,
            });
        }
        if !is_hex_color(color) {
            return Err(Error::InvalidTagColor(color.to_string()));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: trimmed.to_string(),
            color: color.to_string(),
        })
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_new_trims_title() {
        let task = Task::new("  Water the plants  ", Priority::Medium).unwrap();
        assert_eq!(task.title, "Water the plants");
        assert!(!task.completed);
        assert!(task.completion_date.is_none());
        assert!(!task.is_recurring_instance);
    }

    #[test]
    fn test_new_rejects_bad_titles() {
        assert!(Task::new("   ", Priority::Low).is_err());
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(Task::new(&long, Priority::Low).is_err());
        // Exactly at the limit is fine
        let max = "x".repeat(MAX_TITLE_LEN);
        assert!(Task::new(&max, Priority::Low).is_ok());
    }

    #[test]
    fn test_set_description_bound() {
        let mut task = Task::new("Test", Priority::Low).unwrap();
        let long = "y".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(task.set_description(Some(&long)).is_err());
        assert!(task.set_description(Some("short note")).is_ok());
        assert_eq!(task.description.as_deref(), Some("short note"));
        task.set_description(None).unwrap();
        assert!(task.description.is_none());
    }

    #[test]
    fn test_add_tag_skips_duplicates() {
        let mut task = Task::new("Test", Priority::Low).unwrap();
        task.add_tag("a");
        task.add_tag("b");
        task.add_tag("a");
        assert_eq!(task.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_completion_date_transitions() {
        let mut task = Task::new("Test", Priority::Low).unwrap();
        let done_at = local(2025, 6, 1, 12, 0);

        task.set_completed(true, done_at);
        assert!(task.completed);
        assert_eq!(task.completion_date, Some(done_at));

        // Completing an already-completed task keeps the original date
        task.set_completed(true, local(2025, 6, 2, 12, 0));
        assert_eq!(task.completion_date, Some(done_at));

        task.set_completed(false, local(2025, 6, 3, 12, 0));
        assert!(!task.completed);
        assert!(task.completion_date.is_none());
    }

    #[test]
    fn test_due_moment_defaults_to_midnight() {
        let mut task = Task::new("Test", Priority::Low).unwrap();
        assert!(task.due_moment().is_none());

        task.due_date = NaiveDate::from_ymd_opt(2025, 6, 10);
        let midnight = task.due_moment().unwrap();
        assert_eq!(midnight.time(), NaiveTime::MIN);

        task.due_time = NaiveTime::from_hms_opt(17, 30, 0);
        assert_eq!(
            task.due_moment().unwrap().time(),
            NaiveTime::from_hms_opt(17, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_overdue_respects_time_of_day() {
        let mut task = Task::new("Test", Priority::Low).unwrap();
        task.due_date = NaiveDate::from_ymd_opt(2025, 6, 10);
        task.due_time = NaiveTime::from_hms_opt(17, 0, 0);

        let noon = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap().and_hms_opt(12, 0, 0).unwrap();
        let evening = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap().and_hms_opt(18, 0, 0).unwrap();

        // Due later today: not overdue yet, but due soon
        assert!(!task.is_overdue(noon));
        assert!(task.is_due_soon(noon));
        // Past the due time the same day
        assert!(task.is_overdue(evening));
        assert!(!task.is_due_soon(evening));
    }

    #[test]
    fn test_due_soon_window_is_three_days() {
        let mut task = Task::new("Test", Priority::Low).unwrap();
        let now = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap().and_hms_opt(0, 0, 0).unwrap();

        task.due_date = NaiveDate::from_ymd_opt(2025, 6, 13);
        assert!(task.is_due_soon(now));

        task.due_date = NaiveDate::from_ymd_opt(2025, 6, 14);
        assert!(!task.is_due_soon(now));
    }

    #[test]
    fn test_tag_validation() {
        let tag = Tag::new("  work  ", DEFAULT_TAG_COLOR).unwrap();
        assert_eq!(tag.name, "work");
        assert_eq!(tag.color, DEFAULT_TAG_COLOR);

        assert!(Tag::new("", "#112233").is_err());
        assert!(Tag::new(&"t".repeat(MAX_TAG_NAME_LEN + 1), "#112233").is_err());
        assert!(Tag::new("ok", "blue").is_err());
        assert!(Tag::new("ok", "#11223").is_err());
        assert!(Tag::new("ok", "#11223G").is_err());
        for color in TAG_COLOR_PALETTE {
            assert!(Tag::new("ok", color).is_ok());
        }
    }

    #[test]
    fn test_task_serializes_with_wire_field_names() {
        let mut task = Task::new("Wire", Priority::High).unwrap();
        task.due_date = NaiveDate::from_ymd_opt(2025, 6, 10);
        task.set_completed(true, local(2025, 6, 9, 8, 0));

        let value = serde_json::to_value(&task).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "id",
            "title",
            "priority",
            "tags",
            "completed",
            "completionDate",
            "dueDate",
            "createdAt",
            "isRecurringInstance",
        ] {
            assert!(obj.contains_key(key), "missing field {key}");
        }
    }
}
