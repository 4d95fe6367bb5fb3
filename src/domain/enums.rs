use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Task priority level. Ordering is Low < Medium < High so comparators
/// can sort on it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Parse a priority from its wire value like "high"
    pub fn parse(value: &str) -> Result<Self, Error> {
        match value {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(Error::UnrecognizedOption {
                field: "priority",
                value: value.to_string(),
            }),
        }
    }

    /// Convert priority to its wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Completion-status filter criterion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    /// Parse a status filter from its wire value like "pending"
    pub fn parse(value: &str) -> Result<Self, Error> {
        match value {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(Error::UnrecognizedOption {
                field: "status",
                value: value.to_string(),
            }),
        }
    }

    /// Convert status filter to its wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Check whether a task with the given completion flag passes
    pub fn matches(&self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !completed,
            Self::Completed => completed,
        }
    }
}

/// Priority filter criterion ("all" or one concrete level)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl PriorityFilter {
    /// Parse a priority filter from its wire value like "all"
    pub fn parse(value: &str) -> Result<Self, Error> {
        match value {
            "all" => Ok(Self::All),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(Error::UnrecognizedOption {
                field: "priority",
                value: value.to_string(),
            }),
        }
    }

    /// Convert priority filter to its wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Check whether a task with the given priority passes
    pub fn matches(&self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::High => priority == Priority::High,
            Self::Medium => priority == Priority::Medium,
            Self::Low => priority == Priority::Low,
        }
    }
}

/// Sort order for task lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    CreatedDesc,
    CreatedAsc,
    TitleAsc,
    TitleDesc,
    DueDateAsc,
    DueDateDesc,
    PriorityDesc,
    PriorityAsc,
}

impl SortKey {
    /// Parse a sort key from its wire value like "created_desc"
    pub fn parse(value: &str) -> Result<Self, Error> {
        match value {
            "created_desc" => Ok(Self::CreatedDesc),
            "created_asc" => Ok(Self::CreatedAsc),
            "title_asc" => Ok(Self::TitleAsc),
            "title_desc" => Ok(Self::TitleDesc),
            "due_date_asc" => Ok(Self::DueDateAsc),
            "due_date_desc" => Ok(Self::DueDateDesc),
            "priority_desc" => Ok(Self::PriorityDesc),
            "priority_asc" => Ok(Self::PriorityAsc),
            _ => Err(Error::UnrecognizedOption {
                field: "sort key",
                value: value.to_string(),
            }),
        }
    }

    /// Convert sort key to its wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedDesc => "created_desc",
            Self::CreatedAsc => "created_asc",
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
            Self::DueDateAsc => "due_date_asc",
            Self::DueDateDesc => "due_date_desc",
            Self::PriorityDesc => "priority_desc",
            Self::PriorityAsc => "priority_asc",
        }
    }
}

/// Repeat cadence of a recurrence rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePattern {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl RecurrencePattern {
    /// Parse a pattern from its wire value like "weekly"
    pub fn parse(value: &str) -> Result<Self, Error> {
        match value {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(Error::UnrecognizedOption {
                field: "pattern",
                value: value.to_string(),
            }),
        }
    }

    /// Convert pattern to its wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parse() {
        assert_eq!(Priority::parse("high"), Ok(Priority::High));
        assert_eq!(Priority::parse("medium"), Ok(Priority::Medium));
        assert_eq!(Priority::parse("low"), Ok(Priority::Low));
        assert!(matches!(
            Priority::parse("urgent"),
            Err(Error::UnrecognizedOption { field: "priority", .. })
        ));
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_status_filter_matches() {
        assert!(StatusFilter::All.matches(true));
        assert!(StatusFilter::All.matches(false));
        assert!(StatusFilter::Pending.matches(false));
        assert!(!StatusFilter::Pending.matches(true));
        assert!(StatusFilter::Completed.matches(true));
        assert!(!StatusFilter::Completed.matches(false));
    }

    #[test]
    fn test_status_filter_parse_rejects_unknown() {
        let err = StatusFilter::parse("done").unwrap_err();
        assert_eq!(err.to_string(), "unrecognized status option: 'done'");
    }

    #[test]
    fn test_priority_filter_matches() {
        assert!(PriorityFilter::All.matches(Priority::Low));
        assert!(PriorityFilter::High.matches(Priority::High));
        assert!(!PriorityFilter::High.matches(Priority::Medium));
    }

    #[test]
    fn test_sort_key_round_trip() {
        let keys = [
            "created_desc",
            "created_asc",
            "title_asc",
            "title_desc",
            "due_date_asc",
            "due_date_desc",
            "priority_desc",
            "priority_asc",
        ];
        for key in keys {
            assert_eq!(SortKey::parse(key).unwrap().as_str(), key);
        }
        assert!(SortKey::parse("updated_desc").is_err());
    }

    #[test]
    fn test_pattern_parse() {
        assert_eq!(RecurrencePattern::parse("daily"), Ok(RecurrencePattern::Daily));
        assert_eq!(RecurrencePattern::parse("weekly"), Ok(RecurrencePattern::Weekly));
        assert_eq!(RecurrencePattern::parse("monthly"), Ok(RecurrencePattern::Monthly));
        assert!(RecurrencePattern::parse("yearly").is_err());
    }

    #[test]
    fn test_wire_values_survive_serde() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&StatusFilter::Pending).unwrap(), "\"pending\"");
        assert_eq!(serde_json::to_string(&SortKey::DueDateAsc).unwrap(), "\"due_date_asc\"");
        assert_eq!(
            serde_json::from_str::<RecurrencePattern>("\"monthly\"").unwrap(),
            RecurrencePattern::Monthly
        );
    }
}
