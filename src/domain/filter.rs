use super::enums::{PriorityFilter, StatusFilter};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The full set of list-filtering criteria.
///
/// Field names follow the wire contract (camelCase) so a serialized filter
/// round-trips unchanged between the form state and any backend caller.
/// `overdue` and `due_soon` are independent toggles; when both are on a
/// task passes by matching either one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    /// Tag ids the task must all carry (subset semantics, not any-of)
    pub selected_tag_ids: Vec<String>,
    /// Inclusive lower bound on the due date
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the due date
    pub date_to: Option<NaiveDate>,
    pub overdue: bool,
    pub due_soon: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            priority: PriorityFilter::All,
            selected_tag_ids: Vec::new(),
            date_from: None,
            date_to: None,
            overdue: false,
            due_soon: false,
        }
    }
}

impl FilterState {
    /// Number of criteria that differ from the default, for the filter badge
    pub fn active_count(&self) -> usize {
        [
            self.status != StatusFilter::All,
            self.priority != PriorityFilter::All,
            !self.selected_tag_ids.is_empty(),
            self.date_from.is_some(),
            self.date_to.is_some(),
            self.overdue,
            self.due_soon,
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    /// True when no criterion is active
    pub fn is_default(&self) -> bool {
        self.active_count() == 0
    }
}
