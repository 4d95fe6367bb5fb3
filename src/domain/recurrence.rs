use super::enums::RecurrencePattern;
use super::task::Task;
use chrono::{DateTime, Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Repeat configuration for a task.
///
/// Field names follow the wire contract (camelCase). Out-of-range numerics
/// are kept as given and clamped at use, matching the permissive form
/// editing experience: `interval` to 1..=99, `month_day` to 1..=31 and then
/// to the length of the month in question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecurrenceRule {
    pub enabled: bool,
    pub pattern: RecurrencePattern,
    /// Repeat every N days/weeks/months
    pub interval: i32,
    /// Weekday indices 0 (Sun) to 6 (Sat); weekly pattern only
    pub week_days: Vec<u8>,
    /// Day of month; monthly pattern only
    pub month_day: i32,
    /// Ignored while `never_ends` is true
    pub end_date: Option<NaiveDate>,
    pub never_ends: bool,
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self {
            enabled: false,
            pattern: RecurrencePattern::Daily,
            interval: 1,
            week_days: Vec::new(),
            month_day: 1,
            end_date: None,
            never_ends: true,
        }
    }
}

impl RecurrenceRule {
    /// Expand this rule into every occurrence date up to `horizon` (or the
    /// rule's end date, whichever comes first). Deterministic and always
    /// finite; a disabled rule or an already-elapsed window yields an empty
    /// vec.
    ///
    /// With `week_days` set, the starting week is anchored whole: a
    /// selected weekday falling earlier in `start`'s week than `start`
    /// itself is still produced.
    pub fn expand_occurrences(&self, start: NaiveDate, horizon: NaiveDate) -> Vec<NaiveDate> {
        if !self.enabled {
            return Vec::new();
        }
        let bound = self.end_bound(horizon);
        if bound < start {
            return Vec::new();
        }

        match self.pattern {
            RecurrencePattern::Daily => step_days(start, bound, self.effective_interval()),
            RecurrencePattern::Weekly => {
                let week_days = self.selected_week_days();
                if week_days.is_empty() {
                    step_days(start, bound, self.effective_interval() * 7)
                } else {
                    self.expand_weekly(start, bound, &week_days)
                }
            }
            RecurrencePattern::Monthly => self.expand_monthly(start, bound),
        }
    }

    /// The first occurrence strictly after `from`, used to schedule the
    /// follow-up when a recurring instance completes. `None` when the rule
    /// is disabled or the computed date lands past a set end date.
    pub fn next_occurrence(&self, from: NaiveDate) -> Option<NaiveDate> {
        if !self.enabled {
            return None;
        }

        let next = match self.pattern {
            RecurrencePattern::Daily => from.checked_add_days(Days::new(self.effective_interval()))?,
            RecurrencePattern::Weekly => {
                let week_days = self.selected_week_days();
                if week_days.is_empty() {
                    from.checked_add_days(Days::new(self.effective_interval() * 7))?
                } else {
                    // Fall back to a plain interval step if the scan window
                    // runs out (large intervals)
                    match self.scan_next_week_day(from, &week_days) {
                        Some(date) => date,
                        None => from.checked_add_days(Days::new(self.effective_interval() * 7))?,
                    }
                }
            }
            RecurrencePattern::Monthly => month_occurrence(
                from.year(),
                from.month(),
                self.effective_interval() as i32,
                self.effective_month_day(),
            )?,
        };

        match (self.never_ends, self.end_date) {
            (false, Some(end)) if next > end => None,
            _ => Some(next),
        }
    }

    fn expand_weekly(&self, start: NaiveDate, bound: NaiveDate, week_days: &[u8]) -> Vec<NaiveDate> {
        let step = self.effective_interval() * 7;
        let mut out = Vec::new();
        let mut week = week_start(start);

        while week <= bound {
            for &day in week_days {
                let Some(date) = week.checked_add_days(Days::new(u64::from(day))) else {
                    continue;
                };
                if date > bound {
                    break;
                }
                out.push(date);
            }
            match week.checked_add_days(Days::new(step)) {
                Some(next) => week = next,
                None => break,
            }
        }

        out
    }

    fn expand_monthly(&self, start: NaiveDate, bound: NaiveDate) -> Vec<NaiveDate> {
        let step = self.interval.clamp(1, 99);
        let day = self.effective_month_day();
        let mut out = Vec::new();
        let mut offset = 0i32;

        loop {
            let Some(date) = month_occurrence(start.year(), start.month(), offset, day) else {
                break;
            };
            if date > bound {
                break;
            }
            // The starting month's occurrence may precede the start date
            if date >= start {
                out.push(date);
            }
            offset += step;
        }

        out
    }

    /// Scan forward day by day for the next selected weekday in an eligible
    /// week. Weeks are eligible every `interval` weeks counted from the
    /// week containing `from`; days later in that same week count. The scan
    /// is bounded at 400 days.
    fn scan_next_week_day(&self, from: NaiveDate, week_days: &[u8]) -> Option<NaiveDate> {
        let interval = self.effective_interval() as i64;
        let anchor = week_start(from);
        let mut current = from.succ_opt()?;

        for _ in 0..400 {
            let weeks_apart = week_start(current).signed_duration_since(anchor).num_days() / 7;
            if weeks_apart % interval == 0
                && week_days.contains(&(current.weekday().num_days_from_sunday() as u8))
            {
                return Some(current);
            }
            current = current.succ_opt()?;
        }

        None
    }

    fn end_bound(&self, horizon: NaiveDate) -> NaiveDate {
        match (self.never_ends, self.end_date) {
            (false, Some(end)) if end < horizon => end,
            _ => horizon,
        }
    }

    fn effective_interval(&self) -> u64 {
        self.interval.clamp(1, 99) as u64
    }

    fn effective_month_day(&self) -> u32 {
        self.month_day.clamp(1, 31) as u32
    }

    /// Valid weekday indices, sorted and de-duplicated
    fn selected_week_days(&self) -> Vec<u8> {
        let mut days: Vec<u8> = self.week_days.iter().copied().filter(|d| *d <= 6).collect();
        days.sort_unstable();
        days.dedup();
        days
    }
}

/// Materialize the follow-up task for a completed recurring instance: same
/// template fields, fresh identity, due on the rule's next occurrence after
/// the completed task's due date (today when it had none). `None` when the
/// source task is still pending or the rule produces no further occurrence.
pub fn next_instance(task: &Task, rule: &RecurrenceRule, now: DateTime<Local>) -> Option<Task> {
    if !task.completed {
        return None;
    }
    let from = task.due_date.unwrap_or_else(|| now.date_naive());
    let next_due = rule.next_occurrence(from)?;

    Some(Task {
        id: Uuid::new_v4(),
        title: task.title.clone(),
        description: task.description.clone(),
        priority: task.priority,
        tags: task.tags.clone(),
        completed: false,
        completion_date: None,
        due_date: Some(next_due),
        due_time: task.due_time,
        created_at: now,
        is_recurring_instance: true,
    })
}

/// The Sunday starting the week that contains `date`
fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date.checked_sub_days(Days::new(u64::from(offset))).unwrap_or(date)
}

fn step_days(start: NaiveDate, bound: NaiveDate, step: u64) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut current = start;
    while current <= bound {
        out.push(current);
        match current.checked_add_days(Days::new(step)) {
            Some(next) => current = next,
            None => break,
        }
    }
    out
}

/// The date `offset` months after (year, month), on `day` clamped to the
/// target month's length
fn month_occurrence(year: i32, month: u32, offset: i32, day: u32) -> Option<NaiveDate> {
    let months = year.checked_mul(12)?.checked_add(month as i32 - 1)?.checked_add(offset)?;
    let target_year = months.div_euclid(12);
    let target_month = (months.rem_euclid(12) + 1) as u32;
    let clamped = day.min(days_in_month(target_year, target_month));
    NaiveDate::from_ymd_opt(target_year, target_month, clamped)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}
