use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tasksift::domain::{
    FilterState, PriorityFilter, RecurrencePattern, RecurrenceRule, SortKey, StatusFilter, Task,
};
use tasksift::query::{filter_tasks, search_tasks, sort_tasks};

#[derive(Parser)]
#[command(name = "tasksift")]
#[command(about = "Inspect task list snapshots: filter, sort, and expand recurrence rules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter, search, and sort a JSON task snapshot
    List {
        /// Path to a JSON file containing an array of tasks
        #[arg(short, long)]
        input: PathBuf,
        /// Status criterion: all, pending, or completed
        #[arg(long)]
        status: Option<String>,
        /// Priority criterion: all, high, medium, or low
        #[arg(long)]
        priority: Option<String>,
        /// Tag id the tasks must carry (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Inclusive due-date lower bound (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Inclusive due-date upper bound (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Only tasks already past due
        #[arg(long)]
        overdue: bool,
        /// Only tasks due within three days
        #[arg(long)]
        due_soon: bool,
        /// Case-insensitive text search on title and description
        #[arg(long)]
        search: Option<String>,
        /// Sort key, e.g. created_desc or due_date_asc
        #[arg(short, long)]
        sort: Option<String>,
    },
    /// Expand a recurrence rule into occurrence dates
    Expand {
        /// Recurrence pattern: daily, weekly, or monthly
        #[arg(long)]
        pattern: String,
        /// Repeat every N periods
        #[arg(long, default_value_t = 1)]
        interval: i32,
        /// Comma-separated weekday indices, 0=Sun .. 6=Sat (weekly only)
        #[arg(long)]
        week_days: Option<String>,
        /// Day of month (monthly only)
        #[arg(long, default_value_t = 1)]
        month_day: i32,
        /// First occurrence date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Expansion horizon (YYYY-MM-DD)
        #[arg(long)]
        horizon: String,
        /// Rule end date (YYYY-MM-DD); omitted means the rule never ends
        #[arg(long)]
        end: Option<String>,
    },
    /// Print a rule's next occurrence after a date
    Next {
        /// Recurrence pattern: daily, weekly, or monthly
        #[arg(long)]
        pattern: String,
        /// Repeat every N periods
        #[arg(long, default_value_t = 1)]
        interval: i32,
        /// Comma-separated weekday indices, 0=Sun .. 6=Sat (weekly only)
        #[arg(long)]
        week_days: Option<String>,
        /// Day of month (monthly only)
        #[arg(long, default_value_t = 1)]
        month_day: i32,
        /// The date of the occurrence just completed (YYYY-MM-DD)
        #[arg(long)]
        after: String,
        /// Rule end date (YYYY-MM-DD); omitted means the rule never ends
        #[arg(long)]
        end: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List {
            input,
            status,
            priority,
            tags,
            from,
            to,
            overdue,
            due_soon,
            search,
            sort,
        } => {
            let tasks = load_snapshot(&input)?;
            let filter = build_filter(
                status.as_deref(),
                priority.as_deref(),
                tags,
                from.as_deref(),
                to.as_deref(),
                overdue,
                due_soon,
            )?;

            let mut listed = filter_tasks(&tasks, &filter, Local::now());
            if let Some(query) = search.as_deref() {
                listed = search_tasks(&listed, query);
            }
            if let Some(key) = sort.as_deref() {
                listed = sort_tasks(&listed, SortKey::parse(key)?);
            }

            if listed.is_empty() {
                println!("No tasks match.");
            } else {
                for task in &listed {
                    println!("{}", render_task(task));
                }
                println!();
                println!("{} of {} tasks", listed.len(), tasks.len());
            }
            Ok(())
        }
        Commands::Expand {
            pattern,
            interval,
            week_days,
            month_day,
            start,
            horizon,
            end,
        } => {
            let rule = build_rule(&pattern, interval, week_days.as_deref(), month_day, end.as_deref())?;
            let start = parse_date(&start)?;
            let horizon = parse_date(&horizon)?;

            let occurrences = rule.expand_occurrences(start, horizon);
            if occurrences.is_empty() {
                println!("No occurrences in window.");
            } else {
                for date in &occurrences {
                    println!("{date}");
                }
            }
            Ok(())
        }
        Commands::Next {
            pattern,
            interval,
            week_days,
            month_day,
            after,
            end,
        } => {
            let rule = build_rule(&pattern, interval, week_days.as_deref(), month_day, end.as_deref())?;
            let after = parse_date(&after)?;

            match rule.next_occurrence(after) {
                Some(date) => println!("{date}"),
                None => println!("No further occurrences."),
            }
            Ok(())
        }
    }
}

/// Read a JSON snapshot (an array of tasks as the backend serves them)
fn load_snapshot(path: &Path) -> Result<Vec<Task>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let tasks = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;
    Ok(tasks)
}

#[allow(clippy::too_many_arguments)]
fn build_filter(
    status: Option<&str>,
    priority: Option<&str>,
    tags: Vec<String>,
    from: Option<&str>,
    to: Option<&str>,
    overdue: bool,
    due_soon: bool,
) -> Result<FilterState> {
    Ok(FilterState {
        status: match status {
            Some(value) => StatusFilter::parse(value)?,
            None => StatusFilter::All,
        },
        priority: match priority {
            Some(value) => PriorityFilter::parse(value)?,
            None => PriorityFilter::All,
        },
        selected_tag_ids: tags,
        date_from: from.map(parse_date).transpose()?,
        date_to: to.map(parse_date).transpose()?,
        overdue,
        due_soon,
    })
}

fn build_rule(
    pattern: &str,
    interval: i32,
    week_days: Option<&str>,
    month_day: i32,
    end: Option<&str>,
) -> Result<RecurrenceRule> {
    Ok(RecurrenceRule {
        enabled: true,
        pattern: RecurrencePattern::parse(pattern)?,
        interval,
        week_days: week_days.map(parse_week_days).transpose()?.unwrap_or_default(),
        month_day,
        end_date: end.map(parse_date).transpose()?,
        never_ends: end.is_none(),
    })
}

fn parse_week_days(value: &str) -> Result<Vec<u8>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u8>()
                .with_context(|| format!("Invalid weekday index '{part}'. Use 0 (Sun) to 6 (Sat)"))
        })
        .collect()
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))
}

fn render_task(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!("[{}] {} ({})", mark, task.title, task.priority.as_str());
    if let Some(due) = task.due_date {
        line.push_str(&format!("  due {due}"));
        if let Some(time) = task.due_time {
            line.push_str(&format!(" {}", time.format("%H:%M")));
        }
    }
    for tag in &task.tags {
        line.push_str(&format!("  #{tag}"));
    }
    line
}
