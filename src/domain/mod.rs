pub mod enums;
pub mod filter;
pub mod recurrence;
pub mod task;

pub use enums::{Priority, PriorityFilter, RecurrencePattern, SortKey, StatusFilter};
pub use filter::FilterState;
pub use recurrence::{next_instance, RecurrenceRule};
pub use task::{
    Tag, Task, DEFAULT_TAG_COLOR, MAX_DESCRIPTION_LEN, MAX_TAG_NAME_LEN, MAX_TITLE_LEN,
    TAG_COLOR_PALETTE,
};
