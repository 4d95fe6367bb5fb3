//! Query core for a personal task manager: pure filtering, sorting,
//! free-text search, and recurrence expansion over immutable task
//! snapshots.
//!
//! All operations are synchronous, side-effect free, and never mutate
//! their inputs, so they are safe to call repeatedly or concurrently from
//! independent call sites. The presentation layer supplies snapshots
//! (fetched from the backend) together with a [`domain::FilterState`],
//! [`domain::SortKey`], or [`domain::RecurrenceRule`], and renders the
//! returned lists.

pub mod domain;
pub mod error;
pub mod query;

pub use error::{Error, Result};
