//! Search, filter and sort over a classified message collection.

mod engine;
mod spec;

pub use engine::query;
pub use spec::{QuerySpec, SortField, SortOrder};
