//! Dataset model and file ingestion.

mod loader;
mod record;

pub use loader::load_records;
pub use record::{as_number, column_names, is_null_like, render, Record};
