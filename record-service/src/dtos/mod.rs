pub mod records;

pub use records::{content_range, RecordResponse};
