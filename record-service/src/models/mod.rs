pub mod record;

pub use record::{parse_record_id, Record, StoredRecord};
