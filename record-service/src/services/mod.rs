pub mod database;
pub mod metrics;

pub use database::{MongoDb, RecordStore, LIST_LIMIT};
pub use metrics::{get_metrics, init_metrics};
