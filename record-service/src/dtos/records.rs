use crate::models::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordResponse {
    pub id: String,
    pub source_type: String,
    pub source: String,
    pub medium: String,
    pub term: String,
    pub content: String,
    pub name: String,
    pub geo: String,
    pub target: String,
    pub cl: String,
}

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        Self {
            id: record.id.to_hex(),
            source_type: record.source_type,
            source: record.source,
            medium: record.medium,
            term: record.term,
            content: record.content,
            name: record.name,
            geo: record.geo,
            target: record.target,
            cl: record.cl,
        }
    }
}

/// `Content-Range` value advertised by the read endpoints. The range part is
/// fixed at `0-9`; only the total varies.
pub fn content_range(total: usize) -> String {
    format!("0-9/{}", total)
}
