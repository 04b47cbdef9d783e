use mongodb::bson::{self, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

/// A campaign tracking config as stored in the `config` collection.
///
/// Every text field is required; documents missing one fail to decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: ObjectId,
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

/// A record fetched by id, with the number of keys the served document
/// holds: every stored key plus the `id` alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub record: Record,
    pub field_count: usize,
}

impl StoredRecord {
    pub fn from_document(document: Document) -> Result<Self, AppError> {
        let field_count = document.len() + usize::from(!document.contains_key("id"));
        let record = bson::from_document(document).map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Malformed stored record: {}", e))
        })?;
        Ok(Self {
            record,
            field_count,
        })
    }
}

impl TryFrom<Record> for StoredRecord {
    type Error = AppError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let document = bson::to_document(&record).map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Failed to encode record: {}", e))
        })?;
        Self::from_document(document)
    }
}

/// Parse a path identifier into an `ObjectId`.
pub fn parse_record_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("invalid identifier: {}", raw)))
}
