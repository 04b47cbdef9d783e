use crate::models::{Record, StoredRecord};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{ClientOptions, FindOptions},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

/// Upper bound on records returned by a single listing.
pub const LIST_LIMIT: i64 = 100;

/// Read access to stored records, shared by every in-flight request.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Up to `limit` records in natural storage order.
    async fn list(&self, limit: i64) -> Result<Vec<Record>, AppError>;

    /// The record with `id`, together with the key count of the stored
    /// document.
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<StoredRecord>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        options.app_name = Some("record-service".to_string());

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(
            database = %database,
            collection = %collection,
            "MongoDB client ready"
        );
        Ok(Self {
            client,
            db,
            collection: collection.to_string(),
        })
    }

    pub fn records(&self) -> Collection<Record> {
        self.db.collection(&self.collection)
    }

    /// The same collection read as untyped documents.
    pub fn raw_records(&self) -> Collection<Document> {
        self.db.collection(&self.collection)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Close the connection pool. Other clones of this handle must not be
    /// used afterwards.
    pub async fn shutdown(self) {
        tracing::info!("Closing MongoDB client");
        self.client.shutdown().await;
    }
}

#[async_trait]
impl RecordStore for MongoDb {
    async fn list(&self, limit: i64) -> Result<Vec<Record>, AppError> {
        let options = FindOptions::builder().limit(limit).build();

        let cursor = self.records().find(None, options).await.map_err(|e| {
            tracing::error!("Failed to query {} collection: {}", self.collection, e);
            AppError::from(e)
        })?;

        let records: Vec<Record> = cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to read {} cursor: {}", self.collection, e);
            AppError::from(e)
        })?;
        Ok(records)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<StoredRecord>, AppError> {
        let document = self
            .raw_records()
            .find_one(doc! { "_id": *id }, None)
            .await
            .map_err(|e| {
                tracing::error!(id = %id, "Failed to fetch record: {}", e);
                AppError::from(e)
            })?;

        document
            .map(|document| {
                StoredRecord::from_document(document).map_err(|e| {
                    tracing::error!(id = %id, "Stored record does not match schema: {}", e);
                    e
                })
            })
            .transpose()
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
