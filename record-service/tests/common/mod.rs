#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use mongodb::bson::{self, oid::ObjectId, Document};
use record_service::config::{CorsConfig, MongoConfig, ObservabilityConfig, RecordConfig};
use record_service::models::{Record, StoredRecord};
use record_service::services::{MongoDb, RecordStore};
use record_service::startup::{build_router, AppState, Application};
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use tower::ServiceExt;

pub const SAMPLE_ID: &str = "507f1f77bcf86cd799439011";
pub const ABSENT_ID: &str = "507f1f77bcf86cd799439099";

/// Store backed by a vector of raw documents, preserving insertion order.
#[derive(Default)]
pub struct InMemoryStore {
    documents: Vec<Document>,
}

impl InMemoryStore {
    pub fn new(records: Vec<Record>) -> Self {
        let documents = records
            .iter()
            .map(|r| bson::to_document(r).expect("Failed to encode record"))
            .collect();
        Self { documents }
    }

    /// Documents as they would sit in the collection, extra keys included.
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list(&self, limit: i64) -> Result<Vec<Record>, AppError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        self.documents
            .iter()
            .take(limit)
            .map(|d| {
                bson::from_document(d.clone())
                    .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
            })
            .collect()
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<StoredRecord>, AppError> {
        self.documents
            .iter()
            .find(|d| d.get_object_id("_id").ok() == Some(*id))
            .cloned()
            .map(StoredRecord::from_document)
            .transpose()
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store whose every call fails as if the database were unreachable.
pub struct UnavailableStore;

#[async_trait]
impl RecordStore for UnavailableStore {
    async fn list(&self, _limit: i64) -> Result<Vec<Record>, AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!(
            "server selection timeout"
        )))
    }

    async fn find_by_id(&self, _id: &ObjectId) -> Result<Option<StoredRecord>, AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!(
            "server selection timeout"
        )))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!(
            "server selection timeout"
        )))
    }
}

pub fn test_config() -> RecordConfig {
    RecordConfig {
        common: CoreConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
        },
        mongodb: MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "record_test".to_string(),
            collection: "config".to_string(),
        },
        cors: CorsConfig::default(),
        observability: ObservabilityConfig {
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub fn router_with(store: impl RecordStore + 'static) -> Router {
    router_with_config(test_config(), store)
}

pub fn router_with_config(config: RecordConfig, store: impl RecordStore + 'static) -> Router {
    build_router(AppState {
        config,
        store: Arc::new(store),
    })
}

pub fn sample_record() -> Record {
    Record {
        id: ObjectId::parse_str(SAMPLE_ID).unwrap(),
        source_type: "ads".to_string(),
        source: "google".to_string(),
        medium: "cpc".to_string(),
        term: "shoes".to_string(),
        content: "banner1".to_string(),
        name: "Jane".to_string(),
        geo: "US".to_string(),
        target: "women".to_string(),
        cl: "A".to_string(),
    }
}

pub fn generated_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| Record {
            id: ObjectId::new(),
            name: format!("campaign-{}", i),
            ..sample_record()
        })
        .collect()
}

pub async fn get(router: Router, uri: &str) -> Response {
    router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Full application bound to a random port against a live MongoDB.
pub struct TestApp {
    pub address: String,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_name = format!("record_test_{}", ObjectId::new().to_hex());

        let mut config = test_config();
        config.mongodb.database = db_name.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            db,
            db_name,
        }
    }

    pub async fn seed(&self, records: &[Record]) {
        self.db
            .records()
            .insert_many(records, None)
            .await
            .expect("Failed to seed records");
    }

    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
