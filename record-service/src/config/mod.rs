use axum::http::{header, HeaderValue};
use serde::Deserialize;
use service_core::config::{self as core_config, env_or, require_env};
use service_core::error::AppError;
use std::env;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

#[derive(Debug, Clone, Deserialize)]
pub struct RecordConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub cors: CorsConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl RecordConfig {
    pub fn load() -> Result<Self, AppError> {
        // Common config also pulls in .env
        let common_config = core_config::Config::load()?;

        Ok(RecordConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: require_env("MONGODB_URL")?,
                database: env_or("MONGODB_DATABASE", "qwant"),
                collection: env_or("MONGODB_COLLECTION", "config"),
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&env_or("CORS_ALLOWED_ORIGINS", "*")),
            },
            observability: ObservabilityConfig {
                log_level: env_or("LOG_LEVEL", "info"),
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            },
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

impl CorsConfig {
    /// Credentialed CORS with `Content-Range` exposed. Methods and headers
    /// are mirrored from the preflight; `*` mirrors the caller's origin,
    /// since browsers refuse a literal wildcard alongside credentials.
    pub fn layer(&self) -> CorsLayer {
        let base = CorsLayer::new()
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .expose_headers([header::CONTENT_RANGE]);

        if self.allows_any_origin() {
            return base.allow_origin(AllowOrigin::mirror_request());
        }

        let origins = self
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                    None
                }
            })
            .collect::<Vec<HeaderValue>>();

        base.allow_origin(AllowOrigin::list(origins))
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}
