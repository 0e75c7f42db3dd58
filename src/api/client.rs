use super::types::*;
use crate::{Error, Result, config::BackendConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

#[async_trait]
pub trait QueryClient: Send + Sync {
    async fn ask(&self, request: QueryRequest) -> Result<QueryResponse>;
}

pub struct HttpQueryClient {
    client: reqwest::Client,
    url: String,
}

impl HttpQueryClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.endpoint_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl QueryClient for HttpQueryClient {
    async fn ask(&self, request: QueryRequest) -> Result<QueryResponse> {
        debug!(
            "Posting question for session {} to {}",
            request.session_id, self.url
        );

        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => warn!("Backend rejected query ({}): {}", status, err.error),
                Err(_) => warn!("Backend rejected query ({})", status),
            }
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let body: QueryResponse = serde_json::from_slice(&bytes)?;

        debug!("Received answer for session {}", request.session_id);
        Ok(body)
    }
}
