use crate::metrics::Record;
use reqwest::{
    header::CONTENT_TYPE,
    Client as HttpClient,
    StatusCode,
};
use std::time::Duration;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("failed serializing batch: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed sending batch: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server rejected batch ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
}

/// Posts batches to the collection server.
#[derive(Clone)]
pub struct Sender {
    http_client: HttpClient,
    address: Url,
    timeout: Duration,
}

impl Sender {
    pub fn new(http_client: HttpClient, address: Url, timeout: Duration) -> Self {
        Self {
            http_client,
            address,
            timeout,
        }
    }

    /// Delivers one batch as a JSON array. The server acknowledges with `200`
    /// and an empty body; anything else is a rejection carrying the body.
    pub async fn send(&self, batch: &[Record]) -> Result<(), DeliveryError> {
        let payload = serde_json::to_vec(batch)?;
        debug!(records = batch.len(), "sending {}", String::from_utf8_lossy(&payload));

        let response = self
            .http_client
            .post(self.address.clone())
            .timeout(self.timeout)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK || !body.is_empty() {
            return Err(DeliveryError::Rejected { status, body });
        }
        Ok(())
    }
}
