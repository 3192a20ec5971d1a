//! Submission endpoint client

use reqwest::Client;
use shared::{SubmissionPayload, TransportError};

use crate::external::SubmissionApi;

/// POSTs submissions as JSON to a fixed endpoint
#[derive(Clone)]
pub struct HttpSubmissionClient {
    client: Client,
    endpoint: String,
}

impl HttpSubmissionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait::async_trait]
impl SubmissionApi for HttpSubmissionClient {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            tracing::warn!(%status, endpoint = %self.endpoint, "submission rejected");
            Err(TransportError::Status(status.as_u16()))
        }
    }
}
