use crate::domain::model::{
    CatalogListing, ChatReply, ChatRequest, SimulationInput, SimulationResult, SummaryRequest,
    SummaryResponse,
};
use crate::utils::error::{DealMindError, Result};
use crate::utils::validation::validate_url;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Thin JSON client for a running DealMind server.
#[derive(Debug, Clone)]
pub struct DealMindClient {
    base_url: String,
    client: Client,
}

impl DealMindClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(10))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        validate_url("base_url", base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
        let status = response.status();
        tracing::debug!("API response status for {}: {}", path, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DealMindError::ServerError {
                message: format!("{} returned {}: {}", path, status, body),
            });
        }
        Ok(response.json().await?)
    }

    pub async fn health(&self) -> Result<bool> {
        let response = self.client.get(self.url("/health")).send().await?;
        Ok(response.status().is_success())
    }

    pub async fn summary(&self, brand: &str, model: &str) -> Result<SummaryResponse> {
        let request = SummaryRequest {
            brand: brand.to_string(),
            model: model.to_string(),
        };
        let response = self
            .client
            .post(self.url("/api/summary"))
            .json(&request)
            .send()
            .await?;
        Self::decode("/api/summary", response).await
    }

    pub async fn catalog(&self) -> Result<CatalogListing> {
        let response = self.client.get(self.url("/api/catalog")).send().await?;
        Self::decode("/api/catalog", response).await
    }

    pub async fn simulate(&self, input: &SimulationInput) -> Result<SimulationResult> {
        let response = self
            .client
            .post(self.url("/api/simulate"))
            .json(input)
            .send()
            .await?;
        Self::decode("/api/simulate", response).await
    }

    pub async fn chat(&self, message: &str) -> Result<ChatReply> {
        let request = ChatRequest {
            message: message.to_string(),
        };
        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(&request)
            .send()
            .await?;
        Self::decode("/api/chat", response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_validated_and_trimmed() {
        let client = DealMindClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/api/summary"), "http://localhost:5000/api/summary");

        assert!(DealMindClient::new("localhost:5000").is_err());
    }
}
