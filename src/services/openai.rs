//! Azure-OpenAI-style REST client implementing both scoring collaborators

use crate::config::ServiceConfig;
use crate::error::{RankerError, Result};
use crate::ranking::judgment::Judgment;
use crate::services::{prompts, EmbeddingService, JudgmentService};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_version: String,
    embedding_deployment: String,
    judgment_deployment: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl OpenAiClient {
    pub fn new(config: &ServiceConfig, api_key: String) -> Result<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(RankerError::Configuration(
                "service endpoint is not configured".to_string(),
            ));
        }
        if api_key.trim().is_empty() {
            return Err(RankerError::Configuration(
                "service API key is not configured".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            api_version: config.api_version.clone(),
            embedding_deployment: config.embedding_deployment.clone(),
            judgment_deployment: config.judgment_deployment.clone(),
        })
    }

    fn deployment_url(&self, deployment: &str, operation: &str) -> String {
        format!(
            "{}/openai/deployments/{}/{}?api-version={}",
            self.endpoint, deployment, operation, self.api_version
        )
    }
}

#[async_trait]
impl EmbeddingService for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        // Contract: empty input returns an empty vector, never an error.
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = self.deployment_url(&self.embedding_deployment, "embeddings");
        let response = self
            .http
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&json!({ "input": text }))
            .send()
            .await?
            .error_for_status()?;

        let body: EmbeddingResponse = response.json().await?;
        body.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| {
                RankerError::Embedding("embedding response contained no data".to_string())
            })
    }
}

#[async_trait]
impl JudgmentService for OpenAiClient {
    async fn judge(&self, candidate_text: &str, query_text: &str) -> Result<Judgment> {
        let messages = prompts::build_judgment_messages(candidate_text, query_text);

        let url = self.deployment_url(&self.judgment_deployment, "chat/completions");
        let response = self
            .http
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&json!({
                "messages": messages,
                "temperature": 0.1,
                "max_tokens": 1500,
                "response_format": { "type": "json_object" },
            }))
            .send()
            .await?
            .error_for_status()?;

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                RankerError::Judgment("judgment response contained no choices".to_string())
            })?;

        Judgment::from_response(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;

    #[test]
    fn test_rejects_missing_endpoint() {
        let config = ServiceConfig {
            endpoint: String::new(),
            ..ServiceConfig::default()
        };
        assert!(OpenAiClient::new(&config, "key".to_string()).is_err());
    }

    #[test]
    fn test_rejects_missing_api_key() {
        let config = ServiceConfig {
            endpoint: "https://example.openai.azure.com".to_string(),
            ..ServiceConfig::default()
        };
        assert!(OpenAiClient::new(&config, "  ".to_string()).is_err());
    }

    #[test]
    fn test_deployment_url_shape() {
        let config = ServiceConfig {
            endpoint: "https://example.openai.azure.com/".to_string(),
            ..ServiceConfig::default()
        };
        let client = OpenAiClient::new(&config, "key".to_string()).unwrap();
        let url = client.deployment_url("text-embedding-3-small", "embeddings");
        assert!(url.starts_with(
            "https://example.openai.azure.com/openai/deployments/text-embedding-3-small/embeddings?api-version="
        ));
    }

    #[tokio::test]
    async fn test_empty_input_embeds_to_empty_vector_without_network() {
        let config = ServiceConfig {
            endpoint: "https://example.openai.azure.com".to_string(),
            ..ServiceConfig::default()
        };
        let client = OpenAiClient::new(&config, "key".to_string()).unwrap();
        let embedding = client.embed("   \n  ").await.unwrap();
        assert!(embedding.is_empty());
    }
}
