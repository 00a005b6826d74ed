use crate::config::Settings;
use crate::models::*;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Narrow contract for the question-answering collaborator.
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    async fn get_answer(&self, question: &str) -> Result<AnswerResult>;
    async fn get_stats(&self) -> Result<serde_json::Value>;
}

/// HTTP client for the question-answering backend.
pub struct QaService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl QaService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: Client::new(),
            base_url: settings.qa_base_url.trim_end_matches('/').to_string(),
            api_key: settings.qa_api_key.clone(),
        }
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl AnswerProvider for QaService {
    async fn get_answer(&self, question: &str) -> Result<AnswerResult> {
        log::info!("Requesting answer ({} chars)", question.chars().count());

        let url = format!("{}/answer", self.base_url);
        let request = AnswerRequest {
            question: question.to_string(),
        };

        let response = self
            .authorized(self.client.post(&url).json(&request))
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("Answer backend error: {}", error_text));
        }

        let result: AnswerResult = response.json().await?;
        Ok(result)
    }

    async fn get_stats(&self) -> Result<serde_json::Value> {
        let url = format!("{}/stats", self.base_url);

        let response = self.authorized(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("Answer backend error: {}", error_text));
        }

        // Shape is owned by the backend; passed through untouched.
        let stats: serde_json::Value = response.json().await?;
        Ok(stats)
    }
}
