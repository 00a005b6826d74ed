use crate::config::Settings;
use crate::models::*;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

const EXTRACTION_PROMPT: &str =
    "Extract all text visible in this image. Return only the extracted text, \
     with no commentary. If the image contains no text, return nothing.";

/// Narrow contract for the image-to-text collaborator.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns the text found in the base64-encoded image. May be empty.
    async fn extract_text(&self, image_base64: &str) -> Result<String>;
}

/// OCR via an OpenAI-compatible vision model.
pub struct OcrService {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OcrService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: Client::new(),
            base_url: settings.openai_base_url.trim_end_matches('/').to_string(),
            api_key: settings.openai_api_key.clone(),
            model: settings.vision_model.clone(),
        }
    }

    fn build_request(&self, image_base64: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart {
                        kind: "text".to_string(),
                        text: Some(EXTRACTION_PROMPT.to_string()),
                        image_url: None,
                    },
                    ContentPart {
                        kind: "image_url".to_string(),
                        text: None,
                        image_url: Some(ImageUrl {
                            // Vision backends sniff the payload; the prefix only
                            // has to be a valid image mime.
                            url: format!("data:image/png;base64,{}", image_base64),
                        }),
                    },
                ],
            }],
            max_tokens: 512,
        }
    }
}

#[async_trait]
impl TextExtractor for OcrService {
    async fn extract_text(&self, image_base64: &str) -> Result<String> {
        log::info!("Extracting text via {}", self.model);

        let url = format!("{}/chat/completions", self.base_url);
        let request = self.build_request(image_base64);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("Vision API error: {}", error_text));
        }

        let completion: ChatCompletionResponse = response.json().await?;

        let text = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        Ok(text)
    }
}
