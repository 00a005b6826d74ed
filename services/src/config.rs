use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Process-wide settings, resolved once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub frontend_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub max_question_chars: usize,
    pub qa_base_url: String,
    pub qa_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_api_key: String,
    pub vision_model: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))?;

        Ok(Self {
            bind_addr: env::var("TA_BIND").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            frontend_dir: env::var("TA_FRONTEND_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("frontend")),
            max_upload_bytes: env::var("TA_MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5 * 1024 * 1024),
            max_question_chars: env::var("TA_MAX_QUESTION_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8_000),
            qa_base_url: env::var("QA_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8100".to_string()),
            qa_api_key: env::var("QA_API_KEY").ok(),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_api_key,
            vision_model: env::var("VISION_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_when_env_is_unset() {
        for var in [
            "TA_BIND",
            "TA_FRONTEND_DIR",
            "TA_MAX_UPLOAD_BYTES",
            "TA_MAX_QUESTION_CHARS",
            "QA_BASE_URL",
            "QA_API_KEY",
            "OPENAI_BASE_URL",
            "VISION_MODEL",
        ] {
            env::remove_var(var);
        }
        env::set_var("OPENAI_API_KEY", "test-key");

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.bind_addr, "0.0.0.0:8000");
        assert_eq!(settings.frontend_dir, PathBuf::from("frontend"));
        assert_eq!(settings.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(settings.max_question_chars, 8_000);
        assert_eq!(settings.qa_base_url, "http://127.0.0.1:8100");
        assert!(settings.qa_api_key.is_none());
        assert_eq!(settings.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(settings.openai_api_key, "test-key");
        assert_eq!(settings.vision_model, "gpt-4o-mini");
    }
}
