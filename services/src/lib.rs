pub mod config;
pub mod models;
pub mod ocr_service;
pub mod qa_service;

pub use config::Settings;
pub use models::*;
pub use ocr_service::{OcrService, TextExtractor};
pub use qa_service::{AnswerProvider, QaService};
