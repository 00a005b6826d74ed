use serde::{Deserialize, Serialize};
use ta_services::Source;

#[derive(Deserialize, Serialize)]
pub struct QuestionResponse {
    pub question: String,
    pub answer: String,
    pub sources: Vec<Source>,
    pub confidence: f32,
}
