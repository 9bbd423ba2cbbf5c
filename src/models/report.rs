use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// One entry of the AI report history. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub summary: String,
    pub content: String,
    /// Older histories may carry unclamped or textual scores
    #[serde(deserialize_with = "lenient_score")]
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

impl AnalysisReport {
    pub fn new(summary: String, content: String, score: u8, model_name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            summary,
            content,
            score: score.min(100),
            model_name,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Number(f64),
    Text(String),
}

fn lenient_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RawScore::deserialize(deserializer)? {
        RawScore::Number(n) => n,
        RawScore::Text(text) => text.trim().parse().unwrap_or(0.0),
    };
    Ok(clamp_score(value))
}

/// Round into 0..=100. NaN becomes 0.
fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Output of a single analysis exchange, before it is stamped as a report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub score: u8,
    pub summary: String,
    pub content: String,
    pub model_name: Option<String>,
}

impl From<AnalysisResult> for AnalysisReport {
    fn from(result: AnalysisResult) -> Self {
        AnalysisReport::new(result.summary, result.content, result.score, result.model_name)
    }
}
