use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::models::AnalysisResult;
use crate::services::report_format::{
    DEFAULT_SCORE, DEFAULT_SUMMARY, META_CLOSE, META_OPEN, SCORE_FIELD, SUMMARY_FIELD,
};

static META_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s){}(.*?){}",
        regex::escape(META_OPEN),
        regex::escape(META_CLOSE)
    ))
    .expect("meta block pattern is valid")
});

static SCORE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{}:\s*(\d+)", regex::escape(SCORE_FIELD)))
        .expect("score pattern is valid")
});

static SUMMARY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{}:[ \t]*(.+)", regex::escape(SUMMARY_FIELD)))
        .expect("summary pattern is valid")
});

/// Best-effort extraction of score and summary from a model reply. Never fails.
///
/// When a metadata block is present it is removed from the body whether or
/// not its fields could be read. Without one, the reply is returned as-is
/// with the default score and summary.
pub fn parse_analysis_reply(raw: &str, model_name: &str) -> AnalysisResult {
    let mut score = DEFAULT_SCORE;
    let mut summary = DEFAULT_SUMMARY.to_string();

    let Some(block) = META_BLOCK.captures(raw) else {
        warn!("Model reply has no metadata block, using defaults");
        return AnalysisResult {
            score,
            summary,
            content: raw.to_string(),
            model_name: Some(model_name.to_string()),
        };
    };

    let meta = block.get(1).map_or("", |m| m.as_str());

    match SCORE_LINE.captures(meta).and_then(|c| c[1].parse::<u32>().ok()) {
        Some(value) => score = value.min(100) as u8,
        None => debug!("Metadata block has no readable score"),
    }

    if let Some(text) = SUMMARY_LINE
        .captures(meta)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
    {
        summary = text;
    }

    let content = META_BLOCK.replace(raw, "").trim().to_string();

    AnalysisResult {
        score,
        summary,
        content,
        model_name: Some(model_name.to_string()),
    }
}
