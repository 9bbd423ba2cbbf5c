//! The metadata block the model is asked to open its reply with.
//!
//! Both the prompt builder and the response parser read these constants, so
//! the instruction and the extraction pattern always agree.

pub const META_OPEN: &str = "<meta>";
pub const META_CLOSE: &str = "</meta>";
pub const SCORE_FIELD: &str = "score";
pub const SUMMARY_FIELD: &str = "summary";

pub const DEFAULT_SCORE: u8 = 60;
pub const DEFAULT_SUMMARY: &str = "AI analysis complete";

/// Output-format instruction embedded at the end of every analysis prompt.
pub fn format_instruction() -> String {
    format!(
        "IMPORTANT - RESPONSE FORMAT:\n\
         Begin your reply with the following metadata block, then write the report body:\n\
         {open}\n\
         {score}: [a number from 0 to 100]\n\
         {summary}: [one-sentence rationale]\n\
         {close}\n\
         \n\
         Report body (Markdown)...",
        open = META_OPEN,
        close = META_CLOSE,
        score = SCORE_FIELD,
        summary = SUMMARY_FIELD,
    )
}
