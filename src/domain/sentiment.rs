use serde::{Deserialize, Serialize};

/// Social-sentiment report for a product. Sections are always present;
/// failure paths fill them with descriptive placeholder text instead of
/// dropping fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentReport {
    pub sentiment_summary: String,
    pub positive_highlights: String,
    pub negative_highlights: String,
}
