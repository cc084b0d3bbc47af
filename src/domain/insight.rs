use serde::{Deserialize, Serialize};

/// One product listing or price page discovered on the web. `extracted_price`
/// stays a free-form string ("1.200.000 đ", "Liên hệ", "Không rõ") — the
/// model cannot guarantee numeric extraction, and a wrong zero is worse than
/// an honest "unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFinding {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub extracted_price: Option<String>,
    #[serde(default)]
    pub store_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoFinding {
    pub title: String,
    pub url: String,
    pub snippet: Option<String>,
}

/// Shape the model is asked to return for the web-analysis prompt.
/// `product_findings` is deliberately non-defaulted: a response without it
/// fails validation instead of passing half-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    #[serde(default)]
    pub analyzed_product_name: Option<String>,
    #[serde(default)]
    pub overall_summary: Option<String>,
    pub product_findings: Vec<ProductFinding>,
}

/// Combined insight response: AI product analysis merged with raw video
/// findings, plus a human-readable trace of which searches ran.
/// `original_search_query` always echoes the caller's input verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebInsights {
    pub analyzed_product_name: String,
    pub overall_summary: String,
    pub product_findings: Vec<ProductFinding>,
    pub video_findings: Vec<VideoFinding>,
    pub search_context: String,
    pub original_search_query: String,
}
