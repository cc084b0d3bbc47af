use std::sync::Arc;

use crate::domain::insight::{AiAnalysis, VideoFinding, WebInsights};
use crate::services::analyst;
use crate::services::openai_client::PromptRunner;
use crate::services::web_search::ProductSearch;

pub const ECOMMERCE_DOMAINS: &[&str] = &[
    "shopee.vn",
    "lazada.vn",
    "tiki.vn",
    "nguyenkim.com",
    "dienmayxanh.com",
    "fptshop.com.vn",
    "cellphones.com.vn",
];
pub const VIDEO_DOMAINS: &[&str] = &["youtube.com"];

const VIDEO_RESULT_LIMIT: usize = 10;

/// Combined web product insights: AI-analyzed e-commerce listings plus raw
/// YouTube findings. Never fails — even a panic somewhere in the pipeline
/// collapses to a terminal result carrying the error message, with the
/// original query still echoed.
pub async fn fetch_web_product_insights(
    search: Arc<dyn ProductSearch>,
    llm: Arc<dyn PromptRunner>,
    identifier: &str,
) -> WebInsights {
    let pipeline = tokio::spawn(run_insight_pipeline(search, llm, identifier.to_string()));

    match pipeline.await {
        Ok(insights) => insights,
        Err(e) => {
            log::error!("Insight flow crashed for query {}: {:?}", identifier, e);
            WebInsights {
                analyzed_product_name: identifier.to_string(),
                overall_summary: format!("Lỗi hệ thống: {}", e),
                product_findings: vec![],
                video_findings: vec![],
                search_context: format!("Đã xảy ra lỗi khi tìm kiếm cho \"{}\".", identifier),
                original_search_query: identifier.to_string(),
            }
        }
    }
}

async fn run_insight_pipeline(
    search: Arc<dyn ProductSearch>,
    llm: Arc<dyn PromptRunner>,
    identifier: String,
) -> WebInsights {
    // Product listings and videos are independent data sources; an absence
    // in one must not suppress the other.
    let product_branch = product_listings_branch(search.as_ref(), llm.as_ref(), &identifier);
    let video_branch = video_findings_branch(search.as_ref(), &identifier);

    let ((analysis, product_context, had_web_results), (video_findings, video_context)) =
        tokio::join!(product_branch, video_branch);

    let mut overall_summary = analysis
        .overall_summary
        .unwrap_or_else(|| "Không có thông tin phân tích.".to_string());
    if !had_web_results && video_findings.is_empty() {
        overall_summary = format!(
            "Không tìm thấy thông tin sản phẩm hay video nào cho \"{}\" từ web và YouTube.",
            identifier
        );
    }

    WebInsights {
        analyzed_product_name: analysis
            .analyzed_product_name
            .unwrap_or_else(|| identifier.clone()),
        overall_summary,
        product_findings: analysis.product_findings,
        video_findings,
        search_context: format!("{} {}", product_context.trim(), video_context.trim()),
        original_search_query: identifier,
    }
}

async fn product_listings_branch(
    search: &dyn ProductSearch,
    llm: &dyn PromptRunner,
    identifier: &str,
) -> (AiAnalysis, String, bool) {
    let mut context = format!("Kết quả dựa trên tìm kiếm cho \"{}\". ", identifier);

    let mut results = search.search(identifier, ECOMMERCE_DOMAINS).await;
    if results.is_empty() {
        // One-shot fallback without the domain restriction, not a retry loop.
        results = search.search(identifier, &[]).await;
        context.push_str(
            "Không có kết quả từ các sàn thương mại điện tử, đã tìm kiếm mở rộng trên toàn bộ web. ",
        );
    }

    if results.is_empty() {
        context.push_str("Không tìm thấy kết quả web nào để phân tích giá. ");
        let summary = format!(
            "Không tìm thấy kết quả web nào phù hợp để phân tích cho \"{}\".",
            identifier
        );
        return (analyst::sentinel_analysis(identifier, &summary), context, false);
    }

    context.push_str(&format!(
        "Đã tìm thấy {} kết quả từ web để phân tích. ",
        results.len()
    ));
    let analysis = analyst::analyze_search_results(llm, identifier, &results).await;

    (analysis, context, true)
}

async fn video_findings_branch(
    search: &dyn ProductSearch,
    identifier: &str,
) -> (Vec<VideoFinding>, String) {
    let query = video_search_query(identifier);
    let results = search
        .search_with_limit(&query, VIDEO_DOMAINS, VIDEO_RESULT_LIMIT)
        .await;

    let context = match results.is_empty() {
        true => "Không tìm thấy video nào trên YouTube.".to_string(),
        false => format!("Tìm thấy {} video trên YouTube.", results.len()),
    };

    let findings = results
        .into_iter()
        .map(|result| VideoFinding {
            title: result.title,
            url: result.link,
            snippet: Some(result.snippet),
        })
        .collect();

    (findings, context)
}

/// Broadened recall query for the video platform: the identifier plus the
/// usual review-video suffixes, Vietnamese ones included.
fn video_search_query(identifier: &str) -> String {
    format!(
        "{id} review OR {id} trên tay OR {id} đánh giá",
        id = identifier
    )
}
