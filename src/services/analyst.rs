use url::Url;

use crate::domain::insight::AiAnalysis;
use crate::domain::search::SearchResult;
use crate::services::openai_client::PromptRunner;

const MAX_FINDINGS: usize = 5;

pub const MISSING_ANALYSIS_SUMMARY: &str = "AI không thể phân tích kết quả tìm kiếm web.";
pub const INVALID_ANALYSIS_SUMMARY: &str =
    "AI đã trả về dữ liệu không hợp lệ. Không thể hiển thị phân tích chi tiết.";

/// Terminal outcome of one analysis call. Each call is independent and
/// stateless; there are no transitions back.
enum AnalysisOutcome {
    Valid(AiAnalysis),
    Invalid,
    Missing,
}

/// Analyze normalized search results with the model and return a validated
/// `AiAnalysis`. Never fails: a missing or invalid model response produces a
/// sentinel with empty findings and a descriptive summary instead.
pub async fn analyze_search_results(
    llm: &dyn PromptRunner,
    identifier: &str,
    results: &[SearchResult],
) -> AiAnalysis {
    let prompt = build_analysis_prompt(identifier, results);

    let raw = match llm.run_json(&prompt).await {
        Ok(raw) => Some(raw),
        Err(e) => {
            log::error!("Analysis prompt failed for query {}: {:?}", identifier, e);
            None
        }
    };

    match validate_analysis(raw.as_deref()) {
        AnalysisOutcome::Valid(mut analysis) => {
            analysis.product_findings.truncate(MAX_FINDINGS);
            backfill_store_names(&mut analysis);
            if analysis.analyzed_product_name.is_none() {
                // Context the model does not control comes from the caller.
                analysis.analyzed_product_name = Some(identifier.to_string());
            }
            analysis
        }
        AnalysisOutcome::Invalid => sentinel_analysis(identifier, INVALID_ANALYSIS_SUMMARY),
        AnalysisOutcome::Missing => sentinel_analysis(identifier, MISSING_ANALYSIS_SUMMARY),
    }
}

pub fn sentinel_analysis(identifier: &str, summary: &str) -> AiAnalysis {
    AiAnalysis {
        analyzed_product_name: Some(identifier.to_string()),
        overall_summary: Some(summary.to_string()),
        product_findings: vec![],
    }
}

fn validate_analysis(raw: Option<&str>) -> AnalysisOutcome {
    let raw = match raw {
        Some(r) if !r.trim().is_empty() => r,
        _ => return AnalysisOutcome::Missing,
    };

    match serde_json::from_str::<AiAnalysis>(raw) {
        Ok(analysis) => {
            // Finding links must be absolute URLs; one bad link invalidates
            // the whole payload, never partially-validated data.
            let links_ok = analysis
                .product_findings
                .iter()
                .all(|finding| Url::parse(&finding.url).is_ok());
            match links_ok {
                true => AnalysisOutcome::Valid(analysis),
                false => {
                    log::error!("AI analysis contained a non-absolute finding URL");
                    AnalysisOutcome::Invalid
                }
            }
        }
        Err(e) => {
            log::error!("AI analysis failed schema validation: {:?}", e);
            AnalysisOutcome::Invalid
        }
    }
}

fn backfill_store_names(analysis: &mut AiAnalysis) {
    for finding in &mut analysis.product_findings {
        let missing = finding
            .store_name
            .as_deref()
            .map_or(true, |name| name.trim().is_empty());
        if missing {
            finding.store_name = store_name_from_url(&finding.url);
        }
    }
}

/// Canonical store names for well-known e-commerce hostnames; anything else
/// falls back to the bare hostname without the `www.` prefix.
pub fn store_name_from_url(link: &str) -> Option<String> {
    let parsed = Url::parse(link).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    let known = match host {
        "shopee.vn" => "Shopee",
        "lazada.vn" => "Lazada",
        "tiki.vn" => "Tiki",
        "nguyenkim.com" => "Nguyễn Kim",
        "dienmayxanh.com" => "Điện Máy Xanh",
        "fptshop.com.vn" => "FPT Shop",
        "cellphones.com.vn" => "CellphoneS",
        "youtube.com" => "YouTube",
        other => return Some(other.to_string()),
    };

    Some(known.to_string())
}

fn build_analysis_prompt(identifier: &str, results: &[SearchResult]) -> String {
    let mut enumerated = String::new();
    for (index, result) in results.iter().enumerate() {
        enumerated.push_str(&format!(
            "Kết quả số {}:\nTiêu đề: {}\nLink: {}\nMô tả: {}\n--------------------\n",
            index + 1,
            result.title,
            result.link,
            result.snippet
        ));
    }

    format!(
        r#"Bạn là một chuyên gia phân tích sản phẩm e-commerce. Nhiệm vụ của bạn là phân tích kết quả tìm kiếm web cho một sản phẩm cụ thể và trích xuất thông tin hữu ích.
Người dùng đang tìm kiếm: "{identifier}"
Dưới đây là kết quả tìm kiếm (từ các trang như Shopee, Lazada, Tiki, hoặc web nói chung):
{enumerated}
Dựa vào thông tin trên, hãy trả về MỘT đối tượng JSON với đúng các trường sau:
1. "analyzedProductName": tên sản phẩm đầy đủ và chính xác nhất mà bạn xác định được. Nếu không chắc, hãy dựa trên từ khóa tìm kiếm.
2. "overallSummary": một bản tóm tắt rất ngắn gọn (1-2 câu) về những gì bạn tìm thấy liên quan đến sản phẩm này.
3. "productFindings": danh sách tối đa 5 trang sản phẩm hoặc trang cung cấp thông tin giá tiềm năng nhất. Với mỗi trang:
   - "title": giữ nguyên tiêu đề từ kết quả tìm kiếm.
   - "url": giữ nguyên URL.
   - "snippet": giữ nguyên mô tả ngắn.
   - "extractedPrice": giá trích xuất từ tiêu đề hoặc mô tả. Giá có thể là một con số cụ thể (ví dụ: "1.200.000 đ"), một khoảng giá (ví dụ: "1tr - 2tr"), hoặc một thông báo (ví dụ: "Liên hệ", "Giá tốt"). Nếu không tìm thấy giá hoặc không chắc chắn, hãy ghi "Không rõ" — tuyệt đối không tự bịa ra con số.
   - "storeName": suy ra tên cửa hàng từ URL (ví dụ: "shopee.vn" -> "Shopee", "lazada.vn" -> "Lazada", "tiki.vn" -> "Tiki", "dienmayxanh.com" -> "Điện Máy Xanh"). Nếu là trang web chung không phải cửa hàng, ghi tên miền chính.

Quan trọng:
- Chỉ tập trung vào các kết quả có vẻ là trang sản phẩm, trang danh mục hoặc bài viết có giá.
- Đảm bảo tất cả văn bản trả về bằng tiếng Việt.
- Chỉ trả về JSON hợp lệ, không kèm lời giải thích nào khác.
"#
    )
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;

    use super::{
        analyze_search_results, build_analysis_prompt, store_name_from_url,
        INVALID_ANALYSIS_SUMMARY, MISSING_ANALYSIS_SUMMARY,
    };
    use crate::domain::search::SearchResult;
    use crate::services::openai_client::PromptRunner;

    struct StubLlm {
        response: Result<String>,
    }

    impl StubLlm {
        fn replying(raw: &str) -> Self {
            StubLlm {
                response: Ok(raw.to_string()),
            }
        }

        fn failing() -> Self {
            StubLlm {
                response: Err(anyhow!("connection refused")),
            }
        }
    }

    #[async_trait]
    impl PromptRunner for StubLlm {
        async fn run_json(&self, _prompt: &str) -> Result<String> {
            match &self.response {
                Ok(raw) => Ok(raw.clone()),
                Err(e) => Err(anyhow!("{}", e)),
            }
        }
    }

    fn sample_results() -> Vec<SearchResult> {
        vec![
            SearchResult::new(
                Some("Tai nghe bluetooth ABC".to_string()),
                "https://shopee.vn/p/1".to_string(),
                Some("Giá 150.000đ".to_string()),
            ),
            SearchResult::new(
                Some("Tai nghe XYZ".to_string()),
                "https://tiki.vn/p/2".to_string(),
                None,
            ),
        ]
    }

    #[test]
    fn prompt_embeds_identifier_and_enumerated_results() {
        let prompt = build_analysis_prompt("tai nghe bluetooth", &sample_results());

        assert!(prompt.contains("\"tai nghe bluetooth\""));
        assert!(prompt.contains("Kết quả số 1:"));
        assert!(prompt.contains("Kết quả số 2:"));
        assert!(prompt.contains("https://shopee.vn/p/1"));
        assert!(prompt.contains("Không rõ"));
    }

    #[tokio::test]
    async fn valid_response_passes_through_with_store_backfill() {
        let raw = r#"{
            "analyzedProductName": "Tai nghe bluetooth ABC",
            "overallSummary": "Nhiều lựa chọn với giá dao động.",
            "productFindings": [
                {"title": "Tai nghe ABC", "url": "https://shopee.vn/p/1", "extractedPrice": "150.000đ"},
                {"title": "Tai nghe XYZ", "url": "https://cuahangla.vn/p/2", "storeName": "  "}
            ]
        }"#;
        let llm = StubLlm::replying(raw);

        let analysis = analyze_search_results(&llm, "tai nghe bluetooth", &sample_results()).await;

        assert_eq!(analysis.product_findings.len(), 2);
        assert_eq!(
            analysis.product_findings[0].store_name.as_deref(),
            Some("Shopee")
        );
        assert_eq!(
            analysis.product_findings[1].store_name.as_deref(),
            Some("cuahangla.vn")
        );
        assert_eq!(
            analysis.analyzed_product_name.as_deref(),
            Some("Tai nghe bluetooth ABC")
        );
    }

    #[tokio::test]
    async fn malformed_json_yields_invalid_sentinel() {
        let llm = StubLlm::replying("cảm ơn bạn, đây là kết quả: {không phải json");

        let analysis = analyze_search_results(&llm, "tai nghe", &sample_results()).await;

        assert!(analysis.product_findings.is_empty());
        assert_eq!(
            analysis.overall_summary.as_deref(),
            Some(INVALID_ANALYSIS_SUMMARY)
        );
        assert_eq!(analysis.analyzed_product_name.as_deref(), Some("tai nghe"));
    }

    #[tokio::test]
    async fn wrong_shape_yields_invalid_sentinel() {
        // productFindings has the wrong type — must not be half-trusted
        let llm = StubLlm::replying(r#"{"productFindings": "none"}"#);

        let analysis = analyze_search_results(&llm, "tai nghe", &sample_results()).await;

        assert!(analysis.product_findings.is_empty());
        assert_eq!(
            analysis.overall_summary.as_deref(),
            Some(INVALID_ANALYSIS_SUMMARY)
        );
    }

    #[tokio::test]
    async fn relative_finding_url_invalidates_the_payload() {
        let raw = r#"{"productFindings": [{"title": "x", "url": "/p/1"}]}"#;
        let llm = StubLlm::replying(raw);

        let analysis = analyze_search_results(&llm, "tai nghe", &sample_results()).await;

        assert!(analysis.product_findings.is_empty());
        assert_eq!(
            analysis.overall_summary.as_deref(),
            Some(INVALID_ANALYSIS_SUMMARY)
        );
    }

    #[tokio::test]
    async fn provider_failure_yields_missing_sentinel() {
        let llm = StubLlm::failing();

        let analysis = analyze_search_results(&llm, "tai nghe", &sample_results()).await;

        assert!(analysis.product_findings.is_empty());
        assert_eq!(
            analysis.overall_summary.as_deref(),
            Some(MISSING_ANALYSIS_SUMMARY)
        );
    }

    #[tokio::test]
    async fn findings_are_capped_at_five() {
        let findings: Vec<String> = (0..8)
            .map(|i| format!(r#"{{"title": "t{}", "url": "https://tiki.vn/p/{}"}}"#, i, i))
            .collect();
        let raw = format!(r#"{{"productFindings": [{}]}}"#, findings.join(","));
        let llm = StubLlm::replying(&raw);

        let analysis = analyze_search_results(&llm, "tai nghe", &sample_results()).await;

        assert_eq!(analysis.product_findings.len(), 5);
    }

    #[test]
    fn store_names_map_known_hosts_and_fall_back_to_hostname() {
        assert_eq!(
            store_name_from_url("https://shopee.vn/p/1").as_deref(),
            Some("Shopee")
        );
        assert_eq!(
            store_name_from_url("https://www.lazada.vn/p/2").as_deref(),
            Some("Lazada")
        );
        assert_eq!(
            store_name_from_url("https://www.dienmayxanh.com/tai-nghe").as_deref(),
            Some("Điện Máy Xanh")
        );
        assert_eq!(
            store_name_from_url("https://blog.example.com/review").as_deref(),
            Some("blog.example.com")
        );
        assert_eq!(store_name_from_url("not a url"), None);
    }
}
