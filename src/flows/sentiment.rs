use crate::domain::sentiment::SentimentReport;
use crate::services::openai_client::PromptRunner;

const NO_HIGHLIGHTS_PLACEHOLDER: &str = "Không có dữ liệu.";

/// Social-sentiment analysis for a product name or link. One prompt, no
/// search step. Catches uniformly: an LLM failure or an invalid payload
/// becomes a well-formed sentinel report instead of an error.
pub async fn analyze_social_sentiment(llm: &dyn PromptRunner, identifier: &str) -> SentimentReport {
    let prompt = build_sentiment_prompt(identifier);

    match llm.run_json(&prompt).await {
        Ok(raw) => match serde_json::from_str::<SentimentReport>(&raw) {
            Ok(report) => report,
            Err(e) => {
                log::error!("Sentiment report failed schema validation: {:?}", e);
                sentiment_sentinel(format!(
                    "AI đã trả về dữ liệu không hợp lệ khi phân tích cảm xúc cho \"{}\".",
                    identifier
                ))
            }
        },
        Err(e) => {
            log::error!("Sentiment prompt failed for query {}: {:?}", identifier, e);
            sentiment_sentinel(format!("Lỗi hệ thống: {}", e))
        }
    }
}

fn sentiment_sentinel(message: String) -> SentimentReport {
    SentimentReport {
        sentiment_summary: message,
        positive_highlights: NO_HIGHLIGHTS_PLACEHOLDER.to_string(),
        negative_highlights: NO_HIGHLIGHTS_PLACEHOLDER.to_string(),
    }
}

fn build_sentiment_prompt(identifier: &str) -> String {
    format!(
        r#"Bạn là một trợ lý AI chuyên phân tích cảm xúc trên mạng xã hội.

Hãy phân tích các nền tảng mạng xã hội để xác định cảm xúc chung của công chúng đối với sản phẩm sau:

Sản phẩm: {identifier}

Cung cấp một bản tóm tắt ngắn gọn về cảm xúc tổng thể, nêu bật cả phản hồi tích cực và tiêu cực.
Không đề cập rằng bạn là một AI. Tập trung vào việc cung cấp một phân tích sâu sắc mà một nhà phân tích mạng xã hội con người sẽ tạo ra.
Hãy nhớ bao gồm các chi tiết về trải nghiệm của khách hàng, các vấn đề tiềm ẩn và đưa ra đề xuất cho khách hàng.
Bản tóm tắt cảm xúc phải dưới 200 từ. Các phần phản hồi tích cực và tiêu cực phải dưới 100 từ mỗi phần.
Toàn bộ phản hồi của bạn PHẢI bằng tiếng Việt.

Trả về MỘT đối tượng JSON với đúng các trường sau:
- "sentimentSummary": tóm tắt cảm xúc tổng thể.
- "positiveHighlights": những phản hồi tích cực nổi bật.
- "negativeHighlights": những phản hồi tiêu cực nổi bật.
Chỉ trả về JSON hợp lệ, không kèm lời giải thích nào khác.
"#
    )
}
