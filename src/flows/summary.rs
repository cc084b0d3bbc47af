use crate::domain::summary::ProductSummary;
use crate::services::openai_client::PromptRunner;

/// Product summary from a product-page URL. Same uniform failure policy as
/// the other flows: always a well-formed response.
pub async fn summarize_product(llm: &dyn PromptRunner, product_url: &str) -> ProductSummary {
    let prompt = build_summary_prompt(product_url);

    match llm.run_json(&prompt).await {
        Ok(raw) => match serde_json::from_str::<ProductSummary>(&raw) {
            Ok(summary) => summary,
            Err(e) => {
                log::error!("Product summary failed schema validation: {:?}", e);
                ProductSummary {
                    summary: format!(
                        "AI đã trả về dữ liệu không hợp lệ khi tóm tắt \"{}\".",
                        product_url
                    ),
                }
            }
        },
        Err(e) => {
            log::error!("Summary prompt failed for url {}: {:?}", product_url, e);
            ProductSummary {
                summary: format!("Lỗi hệ thống: {}", e),
            }
        }
    }
}

fn build_summary_prompt(product_url: &str) -> String {
    format!(
        r#"Bạn là một chuyên gia tóm tắt sản phẩm. Công việc của bạn là lấy URL của một trang sản phẩm và tạo ra một bản tóm tắt ngắn gọn về thông số kỹ thuật và mô tả của sản phẩm.

Product URL: {product_url}

Toàn bộ phản hồi của bạn PHẢI bằng tiếng Việt.
Trả về MỘT đối tượng JSON với đúng một trường "summary" chứa bản tóm tắt.
Chỉ trả về JSON hợp lệ, không kèm lời giải thích nào khác.
"#
    )
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use async_trait::async_trait;

    use super::{build_summary_prompt, summarize_product};
    use crate::services::openai_client::PromptRunner;

    struct StubLlm {
        response: Result<String>,
    }

    #[async_trait]
    impl PromptRunner for StubLlm {
        async fn run_json(&self, _prompt: &str) -> Result<String> {
            match &self.response {
                Ok(raw) => Ok(raw.clone()),
                Err(e) => Err(anyhow::anyhow!("{}", e)),
            }
        }
    }

    #[test]
    fn prompt_embeds_the_url() {
        let prompt = build_summary_prompt("https://shopee.vn/p/1");

        assert!(prompt.contains("Product URL: https://shopee.vn/p/1"));
    }

    #[tokio::test]
    async fn valid_summary_passes_through() {
        let llm = StubLlm {
            response: Ok(r#"{"summary": "Tai nghe chống ồn, pin 30 giờ."}"#.to_string()),
        };

        let summary = summarize_product(&llm, "https://shopee.vn/p/1").await;

        assert_eq!(summary.summary, "Tai nghe chống ồn, pin 30 giờ.");
    }

    #[tokio::test]
    async fn invalid_payload_becomes_sentinel() {
        let llm = StubLlm {
            response: Ok("tóm tắt: tai nghe rất tốt".to_string()),
        };

        let summary = summarize_product(&llm, "https://shopee.vn/p/1").await;

        assert!(summary.summary.contains("dữ liệu không hợp lệ"));
    }

    #[tokio::test]
    async fn llm_failure_becomes_sentinel() {
        let llm = StubLlm {
            response: Err(anyhow::anyhow!("rate limited")),
        };

        let summary = summarize_product(&llm, "https://shopee.vn/p/1").await;

        assert!(summary.summary.starts_with("Lỗi hệ thống:"));
    }
}
