use std::sync::Arc;

use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::configuration::CouponSettings;
use crate::domain::coupon::Coupon;
use crate::domain::identifier::ProductIdentifier;
use crate::domain::insight::WebInsights;
use crate::domain::sentiment::SentimentReport;
use crate::domain::summary::ProductSummary;
use crate::flows::{coupon, insight, sentiment, summary};
use crate::services::accesstrade::AccesstradeClient;
use crate::services::openai_client::{OpenaiClient, PromptRunner};
use crate::services::web_search::{ProductSearch, WebSearchClient};

#[derive(Deserialize)]
struct LookupQuery {
    q: String,
}

/// One section per flow. A section is `null` only when its branch crashed
/// (recorded in `errors`) or, for the summary, when the input was not a URL.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    original_search_query: String,
    is_url: bool,
    web_product_insights: Option<WebInsights>,
    social_sentiment: Option<SentimentReport>,
    product_summary: Option<ProductSummary>,
    discount_codes: Option<Vec<Coupon>>,
    errors: Vec<String>,
}

/// The aggregate endpoint: all four flows fan out per request and are
/// joined without short-circuiting — one branch crashing is recorded and
/// must never cancel or blank out its siblings.
#[get("")]
async fn lookup(
    query: web::Query<LookupQuery>,
    search_client: web::Data<WebSearchClient>,
    openai_client: web::Data<OpenaiClient>,
    accesstrade_client: web::Data<AccesstradeClient>,
    coupon_settings: web::Data<CouponSettings>,
) -> HttpResponse {
    let identifier = ProductIdentifier::classify(&query.q);
    let is_url = identifier.is_url();

    let search: Arc<dyn ProductSearch> = search_client.into_inner();
    let llm: Arc<dyn PromptRunner> = openai_client.into_inner();

    let insight_task = {
        let (search, llm) = (search.clone(), llm.clone());
        let input = query.q.clone();
        tokio::spawn(
            async move { insight::fetch_web_product_insights(search, llm, &input).await },
        )
    };

    let sentiment_task = {
        let llm = llm.clone();
        let input = query.q.clone();
        tokio::spawn(
            async move { sentiment::analyze_social_sentiment(llm.as_ref(), &input).await },
        )
    };

    let summary_task = match &identifier {
        ProductIdentifier::Url(url) => {
            let llm = llm.clone();
            let url = url.clone();
            Some(tokio::spawn(async move {
                summary::summarize_product(llm.as_ref(), &url).await
            }))
        }
        ProductIdentifier::Keyword(_) => None,
    };

    let coupon_task = {
        let client = accesstrade_client.into_inner();
        let input = query.q.clone();
        let free_shipping_only = coupon_settings.free_shipping_only;
        tokio::spawn(async move {
            coupon::find_discount_codes(&client, &input, free_shipping_only).await
        })
    };

    let mut errors = vec![];

    let (insight_result, sentiment_result, coupon_result) =
        tokio::join!(insight_task, sentiment_task, coupon_task);
    let summary_result = match summary_task {
        Some(task) => Some(task.await),
        None => None,
    };

    let web_product_insights = insight_result
        .map_err(|e| errors.push(format!("Phân tích thông tin từ web thất bại: {}", e)))
        .ok();
    let social_sentiment = sentiment_result
        .map_err(|e| errors.push(format!("Đánh giá từ cộng đồng thất bại: {}", e)))
        .ok();
    let discount_codes = coupon_result
        .map_err(|e| errors.push(format!("Tìm mã giảm giá thất bại: {}", e)))
        .ok();
    let product_summary = summary_result.and_then(|result| {
        result
            .map_err(|e| errors.push(format!("Tóm tắt sản phẩm thất bại: {}", e)))
            .ok()
    });

    HttpResponse::Ok().json(LookupResponse {
        original_search_query: query.into_inner().q,
        is_url,
        web_product_insights,
        social_sentiment,
        product_summary,
        discount_codes,
        errors,
    })
}
