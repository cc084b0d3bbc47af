use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use crate::domain::identifier::ProductIdentifier;
use crate::flows::summary::summarize_product;
use crate::services::openai_client::OpenaiClient;

#[derive(Deserialize)]
struct SummaryQuery {
    q: String,
}

#[get("")]
async fn summary(
    query: web::Query<SummaryQuery>,
    openai_client: web::Data<OpenaiClient>,
) -> HttpResponse {
    // Summarization only makes sense for a product-page URL.
    match ProductIdentifier::classify(&query.q) {
        ProductIdentifier::Url(url) => {
            let summary = summarize_product(openai_client.get_ref(), &url).await;
            HttpResponse::Ok().json(summary)
        }
        ProductIdentifier::Keyword(_) => {
            HttpResponse::BadRequest().body("Chỉ hỗ trợ tóm tắt từ URL trang sản phẩm.")
        }
    }
}
