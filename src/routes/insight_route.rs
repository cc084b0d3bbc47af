use std::sync::Arc;

use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use crate::flows::insight::fetch_web_product_insights;
use crate::services::openai_client::{OpenaiClient, PromptRunner};
use crate::services::web_search::{ProductSearch, WebSearchClient};

#[derive(Deserialize)]
struct InsightQuery {
    q: String,
}

#[get("")]
async fn insight(
    query: web::Query<InsightQuery>,
    search_client: web::Data<WebSearchClient>,
    openai_client: web::Data<OpenaiClient>,
) -> HttpResponse {
    let search: Arc<dyn ProductSearch> = search_client.into_inner();
    let llm: Arc<dyn PromptRunner> = openai_client.into_inner();

    let insights = fetch_web_product_insights(search, llm, &query.q).await;

    HttpResponse::Ok().json(insights)
}
