use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use crate::flows::sentiment::analyze_social_sentiment;
use crate::services::openai_client::OpenaiClient;

#[derive(Deserialize)]
struct SentimentQuery {
    q: String,
}

#[get("")]
async fn sentiment(
    query: web::Query<SentimentQuery>,
    openai_client: web::Data<OpenaiClient>,
) -> HttpResponse {
    let report = analyze_social_sentiment(openai_client.get_ref(), &query.q).await;

    HttpResponse::Ok().json(report)
}
