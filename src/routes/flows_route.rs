use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use crate::flows::FlowRegistry;

#[get("")]
async fn list_flows(registry: web::Data<FlowRegistry>) -> HttpResponse {
    HttpResponse::Ok().json(registry.list())
}

#[derive(Deserialize)]
struct RunFlowBody {
    input: String,
}

#[post("/{name}")]
async fn run_flow(
    path: web::Path<String>,
    body: web::Json<RunFlowBody>,
    registry: web::Data<FlowRegistry>,
) -> HttpResponse {
    let name = path.into_inner();

    match registry.run(&name, body.into_inner().input).await {
        Some(output) => HttpResponse::Ok().json(output),
        None => HttpResponse::NotFound().body(format!("No flow named: {}", name)),
    }
}
