use std::net::TcpListener;

use dealfindr::{
    configuration::get_configuration,
    services::{AccesstradeClient, OpenaiClient, WebSearchClient},
    startup::run,
};
use env_logger::Env;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let search_client = WebSearchClient::new(configuration.search.max_results);
    let openai_client = OpenaiClient::new(configuration.api_keys.openai, configuration.llm.model);
    let accesstrade_client = AccesstradeClient::new(
        configuration.api_keys.accesstrade,
        configuration.coupons.endpoint.clone(),
        configuration.coupons.merchant_domain.clone(),
    );

    run(
        listener,
        search_client,
        openai_client,
        accesstrade_client,
        configuration.coupons,
    )?
    .await
}
