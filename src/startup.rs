use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::CouponSettings,
    flows::FlowRegistry,
    routes::{
        coupon_route, default_route, flows_route, insight_route, lookup_route, sentiment_route,
        summary_route,
    },
    services::{AccesstradeClient, OpenaiClient, WebSearchClient},
};

pub fn run(
    listener: TcpListener,
    search_client: WebSearchClient,
    openai_client: OpenaiClient,
    accesstrade_client: AccesstradeClient,
    coupon_settings: CouponSettings,
) -> Result<Server, std::io::Error> {
    let search_client = web::Data::new(search_client);
    let openai_client = web::Data::new(openai_client);
    let accesstrade_client = web::Data::new(accesstrade_client);

    let flow_registry = web::Data::new(FlowRegistry::new(
        search_client.clone().into_inner(),
        openai_client.clone().into_inner(),
        accesstrade_client.clone().into_inner(),
        coupon_settings.free_shipping_only,
    ));
    let coupon_settings = web::Data::new(coupon_settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(web::scope("/lookup").service(lookup_route::lookup))
            .service(web::scope("/insight").service(insight_route::insight))
            .service(web::scope("/sentiment").service(sentiment_route::sentiment))
            .service(web::scope("/summary").service(summary_route::summary))
            .service(web::scope("/coupons").service(coupon_route::coupons))
            .service(
                web::scope("/flows")
                    .service(flows_route::list_flows)
                    .service(flows_route::run_flow),
            )
            .app_data(search_client.clone())
            .app_data(openai_client.clone())
            .app_data(accesstrade_client.clone())
            .app_data(coupon_settings.clone())
            .app_data(flow_registry.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
