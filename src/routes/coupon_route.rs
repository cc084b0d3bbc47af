use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use crate::configuration::CouponSettings;
use crate::flows::coupon::find_discount_codes;
use crate::services::accesstrade::AccesstradeClient;

#[derive(Deserialize)]
struct CouponQuery {
    #[serde(default)]
    q: String,
}

#[get("")]
async fn coupons(
    query: web::Query<CouponQuery>,
    accesstrade_client: web::Data<AccesstradeClient>,
    coupon_settings: web::Data<CouponSettings>,
) -> HttpResponse {
    let codes = find_discount_codes(
        accesstrade_client.get_ref(),
        &query.q,
        coupon_settings.free_shipping_only,
    )
    .await;

    HttpResponse::Ok().json(codes)
}
