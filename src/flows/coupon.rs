use crate::domain::coupon::Coupon;
use crate::services::accesstrade::{is_free_shipping_coupon, AccesstradeClient};

/// Discount codes for the configured merchant. The product name only
/// triggers the flow — the catalog is always the full current voucher list,
/// never filtered by product.
pub async fn find_discount_codes(
    client: &AccesstradeClient,
    product_name: &str,
    free_shipping_only: bool,
) -> Vec<Coupon> {
    log::info!(
        "Fetching all merchant vouchers, triggered by search for: {}",
        product_name
    );

    let coupons = client.fetch_vouchers().await;

    match free_shipping_only {
        true => coupons
            .into_iter()
            .filter(is_free_shipping_coupon)
            .collect(),
        false => coupons,
    }
}
