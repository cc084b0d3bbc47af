use serde::Serialize;

/// One redeemable discount code, flattened from the Accesstrade offer
/// envelope (an offer carries many codes; we emit one record per code).
/// Field names match the frontend contract as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coupon {
    pub code: String,
    pub description: String,
    pub aff_link: String,
    pub offer_name: String,
    pub domain: String,
    pub end_time: String,
}
