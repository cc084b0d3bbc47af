use std::time::Duration;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::coupon::Coupon;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const FREE_SHIPPING_KEYWORDS: &[&str] = &[
    "miễn phí vận chuyển",
    "freeship",
    "free ship",
    "miễn ship",
    "miễn phí giao hàng",
    "giao hàng miễn phí",
    "mpvc",
];

#[derive(Deserialize)]
struct OfferEnvelope {
    data: Vec<Offer>,
}

#[derive(Deserialize)]
struct Offer {
    aff_link: String,
    coupons: Vec<OfferCoupon>,
    name: String,
    domain: String,
    end_time: String,
}

#[derive(Deserialize)]
struct OfferCoupon {
    coupon_code: String,
    coupon_desc: String,
}

#[derive(Serialize)]
struct OfferQuery {
    domain: String,
}

pub struct AccesstradeClient {
    client: reqwest::Client,
    token: Option<String>,
    url: String,
    merchant_domain: String,
}

impl AccesstradeClient {
    pub fn new(token: Option<String>, url: String, merchant_domain: String) -> Self {
        let client = reqwest::Client::builder()
            .read_timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap();

        AccesstradeClient {
            client,
            token: token.filter(|t| !t.trim().is_empty()),
            url,
            merchant_domain,
        }
    }

    /// Full current voucher catalog for the configured merchant. Missing
    /// token, transport error, non-2xx status and a malformed envelope all
    /// degrade to an empty list; the caller reads that as "no coupons".
    pub async fn fetch_vouchers(&self) -> Vec<Coupon> {
        let token = match &self.token {
            Some(token) => token,
            None => {
                log::error!("Accesstrade API token is not configured");
                return vec![];
            }
        };

        let response = self
            .client
            .get(self.url.clone())
            .header("Authorization", format!("Token {}", token))
            .query(&OfferQuery {
                domain: self.merchant_domain.clone(),
            })
            .send()
            .await;

        match response {
            Ok(res) if res.status().is_success() => match res.json::<OfferEnvelope>().await {
                Ok(envelope) => flatten_offers(envelope),
                Err(e) => {
                    log::error!("Failed to parse Accesstrade response: {:?}", e);
                    vec![]
                }
            },
            Ok(res) => {
                log::error!("Accesstrade API returned status: {}", res.status());
                vec![]
            }
            Err(e) => {
                log::error!("No response from Accesstrade API, error: {:?}", e);
                vec![]
            }
        }
    }
}

fn flatten_offers(envelope: OfferEnvelope) -> Vec<Coupon> {
    envelope
        .data
        .into_iter()
        .flat_map(|offer| {
            offer
                .coupons
                .iter()
                .map(|coupon| Coupon {
                    code: coupon.coupon_code.clone(),
                    description: coupon.coupon_desc.clone(),
                    aff_link: offer.aff_link.clone(),
                    offer_name: offer.name.clone(),
                    domain: offer.domain.clone(),
                    end_time: offer.end_time.clone(),
                })
                .collect_vec()
        })
        .collect()
}

/// A coupon counts as free-shipping when its description or offer name
/// mentions any of the usual Vietnamese shipping phrases.
pub fn is_free_shipping_coupon(coupon: &Coupon) -> bool {
    let search_text = format!(
        "{} {}",
        coupon.description.to_lowercase(),
        coupon.offer_name.to_lowercase()
    );

    FREE_SHIPPING_KEYWORDS
        .iter()
        .any(|keyword| search_text.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::{flatten_offers, is_free_shipping_coupon, OfferEnvelope};
    use crate::domain::coupon::Coupon;

    const SAMPLE_ENVELOPE: &str = r#"{
        "data": [
            {
                "aff_link": "https://go.example.vn/t?deep=1",
                "coupons": [
                    {"coupon_code": "FREESHIP50", "coupon_desc": "Miễn phí vận chuyển đơn từ 50k"},
                    {"coupon_code": "GIAM10", "coupon_desc": "Giảm 10% tối đa 20k"}
                ],
                "name": "Shopee Siêu Sale",
                "content": "Áp dụng toàn sàn",
                "domain": "shopee.vn",
                "end_time": "2025-01-31 23:59:59"
            },
            {
                "aff_link": "https://go.example.vn/t?deep=2",
                "coupons": [
                    {"coupon_code": "MPVC0D", "coupon_desc": "Mã mpvc 0đ"}
                ],
                "name": "Shopee Freeship",
                "domain": "shopee.vn",
                "end_time": "2025-02-15 23:59:59"
            }
        ]
    }"#;

    #[test]
    fn envelope_flattens_to_one_record_per_code() {
        let envelope: OfferEnvelope = serde_json::from_str(SAMPLE_ENVELOPE).unwrap();

        let coupons = flatten_offers(envelope);

        assert_eq!(coupons.len(), 3);
        assert_eq!(coupons[0].code, "FREESHIP50");
        assert_eq!(coupons[0].offer_name, "Shopee Siêu Sale");
        assert_eq!(coupons[1].code, "GIAM10");
        assert_eq!(coupons[1].aff_link, "https://go.example.vn/t?deep=1");
        assert_eq!(coupons[2].code, "MPVC0D");
    }

    #[test]
    fn malformed_envelope_fails_validation() {
        let missing_required = r#"{"data": [{"coupons": []}]}"#;
        let wrong_type = r#"{"data": "none"}"#;

        assert!(serde_json::from_str::<OfferEnvelope>(missing_required).is_err());
        assert!(serde_json::from_str::<OfferEnvelope>(wrong_type).is_err());
    }

    #[test]
    fn free_shipping_filter_matches_description_and_offer_name() {
        let envelope: OfferEnvelope = serde_json::from_str(SAMPLE_ENVELOPE).unwrap();
        let coupons = flatten_offers(envelope);

        let free_shipping: Vec<&Coupon> = coupons
            .iter()
            .filter(|c| is_free_shipping_coupon(c))
            .collect();

        // GIAM10 is a plain discount — neither its description nor its
        // offer name mentions shipping.
        let codes: Vec<&str> = free_shipping.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["FREESHIP50", "MPVC0D"]);
    }

    #[test]
    fn non_shipping_coupon_is_filtered_out() {
        let coupon = Coupon {
            code: "GIAM20".to_string(),
            description: "Giảm 20% cho đơn đầu tiên".to_string(),
            aff_link: "https://go.example.vn/t?deep=3".to_string(),
            offer_name: "Shopee Sale".to_string(),
            domain: "shopee.vn".to_string(),
            end_time: "2025-03-01 00:00:00".to_string(),
        };

        assert!(!is_free_shipping_coupon(&coupon));
    }
}
