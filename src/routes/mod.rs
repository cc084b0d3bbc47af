pub mod coupon_route;
pub mod default_route;
pub mod flows_route;
pub mod insight_route;
pub mod lookup_route;
pub mod sentiment_route;
pub mod summary_route;
