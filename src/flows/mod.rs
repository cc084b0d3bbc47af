pub mod coupon;
pub mod insight;
pub mod sentiment;
pub mod summary;

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::identifier::ProductIdentifier;
use crate::services::accesstrade::AccesstradeClient;
use crate::services::openai_client::{OpenaiClient, PromptRunner};
use crate::services::web_search::{ProductSearch, WebSearchClient};

type FlowFuture = Pin<Box<dyn Future<Output = serde_json::Value> + Send>>;
type FlowFn = Box<dyn Fn(String) -> FlowFuture + Send + Sync>;

struct RegisteredFlow {
    description: &'static str,
    runner: FlowFn,
}

#[derive(Serialize)]
pub struct FlowInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Explicit flow map built once at startup and handed to whatever harness
/// needs it (here: the dev-console routes). No ambient global registry.
pub struct FlowRegistry {
    flows: BTreeMap<&'static str, RegisteredFlow>,
}

impl FlowRegistry {
    pub fn new(
        search: Arc<WebSearchClient>,
        llm: Arc<OpenaiClient>,
        coupons: Arc<AccesstradeClient>,
        free_shipping_only: bool,
    ) -> Self {
        let mut flows: BTreeMap<&'static str, RegisteredFlow> = BTreeMap::new();

        let (search_dep, llm_dep) = (search.clone(), llm.clone());
        register(
            &mut flows,
            "webProductInsightsFlow",
            "Phân tích thông tin sản phẩm từ web và YouTube",
            move |input| -> FlowFuture {
                let search: Arc<dyn ProductSearch> = search_dep.clone();
                let llm: Arc<dyn PromptRunner> = llm_dep.clone();
                Box::pin(async move {
                    let insights = insight::fetch_web_product_insights(search, llm, &input).await;
                    to_value(&insights)
                })
            },
        );

        let llm_dep = llm.clone();
        register(
            &mut flows,
            "analyzeSocialSentimentFlow",
            "Đánh giá cảm xúc cộng đồng về sản phẩm",
            move |input| -> FlowFuture {
                let llm = llm_dep.clone();
                Box::pin(async move {
                    let report = sentiment::analyze_social_sentiment(llm.as_ref(), &input).await;
                    to_value(&report)
                })
            },
        );

        let llm_dep = llm;
        register(
            &mut flows,
            "productSummaryFlow",
            "Tóm tắt sản phẩm từ URL",
            move |input| -> FlowFuture {
                let llm = llm_dep.clone();
                Box::pin(async move {
                    match ProductIdentifier::classify(&input) {
                        ProductIdentifier::Url(url) => {
                            let summary = summary::summarize_product(llm.as_ref(), &url).await;
                            to_value(&summary)
                        }
                        ProductIdentifier::Keyword(_) => serde_json::json!({
                            "summary": "Chỉ hỗ trợ tóm tắt từ URL trang sản phẩm."
                        }),
                    }
                })
            },
        );

        register(
            &mut flows,
            "findDiscountCodesFlow",
            "Tìm mã giảm giá Shopee hiện có",
            move |input| -> FlowFuture {
                let coupons = coupons.clone();
                Box::pin(async move {
                    let codes =
                        coupon::find_discount_codes(&coupons, &input, free_shipping_only).await;
                    to_value(&codes)
                })
            },
        );

        FlowRegistry { flows }
    }

    pub fn list(&self) -> Vec<FlowInfo> {
        self.flows
            .iter()
            .map(|(&name, flow)| FlowInfo {
                name,
                description: flow.description,
            })
            .collect()
    }

    /// Run one flow by name. `None` means no such flow is registered.
    pub async fn run(&self, name: &str, input: String) -> Option<serde_json::Value> {
        let flow = self.flows.get(name)?;
        Some((flow.runner)(input).await)
    }
}

fn register(
    flows: &mut BTreeMap<&'static str, RegisteredFlow>,
    name: &'static str,
    description: &'static str,
    runner: impl Fn(String) -> FlowFuture + Send + Sync + 'static,
) {
    flows.insert(
        name,
        RegisteredFlow {
            description,
            runner: Box::new(runner),
        },
    );
}

fn to_value<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}
