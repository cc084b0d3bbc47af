use std::time::Duration;

use async_trait::async_trait;
use itertools::Itertools;
use scraper::{Html, Selector};
use serde::Serialize;

use crate::domain::search::{resolve_result_url, SearchResult};

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const SEARCH_TIMEOUT: Duration = Duration::from_secs(15);
const SEARCH_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Web search boundary. Implementations never fail: zero matches, non-2xx
/// statuses, transport errors and timeouts all yield an empty list — the
/// distinction only shows up in the logs. Callers read an empty list as
/// "no information available".
#[async_trait]
pub trait ProductSearch: Send + Sync {
    async fn search(&self, query: &str, domains: &[&str]) -> Vec<SearchResult>;
    async fn search_with_limit(
        &self,
        query: &str,
        domains: &[&str],
        limit: usize,
    ) -> Vec<SearchResult>;
}

#[derive(Serialize)]
struct SearchParams {
    q: String,
}

pub struct WebSearchClient {
    client: reqwest::Client,
    max_results: usize,
}

impl WebSearchClient {
    pub fn new(max_results: usize) -> Self {
        let client = reqwest::Client::builder()
            .read_timeout(SEARCH_TIMEOUT)
            .user_agent(SEARCH_USER_AGENT)
            .build()
            .unwrap();

        WebSearchClient {
            client,
            max_results,
        }
    }

    async fn fetch_results_page(&self, query: &str) -> Result<String, reqwest::Error> {
        let params = SearchParams {
            q: query.to_string(),
        };

        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        response.text().await
    }

    async fn run_search(&self, query: &str, domains: &[&str], limit: usize) -> Vec<SearchResult> {
        let composed = build_search_query(query, domains);

        match self.fetch_results_page(&composed).await {
            Ok(html) => {
                let results = parse_results_page(&html, limit);
                match results.is_empty() {
                    true => log::info!("Found no results on query: {}", composed),
                    false => log::info!("Found {} results on query: {}", results.len(), composed),
                }
                results
            }
            Err(e) => {
                log::error!("Search request failed on query {}: {:?}", composed, e);
                vec![]
            }
        }
    }
}

#[async_trait]
impl ProductSearch for WebSearchClient {
    async fn search(&self, query: &str, domains: &[&str]) -> Vec<SearchResult> {
        self.run_search(query, domains, self.max_results).await
    }

    async fn search_with_limit(
        &self,
        query: &str,
        domains: &[&str],
        limit: usize,
    ) -> Vec<SearchResult> {
        self.run_search(query, domains, limit).await
    }
}

/// The caller's text is never mutated; domain restriction is appended as a
/// parenthesized `site:` disjunction, e.g. `phone (site:a.com OR site:b.com)`.
pub fn build_search_query(text: &str, domains: &[&str]) -> String {
    if domains.is_empty() {
        return text.to_string();
    }

    let site_filter = domains
        .iter()
        .map(|domain| format!("site:{}", domain.trim()))
        .join(" OR ");

    format!("{} ({})", text, site_filter)
}

/// Parse the DuckDuckGo HTML results page into normalized records, capped at
/// `limit`. Provider order is preserved; rows without a resolvable absolute
/// link are dropped.
fn parse_results_page(html: &str, limit: usize) -> Vec<SearchResult> {
    let result_selector = Selector::parse(".result").unwrap();
    let title_selector = Selector::parse(".result__title a").unwrap();
    let snippet_selector = Selector::parse(".result__snippet").unwrap();

    let document = Html::parse_document(html);

    document
        .select(&result_selector)
        .filter_map(|row| {
            let anchor = row.select(&title_selector).next()?;
            let link = resolve_result_url(anchor.value().attr("href")?)?;

            let title: String = anchor.text().collect::<String>().trim().to_string();
            let snippet = row
                .select(&snippet_selector)
                .next()
                .map(|tag| tag.text().collect::<String>().trim().to_string());

            Some(SearchResult::new(Some(title), link, snippet))
        })
        .take(limit)
        .collect()
}
