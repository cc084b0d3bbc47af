use serde::Serialize;
use url::Url;

pub const NO_TITLE_PLACEHOLDER: &str = "Không có tiêu đề";
pub const NO_SNIPPET_PLACEHOLDER: &str = "Không có mô tả";

/// One normalized web search result. `link` is always an absolute http(s)
/// URL; `title` and `snippet` are never empty — missing provider fields are
/// coalesced to placeholders so nothing downstream has to handle holes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

impl SearchResult {
    pub fn new(title: Option<String>, link: String, snippet: Option<String>) -> Self {
        let title = match title {
            Some(t) if !t.trim().is_empty() => t,
            _ => NO_TITLE_PLACEHOLDER.to_string(),
        };
        let snippet = match snippet {
            Some(s) if !s.trim().is_empty() => s,
            _ => NO_SNIPPET_PLACEHOLDER.to_string(),
        };

        SearchResult {
            title,
            link,
            snippet,
        }
    }
}

/// DuckDuckGo wraps result links in a redirect of the form
/// `//duckduckgo.com/l/?uddg=<encoded target>`. Unwrap the target and
/// reject anything that does not end up as an absolute http(s) URL.
pub fn resolve_result_url(href: &str) -> Option<String> {
    let absolute = match href.strip_prefix("//") {
        Some(rest) => format!("https://{}", rest),
        None => href.to_string(),
    };

    let parsed = Url::parse(&absolute).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let is_redirect = parsed
        .host_str()
        .is_some_and(|host| host.ends_with("duckduckgo.com"))
        && parsed.path().starts_with("/l/");
    if !is_redirect {
        return Some(absolute);
    }

    let target = parsed
        .query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, value)| value.into_owned())?;

    match Url::parse(&target) {
        Ok(t) if matches!(t.scheme(), "http" | "https") => Some(target),
        _ => None,
    }
}
