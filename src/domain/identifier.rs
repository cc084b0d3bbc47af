use url::Url;

/// User input tagged once at the entry point: either a direct product-page
/// URL or a free-text search keyword. Flows receive the tagged value
/// instead of re-deriving it.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductIdentifier {
    Url(String),
    Keyword(String),
}

impl ProductIdentifier {
    pub fn classify(input: &str) -> Self {
        match Url::parse(input) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
                ProductIdentifier::Url(input.to_string())
            }
            _ => ProductIdentifier::Keyword(input.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProductIdentifier::Url(s) => s,
            ProductIdentifier::Keyword(s) => s,
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, ProductIdentifier::Url(_))
    }
}

#[cfg(test)]
mod tests {
    use super::ProductIdentifier;

    #[test]
    fn classify_http_and_https_urls() {
        let https = ProductIdentifier::classify("https://shopee.vn/tai-nghe-bluetooth-i.123");
        let http = ProductIdentifier::classify("http://tiki.vn/p/456");

        assert!(https.is_url());
        assert!(http.is_url());
        assert_eq!(https.as_str(), "https://shopee.vn/tai-nghe-bluetooth-i.123");
    }

    #[test]
    fn classify_keywords() {
        let keyword = ProductIdentifier::classify("tai nghe bluetooth");
        let schemeless = ProductIdentifier::classify("shopee.vn/tai-nghe");
        let empty = ProductIdentifier::classify("");

        assert_eq!(
            keyword,
            ProductIdentifier::Keyword("tai nghe bluetooth".to_string())
        );
        assert!(!schemeless.is_url());
        assert_eq!(empty.as_str(), "");
    }

    #[test]
    fn classify_rejects_non_web_schemes() {
        let ftp = ProductIdentifier::classify("ftp://files.example.com/catalog");

        assert!(!ftp.is_url());
    }
}
