//! Product-page fetching for the extraction phase. The page is reduced to
//! plain text before it is handed to the agent; the model never sees raw
//! markup beyond what survives tag stripping.

use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

use crate::error::{AgentError, AgentResult};

const DEFAULT_MAX_CHARS: usize = 12_000;
const FETCH_TIMEOUT_SECS: u64 = 20;

/// Capability to turn a product URL into plain page text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> AgentResult<String>;
}

/// HTTP implementation: GET the page, strip markup, cap the length.
#[derive(Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
    max_chars: usize,
}

impl Default for HttpPageFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS)
    }
}

impl HttpPageFetcher {
    pub fn new(max_chars: usize) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self { client, max_chars }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_text(&self, url: &str) -> AgentResult<String> {
        debug!(url, "fetching product page");

        let response = self
            .client
            .get(url)
            .header("User-Agent", "Mozilla/5.0 (compatible; reviewsim/0.1)")
            .send()
            .await
            .map_err(|e| AgentError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::Fetch {
                url: url.to_string(),
                reason: format!("status {}", status),
            });
        }

        let html = response.text().await.map_err(|e| AgentError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let mut text = html_to_text(&html);
        if text.len() > self.max_chars {
            let mut cut = self.max_chars;
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            text.truncate(cut);
        }
        Ok(text)
    }
}

/// Strip scripts, styles, and tags; decode common entities; collapse runs of
/// whitespace into single spaces.
pub fn html_to_text(html: &str) -> String {
    static SCRIPT_RE: OnceLock<Regex> = OnceLock::new();
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    static WS_RE: OnceLock<Regex> = OnceLock::new();

    let script_re = SCRIPT_RE.get_or_init(|| {
        Regex::new(r"(?is)<(script|style|noscript)\b.*?</(script|style|noscript)>").unwrap()
    });
    let tag_re = TAG_RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").unwrap());
    let ws_re = WS_RE.get_or_init(|| Regex::new(r"\s+").unwrap());

    let without_blocks = script_re.replace_all(html, " ");
    let without_tags = tag_re.replace_all(&without_blocks, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    ws_re.replace_all(&decoded, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_tags_and_scripts_are_stripped() {
        let html = r#"<html><head><style>.x{color:red}</style>
            <script>var a = "<div>";</script></head>
            <body><h1>Smart Lamp</h1><p>Price: 49,99&nbsp;&euro;</p></body></html>"#;
        let text = html_to_text(html);
        assert!(text.contains("Smart Lamp"));
        assert!(text.contains("Price: 49,99"));
        assert!(!text.contains("color:red"));
        assert!(!text.contains("var a"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_entities_decoded_and_whitespace_collapsed() {
        let text = html_to_text("a &amp; b\n\n\t  c &quot;d&quot;");
        assert_eq!(text, "a & b c \"d\"");
    }

    #[tokio::test]
    async fn test_fetch_returns_page_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/product"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<html><body>Desk</body></html>"),
            )
            .mount(&server)
            .await;

        let fetcher = HttpPageFetcher::default();
        let text = fetcher
            .fetch_text(&format!("{}/product", server.uri()))
            .await
            .unwrap();
        assert_eq!(text, "Desk");
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpPageFetcher::default();
        let err = fetcher
            .fetch_text(&format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_fetch_truncates_long_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/long"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(500)))
            .mount(&server)
            .await;

        let fetcher = HttpPageFetcher::new(100);
        let text = fetcher
            .fetch_text(&format!("{}/long", server.uri()))
            .await
            .unwrap();
        assert_eq!(text.len(), 100);
    }
}
