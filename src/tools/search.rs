//! BM25 search handlers for domains and stacks.

use crate::config::SearchConfig;
use crate::search::SearchService;
use crate::types::Stack;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Search query, e.g. "calm blue palette"
    pub query: String,
    /// Domain to search (style, color, typography, ux, chart, landing, product, icons,
    /// react, web). Detected from the query when omitted.
    #[serde(default)]
    pub domain: Option<String>,
    /// Maximum number of results (default: 3, clamped to 1..=10)
    #[serde(default)]
    pub n: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchStackRequest {
    /// Search query, e.g. "responsive navigation"
    pub query: String,
    /// Technology stack (default: html-tailwind)
    #[serde(default)]
    pub stack: Option<String>,
    /// Maximum number of results (default: 3, clamped to 1..=10)
    #[serde(default)]
    pub n: Option<usize>,
}

/// Search one knowledge domain.
pub fn handle_search(
    service: &SearchService,
    limits: &SearchConfig,
    request: SearchRequest,
) -> Result<String, String> {
    let limit = limits.clamp_limit(request.n);
    let hits = service
        .search(&request.query, request.domain.as_deref(), limit)
        .map_err(|e| e.to_string())?;

    serde_json::to_string_pretty(&hits).map_err(|e| format!("Failed to serialize results: {}", e))
}

/// Search the guidelines of one stack, falling back to `default_stack`.
pub fn handle_search_stack(
    service: &SearchService,
    limits: &SearchConfig,
    default_stack: Stack,
    request: SearchStackRequest,
) -> Result<String, String> {
    let limit = limits.clamp_limit(request.n);
    let stack = request
        .stack
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_stack.as_str());
    let hits = service
        .search_stack(stack, &request.query, limit)
        .map_err(|e| e.to_string())?;

    serde_json::to_string_pretty(&hits).map_err(|e| format!("Failed to serialize results: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Document, Domain};
    use assert2::{check, let_assert};

    fn service() -> SearchService {
        SearchService::builder()
            .domain(
                Domain::Color,
                (0..12)
                    .map(|i| Document::new(format!("c{:02}", i), "blue palette"))
                    .collect(),
            )
            .stack(
                Stack::HtmlTailwind,
                vec![Document::new("tw-grid", "responsive grid layout utilities")],
            )
            .build()
    }

    fn request(query: &str, domain: Option<&str>, n: Option<usize>) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            domain: domain.map(String::from),
            n,
        }
    }

    #[test]
    fn test_search_defaults_to_three() {
        let json = handle_search(&service(), &SearchConfig::default(), request("blue", Some("color"), None))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        check!(value["domain"] == "color");
        check!(value["count"] == 3);
        check!(value["results"][0]["document"]["id"] == "c00");
    }

    #[test]
    fn test_search_clamps_n() {
        let service = service();
        let limits = SearchConfig::default();

        let json = handle_search(&service, &limits, request("blue", Some("color"), Some(50))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        check!(value["count"] == 10);

        let json = handle_search(&service, &limits, request("blue", Some("color"), Some(0))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        check!(value["count"] == 1);
    }

    #[test]
    fn test_search_unknown_domain_is_error() {
        let_assert!(Err(message) = handle_search(
            &service(),
            &SearchConfig::default(),
            request("blue", Some("colr"), None)
        ));
        check!(message == "unknown domain 'colr' (did you mean 'color'?)");
    }

    #[test]
    fn test_search_stack_default() {
        let json = handle_search_stack(
            &service(),
            &SearchConfig::default(),
            Stack::HtmlTailwind,
            SearchStackRequest {
                query: "responsive grid".to_string(),
                stack: None,
                n: None,
            },
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        check!(value["stack"] == "html-tailwind");
        check!(value["results"][0]["document"]["id"] == "tw-grid");
    }
}
