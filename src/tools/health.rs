//! Service health and inventory.

use crate::search::SearchService;
use crate::types::{Domain, Stack};
use serde::Serialize;

pub const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub domains: Vec<Domain>,
    pub stacks: Vec<Stack>,
}

impl HealthResponse {
    pub fn new(service: &SearchService) -> Self {
        Self {
            status: "ok",
            service: SERVICE_NAME,
            version: SERVICE_VERSION,
            domains: service.domains(),
            stacks: service.stacks(),
        }
    }
}

/// Report status and the configured domains and stacks.
pub fn handle_health(service: &SearchService) -> Result<String, String> {
    serde_json::to_string_pretty(&HealthResponse::new(service))
        .map_err(|e| format!("Failed to serialize health: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Document;
    use assert2::check;

    #[test]
    fn test_health_lists_configured_keys() {
        let service = SearchService::builder()
            .domain(Domain::Web, vec![Document::new("w", "semantic html")])
            .domain(Domain::Style, vec![Document::new("s", "minimal")])
            .stack(Stack::NuxtUi, vec![Document::new("n", "nuxt ui")])
            .build();
        let value: serde_json::Value =
            serde_json::from_str(&handle_health(&service).unwrap()).unwrap();

        check!(value["status"] == "ok");
        check!(value["service"] == SERVICE_NAME);
        check!(value["domains"] == serde_json::json!(["style", "web"]));
        check!(value["stacks"] == serde_json::json!(["nuxt-ui"]));
    }
}
