//! Design system composition handler.

use crate::compose::{ComposeRequest, compose_design_system};
use crate::search::SearchService;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DesignSystemRequest {
    /// What is being designed, e.g. "fintech banking dashboard"
    pub query: String,
    /// Project name echoed back in the recommendation
    #[serde(default)]
    pub project: Option<String>,
    /// Optional technology stack whose guidelines are added to the recommendation
    #[serde(default)]
    pub stack: Option<String>,
}

/// Compose a full design system recommendation.
pub fn handle_design_system(
    service: &SearchService,
    request: DesignSystemRequest,
) -> Result<String, String> {
    let mut compose = ComposeRequest::new(&request.query);
    if let Some(project) = request.project.as_deref() {
        compose = compose.project(project);
    }
    if let Some(stack) = request.stack.as_deref() {
        compose = compose.stack(stack);
    }

    let recommendation =
        compose_design_system(service, &compose).map_err(|e| e.to_string())?;

    serde_json::to_string_pretty(&recommendation)
        .map_err(|e| format!("Failed to serialize recommendation: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Document, Domain};
    use assert2::{check, let_assert};

    #[test]
    fn test_design_system_json() {
        let service = SearchService::builder()
            .domain(Domain::Product, vec![Document::new("p1", "fintech banking dashboard")])
            .build();
        let json = handle_design_system(
            &service,
            DesignSystemRequest {
                query: "fintech banking dashboard".to_string(),
                project: Some("AcmePay".to_string()),
                stack: Some("fortran".to_string()),
            },
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        check!(value["query"] == "fintech banking dashboard");
        check!(value["project_name"] == "AcmePay");
        check!(value["domains"].as_object().map(serde_json::Map::len) == Some(10));
        check!(value["domains"]["product"]["selected"]["document"]["id"] == "p1");
        check!(value["stack"]["requested"] == "fortran");
        check!(value["stack"]["stack"].is_null());
        check!(value["stack"]["note"].is_string());
    }

    #[test]
    fn test_design_system_empty_query() {
        let service = SearchService::builder()
            .domain(Domain::Product, vec![Document::new("p1", "dashboard")])
            .build();
        let_assert!(Err(message) = handle_design_system(
            &service,
            DesignSystemRequest {
                query: "  ".to_string(),
                project: None,
                stack: None,
            },
        ));
        check!(message == "query must not be empty");
    }
}
