mod common;

use assert2::{check, let_assert};
use common::{bundled_service, color_documents, load_bundled_service};
use designkb_mcp::{
    ComposeRequest, Domain, SearchError, SearchService, Stack, compose_design_system,
};
use futures::future::join_all;
use rstest::rstest;
use std::sync::Arc;

/// Test: the composed design system covers all ten domains and echoes its inputs.
#[rstest]
fn fintech_design_system_is_complete(bundled_service: Arc<SearchService>) {
    let request = ComposeRequest::new("fintech banking dashboard").project("AcmePay");
    let recommendation = compose_design_system(&bundled_service, &request).unwrap();

    check!(recommendation.domains.len() == 10);
    check!(recommendation.query == "fintech banking dashboard");
    check!(recommendation.project_name.as_deref() == Some("AcmePay"));
    check!(recommendation.selected(Domain::Color).map(|d| d.id.as_str()) == Some("color-fintech-navy"));
    check!(
        recommendation.selected(Domain::Product).map(|d| d.id.as_str())
            == Some("product-fintech-dashboard")
    );
}

/// Test: metadata is passed through untouched.
#[rstest]
fn metadata_passes_through(bundled_service: Arc<SearchService>) {
    let recommendation =
        compose_design_system(&bundled_service, &ComposeRequest::new("fintech banking")).unwrap();
    let_assert!(Some(color) = recommendation.selected(Domain::Color));
    check!(color.metadata["primary"] == "#1E3A8A");
    check!(color.metadata["accent"] == "#10B981");
}

/// Test: the query is echoed literally, whitespace included.
#[rstest]
fn query_echoed_verbatim(bundled_service: Arc<SearchService>) {
    let query = "  Fintech   BANKING dashboard ";
    let recommendation =
        compose_design_system(&bundled_service, &ComposeRequest::new(query)).unwrap();
    check!(recommendation.query == query);
}

/// Test: a known stack adds a populated stack section.
#[rstest]
fn known_stack_section(bundled_service: Arc<SearchService>) {
    let request = ComposeRequest::new("dashboard layout sidebar").stack("html-tailwind");
    let recommendation = compose_design_system(&bundled_service, &request).unwrap();

    let_assert!(Some(stack) = recommendation.stack);
    check!(stack.stack == Some(Stack::HtmlTailwind));
    check!(stack.section.selected.map(|r| r.id()) == Some("tw-dashboard-layout"));
    check!(stack.section.note.is_none());
}

/// Test: valid-but-unconfigured and invalid stack names both degrade to a note.
#[rstest]
#[case("flutter")]
#[case("not-a-stack")]
fn missing_stack_degrades(bundled_service: Arc<SearchService>, #[case] stack: &str) {
    let request = ComposeRequest::new("fintech banking dashboard").stack(stack);
    let recommendation = compose_design_system(&bundled_service, &request).unwrap();

    check!(recommendation.domains.len() == 10);
    let_assert!(Some(section) = recommendation.stack);
    check!(section.requested == stack);
    check!(section.stack.is_none());
    check!(section.section.selected.is_none());
    check!(section.section.note.is_some());
}

/// Test: composition over a single configured domain still reports every domain.
#[test]
fn partial_configuration_reports_every_domain() {
    let service = SearchService::builder()
        .domain(Domain::Color, color_documents())
        .build();
    let recommendation =
        compose_design_system(&service, &ComposeRequest::new("calm blue palette")).unwrap();

    check!(recommendation.domains.len() == Domain::ALL.len());
    check!(recommendation.selected(Domain::Color).map(|d| d.id.as_str()) == Some("c2"));
    for domain in Domain::ALL.into_iter().filter(|d| *d != Domain::Color) {
        check!(recommendation.domains[&domain].selected.is_none());
        check!(recommendation.domains[&domain].note.is_some());
    }
}

/// Test: whitespace-only query is a hard failure.
#[rstest]
fn blank_query_fails(bundled_service: Arc<SearchService>) {
    let_assert!(Err(SearchError::InvalidQuery) =
        compose_design_system(&bundled_service, &ComposeRequest::new(" \t ")));
}

/// Test: a service without domain indices cannot compose.
#[test]
fn no_domains_fails() {
    let service = SearchService::builder().build();
    let_assert!(Err(SearchError::NoDomainsAvailable) =
        compose_design_system(&service, &ComposeRequest::new("anything")));
}

/// Test: concurrent compositions over one shared service agree with a sequential run.
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_compositions_are_consistent() {
    let service = load_bundled_service().await;
    let queries = [
        "fintech banking dashboard",
        "calm wellness app",
        "playful startup landing page",
        "healthcare patient portal",
    ];

    let expected: Vec<String> = queries
        .iter()
        .map(|q| {
            let recommendation = compose_design_system(&service, &ComposeRequest::new(q)).unwrap();
            serde_json::to_string(&recommendation).unwrap()
        })
        .collect();

    let tasks = (0..8).flat_map(|_| queries.iter().enumerate()).map(|(i, q)| {
        let service = Arc::clone(&service);
        let query = (*q).to_string();
        tokio::spawn(async move {
            let recommendation =
                compose_design_system(&service, &ComposeRequest::new(&query)).unwrap();
            (i, serde_json::to_string(&recommendation).unwrap())
        })
    });

    for result in join_all(tasks).await {
        let (i, json) = result.unwrap();
        check!(json == expected[i]);
    }
}
