//! Design system composition: one query fanned out over every domain (and optionally a
//! stack), merged into a single recommendation.

use crate::error::SearchError;
use crate::search::SearchService;
use crate::types::{Document, Domain, ScoredResult, Stack};
use serde::Serialize;
use std::collections::BTreeMap;

/// Note attached to a domain that has no index.
const UNCONFIGURED_DOMAIN_NOTE: &str = "no knowledge base is configured for this domain";

/// Inputs of one composition request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeRequest<'q> {
    pub query: &'q str,
    pub project: Option<&'q str>,
    /// Stack name as supplied by the caller; resolved during composition.
    pub stack: Option<&'q str>,
}

impl<'q> ComposeRequest<'q> {
    pub fn new(query: &'q str) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn project(mut self, project: &'q str) -> Self {
        self.project = Some(project);
        self
    }

    pub fn stack(mut self, stack: &'q str) -> Self {
        self.stack = Some(stack);
        self
    }
}

/// The best match of one domain plus its runners-up.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DomainSection<'a> {
    pub selected: Option<ScoredResult<'a>>,
    pub alternatives: Vec<ScoredResult<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl<'a> DomainSection<'a> {
    fn from_results(results: Vec<ScoredResult<'a>>) -> Self {
        let mut results = results.into_iter();
        Self {
            selected: results.next(),
            alternatives: results.collect(),
            note: None,
        }
    }

    fn with_note(note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            ..Self::default()
        }
    }
}

/// Stack-specific guidance attached to a recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct StackSection<'a> {
    /// The stack name exactly as requested.
    pub requested: String,
    /// The resolved stack, or `None` when the name did not resolve.
    pub stack: Option<Stack>,
    #[serde(flatten)]
    pub section: DomainSection<'a>,
}

/// A composed design system for one query.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation<'a> {
    /// The query, verbatim.
    pub query: String,
    pub project_name: Option<String>,
    /// One entry per domain, in composition order.
    pub domains: BTreeMap<Domain, DomainSection<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<StackSection<'a>>,
}

impl<'a> Recommendation<'a> {
    /// The selected document of `domain`, if that domain produced any match.
    pub fn selected(&self, domain: Domain) -> Option<&'a Document> {
        self.domains
            .get(&domain)
            .and_then(|section| section.selected)
            .map(|result| result.document)
    }

    /// Number of domains with a selected document.
    pub fn matched_domains(&self) -> usize {
        self.domains
            .values()
            .filter(|section| section.selected.is_some())
            .count()
    }
}

/// Compose a design system recommendation for `request`.
///
/// Every domain appears in the result, with an empty section when it has no match or
/// no index. An unknown stack becomes a note on the stack section. Only an empty query,
/// or a service with no domain indices at all, fails the request.
pub fn compose_design_system<'a>(
    service: &'a SearchService,
    request: &ComposeRequest<'_>,
) -> Result<Recommendation<'a>, SearchError> {
    if request.query.trim().is_empty() {
        return Err(SearchError::InvalidQuery);
    }
    let configured = service.domains();
    if configured.is_empty() {
        return Err(SearchError::NoDomainsAvailable);
    }

    let top_k = service.compose_top_k();
    let mut domains = BTreeMap::new();
    for domain in Domain::ALL {
        let section = if configured.contains(&domain) {
            match service.search_domain(domain, request.query, top_k) {
                Ok(results) => DomainSection::from_results(results),
                Err(e) => {
                    tracing::warn!("Composing '{}': {} skipped: {}", request.query, domain, e);
                    DomainSection::with_note(e.to_string())
                }
            }
        } else {
            DomainSection::with_note(UNCONFIGURED_DOMAIN_NOTE)
        };
        domains.insert(domain, section);
    }

    let stack = request
        .stack
        .map(|name| compose_stack(service, name, request.query, top_k));

    let recommendation = Recommendation {
        query: request.query.to_string(),
        project_name: request.project.map(str::to_string),
        domains,
        stack,
    };

    tracing::debug!(
        "Composed '{}' for {:?}: {}/{} domains matched",
        request.query,
        request.project,
        recommendation.matched_domains(),
        recommendation.domains.len()
    );

    Ok(recommendation)
}

fn compose_stack<'a>(
    service: &'a SearchService,
    name: &str,
    query: &str,
    top_k: usize,
) -> StackSection<'a> {
    match service.search_stack(name, query, top_k) {
        Ok(hits) => StackSection {
            requested: name.to_string(),
            stack: Some(hits.stack),
            section: DomainSection::from_results(hits.results),
        },
        Err(e) => {
            tracing::warn!("Composing '{}': stack section left empty: {}", query, e);
            StackSection {
                requested: name.to_string(),
                stack: None,
                section: DomainSection::with_note(e.to_string()),
            }
        }
    }
}
