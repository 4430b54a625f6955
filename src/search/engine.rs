//! The search service: every built index plus name-based dispatch.

use crate::config::{Bm25Params, Config};
use crate::corpus::Corpus;
use crate::error::SearchError;
use crate::types::{Document, Domain, IndexKey, ScoredResult, Stack};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::detect::detect_domain;
use super::index::Index;
use super::scoring::suggest_name;
use super::tokenize::Tokenizer;

/// Results of a domain query, with the domain that was actually searched.
#[derive(Debug, Clone, Serialize)]
pub struct DomainHits<'a> {
    pub domain: Domain,
    /// `true` when the domain was picked by keyword detection
    pub detected: bool,
    pub query: String,
    pub count: usize,
    pub results: Vec<ScoredResult<'a>>,
}

/// Results of a stack query.
#[derive(Debug, Clone, Serialize)]
pub struct StackHits<'a> {
    pub stack: Stack,
    pub query: String,
    pub count: usize,
    pub results: Vec<ScoredResult<'a>>,
}

/// All built indices, created once at startup and read-only afterwards.
///
/// Share it behind an `Arc`; every method takes `&self`.
#[derive(Debug)]
pub struct SearchService {
    domains: BTreeMap<Domain, Index>,
    stacks: BTreeMap<Stack, Index>,
    compose_top_k: usize,
}

impl SearchService {
    pub fn builder() -> SearchServiceBuilder {
        SearchServiceBuilder::default()
    }

    /// Build every index in `corpus` using the tokenizer and BM25 settings of `config`.
    pub fn from_corpus(corpus: Corpus, config: &Config) -> Self {
        let mut builder = Self::builder()
            .tokenizer(Tokenizer::new(&config.tokenizer))
            .bm25(config.bm25)
            .compose_top_k(config.compose.top_k);
        for (domain, documents) in corpus.domains {
            builder = builder.domain(domain, documents);
        }
        for (stack, documents) in corpus.stacks {
            builder = builder.stack(stack, documents);
        }
        builder.build()
    }

    /// Configured domains, in composition order.
    pub fn domains(&self) -> Vec<Domain> {
        self.domains.keys().copied().collect()
    }

    /// Configured stacks.
    pub fn stacks(&self) -> Vec<Stack> {
        self.stacks.keys().copied().collect()
    }

    /// Candidates per domain used by composition.
    pub fn compose_top_k(&self) -> usize {
        self.compose_top_k
    }

    /// Resolve a domain name against the configured set.
    pub fn resolve_domain(&self, name: &str) -> Result<Domain, SearchError> {
        match name.parse::<Domain>() {
            Ok(domain) if self.domains.contains_key(&domain) => Ok(domain),
            _ => Err(self.unknown_domain(name)),
        }
    }

    /// Resolve a stack name against the configured set.
    pub fn resolve_stack(&self, name: &str) -> Result<Stack, SearchError> {
        match name.parse::<Stack>() {
            Ok(stack) if self.stacks.contains_key(&stack) => Ok(stack),
            _ => Err(self.unknown_stack(name)),
        }
    }

    pub fn domain_index(&self, domain: Domain) -> Result<&Index, SearchError> {
        self.domains
            .get(&domain)
            .ok_or_else(|| self.unknown_domain(domain.as_str()))
    }

    pub fn stack_index(&self, stack: Stack) -> Result<&Index, SearchError> {
        self.stacks
            .get(&stack)
            .ok_or_else(|| self.unknown_stack(stack.as_str()))
    }

    fn unknown_domain(&self, name: &str) -> SearchError {
        SearchError::UnknownDomain {
            name: name.to_string(),
            suggestion: suggest_name(
                &name.trim().to_lowercase(),
                self.domains.keys().map(|d| d.as_str()),
            ),
        }
    }

    fn unknown_stack(&self, name: &str) -> SearchError {
        SearchError::UnknownStack {
            name: name.to_string(),
            suggestion: suggest_name(
                &name.trim().to_lowercase(),
                self.stacks.keys().map(|s| s.as_str()),
            ),
        }
    }

    /// Search one domain by name, or detect the domain from the query when `domain`
    /// is `None`.
    pub fn search(
        &self,
        query: &str,
        domain: Option<&str>,
        limit: usize,
    ) -> Result<DomainHits<'_>, SearchError> {
        let (domain, detected) = match domain {
            Some(name) => (self.resolve_domain(name)?, false),
            None => {
                let candidates = self.domains();
                let domain =
                    detect_domain(query, &candidates).ok_or(SearchError::NoDomainsAvailable)?;
                (domain, true)
            }
        };

        let results = self.search_domain(domain, query, limit)?;
        tracing::debug!(
            "search '{}' in {} (detected: {}) -> {} results",
            query,
            domain,
            detected,
            results.len()
        );

        Ok(DomainHits {
            domain,
            detected,
            query: query.to_string(),
            count: results.len(),
            results,
        })
    }

    pub fn search_domain(
        &self,
        domain: Domain,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ScoredResult<'_>>, SearchError> {
        self.domain_index(domain)?.search(query, limit)
    }

    /// Search the guidelines of the stack named `stack`.
    pub fn search_stack(
        &self,
        stack: &str,
        query: &str,
        limit: usize,
    ) -> Result<StackHits<'_>, SearchError> {
        let stack = self.resolve_stack(stack)?;
        let results = self.stack_index(stack)?.search(query, limit)?;
        tracing::debug!(
            "search_stack '{}' in {} -> {} results",
            query,
            stack,
            results.len()
        );

        Ok(StackHits {
            stack,
            query: query.to_string(),
            count: results.len(),
            results,
        })
    }
}

/// Collects per-key documents and builds every index in one step.
#[derive(Debug)]
pub struct SearchServiceBuilder {
    tokenizer: Arc<Tokenizer>,
    params: Bm25Params,
    compose_top_k: usize,
    domains: BTreeMap<Domain, Vec<Document>>,
    stacks: BTreeMap<Stack, Vec<Document>>,
}

impl Default for SearchServiceBuilder {
    fn default() -> Self {
        Self {
            tokenizer: Arc::new(Tokenizer::default()),
            params: Bm25Params::default(),
            compose_top_k: crate::config::ComposeConfig::default().top_k,
            domains: BTreeMap::new(),
            stacks: BTreeMap::new(),
        }
    }
}

impl SearchServiceBuilder {
    pub fn tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = Arc::new(tokenizer);
        self
    }

    pub fn bm25(mut self, params: Bm25Params) -> Self {
        self.params = params;
        self
    }

    /// Candidates per domain during composition, clamped into `1..=3`.
    pub fn compose_top_k(mut self, top_k: usize) -> Self {
        self.compose_top_k = top_k.clamp(1, crate::config::MAX_COMPOSE_TOP_K);
        self
    }

    /// Register the documents of a domain. Registering twice replaces the first set.
    pub fn domain(mut self, domain: Domain, documents: Vec<Document>) -> Self {
        self.domains.insert(domain, documents);
        self
    }

    /// Register the guideline documents of a stack.
    pub fn stack(mut self, stack: Stack, documents: Vec<Document>) -> Self {
        self.stacks.insert(stack, documents);
        self
    }

    /// Build all indices.
    ///
    /// A key registered with zero documents still becomes a configured key, backed by
    /// an empty index that answers every query with no results.
    pub fn build(self) -> SearchService {
        let start = std::time::Instant::now();
        let tokenizer = self.tokenizer;
        let params = self.params;

        let build_index = |key: IndexKey, documents: Vec<Document>| {
            Index::build(key, documents, tokenizer.clone(), params).unwrap_or_else(|e| {
                tracing::warn!("{}; queries against it will return no results", e);
                Index::empty(key, tokenizer.clone(), params)
            })
        };

        let domains: BTreeMap<Domain, Index> = self
            .domains
            .into_iter()
            .map(|(domain, docs)| (domain, build_index(IndexKey::Domain(domain), docs)))
            .collect();
        let stacks: BTreeMap<Stack, Index> = self
            .stacks
            .into_iter()
            .map(|(stack, docs)| (stack, build_index(IndexKey::Stack(stack), docs)))
            .collect();

        tracing::info!(
            "Search service ready: {} domains, {} stacks in {:?}",
            domains.len(),
            stacks.len(),
            start.elapsed()
        );

        SearchService {
            domains,
            stacks,
            compose_top_k: self.compose_top_k,
        }
    }
}
