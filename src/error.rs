//! Error handling types and utilities.

use crate::types::IndexKey;

/// A specialized Result type for boundary code (config, corpus loading, startup).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Errors raised by the search core: index building, lookups, and composition.
///
/// All variants are local and synchronous. Retrying a failed call with the same
/// inputs always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// An index was built from zero documents.
    #[error("corpus for '{key}' contains no documents")]
    EmptyCorpus { key: IndexKey },

    /// A caller-supplied argument was out of range (e.g. a zero result limit).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The domain name is not one of the configured domains.
    #[error("unknown domain '{name}'{}", did_you_mean(.suggestion.as_deref()))]
    UnknownDomain {
        name: String,
        suggestion: Option<String>,
    },

    /// The stack name is not one of the configured stacks.
    #[error("unknown stack '{name}'{}", did_you_mean(.suggestion.as_deref()))]
    UnknownStack {
        name: String,
        suggestion: Option<String>,
    },

    /// A composition query was empty or whitespace-only.
    #[error("query must not be empty")]
    InvalidQuery,

    /// Composition was requested but no domain index is configured.
    #[error("no domain indices are configured")]
    NoDomainsAvailable,
}

fn did_you_mean(suggestion: Option<&str>) -> String {
    suggestion
        .map(|s| format!(" (did you mean '{}'?)", s))
        .unwrap_or_default()
}
