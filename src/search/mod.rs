//! Full-text search over the design knowledge base.
//!
//! This module provides BM25 ranking per domain and per stack, including tokenization,
//! index construction, scoring, and keyword-based domain detection.

// Module declarations
pub(crate) mod detect;
pub(crate) mod engine;
pub(crate) mod index;
pub(crate) mod scoring;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use detect::detect_domain;
pub use engine::{DomainHits, SearchService, SearchServiceBuilder, StackHits};
pub use index::Index;
pub use scoring::{ABSENT_TERM_IDF, bm25_idf, bm25_tf, suggest_name};
pub use tokenize::Tokenizer;
