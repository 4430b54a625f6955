//! BM25 retrieval over a curated UI/UX design knowledge base, with a design system
//! composer and an MCP stdio server on top.

pub mod compose;
pub mod config;
pub mod corpus;
pub mod error;
pub mod logging;
pub mod path;
pub mod search;
pub mod server;
pub mod tools;
pub mod types;

pub use compose::{ComposeRequest, DomainSection, Recommendation, StackSection, compose_design_system};
pub use config::{Bm25Params, Config};
pub use corpus::Corpus;
pub use error::SearchError;
pub use search::{DomainHits, Index, SearchService, StackHits, Tokenizer, detect_domain};
pub use server::DesignServer;
pub use types::{Document, Domain, IndexKey, ScoredResult, Stack};
