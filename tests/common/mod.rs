//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `color_service`: a service with the three-document color corpus only
//! - `bundled_service`: a service built from the `data/` directory shipped with the crate
//! - `temp_data_dir`: an empty data directory for loader tests
//!
//! # Shared Infrastructure
//!
//! [`TempDataDir`] provides a temp directory with helpers for writing domain and stack
//! corpus files.

use designkb_mcp::path::{domain_file, stack_file};
use designkb_mcp::{Config, Document, Domain, SearchService, Stack, corpus};
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Returns the project root directory (where Cargo.toml lives).
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// The knowledge base bundled with the crate.
#[allow(dead_code)] // Used by some integration test crates only
pub fn bundled_data_dir() -> PathBuf {
    project_root().join("data")
}

/// A temporary data directory, cleaned up when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempDataDir {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempDataDir {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes `documents` as the corpus file of `domain`.
    pub fn write_domain(&self, domain: Domain, documents: &[Document]) {
        let json = serde_json::to_string_pretty(documents).expect("Failed to serialize documents");
        self.write_raw(&domain_file(&self.root, domain), &json);
    }

    /// Writes `documents` as the corpus file of `stack`.
    pub fn write_stack(&self, stack: Stack, documents: &[Document]) {
        let json = serde_json::to_string_pretty(documents).expect("Failed to serialize documents");
        self.write_raw(&stack_file(&self.root, stack), &json);
    }

    /// Writes arbitrary content, creating parent directories.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn write_raw(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path.display(), e)
            });
        }
        std::fs::write(path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path.display(), e));
    }
}

impl Default for TempDataDir {
    fn default() -> Self {
        Self::new()
    }
}

/// The three color documents used throughout ranking tests.
#[allow(dead_code)]
pub fn color_documents() -> Vec<Document> {
    vec![
        Document::new("c1", "warm red orange accent palette"),
        Document::new("c2", "cool blue teal calm palette"),
        Document::new("c3", "neutral gray minimal palette"),
    ]
}

#[fixture]
pub fn temp_data_dir() -> TempDataDir {
    TempDataDir::new()
}

#[fixture]
pub fn color_service() -> Arc<SearchService> {
    Arc::new(
        SearchService::builder()
            .domain(Domain::Color, color_documents())
            .build(),
    )
}

/// Builds a service over the bundled `data/` directory with default configuration.
#[allow(dead_code)]
pub async fn load_bundled_service() -> Arc<SearchService> {
    let corpus = corpus::load(&bundled_data_dir())
        .await
        .expect("Bundled knowledge base should load");
    Arc::new(SearchService::from_corpus(corpus, &Config::default()))
}

/// Service over the bundled `data/` directory, for synchronous tests.
#[fixture]
pub fn bundled_service() -> Arc<SearchService> {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("Failed to build runtime")
        .block_on(load_bundled_service())
}
