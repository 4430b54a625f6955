//! Loading the knowledge base from disk.
//!
//! Layout under the data directory:
//!
//! ```text
//! domains/<domain>.json   e.g. domains/color.json
//! stacks/<stack>.json     e.g. stacks/html-tailwind.json
//! ```
//!
//! Each file holds a JSON array of [`Document`] records.

use crate::error::Result;
use crate::path::{domain_file, stack_file};
use crate::types::{Document, Domain, Stack};
use ahash::AHashSet;
use anyhow::{Context, bail};
use std::collections::BTreeMap;
use std::path::Path;

/// Documents for every domain and stack found on disk.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub domains: BTreeMap<Domain, Vec<Document>>,
    pub stacks: BTreeMap<Stack, Vec<Document>>,
}

impl Corpus {
    pub fn document_count(&self) -> usize {
        self.domains.values().chain(self.stacks.values()).map(Vec::len).sum()
    }
}

/// Read every domain and stack file under `data_dir`.
///
/// A missing file leaves that key unconfigured. A file that fails to parse, or that
/// repeats a document id, is an error.
pub async fn load(data_dir: &Path) -> Result<Corpus> {
    let start = std::time::Instant::now();

    if !tokio::fs::try_exists(data_dir)
        .await
        .with_context(|| format!("Failed to access data directory {}", data_dir.display()))?
    {
        bail!("Data directory {} does not exist", data_dir.display());
    }

    let mut corpus = Corpus::default();
    for domain in Domain::ALL {
        if let Some(documents) = read_documents(&domain_file(data_dir, domain)).await? {
            corpus.domains.insert(domain, documents);
        }
    }
    for stack in Stack::ALL {
        if let Some(documents) = read_documents(&stack_file(data_dir, stack)).await? {
            corpus.stacks.insert(stack, documents);
        }
    }

    tracing::info!(
        "Loaded {} documents ({} domains, {} stacks) from {} in {:?}",
        corpus.document_count(),
        corpus.domains.len(),
        corpus.stacks.len(),
        data_dir.display(),
        start.elapsed()
    );

    Ok(corpus)
}

/// Read one corpus file. `Ok(None)` when it does not exist.
async fn read_documents(path: &Path) -> Result<Option<Vec<Document>>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("No corpus file at {}; key left unconfigured", path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let documents = parse_documents(&content)
        .with_context(|| format!("Failed to parse corpus file {}", path.display()))?;
    tracing::debug!("Read {} documents from {}", documents.len(), path.display());

    Ok(Some(documents))
}

/// Parse a JSON array of documents, rejecting duplicate ids.
pub fn parse_documents(content: &str) -> Result<Vec<Document>> {
    let documents: Vec<Document> = serde_json::from_str(content)?;

    let mut seen = AHashSet::with_capacity(documents.len());
    for document in &documents {
        if document.id.trim().is_empty() {
            bail!("Document with empty id");
        }
        if !seen.insert(document.id.as_str()) {
            bail!("Duplicate document id '{}'", document.id);
        }
    }

    Ok(documents)
}
