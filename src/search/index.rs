//! BM25 inverted index over the documents of one domain or stack.

use crate::config::Bm25Params;
use crate::error::SearchError;
use crate::types::{Document, IndexKey, ScoredResult};
use ahash::AHashMap;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::scoring::{ABSENT_TERM_IDF, bm25_idf, bm25_tf};
use super::tokenize::Tokenizer;

/// Position of a document inside `Index::documents`.
type DocIdx = usize;

/// An immutable BM25 index.
///
/// Statistics are computed once in [`Index::build`] and never change; an `Index` is
/// `Send + Sync` and can be queried concurrently without locking.
#[derive(Debug)]
pub struct Index {
    key: IndexKey,
    params: Bm25Params,
    tokenizer: Arc<Tokenizer>,
    documents: Vec<Document>,
    /// Token count per document, parallel to `documents`
    doc_lengths: Vec<u32>,
    avg_doc_length: f64,
    /// Term -> (document, term frequency), ascending by document.
    /// The list length is the term's document frequency.
    postings: AHashMap<String, Vec<(DocIdx, u32)>>,
}

impl Index {
    /// Build an index over `documents`.
    ///
    /// Fails with [`SearchError::EmptyCorpus`] when `documents` is empty; use
    /// [`Index::empty`] to register a degenerate index instead.
    pub fn build(
        key: IndexKey,
        documents: Vec<Document>,
        tokenizer: Arc<Tokenizer>,
        params: Bm25Params,
    ) -> Result<Self, SearchError> {
        if documents.is_empty() {
            return Err(SearchError::EmptyCorpus { key });
        }

        let start = std::time::Instant::now();
        let mut postings: AHashMap<String, Vec<(DocIdx, u32)>> = AHashMap::new();
        let mut doc_lengths = Vec::with_capacity(documents.len());

        for (doc_idx, document) in documents.iter().enumerate() {
            let tokens = tokenizer.tokenize(&document.indexed_text());
            doc_lengths.push(u32::try_from(tokens.len()).unwrap_or(u32::MAX));

            // Count term frequencies for this document
            let mut counts: AHashMap<String, u32> = AHashMap::with_capacity(tokens.len());
            for token in tokens {
                *counts.entry(token).or_insert(0) += 1;
            }

            for (term, tf) in counts {
                postings.entry(term).or_default().push((doc_idx, tf));
            }
        }

        let total_length: u64 = doc_lengths.iter().map(|&len| u64::from(len)).sum();
        let avg_doc_length = total_length as f64 / documents.len() as f64;

        let index = Self {
            key,
            params,
            tokenizer,
            documents,
            doc_lengths,
            avg_doc_length,
            postings,
        };

        tracing::info!(
            "Built search index for '{}': {} unique terms, {} documents, avgdl {:.2} in {:?}",
            index.key,
            index.term_count(),
            index.len(),
            index.avg_doc_length,
            start.elapsed()
        );

        Ok(index)
    }

    /// An index with no documents. Every query against it returns no results.
    pub fn empty(key: IndexKey, tokenizer: Arc<Tokenizer>, params: Bm25Params) -> Self {
        Self {
            key,
            params,
            tokenizer,
            documents: Vec::new(),
            doc_lengths: Vec::new(),
            avg_doc_length: 0.0,
            postings: AHashMap::new(),
        }
    }

    pub fn key(&self) -> IndexKey {
        self.key
    }

    pub fn params(&self) -> Bm25Params {
        self.params
    }

    /// Number of documents (`N`).
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Average document length in tokens (`avgdl`). Zero for an empty index.
    pub fn avg_doc_length(&self) -> f64 {
        self.avg_doc_length
    }

    /// Number of documents containing the already-tokenized `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, Vec::len)
    }

    /// IDF of an already-tokenized term. Terms absent from the corpus get `ln(1.5)`.
    pub fn idf(&self, term: &str) -> f64 {
        match self.document_frequency(term) {
            0 => ABSENT_TERM_IDF,
            df => bm25_idf(self.len(), df),
        }
    }

    /// Ranks documents against `query`.
    ///
    /// Returns at most `limit` results ordered by score descending, then document
    /// id ascending. Documents matching no query term are omitted, so an empty
    /// (or stop-word-only) query yields no results.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<ScoredResult<'_>>, SearchError> {
        if limit == 0 {
            return Err(SearchError::InvalidArgument(
                "limit must be a positive integer".to_string(),
            ));
        }

        let query_terms = self.query_terms(query);
        if query_terms.is_empty() || self.is_empty() {
            return Ok(vec![]);
        }

        let mut scores: AHashMap<DocIdx, f64> = AHashMap::new();

        // BTreeMap iteration keeps the floating-point summation order stable
        for (term, query_tf) in &query_terms {
            let Some(postings) = self.postings.get(term) else {
                continue;
            };
            let idf = bm25_idf(self.len(), postings.len());
            for &(doc_idx, tf) in postings {
                *scores.entry(doc_idx).or_insert(0.0) +=
                    f64::from(*query_tf) * idf * self.tf_weight(doc_idx, tf);
            }
        }

        let mut ranked: Vec<(DocIdx, f64)> =
            scores.into_iter().filter(|(_, score)| *score > 0.0).collect();
        ranked.sort_by(|a, b| self.compare(*a, *b));
        ranked.truncate(limit);

        tracing::trace!(
            "Query '{}' against '{}' matched {} documents",
            query,
            self.key,
            ranked.len()
        );

        Ok(ranked
            .into_iter()
            .map(|(doc_idx, score)| ScoredResult {
                document: &self.documents[doc_idx],
                score,
            })
            .collect())
    }

    /// BM25 score of the document `id` for `query`, or `None` if no such document.
    ///
    /// Unlike [`Index::search`] this reports zero scores too.
    pub fn score(&self, id: &str, query: &str) -> Option<f64> {
        let doc_idx = self.documents.iter().position(|d| d.id == id)?;
        let query_terms = self.query_terms(query);

        let mut score = 0.0;
        for (term, query_tf) in &query_terms {
            let Some(postings) = self.postings.get(term) else {
                continue;
            };
            if let Ok(pos) = postings.binary_search_by_key(&doc_idx, |&(idx, _)| idx) {
                let idf = bm25_idf(self.len(), postings.len());
                score += f64::from(*query_tf) * idf * self.tf_weight(doc_idx, postings[pos].1);
            }
        }
        Some(score)
    }

    /// Tokenize a query and count duplicate terms.
    fn query_terms(&self, query: &str) -> BTreeMap<String, u32> {
        let mut terms = BTreeMap::new();
        for token in self.tokenizer.tokenize(query) {
            *terms.entry(token).or_insert(0) += 1;
        }
        terms
    }

    fn tf_weight(&self, doc_idx: DocIdx, tf: u32) -> f64 {
        bm25_tf(tf, self.doc_lengths[doc_idx], self.avg_doc_length, self.params)
    }

    /// Score descending, then document id ascending, then corpus position.
    fn compare(&self, (a_idx, a_score): (DocIdx, f64), (b_idx, b_score): (DocIdx, f64)) -> Ordering {
        b_score
            .total_cmp(&a_score)
            .then_with(|| self.documents[a_idx].id.cmp(&self.documents[b_idx].id))
            .then_with(|| a_idx.cmp(&b_idx))
    }
}
