//! Relevance formulas: BM25 term weights and fuzzy name suggestions.

use crate::config::Bm25Params;
use rapidfuzz::distance::jaro_winkler;

/// IDF assigned to a query term that no document contains.
///
/// Such a term always has `f = 0`, so its contribution to any score is zero.
pub const ABSENT_TERM_IDF: f64 = 0.405_465_108_108_164_4; // ln(1.5)

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// BM25 inverse document frequency.
///
/// `ln((N - df + 0.5) / (df + 0.5) + 1)`; the `+ 1` keeps it positive even for terms
/// present in every document.
pub fn bm25_idf(document_count: usize, document_frequency: usize) -> f64 {
    let n = document_count as f64;
    let df = document_frequency as f64;
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

/// BM25 saturated term-frequency component for one term in one document.
///
/// `f * (k1 + 1) / (f + k1 * (1 - b + b * |d| / avgdl))`
pub fn bm25_tf(
    term_frequency: u32,
    document_length: u32,
    avg_document_length: f64,
    params: Bm25Params,
) -> f64 {
    if term_frequency == 0 {
        return 0.0;
    }
    let f = f64::from(term_frequency);
    let length_ratio = if avg_document_length > 0.0 {
        f64::from(document_length) / avg_document_length
    } else {
        1.0
    };
    let norm = params.k1 * (1.0 - params.b + params.b * length_ratio);
    f * (params.k1 + 1.0) / (f + norm)
}

/// Suggest the candidate most similar to `name`, if any is similar enough.
///
/// Ties keep the earliest candidate.
pub fn suggest_name<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut best: Option<(&str, f64)> = None;
    for candidate in candidates {
        let score = jaro_winkler::similarity(name.chars(), candidate.chars());
        if score >= SUGGESTION_THRESHOLD && best.is_none_or(|(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate.to_string())
}
