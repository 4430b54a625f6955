//! Runtime configuration: BM25 constants, tokenizer options, composition and limits.
//!
//! Values come from an optional TOML file (path in `DESIGNKB_CONFIG`), then individual
//! `DESIGNKB_*` environment variables override them.

use crate::error::Result;
use crate::path::expand_tilde;
use crate::types::Stack;
use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the path of the TOML config file.
pub const CONFIG_ENV: &str = "DESIGNKB_CONFIG";

/// Default BM25 term-frequency saturation.
pub const DEFAULT_K1: f64 = 1.5;
/// Default BM25 length normalization.
pub const DEFAULT_B: f64 = 0.75;
/// Upper bound for per-domain candidates during composition.
pub const MAX_COMPOSE_TOP_K: usize = 3;

/// BM25 tuning constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Params {
    /// Term-frequency saturation.
    pub k1: f64,
    /// Document length normalization, in [0, 1].
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: DEFAULT_K1,
            b: DEFAULT_B,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Apply English Snowball stemming to every term.
    pub stem: bool,
    /// Terms shorter than this (in chars) are dropped.
    pub min_token_length: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            stem: true,
            min_token_length: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Results requested from each domain (and the stack) while composing.
    pub top_k: usize,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            top_k: MAX_COMPOSE_TOP_K,
        }
    }
}

/// Result-count limits applied at the tool boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 3,
            max_limit: 10,
        }
    }
}

impl SearchConfig {
    /// Resolve a requested result count into `[1, max_limit]`.
    pub fn clamp_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory containing `domains/*.json` and `stacks/*.json`.
    pub data_dir: PathBuf,
    /// Stack used by `search_stack` when the caller names none.
    pub default_stack: String,
    pub bm25: Bm25Params,
    pub tokenizer: TokenizerConfig,
    pub compose: ComposeConfig,
    pub search: SearchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            default_stack: Stack::HtmlTailwind.as_str().to_string(),
            bm25: Bm25Params::default(),
            tokenizer: TokenizerConfig::default(),
            compose: ComposeConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid configuration TOML")?;
        Ok(config)
    }

    /// Apply `DESIGNKB_*` overrides using `lookup` to read variables.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(dir) = lookup("DESIGNKB_DATA_DIR") {
            self.data_dir = PathBuf::from(expand_tilde(&dir).as_ref());
        }
        if let Some(stack) = lookup("DESIGNKB_DEFAULT_STACK") {
            self.default_stack = stack;
        }
        if let Some(k1) = lookup("DESIGNKB_BM25_K1") {
            self.bm25.k1 = k1
                .trim()
                .parse()
                .with_context(|| format!("DESIGNKB_BM25_K1 is not a number: '{}'", k1))?;
        }
        if let Some(b) = lookup("DESIGNKB_BM25_B") {
            self.bm25.b = b
                .trim()
                .parse()
                .with_context(|| format!("DESIGNKB_BM25_B is not a number: '{}'", b))?;
        }
        if let Some(top_k) = lookup("DESIGNKB_TOP_K") {
            self.compose.top_k = top_k
                .trim()
                .parse()
                .with_context(|| format!("DESIGNKB_TOP_K is not an integer: '{}'", top_k))?;
        }
        self.data_dir = PathBuf::from(expand_tilde(&self.data_dir.to_string_lossy()).as_ref());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.bm25.k1.is_finite() || self.bm25.k1 < 0.0 {
            bail!("bm25.k1 must be a non-negative number, got {}", self.bm25.k1);
        }
        if !(0.0..=1.0).contains(&self.bm25.b) {
            bail!("bm25.b must be within [0, 1], got {}", self.bm25.b);
        }
        if !(1..=MAX_COMPOSE_TOP_K).contains(&self.compose.top_k) {
            bail!(
                "compose.top_k must be within [1, {}], got {}",
                MAX_COMPOSE_TOP_K,
                self.compose.top_k
            );
        }
        if self.search.max_limit == 0 {
            bail!("search.max_limit must be positive");
        }
        if self.tokenizer.min_token_length == 0 {
            bail!("tokenizer.min_token_length must be positive");
        }
        self.default_stack()?;
        Ok(())
    }

    pub fn default_stack(&self) -> Result<Stack> {
        self.default_stack
            .parse()
            .with_context(|| format!("Invalid default_stack '{}'", self.default_stack))
    }
}
