//! Core data model: knowledge domains, technology stacks, documents and scored results.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A curated category of design knowledge.
///
/// Declaration order is the fixed composition order; `Ord` follows it so that
/// `BTreeMap<Domain, _>` iterates domains the way a design system is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Style,
    Color,
    Typography,
    Ux,
    Chart,
    Landing,
    Product,
    Icons,
    React,
    Web,
}

impl Domain {
    /// Every domain, in composition order.
    pub const ALL: [Self; 10] = [
        Self::Style,
        Self::Color,
        Self::Typography,
        Self::Ux,
        Self::Chart,
        Self::Landing,
        Self::Product,
        Self::Icons,
        Self::React,
        Self::Web,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Style => "style",
            Self::Color => "color",
            Self::Typography => "typography",
            Self::Ux => "ux",
            Self::Chart => "chart",
            Self::Landing => "landing",
            Self::Product => "product",
            Self::Icons => "icons",
            Self::React => "react",
            Self::Web => "web",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = SearchError;

    /// Parses a domain name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| SearchError::UnknownDomain {
                name: s.to_string(),
                suggestion: crate::search::suggest_name(
                    &normalized,
                    Self::ALL.iter().map(|d| d.as_str()),
                ),
            })
    }
}

/// A technology stack with its own guideline corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stack {
    HtmlTailwind,
    React,
    Nextjs,
    Vue,
    Svelte,
    Swiftui,
    ReactNative,
    Flutter,
    Shadcn,
    JetpackCompose,
    Astro,
    Nuxtjs,
    NuxtUi,
}

impl Stack {
    pub const ALL: [Self; 13] = [
        Self::HtmlTailwind,
        Self::React,
        Self::Nextjs,
        Self::Vue,
        Self::Svelte,
        Self::Swiftui,
        Self::ReactNative,
        Self::Flutter,
        Self::Shadcn,
        Self::JetpackCompose,
        Self::Astro,
        Self::Nuxtjs,
        Self::NuxtUi,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HtmlTailwind => "html-tailwind",
            Self::React => "react",
            Self::Nextjs => "nextjs",
            Self::Vue => "vue",
            Self::Svelte => "svelte",
            Self::Swiftui => "swiftui",
            Self::ReactNative => "react-native",
            Self::Flutter => "flutter",
            Self::Shadcn => "shadcn",
            Self::JetpackCompose => "jetpack-compose",
            Self::Astro => "astro",
            Self::Nuxtjs => "nuxtjs",
            Self::NuxtUi => "nuxt-ui",
        }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stack {
    type Err = SearchError;

    /// Parses a stack name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == normalized)
            .ok_or_else(|| SearchError::UnknownStack {
                name: s.to_string(),
                suggestion: crate::search::suggest_name(
                    &normalized,
                    Self::ALL.iter().map(|st| st.as_str()),
                ),
            })
    }
}

/// The owner of an index: either a knowledge domain or a technology stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKey {
    Domain(Domain),
    Stack(Stack),
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(domain) => write!(f, "{}", domain),
            Self::Stack(stack) => write!(f, "stack:{}", stack),
        }
    }
}

/// An immutable knowledge-base record.
///
/// Text fields are concatenated for indexing. `metadata` is never tokenized and is
/// returned verbatim in results (hex codes, font names, code snippets, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Document {
    /// Create a document whose only indexed text is `text`.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: text.into(),
            tags: Vec::new(),
            example: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The text that gets tokenized: title, description, tags and example, space-joined.
    pub fn indexed_text(&self) -> String {
        let mut text = String::with_capacity(
            self.title.len() + self.description.len() + self.tags.len() * 8,
        );
        for part in [self.title.as_str(), self.description.as_str()]
            .into_iter()
            .chain(self.tags.iter().map(String::as_str))
            .chain(self.example.as_deref())
        {
            if part.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(part);
        }
        text
    }
}

/// A document paired with its BM25 score. Borrowed from the index that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredResult<'a> {
    pub document: &'a Document,
    pub score: f64,
}

impl<'a> ScoredResult<'a> {
    /// The document id, borrowed from the index rather than from this result.
    pub fn id(&self) -> &'a str {
        &self.document.id
    }
}
