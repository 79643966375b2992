//! Positioned-token document model.
//!
//! The coordinate tokenizer is an external collaborator: anything that can
//! produce per-page lists of [`PositionedToken`]s (a PDF.js dump, a test
//! fixture, the embedded-text adapter in [`crate::pdf`]) can feed the
//! extraction pipeline through the [`Tokenizer`] trait.

use serde::{Deserialize, Serialize};

use crate::error::TokenizeError;

/// A single piece of text with its position on a page.
///
/// Coordinates use the PDF convention: y grows upward, origin at the
/// bottom-left of the page. `(x, y)` is the token's baseline origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedToken {
    pub text: String,
    /// 1-based page number.
    pub page: u32,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
}

impl PositionedToken {
    pub fn new(text: impl Into<String>, page: u32, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            page,
            x,
            y,
            width: 0.0,
            height: 0.0,
        }
    }
}

/// One page of a tokenized document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentPage {
    /// 1-based page number.
    pub number: u32,
    #[serde(default)]
    pub tokens: Vec<PositionedToken>,
    /// Full page text. When absent in a dump it is rebuilt by joining the
    /// token texts with single spaces.
    #[serde(default)]
    pub text: String,
}

impl DocumentPage {
    pub fn from_tokens(number: u32, tokens: Vec<PositionedToken>) -> Self {
        let text = tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            number,
            tokens,
            text,
        }
    }

    fn rebuild_text(&mut self) {
        if self.text.is_empty() && !self.tokens.is_empty() {
            self.text = self
                .tokens
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
        }
    }
}

/// A whole tokenized document: pages plus the concatenated full text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenDocument {
    pub pages: Vec<DocumentPage>,
    /// Page texts joined with single newlines.
    #[serde(default)]
    pub full_text: String,
}

/// Accepted token-dump shapes: a full document or a bare page list.
#[derive(Deserialize)]
#[serde(untagged)]
enum DumpShape {
    Document(TokenDocument),
    Pages(Vec<DocumentPage>),
}

impl TokenDocument {
    /// Build a document from pages, deriving the full text.
    pub fn new(pages: Vec<DocumentPage>) -> Self {
        let mut doc = Self {
            pages,
            full_text: String::new(),
        };
        doc.rebuild_text();
        doc
    }

    /// Build a document from a flat token list, grouping by page number.
    pub fn from_tokens(tokens: Vec<PositionedToken>) -> Self {
        let mut by_page: std::collections::BTreeMap<u32, Vec<PositionedToken>> =
            std::collections::BTreeMap::new();
        for token in tokens {
            by_page.entry(token.page).or_default().push(token);
        }
        let pages = by_page
            .into_iter()
            .map(|(number, tokens)| DocumentPage::from_tokens(number, tokens))
            .collect();
        Self::new(pages)
    }

    /// Wrap plain text as a single page with no positioned tokens.
    ///
    /// Zone extraction finds nothing in such a document; pattern extraction
    /// is unaffected.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            pages: vec![DocumentPage {
                number: 1,
                tokens: Vec::new(),
                text: text.clone(),
            }],
            full_text: text,
        }
    }

    /// Parse a positioned-token dump (JSON).
    pub fn from_json_slice(data: &[u8]) -> Result<Self, TokenizeError> {
        let shape: DumpShape = serde_json::from_slice(data)?;
        let mut doc = match shape {
            DumpShape::Document(doc) => doc,
            DumpShape::Pages(pages) => Self {
                pages,
                full_text: String::new(),
            },
        };
        doc.rebuild_text();
        Ok(doc)
    }

    /// Look up a page by its 1-based number.
    pub fn page(&self, number: u32) -> Option<&DocumentPage> {
        self.pages.iter().find(|p| p.number == number)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn rebuild_text(&mut self) {
        for page in &mut self.pages {
            page.rebuild_text();
        }
        if self.full_text.is_empty() {
            self.full_text = self
                .pages
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
        }
    }
}

/// Contract for external tokenizers that turn raw document bytes into a
/// positioned-token document. Failure aborts the whole extraction.
pub trait Tokenizer {
    fn tokenize(&self, data: &[u8]) -> Result<TokenDocument, TokenizeError>;
}
