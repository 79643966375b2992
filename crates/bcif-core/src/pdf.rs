//! Embedded-text PDF adapter.
//!
//! Turns a PDF with embedded text into a [`TokenDocument`] with per-page
//! text and no positioned tokens. Zone extraction finds nothing in such a
//! document; the pattern pass carries the record. Real coordinate tokenizers
//! plug in through the same [`Tokenizer`] trait.

use lopdf::Document;
use tracing::debug;

use crate::document::{DocumentPage, TokenDocument, Tokenizer};
use crate::error::TokenizeError;

/// Tokenizer for PDFs with an embedded text layer.
#[derive(Debug, Default)]
pub struct PdfTextTokenizer;

impl PdfTextTokenizer {
    pub fn new() -> Self {
        PdfTextTokenizer
    }
}

impl Tokenizer for PdfTextTokenizer {
    fn tokenize(&self, data: &[u8]) -> Result<TokenDocument, TokenizeError> {
        let mut doc = Document::load_mem(data).map_err(|e| TokenizeError::Parse(e.to_string()))?;

        // PDFs encrypted with the empty password are common in the wild.
        let mut decrypted: Option<Vec<u8>> = None;
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(TokenizeError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut buffer = Vec::new();
            doc.save_to(&mut buffer)
                .map_err(|e| TokenizeError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted = Some(buffer);
        }

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(TokenizeError::NoPages);
        }
        debug!("Loaded PDF with {} pages", page_numbers.len());

        let pages: Vec<DocumentPage> = page_numbers
            .iter()
            .map(|&number| DocumentPage {
                number,
                tokens: Vec::new(),
                text: doc
                    .extract_text(&[number])
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
            })
            .collect();

        if pages.iter().all(|p| p.text.is_empty()) {
            debug!("No per-page text found, trying whole-document extraction");
            let bytes = decrypted.as_deref().unwrap_or(data);
            let text = pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| TokenizeError::TextExtraction(e.to_string()))?;
            let text = text.trim();
            if !text.is_empty() {
                return Ok(TokenDocument::from_text(text));
            }
        }

        Ok(TokenDocument::new(pages))
    }
}

#[cfg(test)]
mod tests {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    use super::*;

    fn pdf_with_text(text: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_tokenize_embedded_text() {
        let bytes = pdf_with_text("Claim #: 664723-GQ-1");

        let doc = PdfTextTokenizer::new().tokenize(&bytes).unwrap();

        assert_eq!(doc.page_count(), 1);
        assert!(doc.page(1).unwrap().tokens.is_empty());
        assert!(doc.full_text.contains("664723-GQ-1"));
    }

    #[test]
    fn test_tokenize_rejects_garbage() {
        let err = PdfTextTokenizer::new().tokenize(b"not a pdf").unwrap_err();
        assert!(matches!(err, TokenizeError::Parse(_)));
    }
}
