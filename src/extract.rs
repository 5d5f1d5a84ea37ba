//! PDF text extraction
//!
//! Turns a set of uploaded PDF byte blobs into one concatenated plain-text
//! string, page by page in upload order. Image-only pages legitimately
//! yield no text; that is a degraded input, not an error.

use crate::error::{ChatError, Result};
use lopdf::Document;

/// An uploaded PDF: display name plus raw bytes.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl PdfDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a PDF from disk, using the file name as the display name.
    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path).map_err(|e| ChatError::Extraction {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(name, bytes))
    }
}

/// Extract the full text of every document, concatenated in upload order
/// then page order, with no separator inserted between pages or documents.
///
/// A blob that is not a well-formed PDF aborts the whole extraction.
pub fn extract_text(docs: &[PdfDocument]) -> Result<String> {
    let mut text = String::new();
    for doc in docs {
        text.push_str(&extract_document(doc)?);
    }
    Ok(text)
}

fn extract_document(doc: &PdfDocument) -> Result<String> {
    let pdf = Document::load_mem(&doc.bytes).map_err(|e| ChatError::Extraction {
        name: doc.name.clone(),
        reason: e.to_string(),
    })?;

    let mut text = String::new();
    // get_pages is a BTreeMap keyed by page number, so iteration is in
    // page order
    for (page_num, _object_id) in pdf.get_pages() {
        let page_text = pdf
            .extract_text(&[page_num])
            .map_err(|e| ChatError::Extraction {
                name: doc.name.clone(),
                reason: format!("page {}: {}", page_num, e),
            })?;
        text.push_str(&page_text);
    }

    tracing::debug!(doc = %doc.name, chars = text.len(), "extracted text");
    Ok(text)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build a minimal one-page PDF containing the given text.
    pub(crate) fn one_page_pdf(text: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("serialize pdf");
        bytes
    }

    #[test]
    fn test_extract_single_page() {
        let doc = PdfDocument::new("sky.pdf", one_page_pdf("The sky is blue."));
        let text = extract_text(&[doc]).unwrap();
        assert!(
            text.contains("The sky is blue"),
            "expected extracted text, got: {:?}",
            text
        );
    }

    #[test]
    fn test_extract_is_deterministic() {
        let doc = PdfDocument::new("sky.pdf", one_page_pdf("The sky is blue."));
        let first = extract_text(std::slice::from_ref(&doc)).unwrap();
        let second = extract_text(std::slice::from_ref(&doc)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_concatenates_in_upload_order() {
        let a = PdfDocument::new("a.pdf", one_page_pdf("alpha"));
        let b = PdfDocument::new("b.pdf", one_page_pdf("omega"));
        let text = extract_text(&[a, b]).unwrap();
        let alpha = text.find("alpha").expect("first document text present");
        let omega = text.find("omega").expect("second document text present");
        assert!(alpha < omega);
    }

    #[test]
    fn test_malformed_pdf_is_fatal() {
        let good = PdfDocument::new("good.pdf", one_page_pdf("fine"));
        let bad = PdfDocument::new("bad.pdf", b"not a pdf at all".to_vec());
        let err = extract_text(&[good, bad]).unwrap_err();
        assert!(matches!(err, ChatError::Extraction { ref name, .. } if name == "bad.pdf"));
    }

    #[test]
    fn test_empty_document_set() {
        assert_eq!(extract_text(&[]).unwrap(), "");
    }
}
