//! Page Document Adapter
//!
//! Extracts visible text page by page, in page order.

use lopdf::Document;
use tracing::debug;

use super::{join_non_blank, Extraction, FormatAdapter, SourceFormat};
use crate::core::{CoreError, CoreResult};

pub struct PdfAdapter;

impl FormatAdapter for PdfAdapter {
    fn format(&self) -> SourceFormat {
        SourceFormat::Pdf
    }

    fn extract(&self, bytes: &[u8]) -> CoreResult<Extraction> {
        extract_pdf_text(bytes).map(Extraction::Untimed)
    }
}

/// Returns the text of every non-blank page joined with newlines.
///
/// A page whose content cannot be decoded is treated like a blank page;
/// only a document that cannot be opened at all is an error.
pub fn extract_pdf_text(bytes: &[u8]) -> CoreResult<String> {
    let document = Document::load_mem(bytes).map_err(|e| CoreError::corrupt("pdf", e))?;

    if document.is_encrypted() {
        return Err(CoreError::corrupt("pdf", "document is encrypted"));
    }

    let pages = document.get_pages();
    let mut texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        match document.extract_text(&[*page_number]) {
            Ok(text) => texts.push(text),
            Err(e) => debug!(page = page_number, error = %e, "Dropping undecodable PDF page"),
        }
    }

    Ok(join_non_blank(texts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ingest::ingest_pdf;
    use crate::core::settings::SegmenterSettings;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    fn empty_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
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

    /// One page per entry; an empty entry gives a page with no text.
    fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
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

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let operations = if text.is_empty() {
                Vec::new()
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 48.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => kids.len() as i64,
                "Kids" => kids,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
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
    fn test_pages_in_order_blank_pages_dropped() {
        let bytes = pdf_with_pages(&["Hello page one", "", "Second page"]);
        let text = extract_pdf_text(&bytes).unwrap();

        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        assert_eq!(lines, ["Hello page one", "", "Second page"]);
    }

    #[test]
    fn test_ingest_pages_as_segments() {
        let bytes = pdf_with_pages(&["Hello page one", "", "Second page"]);
        let store = ingest_pdf(&bytes, &SegmenterSettings::default()).unwrap();

        let segments: Vec<(f64, &str)> = store.iter().map(|s| (s.start(), s.text())).collect();
        assert_eq!(segments, [(0.0, "Hello page one"), (6.0, "Second page")]);
    }

    #[test]
    fn test_document_without_pages_yields_empty_text() {
        assert_eq!(extract_pdf_text(&empty_pdf()).unwrap(), "");
    }

    #[test]
    fn test_rejects_corrupt_input() {
        let result = extract_pdf_text(b"%PDF-1.4 truncated garbage");
        assert!(matches!(
            result,
            Err(CoreError::UnsupportedOrCorruptInput(_))
        ));
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(extract_pdf_text(&[]).is_err());
    }
}
