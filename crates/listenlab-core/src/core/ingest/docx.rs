//! Word-Processor Document Adapter
//!
//! Reads the body paragraphs of a `.docx` container in document order.
//! Paragraphs nested in tables are not body paragraphs and are skipped.
//! Inside a run, `<w:tab/>` becomes a tab and `<w:br/>`/`<w:cr/>` a newline.
//! Elements are matched by local name, whatever prefix the document binds
//! to the WordprocessingML namespace.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::{join_non_blank, Extraction, FormatAdapter, SourceFormat};
use crate::core::{CoreError, CoreResult};

/// Main document part inside the zip container
const DOCUMENT_PART: &str = "word/document.xml";

pub struct DocxAdapter;

impl FormatAdapter for DocxAdapter {
    fn format(&self) -> SourceFormat {
        SourceFormat::Docx
    }

    fn extract(&self, bytes: &[u8]) -> CoreResult<Extraction> {
        extract_docx_text(bytes).map(Extraction::Untimed)
    }
}

/// Returns the non-blank body paragraphs joined with newlines.
pub fn extract_docx_text(bytes: &[u8]) -> CoreResult<String> {
    let xml = read_document_part(bytes)?;
    let paragraphs = parse_paragraphs(&xml)?;
    Ok(join_non_blank(paragraphs))
}

fn read_document_part(bytes: &[u8]) -> CoreResult<String> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| CoreError::corrupt("docx", e))?;

    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| CoreError::corrupt("docx", format!("{DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| CoreError::corrupt("docx", format!("{DOCUMENT_PART}: {e}")))?;
    Ok(xml)
}

fn parse_paragraphs(xml: &str) -> CoreResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut table_depth = 0usize;
    let mut paragraph_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"p" if table_depth == 0 => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        current = Some(String::new());
                    }
                }
                b"r" => run_depth += 1,
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"p" if table_depth == 0 => {
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                    if paragraph_depth == 0 {
                        if let Some(paragraph) = current.take() {
                            paragraphs.push(paragraph);
                        }
                    }
                }
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                let control = match e.local_name().as_ref() {
                    b"tab" => Some('\t'),
                    b"br" | b"cr" => Some('\n'),
                    _ => None,
                };
                if let (Some(c), Some(paragraph)) = (control, current.as_mut()) {
                    if run_depth > 0 {
                        paragraph.push(c);
                    }
                }
            }
            Ok(Event::Text(t)) if in_text => {
                if let Some(paragraph) = current.as_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| CoreError::corrupt("docx", e))?;
                    paragraph.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(CoreError::corrupt(
                    "docx",
                    format!(
                        "malformed XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    ),
                ))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}
