//! Transcript Ingestion Module
//!
//! Normalizes uploads into a [`SegmentStore`]:
//!
//! ```text
//! bytes ──► FormatAdapter ──► Extraction::Timed   ─────────────► SegmentStore
//!                         └─► Extraction::Untimed ──► Segmenter ─┘
//! ```
//!
//! Only the SRT adapter yields timed cues; word-processor, page and plain
//! text documents yield newline-delimited text that the [`Segmenter`] times.

mod docx;
mod pdf;
mod segmenter;

pub use docx::{extract_docx_text, DocxAdapter};
pub use pdf::{extract_pdf_text, PdfAdapter};
pub use segmenter::{segment, Segmenter};

#[cfg(test)]
pub(crate) use docx::tests::docx_with_body;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::captions::{parse_srt, SegmentStore, TimedCue};
use crate::core::settings::SegmenterSettings;
use crate::core::{CoreError, CoreResult};

// =============================================================================
// Source Formats
// =============================================================================

/// Upload kinds the engine understands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Timed captions (SubRip)
    Srt,
    /// Word-processor document
    Docx,
    /// Page document
    Pdf,
    /// UTF-8 text, one sentence per line
    PlainText,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 4] = [Self::Srt, Self::Docx, Self::Pdf, Self::PlainText];

    /// Maps a file extension (without the dot, any case) to a format.
    ///
    /// `doc` is routed to the word-processor adapter like `docx`.
    pub fn from_extension(extension: &str) -> CoreResult<Self> {
        match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "srt" => Ok(Self::Srt),
            "doc" | "docx" => Ok(Self::Docx),
            "pdf" => Ok(Self::Pdf),
            "txt" => Ok(Self::PlainText),
            other => Err(CoreError::UnsupportedFormat(format!(".{other}"))),
        }
    }

    /// Picks the format from a file name's extension.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                CoreError::UnsupportedFormat(format!("{} has no extension", path.display()))
            })?;
        Self::from_extension(extension)
    }

    /// Returns true if the adapter for this format yields timed cues.
    pub fn is_timed(&self) -> bool {
        matches!(self, Self::Srt)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
            Self::PlainText => "plain_text",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain_text" | "text" => Ok(Self::PlainText),
            other => Self::from_extension(other),
        }
    }
}

// =============================================================================
// Extraction
// =============================================================================

/// Raw adapter output, before segmentation
#[derive(Clone, Debug, PartialEq)]
pub enum Extraction {
    /// Text already paired with timing
    Timed(Vec<TimedCue>),
    /// Newline-delimited text without timing
    Untimed(String),
}

impl Extraction {
    /// Converts the extraction into a store, timing untimed text.
    pub fn into_store(self, segmenter: &Segmenter) -> CoreResult<SegmentStore> {
        match self {
            Self::Timed(cues) => SegmentStore::from_cues(cues),
            Self::Untimed(text) => segmenter.segment(&text),
        }
    }

    /// The untimed source text, if any.
    pub fn source_text(&self) -> Option<&str> {
        match self {
            Self::Timed(_) => None,
            Self::Untimed(text) => Some(text),
        }
    }
}

/// Joins the non-blank parts with newlines, dropping whitespace-only parts.
pub(crate) fn join_non_blank<I>(parts: I) -> String
where
    I: IntoIterator<Item = String>,
{
    parts
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Adapters
// =============================================================================

/// Turns raw upload bytes into an [`Extraction`]
pub trait FormatAdapter: Send + Sync {
    fn format(&self) -> SourceFormat;

    fn extract(&self, bytes: &[u8]) -> CoreResult<Extraction>;
}

/// Timed-caption adapter. Malformed blocks are skipped, never reported.
pub struct SrtAdapter;

impl FormatAdapter for SrtAdapter {
    fn format(&self) -> SourceFormat {
        SourceFormat::Srt
    }

    fn extract(&self, bytes: &[u8]) -> CoreResult<Extraction> {
        let content = String::from_utf8_lossy(bytes);
        Ok(Extraction::Timed(parse_srt(&content)))
    }
}

/// Plain-text adapter. Invalid UTF-8 is replaced, not rejected.
pub struct PlainTextAdapter;

impl FormatAdapter for PlainTextAdapter {
    fn format(&self) -> SourceFormat {
        SourceFormat::PlainText
    }

    fn extract(&self, bytes: &[u8]) -> CoreResult<Extraction> {
        Ok(Extraction::Untimed(
            String::from_utf8_lossy(bytes).into_owned(),
        ))
    }
}

/// A registry mapping each source format to its adapter
pub struct AdapterRegistry {
    adapters: HashMap<SourceFormat, Box<dyn FormatAdapter>>,
}

impl AdapterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// Register an adapter under the format it reports, replacing any previous one.
    pub fn register(&mut self, adapter: Box<dyn FormatAdapter>) {
        self.adapters.insert(adapter.format(), adapter);
    }

    /// Run the adapter registered for `format`.
    pub fn extract(&self, format: SourceFormat, bytes: &[u8]) -> CoreResult<Extraction> {
        let adapter = self
            .adapters
            .get(&format)
            .ok_or_else(|| CoreError::UnsupportedFormat(format.to_string()))?;
        adapter.extract(bytes)
    }

    /// Extract and segment in one step.
    pub fn ingest(
        &self,
        format: SourceFormat,
        bytes: &[u8],
        settings: &SegmenterSettings,
    ) -> CoreResult<SegmentStore> {
        let segmenter = Segmenter::from_settings(settings)?;
        let store = self.extract(format, bytes)?.into_store(&segmenter)?;
        info!(%format, segments = store.len(), "Transcript ingested");
        Ok(store)
    }

    /// Formats with a registered adapter.
    pub fn formats(&self) -> Vec<SourceFormat> {
        SourceFormat::ALL
            .into_iter()
            .filter(|f| self.adapters.contains_key(f))
            .collect()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        let mut registry = AdapterRegistry::new();
        registry.register(Box::new(SrtAdapter));
        registry.register(Box::new(DocxAdapter));
        registry.register(Box::new(PdfAdapter));
        registry.register(Box::new(PlainTextAdapter));
        registry
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// Ingests an upload of the given format with the default adapters.
pub fn ingest(
    bytes: &[u8],
    format: SourceFormat,
    settings: &SegmenterSettings,
) -> CoreResult<SegmentStore> {
    AdapterRegistry::default().ingest(format, bytes, settings)
}

/// Ingests timed captions. Never fails: unparsable blocks are dropped.
pub fn ingest_srt(bytes: &[u8]) -> CoreResult<SegmentStore> {
    SrtAdapter.extract(bytes)?.into_store(&Segmenter::default())
}

/// Ingests a word-processor document.
pub fn ingest_docx(bytes: &[u8], settings: &SegmenterSettings) -> CoreResult<SegmentStore> {
    DocxAdapter
        .extract(bytes)?
        .into_store(&Segmenter::from_settings(settings)?)
}

/// Ingests a page document.
pub fn ingest_pdf(bytes: &[u8], settings: &SegmenterSettings) -> CoreResult<SegmentStore> {
    PdfAdapter
        .extract(bytes)?
        .into_store(&Segmenter::from_settings(settings)?)
}

/// Ingests plain text, one segment per non-blank line.
pub fn ingest_plain_text(bytes: &[u8], settings: &SegmenterSettings) -> CoreResult<SegmentStore> {
    PlainTextAdapter
        .extract(bytes)?
        .into_store(&Segmenter::from_settings(settings)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_SRT: &str = "1\n00:00:01,000 --> 00:00:03,500\nHello world\n\n2\nBADLINE\nIgnored\n\n3\n00:00:04,000 --> 00:00:05,000\nBye\n";

    // -------------------------------------------------------------------------
    // Format Dispatch
    // -------------------------------------------------------------------------

    #[test]
    fn test_from_extension() {
        assert_eq!(SourceFormat::from_extension("srt").unwrap(), SourceFormat::Srt);
        assert_eq!(SourceFormat::from_extension("DOCX").unwrap(), SourceFormat::Docx);
        assert_eq!(SourceFormat::from_extension("doc").unwrap(), SourceFormat::Docx);
        assert_eq!(SourceFormat::from_extension(".pdf").unwrap(), SourceFormat::Pdf);
        assert_eq!(
            SourceFormat::from_extension("txt").unwrap(),
            SourceFormat::PlainText
        );
        assert!(matches!(
            SourceFormat::from_extension("mp3"),
            Err(CoreError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("lessons/unit1.SRT")).unwrap(),
            SourceFormat::Srt
        );
        assert!(SourceFormat::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn test_from_str_round_trips_display() {
        for format in SourceFormat::ALL {
            assert_eq!(format.to_string().parse::<SourceFormat>().unwrap(), format);
        }
    }

    // -------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------

    #[test]
    fn test_default_registry_covers_all_formats() {
        assert_eq!(AdapterRegistry::default().formats(), SourceFormat::ALL.to_vec());
    }

    #[test]
    fn test_empty_registry_rejects_format() {
        let registry = AdapterRegistry::new();
        assert!(matches!(
            registry.extract(SourceFormat::Srt, b""),
            Err(CoreError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_extraction_kinds() {
        let registry = AdapterRegistry::default();
        assert!(matches!(
            registry.extract(SourceFormat::Srt, SAMPLE_SRT.as_bytes()).unwrap(),
            Extraction::Timed(cues) if cues.len() == 2
        ));

        let untimed = registry
            .extract(SourceFormat::PlainText, b"line one\nline two")
            .unwrap();
        assert_eq!(untimed.source_text(), Some("line one\nline two"));
    }

    #[test]
    fn test_join_non_blank() {
        let joined = join_non_blank(vec![
            "first".to_string(),
            "   ".to_string(),
            String::new(),
            "second page\n".to_string(),
        ]);
        assert_eq!(joined, "first\nsecond page\n");
    }

    // -------------------------------------------------------------------------
    // Entry Points
    // -------------------------------------------------------------------------

    #[test]
    fn test_ingest_srt_skips_bad_block() {
        let store = ingest_srt(SAMPLE_SRT.as_bytes()).unwrap();

        assert_eq!(store.len(), 2);
        let first = store.get(1).unwrap();
        assert_eq!((first.start(), first.end(), first.text()), (1.0, 3.5, "Hello world"));
        let second = store.get(2).unwrap();
        assert_eq!((second.start(), second.end(), second.text()), (4.0, 5.0, "Bye"));
        assert_eq!(second.index(), 2);
    }

    #[test]
    fn test_ingest_srt_all_bad_is_empty_not_error() {
        let store = ingest_srt(b"1\nnot a timing line\ntext\n").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_ingest_plain_text_uses_segmenter_settings() {
        let settings = SegmenterSettings {
            duration_per_line: 2.0,
            gap_seconds: 0.0,
        };
        let store = ingest_plain_text(b"A\n\nB", &settings).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(2).unwrap().start(), 2.0);
    }

    #[test]
    fn test_ingest_plain_text_tolerates_invalid_utf8() {
        let bytes = b"caf\xff\nnext";
        let store = ingest_plain_text(bytes, &SegmenterSettings::default()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().text(), "caf\u{fffd}");
    }

    #[test]
    fn test_ingest_docx() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>Good morning.</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>See you.</w:t></w:r></w:p>",
        );
        let store = ingest(&bytes, SourceFormat::Docx, &SegmenterSettings::default()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(2).unwrap().text(), "See you.");
        assert_eq!(store.get(2).unwrap().start(), 6.0);
    }

    #[test]
    fn test_ingest_corrupt_containers_fail() {
        let settings = SegmenterSettings::default();
        for format in [SourceFormat::Docx, SourceFormat::Pdf] {
            let err = ingest(b"garbage", format, &settings).unwrap_err();
            assert!(err.is_input_error(), "{format}: {err}");
        }
        assert!(ingest_docx(b"garbage", &settings).is_err());
        assert!(ingest_pdf(b"garbage", &settings).is_err());
    }
}
