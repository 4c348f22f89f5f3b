//! Caption Format Parser and Exporter
//!
//! SRT (SubRip) is the only timed format the engine reads and writes.
//!
//! Parsing is best-effort: the input is split into blocks on blank lines and
//! every block is parsed on its own. A block that cannot be parsed is skipped
//! and the rest of the file is still used.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::core::captions::{export_srt, parse_srt, SegmentStore};
//!
//! let cues = parse_srt(&std::fs::read_to_string("lesson.srt")?);
//! let store = SegmentStore::from_cues(cues)?;
//! let srt = export_srt(&store);
//! ```

use tracing::debug;

use super::{format_timestamp, parse_timestamp, SegmentStore, TimedCue};
use crate::core::{CoreError, CoreResult, TimeSec};

/// Separator between the two timestamps of a timing line
const TIMING_ARROW: &str = "-->";

/// Minimum lines of a block: index, timing, at least one text line
const MIN_BLOCK_LINES: usize = 3;

// =============================================================================
// SRT Parsing
// =============================================================================

/// Parses SRT content into cues, skipping blocks that fail to parse
///
/// # SRT Format
///
/// ```text
/// 1
/// 00:00:01,000 --> 00:00:04,000
/// First caption text
///
/// 2
/// 00:00:05,500 --> 00:00:08,000
/// Second caption text
/// with multiple lines
/// ```
///
/// Multi-line text is joined with single spaces. A leading byte order mark
/// and CRLF line endings are accepted.
pub fn parse_srt(content: &str) -> Vec<TimedCue> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let blocks = split_blocks(content);
    let total = blocks.len();

    let cues: Vec<TimedCue> = blocks
        .iter()
        .enumerate()
        .filter_map(|(position, block)| {
            let cue = parse_srt_block(block);
            if cue.is_none() {
                debug!(block = position + 1, "Skipping unparsable SRT block");
            }
            cue
        })
        .collect();

    if cues.len() < total {
        debug!(
            parsed = cues.len(),
            skipped = total - cues.len(),
            "SRT parsed with skipped blocks"
        );
    }

    cues
}

/// Groups non-blank lines into blocks separated by one or more blank lines.
fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    // `str::lines` also strips the `\r` of CRLF endings.
    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Parses one block; `None` means the block is dropped.
fn parse_srt_block(lines: &[&str]) -> Option<TimedCue> {
    if lines.len() < MIN_BLOCK_LINES {
        return None;
    }

    // lines[0] is the sequence number. It is not validated: the store
    // renumbers segments anyway.
    let (start, end) = parse_srt_timing_line(lines[1]).ok()?;
    if end < start {
        return None;
    }

    let text = lines[2..]
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return None;
    }

    Some(TimedCue::new(start, end, text))
}

/// Parses an SRT timing line (e.g., "00:00:01,000 --> 00:00:04,000")
fn parse_srt_timing_line(line: &str) -> CoreResult<(TimeSec, TimeSec)> {
    let parts: Vec<&str> = line.split(TIMING_ARROW).collect();
    if parts.len() != 2 {
        return Err(CoreError::MalformedTimestamp(format!(
            "Expected 'start --> end' format: {}",
            line
        )));
    }

    let start = parse_timestamp(parts[0])?;
    let end = parse_timestamp(parts[1])?;

    Ok((start, end))
}

// =============================================================================
// SRT Export
// =============================================================================

/// Exports a segment store to SRT format
///
/// Segments are renumbered 1..N in store order regardless of their stored
/// index. Every block ends with a blank line.
pub fn export_srt(store: &SegmentStore) -> String {
    let mut output = String::new();

    for (position, segment) in store.iter().enumerate() {
        output.push_str(&format!("{}\n", position + 1));

        let start = format_timestamp(segment.start());
        let end = format_timestamp(segment.end());
        output.push_str(&format!("{} {} {}\n", start, TIMING_ARROW, end));

        output.push_str(&single_line(segment.text()));
        output.push_str("\n\n");
    }

    output
}

/// Folds embedded line breaks so the text stays a single caption line.
fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::captions::{truncate_to_millis, Segment};
    use quickcheck_macros::quickcheck;

    fn triples(cues: &[TimedCue]) -> Vec<(f64, f64, String)> {
        cues.iter()
            .map(|c| (c.start, c.end, c.text.clone()))
            .collect()
    }

    // -------------------------------------------------------------------------
    // SRT Parsing Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_srt_basic() {
        let srt = r#"1
00:00:01,000 --> 00:00:04,000
Hello World

2
00:00:05,500 --> 00:00:08,000
Second caption
"#;

        let cues = parse_srt(srt);
        assert_eq!(cues.len(), 2);

        assert_eq!(cues[0].start, 1.0);
        assert_eq!(cues[0].end, 4.0);
        assert_eq!(cues[0].text, "Hello World");

        assert_eq!(cues[1].start, 5.5);
        assert_eq!(cues[1].end, 8.0);
        assert_eq!(cues[1].text, "Second caption");
    }

    #[test]
    fn test_parse_srt_multiline_joined_with_spaces() {
        let srt = "1\n00:00:00,000 --> 00:00:05,000\nLine one\nLine two\nLine three\n";

        let cues = parse_srt(srt);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Line one Line two Line three");
    }

    #[test]
    fn test_parse_srt_skips_bad_block() {
        let srt = "1\n00:00:01,000 --> 00:00:03,500\nHello world\n\n2\nBADLINE\nIgnored\n\n3\n00:00:04,000 --> 00:00:05,000\nBye\n";

        let cues = parse_srt(srt);
        assert_eq!(
            triples(&cues),
            vec![
                (1.0, 3.5, "Hello world".to_string()),
                (4.0, 5.0, "Bye".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_srt_skips_short_and_malformed_blocks() {
        let srt = "1\n00:00:01,000 --> 00:00:02,000\n\n\
                   2\n00:00:0x,000 --> 00:00:02,000\nbad digits\n\n\
                   3\n00:00:09,000 --> 00:00:02,000\nbackwards\n\n\
                   4\n00:00:02,000 --> 00:00:03,000 --> 00:00:04,000\ntwo arrows\n\n\
                   5\n00:00:03,000 --> 00:00:04,000\nkept\n";

        let cues = parse_srt(srt);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "kept");
    }

    #[test]
    fn test_parse_srt_all_blocks_bad_yields_empty() {
        assert!(parse_srt("1\nnope\ntext\n\n2\nstill nope\nmore").is_empty());
        assert!(parse_srt("").is_empty());
        assert!(parse_srt("\n\n   \n").is_empty());
    }

    #[test]
    fn test_parse_srt_crlf_and_bom() {
        let srt = "\u{feff}1\r\n00:00:01,000 --> 00:00:02,000\r\nWindows line\r\n\r\n2\r\n00:00:03,000 --> 00:00:04,000\r\nSecond\r\n";

        let cues = parse_srt(srt);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "Windows line");
        assert_eq!(cues[1].start, 3.0);
    }

    #[test]
    fn test_parse_srt_tolerates_extra_blank_lines() {
        let srt = "\n\n1\n00:00:01,000 --> 00:00:02,000\nA\n\n\n\n2\n00:00:03,000 --> 00:00:04,000\nB\n\n";
        assert_eq!(parse_srt(srt).len(), 2);
    }

    // -------------------------------------------------------------------------
    // SRT Export Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_export_srt() {
        let store = SegmentStore::from_cues(vec![
            TimedCue::new(1.0, 4.0, "Hello World"),
            TimedCue::new(5.5, 8.0, "Second caption"),
        ])
        .unwrap();

        assert_eq!(
            export_srt(&store),
            "1\n00:00:01,000 --> 00:00:04,000\nHello World\n\n\
             2\n00:00:05,500 --> 00:00:08,000\nSecond caption\n\n"
        );
    }

    #[test]
    fn test_export_srt_renumbers_and_folds_lines() {
        let mut segment = Segment::new(9, 0.0, 1.0, "x").unwrap();
        segment.set_text("first line\n\nsecond line").unwrap();
        let store = SegmentStore::from_segments(vec![segment]);

        let srt = export_srt(&store);
        assert!(srt.starts_with("1\n"));
        assert!(srt.contains("first line second line\n\n"));
    }

    #[test]
    fn test_export_empty_store() {
        assert_eq!(export_srt(&SegmentStore::new()), "");
    }

    // -------------------------------------------------------------------------
    // Roundtrip Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_srt_roundtrip_truncates_to_millis() {
        let original = SegmentStore::from_cues(vec![
            TimedCue::new(1.0, 4.2567, "First caption"),
            TimedCue::new(5.5, 8.5, "Second caption"),
        ])
        .unwrap();

        let parsed = parse_srt(&export_srt(&original));

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].end, truncate_to_millis(4.2567));
        assert_eq!(parsed[1].start, 5.5);
        assert_eq!(parsed[1].text, "Second caption");
    }

    const WORDS: [&str; 8] = [
        "hello", "world", "listen", "again", "the", "quick", "fox", "-->",
    ];

    #[quickcheck]
    fn prop_export_parse_reproduces_cues(entries: Vec<(u32, u16, Vec<u8>)>) -> bool {
        let cues: Vec<TimedCue> = entries
            .into_iter()
            .map(|(start_ms, len_ms, words)| {
                let start_ms = u64::from(start_ms) % 300_000_000;
                let end_ms = start_ms + u64::from(len_ms);
                let mut text: Vec<&str> = words
                    .iter()
                    .map(|w| WORDS[usize::from(*w) % WORDS.len()])
                    .collect();
                if text.is_empty() {
                    text.push("silence");
                }
                TimedCue::new(
                    start_ms as f64 / 1000.0,
                    end_ms as f64 / 1000.0,
                    text.join(" "),
                )
            })
            .collect();

        let store = match SegmentStore::from_cues(cues.clone()) {
            Ok(store) => store,
            Err(_) => return false,
        };
        let exported = export_srt(&store);
        let reparsed = parse_srt(&exported);

        let Ok(restored) = SegmentStore::from_cues(reparsed.clone()) else {
            return false;
        };

        triples(&reparsed) == triples(&cues) && export_srt(&restored) == exported
    }
}
