//! Cloze Renderer
//!
//! Masks a random subset of a segment's longer words for fill-in-the-blank
//! practice. The random source is a parameter so callers control
//! reproducibility.

use rand::Rng;

use crate::core::captions::Segment;
use crate::core::settings::ClozeSettings;

/// Renders `segment` with some words replaced by mask characters.
///
/// Segments with `min_words_per_segment` words or fewer come back unchanged.
/// Otherwise one uniform draw is taken per word, in order, whether or not
/// the word is long enough to qualify; a word is masked when the draw is
/// below `mask_probability` and it has more than `min_masked_word_length`
/// characters. Words are re-joined with single spaces.
pub fn render_cloze<R: Rng + ?Sized>(
    segment: &Segment,
    settings: &ClozeSettings,
    rng: &mut R,
) -> String {
    let words = segment.words();
    if words.len() <= settings.min_words_per_segment {
        return segment.text().to_string();
    }

    words
        .iter()
        .map(|word| {
            let draw: f64 = rng.gen();
            let len = word.chars().count();
            if draw < settings.mask_probability && len > settings.min_masked_word_length {
                mask(len, settings)
            } else {
                word.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn mask(len: usize, settings: &ClozeSettings) -> String {
    std::iter::repeat(settings.mask_char)
        .take(len.min(settings.max_mask_length))
        .collect()
}
