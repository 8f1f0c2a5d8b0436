//! Text Normalizer
//!
//! lower-case → strip punctuation → strip digits → drop stop words → lemmatize.
//! Order matters: stop words are matched after punctuation is gone, so
//! "it's" becomes "its" and is dropped.
//!
//! Normalizing twice gives the same text as long as no lemma is itself a stop
//! word. "ares" lemmatizes to "are", which a second pass drops.

use std::sync::Arc;

use super::lemmatizer::Lemmatizer;
use super::resources::ResourceStore;
use super::stopwords::StopWords;
use crate::config::ResourceConfig;
use crate::error::DetectorResult;

/// Characters with a digit value that are not in a `Nd` run: superscripts,
/// subscripts, circled/parenthesized/dingbat digits and a few script digits.
const OTHER_DIGIT_RANGES: &[(char, char)] = &[
    ('\u{00B2}', '\u{00B3}'),
    ('\u{00B9}', '\u{00B9}'),
    ('\u{1369}', '\u{1371}'),
    ('\u{19DA}', '\u{19DA}'),
    ('\u{2070}', '\u{2070}'),
    ('\u{2074}', '\u{2079}'),
    ('\u{2080}', '\u{2089}'),
    ('\u{2460}', '\u{2468}'),
    ('\u{2474}', '\u{247C}'),
    ('\u{2488}', '\u{2490}'),
    ('\u{24EA}', '\u{24EA}'),
    ('\u{24F5}', '\u{24FD}'),
    ('\u{24FF}', '\u{24FF}'),
    ('\u{2776}', '\u{277E}'),
    ('\u{2780}', '\u{2788}'),
    ('\u{278A}', '\u{2792}'),
    ('\u{10A40}', '\u{10A43}'),
    ('\u{10E60}', '\u{10E68}'),
    ('\u{11052}', '\u{1105A}'),
    ('\u{1F100}', '\u{1F10A}'),
];

/// First code point (zero) of every decimal digit (`Nd`) run of ten.
const DECIMAL_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6,
    0x0C66, 0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0,
    0x1810, 0x1946, 0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620,
    0xA8D0, 0xA900, 0xA9D0, 0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066,
    0x110F0, 0x11136, 0x111D0, 0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730,
    0x118E0, 0x11950, 0x11C50, 0x11D50, 0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50,
    0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6, 0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950,
    0x1FBF0,
];

/// Decimal and digit characters. Fractions (½), roman numerals (Ⅻ) and
/// CJK numerals (三) are not digits and survive.
fn is_digit(c: char) -> bool {
    if c.is_ascii_digit() {
        return true;
    }
    if c.is_ascii() || !c.is_numeric() {
        return false;
    }
    let cp = c as u32;
    DECIMAL_ZEROS.iter().any(|&zero| (zero..zero + 10).contains(&cp))
        || OTHER_DIGIT_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&c))
}

/// Deterministic text cleaning applied before vectorization.
///
/// Holds shared, immutable resources; cloning is cheap.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stop_words: Arc<StopWords>,
    lemmatizer: Option<Arc<Lemmatizer>>,
}

impl TextNormalizer {
    pub fn new(stop_words: Arc<StopWords>, lemmatizer: Option<Arc<Lemmatizer>>) -> Self {
        Self { stop_words, lemmatizer }
    }

    /// Build from the resource store. The lexicon is only touched when
    /// lemmatization is enabled.
    pub fn from_config(config: &ResourceConfig) -> DetectorResult<Self> {
        let store = ResourceStore::from_config(config);
        let stop_words = Arc::new(StopWords::load(&store));
        let lemmatizer = if config.lemmatize {
            Some(Arc::new(Lemmatizer::load(&store)?))
        } else {
            log::info!("Lemmatization disabled");
            None
        };
        Ok(Self::new(stop_words, lemmatizer))
    }

    pub fn lemmatizes(&self) -> bool {
        self.lemmatizer.is_some()
    }

    /// Clean `text`. May return an empty string.
    pub fn normalize(&self, text: &str) -> String {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .filter(|c| !is_digit(*c))
            .collect();

        let tokens = cleaned
            .split_whitespace()
            .filter(|word| !self.stop_words.contains(word));

        match &self.lemmatizer {
            Some(lemmatizer) => tokens
                .map(|word| lemmatizer.lemmatize(word))
                .collect::<Vec<_>>()
                .join(" "),
            None => tokens.collect::<Vec<_>>().join(" "),
        }
    }
}
