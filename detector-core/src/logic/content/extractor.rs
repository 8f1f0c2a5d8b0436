//! Content Chunk Extractor
//!
//! Raw HTML → ordered, filtered, deduplicated text chunks.
//!
//! Candidates come from `<p>` text, then `<button>` text, then the `value`
//! of `<input type="button|submit">`. When none of those yield anything the
//! whole visible text is split into sentences instead. Text inside
//! `<script>`/`<style>` never counts.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};

use super::rules::ChunkLimits;

static PARAGRAPHS: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid selector"));
static BUTTONS: Lazy<Selector> = Lazy::new(|| Selector::parse("button").expect("valid selector"));
static INPUTS: Lazy<Selector> = Lazy::new(|| Selector::parse("input").expect("valid selector"));

/// Elements whose text is never visible.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style"];

/// Input types whose `value` is a visible label.
const BUTTON_INPUT_TYPES: &[&str] = &["button", "submit"];

/// Extracts classifiable chunks from HTML pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentExtractor {
    limits: ChunkLimits,
}

impl ContentExtractor {
    pub fn new(limits: ChunkLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ChunkLimits {
        &self.limits
    }

    /// Chunks of `html` in document order.
    pub fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        let mut candidates = element_candidates(&document);
        let fallback = candidates.is_empty();
        if fallback {
            let text = collapse_whitespace(&visible_text(document.root_element()));
            if !text.is_empty() {
                candidates = split_sentences(&text).into_iter().map(str::to_string).collect();
            }
        }

        let chunks = self.filter(candidates);
        log::debug!(
            "Extracted {} chunks from {} bytes of HTML (sentence fallback: {})",
            chunks.len(),
            html.len(),
            fallback
        );
        chunks
    }

    /// Length/word filter, truncation, dedup, cap. Order is preserved.
    fn filter(&self, candidates: Vec<String>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut chunks = Vec::new();

        for candidate in candidates {
            let cleaned = collapse_whitespace(&candidate);
            if cleaned.chars().count() < self.limits.min_chars {
                continue;
            }
            if cleaned.split_whitespace().count() < self.limits.min_words {
                continue;
            }
            let cleaned = truncate_chars(cleaned, self.limits.max_chars);
            if !seen.insert(cleaned.clone()) {
                continue;
            }
            chunks.push(cleaned);
        }

        chunks.truncate(self.limits.max_chunks);
        chunks
    }
}

/// Extract chunks with the default limits.
pub fn extract_chunks(html: &str) -> Vec<String> {
    ContentExtractor::default().extract(html)
}

/// Paragraphs, then buttons, then button-like inputs. Empty ones dropped.
fn element_candidates(document: &Html) -> Vec<String> {
    let paragraphs = document.select(&PARAGRAPHS).map(|el| collapse_whitespace(&visible_text(el)));
    let buttons = document.select(&BUTTONS).map(|el| collapse_whitespace(&visible_text(el)));
    let inputs = document
        .select(&INPUTS)
        .filter(is_button_input)
        .map(|el| collapse_whitespace(el.value().attr("value").unwrap_or("")));

    paragraphs
        .chain(buttons)
        .chain(inputs)
        .filter(|text| !text.is_empty())
        .collect()
}

fn is_button_input(input: &ElementRef) -> bool {
    let input_type = input.value().attr("type").unwrap_or("").trim().to_lowercase();
    BUTTON_INPUT_TYPES.contains(&input_type.as_str())
}

/// Text nodes under `element`, joined with spaces, skipping hidden elements.
fn visible_text(element: ElementRef) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let Node::Text(text) = node.value() else {
                return None;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            });
            (!hidden).then_some(&**text)
        })
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Collapse whitespace runs to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split after `.`, `!` or `?` when followed by whitespace.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            sentences.push(&text[start..i]);
            start = i + c.len_utf8();
        }
        prev = Some(c);
    }
    sentences.push(&text[start..]);
    sentences
}

fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text,
    }
}
