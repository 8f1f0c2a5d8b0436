//! Noun Lemmatizer
//!
//! Maps an inflected word to its dictionary base form using a WordNet noun
//! lexicon: exception list first, then suffix rules, keeping only candidates
//! the lexicon knows. Unknown words pass through unchanged.

use std::collections::{HashMap, HashSet};

use super::resources::ResourceStore;
use crate::constants::{LEXICON_EXCEPTIONS_RESOURCE, LEXICON_RESOURCE};
use crate::error::{DetectorError, DetectorResult};

/// Noun suffix substitutions, applied in this order.
const NOUN_SUFFIX_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// Immutable lexicon-backed lemmatizer.
#[derive(Debug, Clone, Default)]
pub struct Lemmatizer {
    lexicon: HashSet<String>,
    exceptions: HashMap<String, Vec<String>>,
}

impl Lemmatizer {
    pub fn new(lexicon: HashSet<String>, exceptions: HashMap<String, Vec<String>>) -> Self {
        Self { lexicon, exceptions }
    }

    /// Build from WordNet's `index.noun` and `noun.exc` file contents.
    pub fn from_wordnet(index: &str, exceptions: &str) -> Self {
        let lexicon = index
            .lines()
            .filter(|line| !line.starts_with(' ') && !line.trim().is_empty())
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect();

        let exceptions = exceptions
            .lines()
            .filter_map(|line| {
                let mut fields = line.split_whitespace();
                let inflected = fields.next()?;
                let bases: Vec<String> = fields.map(str::to_string).collect();
                (!bases.is_empty()).then(|| (inflected.to_string(), bases))
            })
            .collect();

        Self::new(lexicon, exceptions)
    }

    /// Fetch (if needed) and parse the WordNet noun files from the store.
    pub fn load(store: &ResourceStore) -> DetectorResult<Self> {
        let index = store.read_to_string(LEXICON_RESOURCE)?;
        let exceptions = store.read_to_string(LEXICON_EXCEPTIONS_RESOURCE)?;

        let lemmatizer = Self::from_wordnet(&index, &exceptions);
        if lemmatizer.lexicon.is_empty() {
            return Err(DetectorError::Resource(format!(
                "{} contains no lemmas",
                LEXICON_RESOURCE
            )));
        }

        log::info!(
            "Lemmatizer ready: {} lemmas, {} exceptions",
            lemmatizer.lexicon.len(),
            lemmatizer.exceptions.len()
        );
        Ok(lemmatizer)
    }

    pub fn lexicon_size(&self) -> usize {
        self.lexicon.len()
    }

    /// Shortest known base form of `word`, or `word` itself.
    pub fn lemmatize(&self, word: &str) -> String {
        self.base_forms(word)
            .into_iter()
            .min_by_key(|form| form.chars().count())
            .unwrap_or_else(|| word.to_string())
    }

    fn base_forms(&self, word: &str) -> Vec<String> {
        if let Some(bases) = self.exceptions.get(word) {
            let mut forms = vec![word.to_string()];
            forms.extend(bases.iter().cloned());
            return self.known(&forms);
        }

        let mut forms = apply_rules(&[word.to_string()]);
        let mut with_word = vec![word.to_string()];
        with_word.extend(forms.iter().cloned());
        let found = self.known(&with_word);
        if !found.is_empty() {
            return found;
        }

        while !forms.is_empty() {
            forms = apply_rules(&forms);
            let found = self.known(&forms);
            if !found.is_empty() {
                return found;
            }
        }

        Vec::new()
    }

    /// Forms present in the lexicon, first occurrence order, no repeats.
    fn known(&self, forms: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        forms
            .iter()
            .filter(|f| self.lexicon.contains(f.as_str()))
            .filter(|f| seen.insert(f.as_str()))
            .cloned()
            .collect()
    }
}

fn apply_rules(forms: &[String]) -> Vec<String> {
    forms
        .iter()
        .flat_map(|form| {
            NOUN_SUFFIX_RULES.iter().filter_map(move |(old, new)| {
                form.strip_suffix(old).map(|stem| format!("{}{}", stem, new))
            })
        })
        .collect()
}
