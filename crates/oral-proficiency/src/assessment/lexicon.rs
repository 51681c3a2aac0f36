use std::collections::{BTreeMap, HashSet};
use std::io::Read;

use crate::config::ConfigError;

/// Spanish word-frequency dictionary plus the practice reference phrases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    dictionary: HashSet<String>,
    references: BTreeMap<String, String>,
}

impl Lexicon {
    pub fn new(dictionary: HashSet<String>, references: BTreeMap<String, String>) -> Self {
        Self {
            dictionary,
            references,
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.dictionary.contains(word)
    }

    pub fn dictionary_len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn has_dictionary(&self) -> bool {
        !self.dictionary.is_empty()
    }

    /// Reference phrase for a practice level such as `beginner`.
    pub fn reference(&self, practice_level: &str) -> Option<&str> {
        self.references
            .get(practice_level.trim().to_ascii_lowercase().as_str())
            .map(String::as_str)
    }

    pub fn references(&self) -> &BTreeMap<String, String> {
        &self.references
    }
}

/// Parse a frequency list with one `word count` entry per line. Only the
/// first column is used; it is lowercased.
pub fn parse_word_list<R: Read>(reader: R) -> Result<HashSet<String>, ConfigError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut words = HashSet::new();
    for record in csv_reader.records() {
        let record = record.map_err(ConfigError::MalformedWordList)?;
        if let Some(word) = record.iter().find(|field| !field.is_empty()) {
            words.insert(word.to_lowercase());
        }
    }

    Ok(words)
}

/// Parse the practice reference map (`{"beginner": "...", ...}`). Keys are
/// lowercased.
pub fn parse_references(json: &str) -> Result<BTreeMap<String, String>, ConfigError> {
    let raw: BTreeMap<String, String> =
        serde_json::from_str(json).map_err(ConfigError::MalformedReferences)?;
    Ok(raw
        .into_iter()
        .map(|(key, phrase)| (key.trim().to_ascii_lowercase(), phrase))
        .collect())
}
