use std::io::Cursor;

use super::criteria::CriteriaStore;
use super::lexicon::{parse_references, parse_word_list, Lexicon};
use super::resources::{Builtin, Resource, ResourceSource};
use crate::config::ConfigError;

/// Immutable criteria table and lexicon shared by every assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    criteria: CriteriaStore,
    lexicon: Lexicon,
}

impl ReferenceData {
    pub fn new(criteria: CriteriaStore, lexicon: Lexicon) -> Self {
        Self { criteria, lexicon }
    }

    /// Reference data compiled into the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        let sources: Vec<Box<dyn ResourceSource>> = vec![Box::new(Builtin)];
        Self::load(&sources)
    }

    /// Load every resource from the first source that has it. Invalid data
    /// from a source is fatal; it never falls through to the next source.
    pub fn load(sources: &[Box<dyn ResourceSource>]) -> Result<Self, ConfigError> {
        let criteria = CriteriaStore::from_json_str(&fetch_first(sources, Resource::Criteria)?)?;
        let dictionary = parse_word_list(Cursor::new(fetch_first(sources, Resource::Dictionary)?))?;
        let references = parse_references(&fetch_first(sources, Resource::References)?)?;
        let lexicon = Lexicon::new(dictionary, references);

        tracing::info!(
            levels = criteria.levels().len(),
            dictionary_words = lexicon.dictionary_len(),
            reference_phrases = lexicon.references().len(),
            "reference data loaded"
        );

        Ok(Self::new(criteria, lexicon))
    }

    pub fn criteria(&self) -> &CriteriaStore {
        &self.criteria
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

fn fetch_first(
    sources: &[Box<dyn ResourceSource>],
    resource: Resource,
) -> Result<String, ConfigError> {
    for source in sources {
        let fetched = source
            .fetch(resource)
            .map_err(|source_error| ConfigError::SourceUnavailable {
                resource: resource.label(),
                source: source_error,
            })?;
        if let Some(text) = fetched {
            tracing::debug!(resource = resource.label(), source = %source.describe(), "resource resolved");
            return Ok(text);
        }
    }

    Err(ConfigError::NoSource {
        resource: resource.label(),
    })
}
