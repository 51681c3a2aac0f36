use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{CriteriaDetails, ProficiencyLevel};
use super::resources::BUILTIN_CRITERIA;
use crate::config::ConfigError;

pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 100;

/// Inclusive integer score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRange {
    pub min: u8,
    pub max: u8,
}

impl ScoreRange {
    pub fn contains(&self, score: u8) -> bool {
        self.min <= score && score <= self.max
    }
}

/// Everything configured for one proficiency level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelDescriptor {
    pub level: ProficiencyLevel,
    pub name: String,
    pub score_range: ScoreRange,
    pub details: CriteriaDetails,
    pub feedback_template: String,
}

#[derive(Debug, Deserialize)]
struct RawLevel {
    name: Option<String>,
    score_range: Option<[i64; 2]>,
    oral_production: Option<String>,
    functions: Option<String>,
    discourse: Option<String>,
    grammatical_control: Option<String>,
    vocabulary: Option<String>,
    pronunciation: Option<String>,
    communication_strategies: Option<String>,
    sociocultural_use: Option<String>,
    feedback_template: Option<String>,
}

impl RawLevel {
    fn into_descriptor(self, key: &str) -> Result<LevelDescriptor, ConfigError> {
        let level = ProficiencyLevel::from_key(key)
            .ok_or_else(|| ConfigError::UnknownLevel(key.to_string()))?;
        let required = |value: Option<String>, field: &'static str| {
            value.ok_or_else(|| ConfigError::MissingField {
                level: key.to_string(),
                field,
            })
        };

        let name = required(self.name, "name")?;
        let [min, max] = self.score_range.ok_or_else(|| ConfigError::MissingField {
            level: key.to_string(),
            field: "score_range",
        })?;
        let details = CriteriaDetails {
            oral_production: required(self.oral_production, "oral_production")?,
            functions: required(self.functions, "functions")?,
            discourse: required(self.discourse, "discourse")?,
            grammatical_control: required(self.grammatical_control, "grammatical_control")?,
            vocabulary: required(self.vocabulary, "vocabulary")?,
            pronunciation: required(self.pronunciation, "pronunciation")?,
            communication_strategies: required(
                self.communication_strategies,
                "communication_strategies",
            )?,
            sociocultural_use: required(self.sociocultural_use, "sociocultural_use")?,
        };
        let feedback_template = required(self.feedback_template, "feedback_template")?;

        let in_bounds = |value: i64| (MIN_SCORE as i64..=MAX_SCORE as i64).contains(&value);
        if !in_bounds(min) || !in_bounds(max) || min > max {
            return Err(ConfigError::InvalidRange {
                level: key.to_string(),
                min,
                max,
            });
        }

        Ok(LevelDescriptor {
            level,
            name,
            score_range: ScoreRange {
                min: min as u8,
                max: max as u8,
            },
            details,
            feedback_template,
        })
    }
}

/// Validated, read-only table of proficiency levels.
///
/// Ranges are inclusive, ascending in level order, contiguous and together
/// cover exactly `[0, 100]`, so every integer score maps to one level.
#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaStore {
    levels: Vec<LevelDescriptor>,
}

impl CriteriaStore {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file =
            std::fs::File::open(path).map_err(|source| ConfigError::SourceUnavailable {
                resource: "proficiency criteria",
                source,
            })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, RawLevel> =
            serde_json::from_reader(reader).map_err(ConfigError::MalformedCriteria)?;
        Self::from_raw(raw)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, RawLevel> =
            serde_json::from_str(json).map_err(ConfigError::MalformedCriteria)?;
        Self::from_raw(raw)
    }

    /// The ACTFL table shipped with the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json_str(BUILTIN_CRITERIA)
    }

    fn from_raw(raw: BTreeMap<String, RawLevel>) -> Result<Self, ConfigError> {
        let levels = raw
            .into_iter()
            .map(|(key, level)| level.into_descriptor(&key))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_levels(levels)
    }

    pub fn from_levels(mut levels: Vec<LevelDescriptor>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::EmptyCriteria);
        }

        levels.sort_by_key(|descriptor| descriptor.level);

        for pair in levels.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            if previous.level == next.level
                || previous.score_range.max as u16 + 1 != next.score_range.min as u16
            {
                return Err(ConfigError::Discontinuous {
                    previous: previous.level.key().to_string(),
                    previous_max: previous.score_range.max,
                    next: next.level.key().to_string(),
                    next_min: next.score_range.min,
                });
            }
        }

        let lowest = levels[0].score_range.min;
        let highest = levels[levels.len() - 1].score_range.max;
        if lowest != MIN_SCORE || highest != MAX_SCORE {
            return Err(ConfigError::NotCovering { lowest, highest });
        }

        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[LevelDescriptor] {
        &self.levels
    }

    pub fn descriptor(&self, level: ProficiencyLevel) -> Option<&LevelDescriptor> {
        self.levels
            .iter()
            .find(|descriptor| descriptor.level == level)
    }

    pub fn lowest(&self) -> Option<&LevelDescriptor> {
        self.levels.first()
    }

    pub fn highest(&self) -> Option<&LevelDescriptor> {
        self.levels.last()
    }

    /// Map a composite score to its level. The score is clamped to
    /// `[0, 100]` and truncated to its integer band position.
    pub fn classify(&self, score: f64) -> Result<&LevelDescriptor, ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::EmptyCriteria);
        }

        let bucket = clamp_score(score).floor() as u8;
        let index = self
            .levels
            .partition_point(|descriptor| descriptor.score_range.max < bucket);

        // Contiguity guarantees the partition point lands inside the table.
        Ok(&self.levels[index.min(self.levels.len() - 1)])
    }
}

pub(crate) fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_SCORE as f64;
    }
    score.clamp(MIN_SCORE as f64, MAX_SCORE as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_covers_all_levels() {
        let store = CriteriaStore::builtin().expect("builtin criteria load");
        assert_eq!(store.levels().len(), 11);
        assert_eq!(
            store.lowest().map(|descriptor| descriptor.level),
            Some(ProficiencyLevel::NoviceLow)
        );
        assert_eq!(
            store.highest().map(|descriptor| descriptor.level),
            Some(ProficiencyLevel::Distinguished)
        );
    }

    #[test]
    fn classify_clamps_out_of_range_scores() {
        let store = CriteriaStore::builtin().expect("builtin criteria load");
        let low = store.classify(-12.0).expect("classifies");
        let high = store.classify(250.0).expect("classifies");
        let nan = store.classify(f64::NAN).expect("classifies");

        assert_eq!(low.level, ProficiencyLevel::NoviceLow);
        assert_eq!(high.level, ProficiencyLevel::Distinguished);
        assert_eq!(nan.level, ProficiencyLevel::NoviceLow);
    }

    #[test]
    fn fractional_scores_stay_in_the_lower_band() {
        let store = CriteriaStore::builtin().expect("builtin criteria load");
        assert_eq!(
            store.classify(94.9).expect("classifies").level,
            ProficiencyLevel::AdvancedHigh
        );
        assert_eq!(
            store.classify(99.99).expect("classifies").level,
            ProficiencyLevel::Superior
        );
    }
}
