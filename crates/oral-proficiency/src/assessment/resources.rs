//! Where reference data comes from.
//!
//! Sources are tried in order; the first one that has the resource wins. A
//! source that has the resource but cannot read it aborts the load, and so
//! does an explicitly configured path that does not exist.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::ResourceConfig;

pub(crate) const BUILTIN_CRITERIA: &str = include_str!("../../data/actfl_criteria.json");
pub(crate) const BUILTIN_DICTIONARY: &str = include_str!("../../data/es_frequency.txt");
pub(crate) const BUILTIN_REFERENCES: &str = include_str!("../../data/references.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Criteria,
    Dictionary,
    References,
}

impl Resource {
    pub const fn file_name(self) -> &'static str {
        match self {
            Resource::Criteria => "actfl_criteria.json",
            Resource::Dictionary => "es_frequency.txt",
            Resource::References => "references.json",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Resource::Criteria => "proficiency criteria",
            Resource::Dictionary => "word frequency list",
            Resource::References => "reference phrases",
        }
    }
}

/// Storage abstraction so object-store adapters can sit in front of the
/// local and built-in copies.
pub trait ResourceSource: Send + Sync {
    fn describe(&self) -> String;

    /// `Ok(None)` means this source does not hold the resource.
    fn fetch(&self, resource: Resource) -> Result<Option<String>, std::io::Error>;
}

/// Explicit per-resource paths from the environment. A configured path that
/// is missing is an error, never a fallthrough.
#[derive(Debug, Clone)]
pub struct ConfiguredPaths {
    config: ResourceConfig,
}

impl ConfiguredPaths {
    pub fn new(config: ResourceConfig) -> Self {
        Self { config }
    }

    fn path_for(&self, resource: Resource) -> Option<&PathBuf> {
        match resource {
            Resource::Criteria => self.config.criteria_path.as_ref(),
            Resource::Dictionary => self.config.dictionary_path.as_ref(),
            Resource::References => self.config.references_path.as_ref(),
        }
    }
}

impl ResourceSource for ConfiguredPaths {
    fn describe(&self) -> String {
        "configured paths".to_string()
    }

    fn fetch(&self, resource: Resource) -> Result<Option<String>, std::io::Error> {
        match self.path_for(resource) {
            Some(path) => std::fs::read_to_string(path).map(Some),
            None => Ok(None),
        }
    }
}

/// A directory holding the resources under their default file names.
#[derive(Debug, Clone)]
pub struct Directory {
    root: PathBuf,
}

impl Directory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceSource for Directory {
    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }

    fn fetch(&self, resource: Resource) -> Result<Option<String>, std::io::Error> {
        read_optional(&self.root.join(resource.file_name()))
    }
}

/// Copies compiled into the crate. Always has every resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct Builtin;

impl ResourceSource for Builtin {
    fn describe(&self) -> String {
        "built-in defaults".to_string()
    }

    fn fetch(&self, resource: Resource) -> Result<Option<String>, std::io::Error> {
        let text = match resource {
            Resource::Criteria => BUILTIN_CRITERIA,
            Resource::Dictionary => BUILTIN_DICTIONARY,
            Resource::References => BUILTIN_REFERENCES,
        };
        Ok(Some(text.to_string()))
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, std::io::Error> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "reference file not found, trying next source");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Default chain: environment paths, then the data directory (the working
/// directory unless `DATA_DIR` is set), then the built-in copies.
pub fn default_sources(config: &ResourceConfig) -> Vec<Box<dyn ResourceSource>> {
    let data_dir = config
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    vec![
        Box::new(ConfiguredPaths::new(config.clone())),
        Box::new(Directory::new(data_dir)),
        Box::new(Builtin),
    ]
}
