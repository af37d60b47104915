// response_table.rs
use std::fmt;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

/// Errors raised while building a response table. Every one of them is fatal
/// at startup: a table that fails validation must never serve requests, so the
/// process refuses to start instead of falling back to an empty reply.
#[derive(Debug)]
pub enum TableError {
    ReadFile { path: PathBuf, source: std::io::Error },
    ParseJson { path: PathBuf, source: serde_json::Error },
    Validation(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFile { path, source } => {
                write!(f, "failed to read response table '{}': {}", path.display(), source)
            }
            Self::ParseJson { path, source } => {
                write!(f, "failed to parse response table '{}': {}", path.display(), source)
            }
            Self::Validation(msg) => write!(f, "invalid response table: {}", msg),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFile { source, .. } => Some(source),
            Self::ParseJson { source, .. } => Some(source),
            Self::Validation(_) => None,
        }
    }
}

/// What has to appear in the lowercased utterance for a fallback rule to fire.
#[derive(Debug, Clone)]
pub enum Requirement {
    /// Every listed substring must be present ("what" and "do").
    AllOf(Vec<String>),
    /// Any single listed substring is enough ("cost" or "price" or "fee").
    AnyOf(Vec<String>),
}

impl Requirement {
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Self::AllOf(parts) => parts.iter().all(|part| lowered.contains(part.as_str())),
            Self::AnyOf(parts) => parts.iter().any(|part| lowered.contains(part.as_str())),
        }
    }

    fn parts(&self) -> &[String] {
        match self {
            Self::AllOf(parts) | Self::AnyOf(parts) => parts,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FallbackRule {
    pub requirement: Requirement,
    /// Index into the trigger list of the entry whose response this rule
    /// reuses. Resolved from the phrase key during validation.
    pub response: usize,
}

/// Ordered trigger table plus fallback rules. Declaration order is match
/// precedence: earlier phrases shadow later ones (the "hi" inside "which"
/// beats "services"), which reproduces the site widget exactly. Kept as a Vec
/// rather than any map type so the order survives.
#[derive(Debug, Clone)]
pub struct ResponseTable {
    triggers: Vec<(String, String)>,
    fallbacks: Vec<FallbackRule>,
    default_response: String,
}

impl ResponseTable {
    pub fn new(
        triggers: Vec<(String, String)>,
        fallbacks: Vec<(Requirement, String)>,
        default_response: String,
    ) -> Result<Self, TableError> {
        if triggers.is_empty() {
            return Err(TableError::Validation(
                "trigger table must contain at least one phrase".into(),
            ));
        }
        if default_response.trim().is_empty() {
            return Err(TableError::Validation("default response must not be empty".into()));
        }

        // Phrases are matched against lowercased input, so store them lowercased.
        let mut normalized: Vec<(String, String)> = Vec::with_capacity(triggers.len());
        for (phrase, response) in triggers {
            let phrase = phrase.to_lowercase();
            if phrase.trim().is_empty() {
                return Err(TableError::Validation("trigger phrase must not be empty".into()));
            }
            if phrase == "default" {
                return Err(TableError::Validation(
                    "'default' is reserved and cannot be used as a trigger phrase".into(),
                ));
            }
            if response.trim().is_empty() {
                return Err(TableError::Validation(format!(
                    "trigger phrase '{}' has an empty response",
                    phrase
                )));
            }
            if normalized.iter().any(|(existing, _)| *existing == phrase) {
                return Err(TableError::Validation(format!("duplicate trigger phrase '{}'", phrase)));
            }
            normalized.push((phrase, response));
        }

        let mut resolved = Vec::with_capacity(fallbacks.len());
        for (requirement, key) in fallbacks {
            if requirement.parts().is_empty()
                || requirement.parts().iter().any(|part| part.trim().is_empty())
            {
                return Err(TableError::Validation("fallback rule has an empty requirement".into()));
            }
            let key = key.to_lowercase();
            let response = normalized
                .iter()
                .position(|(phrase, _)| *phrase == key)
                .ok_or_else(|| {
                    TableError::Validation(format!(
                        "fallback rule references unknown trigger phrase '{}'",
                        key
                    ))
                })?;
            resolved.push(FallbackRule { requirement, response });
        }

        Ok(ResponseTable {
            triggers: normalized,
            fallbacks: resolved,
            default_response,
        })
    }

    /// Load and validate a table from a JSON file. See `responses.json` format
    /// in the tests below; used when RESPONSES_PATH is set.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| TableError::ReadFile { path: path.clone(), source: e })?;
        let file: TableFile = serde_json::from_str(&content)
            .map_err(|e| TableError::ParseJson { path: path.clone(), source: e })?;

        let triggers = file
            .triggers
            .into_iter()
            .map(|entry| (entry.phrase, entry.response))
            .collect();
        let fallbacks = file
            .fallbacks
            .into_iter()
            .map(FallbackEntry::into_rule)
            .collect::<Result<Vec<_>, _>>()?;

        let table = Self::new(triggers, fallbacks, file.default)?;
        info!(
            "Loaded response table from {}: {} trigger phrases, {} fallback rules",
            path.display(),
            table.trigger_count(),
            table.fallback_count()
        );
        Ok(table)
    }

    pub fn triggers(&self) -> &[(String, String)] {
        &self.triggers
    }

    pub fn fallbacks(&self) -> &[FallbackRule] {
        &self.fallbacks
    }

    /// Response text of the trigger entry at `index`. Indices come from
    /// validated fallback rules, so they are always in bounds.
    pub fn trigger_response(&self, index: usize) -> &str {
        &self.triggers[index].1
    }

    pub fn default_response(&self) -> &str {
        &self.default_response
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    pub fn fallback_count(&self) -> usize {
        self.fallbacks.len()
    }
}

#[derive(Deserialize)]
struct TableFile {
    triggers: Vec<TriggerEntry>,
    #[serde(default)]
    fallbacks: Vec<FallbackEntry>,
    default: String,
}

#[derive(Deserialize)]
struct TriggerEntry {
    phrase: String,
    response: String,
}

#[derive(Deserialize)]
struct FallbackEntry {
    #[serde(default)]
    all_of: Vec<String>,
    #[serde(default)]
    any_of: Vec<String>,
    response_key: String,
}

impl FallbackEntry {
    fn into_rule(self) -> Result<(Requirement, String), TableError> {
        match (self.all_of.is_empty(), self.any_of.is_empty()) {
            (false, true) => Ok((Requirement::AllOf(self.all_of), self.response_key)),
            (true, false) => Ok((Requirement::AnyOf(self.any_of), self.response_key)),
            _ => Err(TableError::Validation(
                "fallback rule must set exactly one of 'all_of' or 'any_of'".into(),
            )),
        }
    }
}
