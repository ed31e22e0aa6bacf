// crates/shared-kernel/src/error.rs
use std::{collections::BTreeMap, fmt};

use thiserror::Error;

/// Boxed failure raised by user callbacks and key selectors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub const SORT_SUGGESTION: &str =
    "sort the records by the declared key hierarchy (outermost level first) before processing";

pub const KEY_SUGGESTION: &str = "make sure every level's key selector yields a key for every record";

/// Identifies a break level in diagnostics: its depth and optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRef {
    pub index: usize,
    pub name: Option<String>,
}

impl LevelRef {
    pub fn new(index: usize, name: Option<&str>) -> Self {
        Self { index, name: name.map(str::to_owned) }
    }
}

impl fmt::Display for LevelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({name})", self.index),
            None => write!(f, "{}", self.index),
        }
    }
}

/// A group that reappeared after records of another group interrupted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContiguityViolation {
    pub level: LevelRef,
    pub record_index: usize,
    pub record: String,
    /// Key of the preceding record at the same level.
    pub previous_key: String,
    pub current_key: String,
    /// Composite key of the reopened group, outermost level first.
    pub prefix: Vec<String>,
    /// Index of the last record that belonged to the group before the interruption.
    pub last_seen: usize,
}

impl ContiguityViolation {
    pub fn intervening(&self) -> usize {
        self.record_index - self.last_seen - 1
    }
}

impl fmt::Display for ContiguityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Input is not grouped: group {} at level {} reopened after {} intervening records",
            self.current_key,
            self.level,
            self.intervening()
        )
    }
}

impl std::error::Error for ContiguityViolation {}

/// Root error type shared across the workspace.
#[derive(Debug, Error)]
pub enum ControlBreakError {
    /// Adds human context while preserving original error as the source.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<ControlBreakError>,
    },

    #[error("Invalid configuration: {reason}")]
    Configuration { reason: String, suggestion: Option<String> },

    #[error("Key selector failed at level {level} for record #{record_index}{}", describe_key_failure(.source))]
    KeySelector {
        level: LevelRef,
        record_index: usize,
        record: String,
        /// `None` when the selector ran but produced no key.
        #[source]
        source: Option<BoxError>,
    },

    #[error("{0}")]
    Contiguity(Box<ContiguityViolation>),

    #[error("Processing failed at record #{record_index}: {source}")]
    Processing {
        record_index: usize,
        /// `None` when the failure happened after the last record (grand total).
        record: Option<String>,
        #[source]
        source: BoxError,
    },
}

fn describe_key_failure(source: &Option<BoxError>) -> String {
    match source {
        Some(err) => format!(": {err}"),
        None => ": no key returned".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ControlBreakError>;

impl From<ContiguityViolation> for ControlBreakError {
    fn from(violation: ContiguityViolation) -> Self {
        Self::Contiguity(Box::new(violation))
    }
}

impl ControlBreakError {
    pub fn configuration(reason: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Configuration { reason: reason.into(), suggestion: Some(suggestion.into()) }
    }

    /// Structured fields describing the failure, for programmatic handling.
    pub fn diagnostics(&self) -> BTreeMap<&'static str, String> {
        let mut fields = BTreeMap::new();
        match self {
            Self::Context { context, source } => {
                fields = source.diagnostics();
                fields.insert("context", context.clone());
            }
            Self::Configuration { reason, .. } => {
                fields.insert("reason", reason.clone());
            }
            Self::KeySelector { level, record_index, record, source } => {
                fields.insert("level", level.to_string());
                fields.insert("recordIndex", record_index.to_string());
                fields.insert("record", record.clone());
                fields.insert(
                    "error",
                    source.as_ref().map_or_else(|| "no key returned".to_string(), ToString::to_string),
                );
            }
            Self::Contiguity(violation) => {
                fields.insert("level", violation.level.to_string());
                fields.insert("recordIndex", violation.record_index.to_string());
                fields.insert("record", violation.record.clone());
                fields.insert("previousKey", violation.previous_key.clone());
                fields.insert("currentKey", violation.current_key.clone());
                fields.insert("groupPrefix", format!("[{}]", violation.prefix.join(", ")));
                fields.insert("lastSeenIndex", violation.last_seen.to_string());
                fields.insert("interveningRecords", violation.intervening().to_string());
            }
            Self::Processing { record_index, record, source } => {
                fields.insert("recordIndex", record_index.to_string());
                if let Some(record) = record {
                    fields.insert("record", record.clone());
                }
                fields.insert("originalError", source.to_string());
            }
        }
        fields
    }

    /// Corrective hint for the caller, when one exists.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Context { source, .. } => source.suggestion(),
            Self::Configuration { suggestion, .. } => suggestion.as_deref(),
            Self::KeySelector { .. } => Some(KEY_SUGGESTION),
            Self::Contiguity(_) => Some(SORT_SUGGESTION),
            Self::Processing { .. } => None,
        }
    }

    /// Human-readable rendering: message, context listing and suggestion.
    pub fn report(&self) -> Report<'_> {
        Report(self)
    }
}

/// Multi-line presentation of a [`ControlBreakError`].
pub struct Report<'a>(&'a ControlBreakError);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControlBreakError: {}", self.0)?;
        let fields = self.0.diagnostics();
        if !fields.is_empty() {
            write!(f, "\nContext:")?;
            for (key, value) in &fields {
                write!(f, "\n  {key}: {value}")?;
            }
        }
        if let Some(suggestion) = self.0.suggestion() {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }
        Ok(())
    }
}

/// Extension trait to add additional context to results.
pub trait ErrorContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<ControlBreakError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ControlBreakError::Context {
            context: context.into(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ControlBreakError::Context {
            context: f(),
            source: Box::new(e.into()),
        })
    }
}
