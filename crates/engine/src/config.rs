use std::fmt;

use crate::level::BreakLevel;

/// Hierarchies deeper than this are reported as a warning.
pub const DEEP_NESTING_THRESHOLD: usize = 3;

/// Non-fatal configuration finding, reported when a processor is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub suggestion: Option<String>,
}

impl ConfigWarning {
    fn new(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self { message: message.into(), suggestion: Some(suggestion.into()) }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.suggestion {
            Some(suggestion) => write!(f, "{} ({suggestion})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

pub(crate) fn analyze<T, L: BreakLevel<T> + ?Sized>(levels: &[Box<L>]) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if levels.len() > DEEP_NESTING_THRESHOLD {
        warnings.push(ConfigWarning::new(
            format!("Deep nesting detected ({} levels)", levels.len()),
            "consider restructuring the data or combining levels",
        ));
    }

    for (depth, level) in levels.iter().enumerate() {
        if level.has_on_end() && !level.has_memo() {
            warnings.push(ConfigWarning::new(
                format!("Level {depth}: on_end defined without memo"),
                "add memo() to accumulate data for on_end",
            ));
        }
    }

    warnings
}
