//! Vehicle-id redaction.

use ppm_core::IdRedactionMode;

/// Replaces vehicle ids that match the configured predicate.
///
/// In wildcard mode every id is replaced; in inclusion mode only the listed
/// ids are.  The replacement is a fixed configured string, or — when none is
/// configured — `'0'` repeated to the input id's length, so replacement
/// never changes record length and the original literal cannot survive.
#[derive(Clone, Debug)]
pub struct IdRedactor {
    mode: IdRedactionMode,
    replacement: Option<String>,
}

impl IdRedactor {
    pub fn new(mode: IdRedactionMode, replacement: Option<String>) -> Self {
        Self { mode, replacement }
    }

    /// `true` when `id` should be replaced.
    pub fn matches(&self, id: &str) -> bool {
        match &self.mode {
            IdRedactionMode::Off => false,
            IdRedactionMode::All => true,
            IdRedactionMode::Inclusion(set) => set.contains(id),
        }
    }

    /// The replacement for `id`, or `None` to pass it through unchanged.
    pub fn redact(&self, id: &str) -> Option<String> {
        if !self.matches(id) {
            return None;
        }
        Some(match &self.replacement {
            Some(value) => value.clone(),
            None => "0".repeat(id.chars().count().max(1)),
        })
    }
}
