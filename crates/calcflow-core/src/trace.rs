//! Step trace for a single normalization call
//!
//! Every pass hands back the steps it appended; the pipeline threads them into
//! one ordered [`StepTrace`] which is returned to the caller and stored with the
//! history record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One human-readable transformation, e.g. `"Square root of 16 = 16 ** 0.5"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizationStep(String);

impl NormalizationStep {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NormalizationStep> for String {
    fn from(step: NormalizationStep) -> Self {
        step.0
    }
}

/// Ordered, append-only list of steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepTrace {
    steps: Vec<NormalizationStep>,
}

impl StepTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    pub fn push(&mut self, step: impl Into<String>) {
        self.steps.push(NormalizationStep::new(step));
    }

    /// Append every step produced by a pass, preserving their order
    pub fn extend(&mut self, steps: impl IntoIterator<Item = NormalizationStep>) {
        self.steps.extend(steps);
    }

    /// Record `"<label>: <before> -> <after>"` if the stage changed its input.
    /// Returns whether a step was appended.
    pub fn record_change(&mut self, label: &str, before: &str, after: &str) -> bool {
        if before == after {
            return false;
        }
        self.push(format!("{}: {} -> {}", label, before, after));
        true
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NormalizationStep> {
        self.steps.iter()
    }

    /// Flatten into plain strings for the response / persistence layer
    pub fn into_strings(self) -> Vec<String> {
        self.steps.into_iter().map(String::from).collect()
    }
}

impl IntoIterator for StepTrace {
    type Item = NormalizationStep;
    type IntoIter = std::vec::IntoIter<NormalizationStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_change_skips_identical() {
        let mut trace = StepTrace::new();
        assert!(!trace.record_change("Smart fix", "2+2", "2+2"));
        assert!(trace.is_empty());
    }

    #[test]
    fn test_record_change_formats_step() {
        let mut trace = StepTrace::new();
        assert!(trace.record_change("Smart fix", "2++2", "2+2"));
        assert_eq!(trace.into_strings(), vec!["Smart fix: 2++2 -> 2+2"]);
    }

    #[test]
    fn test_order_is_preserved() {
        let mut trace = StepTrace::new();
        trace.push("first");
        trace.extend(vec![
            NormalizationStep::new("second"),
            NormalizationStep::new("third"),
        ]);
        let steps: Vec<&str> = trace.iter().map(|s| s.as_str()).collect();
        assert_eq!(steps, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_serializes_as_plain_strings() {
        let mut trace = StepTrace::new();
        trace.push("Add 4 and 6");
        let json = serde_json::to_string(&trace).unwrap();
        assert_eq!(json, r#"["Add 4 and 6"]"#);
    }
}
