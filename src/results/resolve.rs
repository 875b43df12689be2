use std::fmt;

use super::tree::{ModelResult, ResultTree};

/// A full `comparator / scenario / model` selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelPath {
    pub comparator: String,
    pub scenario: String,
    pub model: String,
}

impl ModelPath {
    pub fn new(
        comparator: impl Into<String>,
        scenario: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            comparator: comparator.into(),
            scenario: scenario.into(),
            model: model.into(),
        }
    }

    /// Label used for metric columns, chart titles and report headings.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ModelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.comparator, self.scenario, self.model)
    }
}

/// Look up the model at `path`, or `None` if any level is missing.
pub fn resolve<'a>(tree: &'a ResultTree, path: &ModelPath) -> Option<&'a ModelResult> {
    tree.scenario(&path.comparator, &path.scenario)?
        .get(&path.model)
}
