//! In-memory shape of a result document.
//!
//! Building the tree is lenient: only a non-object top level is an error.
//! Anything malformed further down turns into an empty level, a missing
//! summary, or a missing report so the renderer can show placeholders.

use serde_json::{Map, Value};

use super::error::LoadError;
use super::keyed::Keyed;

/// Fold whose classification report is shown.
pub const REPORT_FOLD: &str = "1";

/// Models keyed by name under one scenario.
pub type ModelMap = Keyed<ModelResult>;
/// Scenarios keyed by name under one comparator.
pub type ScenarioMap = Keyed<ModelMap>;

/// `comparator -> scenario -> model -> ModelResult`, in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultTree {
    comparators: Keyed<ScenarioMap>,
}

/// Everything recorded for one trained model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelResult {
    pub summary: Option<Summary>,
    pub folds: Keyed<Fold>,
}

/// A summary value: per-epoch histories are arrays, everything else is scalar.
#[derive(Clone, Debug, PartialEq)]
pub enum MetricValue {
    Series(Vec<Value>),
    Scalar(Value),
}

/// Aggregate metrics for a model, in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    metrics: Keyed<MetricValue>,
}

/// One cross-validation fold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fold {
    pub loss_report: Option<LossReport>,
}

/// Per-class breakdown from `classification_report.loss_report`.
pub type LossReport = Keyed<ClassEntry>;

/// A loss report entry. Non-object entries (e.g. a bare `accuracy` number)
/// are kept so callers can see and skip them.
#[derive(Clone, Debug, PartialEq)]
pub enum ClassEntry {
    Scores(ClassScores),
    Other(Value),
}

/// Raw per-class fields; numbers are validated when formatted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassScores {
    pub precision: Option<Value>,
    pub recall: Option<Value>,
    pub f1_score: Option<Value>,
    pub support: Option<Value>,
}

impl ResultTree {
    /// Build a tree from a parsed document. `origin` names the source in errors.
    pub fn from_value(value: Value, origin: &str) -> Result<Self, LoadError> {
        let Value::Object(root) = value else {
            return Err(LoadError::NotAnObject {
                origin: origin.to_string(),
            });
        };
        let comparators = root
            .into_iter()
            .map(|(name, scenarios)| (name, scenario_map(scenarios)))
            .collect();
        Ok(Self { comparators })
    }

    /// Parse and build from JSON text.
    pub fn from_json_str(text: &str, origin: &str) -> Result<Self, LoadError> {
        let value = serde_json::from_str(text).map_err(|source| LoadError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        Self::from_value(value, origin)
    }

    pub fn comparators(&self) -> impl Iterator<Item = &str> {
        self.comparators.keys()
    }

    /// Scenario names under `comparator`; empty when it is unknown.
    pub fn scenarios(&self, comparator: &str) -> Vec<String> {
        self.comparators
            .get(comparator)
            .map(|scenarios| scenarios.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Model names under `comparator / scenario`; empty when either is unknown.
    pub fn models(&self, comparator: &str, scenario: &str) -> Vec<String> {
        self.scenario(comparator, scenario)
            .map(|models| models.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn scenario(&self, comparator: &str, scenario: &str) -> Option<&ModelMap> {
        self.comparators.get(comparator)?.get(scenario)
    }

    pub fn comparator_count(&self) -> usize {
        self.comparators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    /// Total number of models across every comparator and scenario.
    pub fn model_count(&self) -> usize {
        self.comparators
            .iter()
            .flat_map(|(_, scenarios)| scenarios.iter())
            .map(|(_, models)| models.len())
            .sum()
    }
}

impl ModelResult {
    /// The loss report of `fold_id`, if that fold and its report exist.
    pub fn loss_report(&self, fold_id: &str) -> Option<&LossReport> {
        self.folds.get(fold_id)?.loss_report.as_ref()
    }
}

impl Summary {
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.metrics.get(name)
    }

    /// The per-epoch history stored under `name`, if it is an array.
    pub fn history(&self, name: &str) -> Option<&[Value]> {
        match self.metrics.get(name)? {
            MetricValue::Series(values) => Some(values),
            MetricValue::Scalar(_) => None,
        }
    }

    /// Names of history metrics in document order.
    pub fn history_names(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().filter_map(|(name, value)| match value {
            MetricValue::Series(_) => Some(name),
            MetricValue::Scalar(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl FromIterator<(String, MetricValue)> for Summary {
    fn from_iter<I: IntoIterator<Item = (String, MetricValue)>>(iter: I) -> Self {
        Self {
            metrics: iter.into_iter().collect(),
        }
    }
}

impl ClassEntry {
    /// Scores for entries that carry a precision value; `None` means skip the row.
    pub fn scores_with_precision(&self) -> Option<&ClassScores> {
        match self {
            ClassEntry::Scores(scores) if scores.precision.is_some() => Some(scores),
            _ => None,
        }
    }
}

fn scenario_map(value: Value) -> ScenarioMap {
    into_object(value)
        .into_iter()
        .map(|(name, models)| (name, model_map(models)))
        .collect()
}

fn model_map(value: Value) -> ModelMap {
    into_object(value)
        .into_iter()
        .map(|(name, result)| (name, model_result(result)))
        .collect()
}

fn model_result(value: Value) -> ModelResult {
    let mut object = into_object(value);
    let summary = object
        .remove("summary")
        .and_then(|summary| match summary {
            Value::Object(metrics) => Some(summary_from(metrics)),
            _ => None,
        });
    let folds = object
        .remove("folds")
        .map(into_object)
        .unwrap_or_default()
        .into_iter()
        .map(|(id, fold)| (id, fold_from(fold)))
        .collect();
    ModelResult { summary, folds }
}

fn summary_from(metrics: Map<String, Value>) -> Summary {
    metrics
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                Value::Array(values) => MetricValue::Series(values),
                other => MetricValue::Scalar(other),
            };
            (name, value)
        })
        .collect()
}

fn fold_from(value: Value) -> Fold {
    let loss_report = match value
        .pointer("/classification_report/loss_report")
        .cloned()
    {
        Some(Value::Object(classes)) => Some(
            classes
                .into_iter()
                .map(|(class, entry)| (class, class_entry(entry)))
                .collect(),
        ),
        _ => None,
    };
    Fold { loss_report }
}

fn class_entry(value: Value) -> ClassEntry {
    match value {
        Value::Object(mut fields) => {
            let mut take = |key: &str| fields.remove(key).filter(|value| !value.is_null());
            ClassEntry::Scores(ClassScores {
                precision: take("precision"),
                recall: take("recall"),
                f1_score: take("f1-score"),
                support: take("support"),
            })
        }
        other => ClassEntry::Other(other),
    }
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ResultTree {
        let doc = json!({
            "cmp_b": {
                "scn_2": {
                    "cnn": {
                        "summary": {
                            "train_loss_history": [0.9, 0.5, 0.2],
                            "best_epoch": 3,
                            "val_loss_history": [1.0, 0.7, 0.4]
                        },
                        "folds": {
                            "1": {
                                "classification_report": {
                                    "loss_report": {
                                        "cat": {"precision": 0.9, "recall": 0.8, "f1-score": 0.85, "support": 10},
                                        "accuracy": 0.88
                                    }
                                }
                            }
                        }
                    }
                },
                "scn_1": {}
            },
            "cmp_a": {}
        });
        ResultTree::from_value(doc, "test").unwrap()
    }

    #[test]
    fn preserves_document_key_order() {
        let tree = sample();
        assert_eq!(tree.comparators().collect::<Vec<_>>(), ["cmp_b", "cmp_a"]);
        assert_eq!(tree.scenarios("cmp_b"), ["scn_2", "scn_1"]);
        assert_eq!(tree.models("cmp_b", "scn_2"), ["cnn"]);
        assert_eq!(tree.model_count(), 1);
    }

    #[test]
    fn summary_splits_histories_from_scalars() {
        let tree = sample();
        let summary = tree
            .scenario("cmp_b", "scn_2")
            .and_then(|models| models.get("cnn"))
            .and_then(|model| model.summary.as_ref())
            .unwrap();
        assert_eq!(
            summary.history_names().collect::<Vec<_>>(),
            ["train_loss_history", "val_loss_history"]
        );
        assert!(summary.history("best_epoch").is_none());
        assert_eq!(summary.history("train_loss_history").map(<[Value]>::len), Some(3));
    }

    #[test]
    fn loss_report_keeps_non_object_entries_as_other() {
        let tree = sample();
        let model = tree
            .scenario("cmp_b", "scn_2")
            .and_then(|models| models.get("cnn"))
            .unwrap();
        let report = model.loss_report(REPORT_FOLD).unwrap();
        assert_eq!(report.keys().collect::<Vec<_>>(), ["cat", "accuracy"]);
        assert!(report.get("cat").unwrap().scores_with_precision().is_some());
        assert!(report.get("accuracy").unwrap().scores_with_precision().is_none());
        assert!(model.loss_report("2").is_none());
    }

    #[test]
    fn nested_malformed_shapes_degrade_instead_of_failing() {
        let doc = json!({
            "cmp": {
                "scn_str": "oops",
                "scn": {
                    "no_summary": {"folds": {"1": {}}},
                    "bad_summary": {"summary": [1, 2, 3]},
                    "not_object": 42
                }
            }
        });
        let tree = ResultTree::from_value(doc, "test").unwrap();
        assert!(tree.models("cmp", "scn_str").is_empty());
        let models = tree.scenario("cmp", "scn").unwrap();
        assert_eq!(models.len(), 3);
        for (_, model) in models.iter() {
            assert!(model.summary.is_none());
            assert!(model.loss_report(REPORT_FOLD).is_none());
        }
    }

    #[test]
    fn null_precision_counts_as_missing() {
        let entry = class_entry(json!({"precision": null, "recall": 0.5}));
        assert!(entry.scores_with_precision().is_none());
    }

    #[test]
    fn non_object_document_is_rejected() {
        let err = ResultTree::from_value(json!([1, 2]), "list.json").unwrap_err();
        assert!(matches!(err, LoadError::NotAnObject { ref origin } if origin == "list.json"));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = ResultTree::from_json_str("{not json", "broken.json").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
