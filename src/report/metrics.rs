use serde::{Deserialize, Serialize};

use super::SelectedModel;
use super::format::format_last;

/// How the metric rows of the metrics grid are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSetPolicy {
    /// History metrics of the first selected model only. A metric that a
    /// later model has but the first lacks is not shown.
    #[default]
    FirstModel,
    /// Every history metric of any selected model, in first-seen order.
    Union,
}

impl MetricSetPolicy {
    /// Metric names to list, in display order. Empty when no model is selected.
    pub fn metric_names(self, models: &[SelectedModel<'_>]) -> Vec<String> {
        match self {
            MetricSetPolicy::FirstModel => models
                .first()
                .map(|first| first.summary.history_names().map(str::to_string).collect())
                .unwrap_or_default(),
            MetricSetPolicy::Union => {
                let mut names: Vec<String> = Vec::new();
                for name in models.iter().flat_map(|model| model.summary.history_names()) {
                    if !names.iter().any(|existing| existing == name) {
                        names.push(name.to_string());
                    }
                }
                names
            }
        }
    }
}

/// One column of the metrics grid.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricColumn {
    pub label: String,
    /// `(metric name, formatted last value)` pairs.
    pub rows: Vec<(String, String)>,
}

/// Metrics grid: one column per model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricGrid {
    pub columns: Vec<MetricColumn>,
}

pub(super) fn build_metric_grid(models: &[SelectedModel<'_>], names: &[String]) -> MetricGrid {
    let columns = models
        .iter()
        .map(|model| MetricColumn {
            label: model.label.clone(),
            rows: names
                .iter()
                .map(|name| (name.clone(), format_last(model.summary.history(name))))
                .collect(),
        })
        .collect();
    MetricGrid { columns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::format::PLACEHOLDER;
    use crate::results::{LossReport, ResultTree, Summary};

    fn summaries() -> (Summary, Summary) {
        let tree = ResultTree::from_json_str(
            r#"{"c": {"s": {
                "a": {"summary": {"train_loss_history": [0.5, 0.25], "epochs": 2, "val_loss_history": []}},
                "b": {"summary": {"val_acc_history": [0.8], "train_loss_history": [0.3]}}
            }}}"#,
            "test",
        )
        .unwrap();
        let models = tree.scenario("c", "s").unwrap();
        let get = |name: &str| models.get(name).and_then(|m| m.summary.clone()).unwrap();
        (get("a"), get("b"))
    }

    fn selected<'a>(label: &str, summary: &'a Summary, report: &'a LossReport) -> SelectedModel<'a> {
        SelectedModel {
            label: label.to_string(),
            summary,
            report,
        }
    }

    #[test]
    fn first_model_policy_uses_first_summary_histories() {
        let (a, b) = summaries();
        let report = LossReport::new();
        let models = [selected("a", &a, &report), selected("b", &b, &report)];
        assert_eq!(
            MetricSetPolicy::FirstModel.metric_names(&models),
            ["train_loss_history", "val_loss_history"]
        );
    }

    #[test]
    fn union_policy_adds_metrics_missing_from_first_model() {
        let (a, b) = summaries();
        let report = LossReport::new();
        let models = [selected("a", &a, &report), selected("b", &b, &report)];
        assert_eq!(
            MetricSetPolicy::Union.metric_names(&models),
            ["train_loss_history", "val_loss_history", "val_acc_history"]
        );
    }

    #[test]
    fn no_models_means_no_metrics() {
        assert!(MetricSetPolicy::FirstModel.metric_names(&[]).is_empty());
        assert!(MetricSetPolicy::Union.metric_names(&[]).is_empty());
    }

    #[test]
    fn grid_fills_placeholders_for_missing_or_empty_histories() {
        let (a, b) = summaries();
        let report = LossReport::new();
        let models = [selected("a", &a, &report), selected("b", &b, &report)];
        let names = MetricSetPolicy::FirstModel.metric_names(&models);
        let grid = build_metric_grid(&models, &names);
        assert_eq!(grid.columns.len(), 2);
        assert_eq!(
            grid.columns[0].rows,
            [
                ("train_loss_history".to_string(), "0.2500".to_string()),
                ("val_loss_history".to_string(), PLACEHOLDER.to_string()),
            ]
        );
        assert_eq!(grid.columns[1].rows[0].1, "0.3000");
        assert_eq!(grid.columns[1].rows[1].1, PLACEHOLDER);
    }
}
