//! Line chart descriptions and the registry that owns live chart instances.
//!
//! The renderer only talks to charts through [`ChartFactory`] and
//! [`ChartHandle`]; [`LineChartFactory`] is the implementation the egui
//! viewer paints from.

use serde_json::Value;

use super::SelectedModel;

/// Which of the two per-model charts this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Loss,
    Accuracy,
}

impl ChartKind {
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Loss => "Loss",
            ChartKind::Accuracy => "Accuracy",
        }
    }

    /// `(dataset label, summary key)` for the train and validation series.
    fn series(self) -> [(&'static str, &'static str); 2] {
        match self {
            ChartKind::Loss => [
                ("Train Loss", "train_loss_history"),
                ("Val Loss", "val_loss_history"),
            ],
            ChartKind::Accuracy => [
                ("Train Accuracy", "train_acc_history"),
                ("Val Accuracy", "val_acc_history"),
            ],
        }
    }
}

/// Only line charts are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChartType {
    #[default]
    Line,
}

/// Where a chart is placed: its row and the model column inside that row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChartTarget {
    pub kind: ChartKind,
    pub column: usize,
}

/// One named series. `None` points are gaps.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
}

/// Everything needed to create a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct LineChartConfig {
    pub chart_type: ChartType,
    pub title: String,
    /// 1-based epoch labels sized to the train series.
    pub labels: Vec<usize>,
    pub datasets: [Dataset; 2],
}

impl LineChartConfig {
    /// Build the loss or accuracy chart for one model. Missing histories give
    /// empty series rather than errors.
    pub fn for_model(kind: ChartKind, model: &SelectedModel<'_>) -> Self {
        let [(train_label, train_key), (val_label, val_key)] = kind.series();
        let series = |key: &str| -> Vec<Option<f64>> {
            model
                .summary
                .history(key)
                .map(|values| values.iter().map(Value::as_f64).collect())
                .unwrap_or_default()
        };
        let train = series(train_key);
        let labels = (1..=train.len()).collect();
        Self {
            chart_type: ChartType::Line,
            title: format!("{} - {}", model.label, kind.title()),
            labels,
            datasets: [
                Dataset {
                    label: train_label.to_string(),
                    data: train,
                },
                Dataset {
                    label: val_label.to_string(),
                    data: series(val_key),
                },
            ],
        }
    }
}

/// A live chart instance.
pub trait ChartHandle {
    /// Release the chart's resources. Called exactly once before it is dropped.
    fn destroy(&mut self);
}

/// Creates chart instances for a target slot.
pub trait ChartFactory {
    type Chart: ChartHandle;

    fn create(&mut self, target: ChartTarget, config: LineChartConfig) -> Self::Chart;
}

/// Owns every live chart. The only way to change the set is [`replace_all`],
/// which destroys the current charts before any new one is created.
///
/// [`replace_all`]: ChartRegistry::replace_all
pub struct ChartRegistry<C: ChartHandle> {
    live: Vec<C>,
}

impl<C: ChartHandle> Default for ChartRegistry<C> {
    fn default() -> Self {
        Self { live: Vec::new() }
    }
}

impl<C: ChartHandle> ChartRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy every live chart, then store the charts produced by `build`.
    pub fn replace_all<I>(&mut self, build: impl FnOnce() -> I)
    where
        I: IntoIterator<Item = C>,
    {
        for mut chart in self.live.drain(..) {
            chart.destroy();
        }
        self.live.extend(build());
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&C> {
        self.live.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.live.iter()
    }
}

impl<C: ChartHandle> Drop for ChartRegistry<C> {
    fn drop(&mut self) {
        for chart in &mut self.live {
            chart.destroy();
        }
    }
}

/// Chart the viewer paints: the config plus its precomputed value range.
#[derive(Clone, Debug, PartialEq)]
pub struct LineChart {
    target: ChartTarget,
    config: LineChartConfig,
    y_range: Option<(f64, f64)>,
    destroyed: bool,
}

impl LineChart {
    pub fn target(&self) -> ChartTarget {
        self.target
    }

    pub fn config(&self) -> &LineChartConfig {
        &self.config
    }

    /// Min and max over every finite point, or `None` when there is nothing to plot.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.y_range
    }

    /// Number of x positions: the longest series or label list.
    pub fn x_len(&self) -> usize {
        self.config
            .datasets
            .iter()
            .map(|dataset| dataset.data.len())
            .chain(std::iter::once(self.config.labels.len()))
            .max()
            .unwrap_or(0)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl ChartHandle for LineChart {
    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.config.datasets.iter_mut().for_each(|d| d.data.clear());
        self.config.labels.clear();
        self.y_range = None;
        self.destroyed = true;
    }
}

/// Factory for [`LineChart`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LineChartFactory;

impl ChartFactory for LineChartFactory {
    type Chart = LineChart;

    fn create(&mut self, target: ChartTarget, config: LineChartConfig) -> LineChart {
        let y_range = value_range(&config);
        LineChart {
            target,
            config,
            y_range,
            destroyed: false,
        }
    }
}

fn value_range(config: &LineChartConfig) -> Option<(f64, f64)> {
    config
        .datasets
        .iter()
        .flat_map(|dataset| dataset.data.iter().flatten().copied())
        .filter(|value| value.is_finite())
        .fold(None, |range, value| match range {
            None => Some((value, value)),
            Some((lo, hi)) => Some((f64::min(lo, value), f64::max(hi, value))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{LossReport, ResultTree};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counted(Rc<Cell<isize>>);

    impl ChartHandle for Counted {
        fn destroy(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    fn counted(live: &Rc<Cell<isize>>) -> Counted {
        live.set(live.get() + 1);
        Counted(live.clone())
    }

    #[test]
    fn replace_all_destroys_before_building() {
        let live = Rc::new(Cell::new(0));
        let mut registry = ChartRegistry::new();
        registry.replace_all(|| vec![counted(&live), counted(&live)]);
        assert_eq!(live.get(), 2);
        registry.replace_all(|| {
            assert_eq!(live.get(), 0, "old charts must be gone before new ones exist");
            vec![counted(&live)]
        });
        assert_eq!(live.get(), 1);
        assert_eq!(registry.len(), 1);
        drop(registry);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn config_uses_train_length_for_labels_and_keeps_gaps() {
        let tree = ResultTree::from_json_str(
            r#"{"c": {"s": {"m": {"summary": {
                "train_loss_history": [0.9, "bad", 0.3],
                "val_loss_history": [1.0, 0.8, 0.6, 0.5]
            }}}}}"#,
            "test",
        )
        .unwrap();
        let summary = tree.scenario("c", "s").unwrap().get("m").unwrap().summary.as_ref().unwrap();
        let report = LossReport::new();
        let model = SelectedModel {
            label: "c | s | m".to_string(),
            summary,
            report: &report,
        };
        let loss = LineChartConfig::for_model(ChartKind::Loss, &model);
        assert_eq!(loss.title, "c | s | m - Loss");
        assert_eq!(loss.labels, [1, 2, 3]);
        assert_eq!(loss.datasets[0].label, "Train Loss");
        assert_eq!(loss.datasets[0].data, [Some(0.9), None, Some(0.3)]);
        assert_eq!(loss.datasets[1].data.len(), 4);

        let accuracy = LineChartConfig::for_model(ChartKind::Accuracy, &model);
        assert_eq!(accuracy.datasets[1].label, "Val Accuracy");
        assert!(accuracy.labels.is_empty());
        assert!(accuracy.datasets.iter().all(|d| d.data.is_empty()));
    }

    #[test]
    fn line_chart_tracks_range_and_clears_on_destroy() {
        let config = LineChartConfig {
            chart_type: ChartType::Line,
            title: "t".to_string(),
            labels: vec![1, 2],
            datasets: [
                Dataset {
                    label: "a".to_string(),
                    data: vec![Some(0.5), Some(2.0)],
                },
                Dataset {
                    label: "b".to_string(),
                    data: vec![None, Some(-1.0), Some(f64::NAN)],
                },
            ],
        };
        let target = ChartTarget {
            kind: ChartKind::Loss,
            column: 0,
        };
        let mut chart = LineChartFactory.create(target, config);
        assert_eq!(chart.y_range(), Some((-1.0, 2.0)));
        assert_eq!(chart.x_len(), 3);
        chart.destroy();
        assert!(chart.is_destroyed());
        assert_eq!(chart.y_range(), None);
        assert_eq!(chart.x_len(), 0);
    }
}
