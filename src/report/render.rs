use serde::{Deserialize, Serialize};

use super::charts::{ChartFactory, ChartKind, ChartRegistry, ChartTarget, LineChartConfig};
use super::format::{format_score, format_support};
use super::metrics::{MetricGrid, MetricSetPolicy, build_metric_grid};
use crate::results::{LossReport, ModelPath, ModelResult, REPORT_FOLD, Summary};

/// Which report sections are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    #[serde(default = "default_true")]
    pub show_metrics: bool,
    #[serde(default = "default_true")]
    pub show_graphs: bool,
    #[serde(default = "default_true")]
    pub show_reports: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_metrics: true,
            show_graphs: true,
            show_reports: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A resolved selection that has a summary.
#[derive(Clone, Debug)]
pub struct SelectedModel<'a> {
    pub label: String,
    pub summary: &'a Summary,
    /// Fold-1 loss report, or an empty one.
    pub report: &'a LossReport,
}

static EMPTY_REPORT: std::sync::LazyLock<LossReport> = std::sync::LazyLock::new(LossReport::new);

impl<'a> SelectedModel<'a> {
    /// `None` when the model has no summary; such selections are dropped.
    pub fn from_result(path: &ModelPath, result: &'a ModelResult) -> Option<Self> {
        let summary = result.summary.as_ref()?;
        let report = result.loss_report(REPORT_FOLD).unwrap_or(&*EMPTY_REPORT);
        Some(Self {
            label: path.label(),
            summary,
            report,
        })
    }
}

/// Chart slots in the registry, one row per chart kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartRows {
    pub loss: Vec<usize>,
    pub accuracy: Vec<usize>,
}

/// Rendered classification-report row.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassReportRow {
    pub class: String,
    pub precision: String,
    pub recall: String,
    pub f1: String,
    pub support: String,
}

/// Classification report table for one model.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassReportTable {
    pub label: String,
    pub rows: Vec<ClassReportRow>,
}

impl ClassReportTable {
    pub const HEADER: [&'static str; 5] = ["Class", "Precision", "Recall", "F1", "Support"];

    /// Rows for every class with a precision value, in report order.
    pub fn build(label: &str, report: &LossReport) -> Self {
        let rows = report
            .iter()
            .filter_map(|(class, entry)| {
                let scores = entry.scores_with_precision()?;
                Some(ClassReportRow {
                    class: class.to_string(),
                    precision: format_score(scores.precision.as_ref()),
                    recall: format_score(scores.recall.as_ref()),
                    f1: format_score(scores.f1_score.as_ref()),
                    support: format_support(scores.support.as_ref()),
                })
            })
            .collect();
        Self {
            label: label.to_string(),
            rows,
        }
    }
}

/// A block of the output region.
#[derive(Clone, Debug, PartialEq)]
pub enum ReportSection {
    Metrics(MetricGrid),
    Charts(ChartRows),
    Reports(Vec<ClassReportTable>),
}

/// The output region. Cleared and rebuilt on every render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportOutput {
    sections: Vec<ReportSection>,
}

impl ReportOutput {
    pub fn clear(&mut self) {
        self.sections.clear();
    }

    pub fn push(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn metrics(&self) -> Option<&MetricGrid> {
        self.sections.iter().find_map(|section| match section {
            ReportSection::Metrics(grid) => Some(grid),
            _ => None,
        })
    }

    pub fn charts(&self) -> Option<&ChartRows> {
        self.sections.iter().find_map(|section| match section {
            ReportSection::Charts(rows) => Some(rows),
            _ => None,
        })
    }

    pub fn reports(&self) -> Option<&[ClassReportTable]> {
        self.sections.iter().find_map(|section| match section {
            ReportSection::Reports(tables) => Some(tables.as_slice()),
            _ => None,
        })
    }
}

/// Rebuild `output` and `charts` for `models`.
///
/// The output is cleared and the live charts destroyed on every call, even
/// when every section is switched off.
pub fn render_report<F: ChartFactory>(
    models: &[SelectedModel<'_>],
    options: DisplayOptions,
    policy: MetricSetPolicy,
    output: &mut ReportOutput,
    factory: &mut F,
    charts: &mut ChartRegistry<F::Chart>,
) {
    output.clear();

    let mut rows = ChartRows::default();
    charts.replace_all(|| {
        if !options.show_graphs {
            return Vec::new();
        }
        let mut created = Vec::with_capacity(models.len() * 2);
        for (column, model) in models.iter().enumerate() {
            for kind in [ChartKind::Loss, ChartKind::Accuracy] {
                let slot = created.len();
                match kind {
                    ChartKind::Loss => rows.loss.push(slot),
                    ChartKind::Accuracy => rows.accuracy.push(slot),
                }
                let target = ChartTarget { kind, column };
                created.push(factory.create(target, LineChartConfig::for_model(kind, model)));
            }
        }
        created
    });

    if options.show_metrics {
        let names = policy.metric_names(models);
        output.push(ReportSection::Metrics(build_metric_grid(models, &names)));
    }
    if options.show_graphs {
        output.push(ReportSection::Charts(rows));
    }
    if options.show_reports {
        let tables = models
            .iter()
            .map(|model| ClassReportTable::build(&model.label, model.report))
            .collect();
        output.push(ReportSection::Reports(tables));
    }
    tracing::debug!(
        models = models.len(),
        sections = output.sections().len(),
        charts = charts.len(),
        "Rendered report"
    );
}
