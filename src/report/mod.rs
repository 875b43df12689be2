//! Report rendering: turns resolved selections into the metrics grid,
//! loss/accuracy charts and classification-report tables.

pub mod charts;
pub mod format;
pub mod metrics;
mod render;

pub use charts::{
    ChartFactory, ChartHandle, ChartKind, ChartRegistry, ChartTarget, ChartType, Dataset,
    LineChart, LineChartConfig, LineChartFactory,
};
pub use format::PLACEHOLDER;
pub use metrics::{MetricColumn, MetricGrid, MetricSetPolicy};
pub use render::{
    ChartRows, ClassReportRow, ClassReportTable, DisplayOptions, ReportOutput, ReportSection,
    SelectedModel, render_report,
};
