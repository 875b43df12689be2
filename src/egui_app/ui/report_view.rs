use eframe::egui::{self, Frame, Margin, RichText, Ui};

use super::EguiApp;
use super::line_chart::paint_line_chart;
use super::style;
use crate::report::{ChartRows, ClassReportTable, MetricGrid, ReportSection};

const METRIC_COLUMN_WIDTH: f32 = 260.0;
const REPORT_TABLE_MIN_WIDTH: f32 = 300.0;

impl EguiApp {
    pub(super) fn render_report_output(&self, ui: &mut Ui) {
        let palette = style::palette();
        let output = self.controller.output();
        if output.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new("Nothing rendered yet. Pick models and press Generate report.")
                        .color(palette.text_dim),
                );
            });
            return;
        }
        egui::ScrollArea::both()
            .id_salt("report_output_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for section in output.sections() {
                    match section {
                        ReportSection::Metrics(grid) => self.render_metric_grid(ui, grid),
                        ReportSection::Charts(rows) => self.render_chart_rows(ui, rows),
                        ReportSection::Reports(tables) => render_report_tables(ui, tables),
                    }
                    ui.add_space(12.0);
                }
            });
    }

    fn render_metric_grid(&self, ui: &mut Ui, grid: &MetricGrid) {
        let palette = style::palette();
        ui.horizontal_top(|ui| {
            for column in &grid.columns {
                Frame::new()
                    .stroke(style::block_border())
                    .inner_margin(Margin::same(8))
                    .show(ui, |ui| {
                        ui.set_width(METRIC_COLUMN_WIDTH);
                        ui.label(RichText::new(&column.label).color(palette.heading).strong());
                        ui.add_space(4.0);
                        for (name, value) in &column.rows {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(name).strong());
                                ui.label(RichText::new(value).monospace());
                            });
                        }
                    });
            }
        });
    }

    fn render_chart_rows(&self, ui: &mut Ui, rows: &ChartRows) {
        let charts = self.controller.charts();
        for row in [&rows.loss, &rows.accuracy] {
            ui.horizontal_top(|ui| {
                for chart in row.iter().filter_map(|slot| charts.get(*slot)) {
                    paint_line_chart(ui, chart);
                }
            });
            ui.add_space(8.0);
        }
    }
}

fn render_report_tables(ui: &mut Ui, tables: &[ClassReportTable]) {
    let palette = style::palette();
    ui.horizontal_top(|ui| {
        for (index, table) in tables.iter().enumerate() {
            ui.vertical(|ui| {
                ui.set_min_width(REPORT_TABLE_MIN_WIDTH);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(&table.label).color(palette.heading).strong());
                });
                ui.add_space(6.0);
                egui::Grid::new(("class_report", index))
                    .striped(true)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        for heading in ClassReportTable::HEADER {
                            ui.label(RichText::new(heading).color(palette.text_dim));
                        }
                        ui.end_row();
                        for row in &table.rows {
                            ui.label(&row.class);
                            ui.label(RichText::new(&row.precision).monospace());
                            ui.label(RichText::new(&row.recall).monospace());
                            ui.label(RichText::new(&row.f1).monospace());
                            ui.label(RichText::new(&row.support).monospace());
                            ui.end_row();
                        }
                    });
            });
            ui.add_space(16.0);
        }
    });
}
