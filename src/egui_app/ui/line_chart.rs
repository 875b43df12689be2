//! Painter-based rendering of a two-series [`LineChart`].

use eframe::egui::{self, Align2, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};

use super::style;
use crate::report::LineChart;

pub(super) const CHART_SIZE: Vec2 = Vec2::new(420.0, 240.0);
const MARGIN_LEFT: f32 = 48.0;
const MARGIN_RIGHT: f32 = 12.0;
const MARGIN_TOP: f32 = 40.0;
const MARGIN_BOTTOM: f32 = 24.0;
const GRID_LINES: usize = 4;
const MAX_X_LABELS: usize = 10;

/// Draw `chart` into a fixed-size area.
pub(super) fn paint_line_chart(ui: &mut Ui, chart: &LineChart) {
    let palette = style::palette();
    let (response, painter) = ui.allocate_painter(CHART_SIZE, Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, palette.surface);
    painter.rect_stroke(rect, 0.0, style::block_border(), egui::StrokeKind::Inside);

    let config = chart.config();
    painter.text(
        egui::pos2(rect.center().x, rect.top() + 6.0),
        Align2::CENTER_TOP,
        &config.title,
        FontId::proportional(13.0),
        palette.text,
    );
    paint_legend(&painter, rect, chart);

    let plot = Rect::from_min_max(
        egui::pos2(rect.left() + MARGIN_LEFT, rect.top() + MARGIN_TOP),
        egui::pos2(rect.right() - MARGIN_RIGHT, rect.bottom() - MARGIN_BOTTOM),
    );
    let (Some((lo, hi)), x_len) = (chart.y_range(), chart.x_len()) else {
        painter.text(
            plot.center(),
            Align2::CENTER_CENTER,
            "No data",
            FontId::proportional(12.0),
            palette.text_dim,
        );
        return;
    };
    let (lo, hi) = padded_range(lo, hi);

    for step in 0..=GRID_LINES {
        let t = step as f32 / GRID_LINES as f32;
        let y = plot.bottom() - t * plot.height();
        painter.line_segment(
            [egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
            Stroke::new(1.0, palette.grid_minor),
        );
        let value = lo + (hi - lo) * f64::from(t);
        painter.text(
            egui::pos2(plot.left() - 4.0, y),
            Align2::RIGHT_CENTER,
            format!("{value:.2}"),
            FontId::monospace(10.0),
            palette.text_dim,
        );
    }
    painter.line_segment(
        [plot.left_bottom(), plot.right_bottom()],
        Stroke::new(1.0, palette.grid_major),
    );

    let labels = &config.labels;
    let stride = labels.len().div_ceil(MAX_X_LABELS).max(1);
    for (index, label) in labels.iter().enumerate().step_by(stride) {
        painter.text(
            egui::pos2(x_at(plot, index, x_len), plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            label.to_string(),
            FontId::monospace(10.0),
            palette.text_dim,
        );
    }

    for (dataset, color) in config.datasets.iter().zip(style::series_colors()) {
        let stroke = Stroke::new(2.0, color);
        for run in contiguous_runs(&dataset.data) {
            let points: Vec<Pos2> = run
                .map(|(index, value)| egui::pos2(x_at(plot, index, x_len), y_at(plot, value, lo, hi)))
                .collect();
            if points.len() == 1 {
                painter.circle_filled(points[0], 2.0, color);
            } else {
                painter.add(Shape::line(points, stroke));
            }
        }
    }
}

fn paint_legend(painter: &egui::Painter, rect: Rect, chart: &LineChart) {
    let palette = style::palette();
    let mut x = rect.left() + MARGIN_LEFT;
    let y = rect.top() + 26.0;
    for (dataset, color) in chart.config().datasets.iter().zip(style::series_colors()) {
        painter.line_segment(
            [egui::pos2(x, y), egui::pos2(x + 16.0, y)],
            Stroke::new(2.0, color),
        );
        let text_rect = painter.text(
            egui::pos2(x + 20.0, y),
            Align2::LEFT_CENTER,
            &dataset.label,
            FontId::proportional(11.0),
            palette.text,
        );
        x = text_rect.right() + 14.0;
    }
}

/// Avoid a zero-height range for flat series.
fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        let pad = if lo.abs() > f64::EPSILON { lo.abs() * 0.1 } else { 1.0 };
        (lo - pad, hi + pad)
    } else {
        (lo, hi)
    }
}

fn x_at(plot: Rect, index: usize, len: usize) -> f32 {
    if len <= 1 {
        return plot.center().x;
    }
    plot.left() + plot.width() * index as f32 / (len - 1) as f32
}

fn y_at(plot: Rect, value: f64, lo: f64, hi: f64) -> f32 {
    let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0) as f32;
    plot.bottom() - t * plot.height()
}

/// Split a series at gaps (missing or non-finite points).
fn contiguous_runs(
    data: &[Option<f64>],
) -> impl Iterator<Item = impl Iterator<Item = (usize, f64)> + '_> + '_ {
    data.split(|point| !point.is_some_and(f64::is_finite))
        .scan(0usize, |offset, run| {
            let start = *offset;
            *offset += run.len() + 1;
            Some((start, run))
        })
        .filter(|(_, run)| !run.is_empty())
        .map(|(start, run)| {
            run.iter()
                .enumerate()
                .filter_map(move |(i, point)| point.map(|value| (start + i, value)))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_split_on_gaps_and_keep_indices() {
        let data = [Some(1.0), Some(2.0), None, Some(f64::NAN), Some(3.0)];
        let runs: Vec<Vec<(usize, f64)>> = contiguous_runs(&data).map(|run| run.collect()).collect();
        assert_eq!(runs, vec![vec![(0, 1.0), (1, 2.0)], vec![(4, 3.0)]]);
    }

    #[test]
    fn flat_range_gets_padding() {
        assert_eq!(padded_range(0.0, 0.0), (-1.0, 1.0));
        let (lo, hi) = padded_range(2.0, 2.0);
        assert!(lo < 2.0 && hi > 2.0);
        assert_eq!(padded_range(0.1, 0.9), (0.1, 0.9));
    }

    #[test]
    fn x_positions_span_the_plot() {
        let plot = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(100.0, 50.0));
        assert_eq!(x_at(plot, 0, 5), 0.0);
        assert_eq!(x_at(plot, 4, 5), 100.0);
        assert_eq!(x_at(plot, 0, 1), 50.0);
        assert_eq!(y_at(plot, 1.0, 0.0, 1.0), 0.0);
        assert_eq!(y_at(plot, 0.0, 0.0, 1.0), 50.0);
    }
}
