//! egui renderer for the report viewer.

mod line_chart;
mod report_view;
mod selectors_panel;
pub mod style;

use eframe::egui::{self, Frame, Margin, RichText, Vec2};

use crate::egui_app::controller::ReportController;

/// Smallest window that still fits the selector panel and one chart.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(900.0, 600.0);
const SELECTOR_PANEL_WIDTH: f32 = 300.0;

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: ReportController,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(controller: ReportController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(Frame::new().fill(palette.surface).inner_margin(Margin::same(6)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Experiment report").color(palette.text).strong());
                    ui.separator();
                    ui.label(RichText::new(&self.controller.ui.source_label).color(palette.text_dim));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::new().fill(palette.surface).inner_margin(Margin::same(4)))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(rect.center(), 6.0, style::status_badge_color(status.tone));
                    ui.label(RichText::new(status.badge_label()).color(palette.text));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text));
                });
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::SidePanel::left("selectors")
            .resizable(true)
            .default_width(SELECTOR_PANEL_WIDTH)
            .show(ctx, |ui| self.render_selectors_panel(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.render_report_output(ui));
    }
}
