use eframe::egui::{self, Frame, Margin, RichText, Ui};

use super::EguiApp;
use super::style;
use crate::egui_app::selector::Choice;

const COMBO_WIDTH: f32 = 260.0;

/// A combo box pick, applied after the panel is drawn.
enum SelectorEdit {
    Comparator(usize, String),
    Scenario(usize, String),
    Model(usize, String),
}

impl EguiApp {
    pub(super) fn render_selectors_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let mut edits = Vec::new();
        ui.label(RichText::new("Models").color(palette.text).strong());
        ui.add_space(6.0);
        egui::ScrollArea::vertical()
            .id_salt("model_blocks_scroll")
            .max_height((ui.available_height() - 160.0).max(80.0))
            .show(ui, |ui| {
                for (block, chain) in self.controller.selectors().iter().enumerate() {
                    Frame::new()
                        .stroke(style::block_border())
                        .inner_margin(Margin::same(6))
                        .show(ui, |ui| {
                            ui.label(
                                RichText::new(format!("Model {}", block + 1))
                                    .color(palette.text_dim),
                            );
                            if let Some(pick) = choice_combo(ui, ("comparator", block), chain.comparator()) {
                                edits.push(SelectorEdit::Comparator(block, pick));
                            }
                            if let Some(pick) = choice_combo(ui, ("scenario", block), chain.scenario()) {
                                edits.push(SelectorEdit::Scenario(block, pick));
                            }
                            if let Some(pick) = choice_combo(ui, ("model", block), chain.model()) {
                                edits.push(SelectorEdit::Model(block, pick));
                            }
                        });
                    ui.add_space(6.0);
                }
            });
        for edit in edits {
            self.apply_selector_edit(edit);
        }

        ui.add_space(6.0);
        if ui.button("Add model").clicked() {
            self.controller.on_add_selector();
        }
        ui.separator();
        let display = &mut self.controller.ui.display;
        ui.checkbox(&mut display.show_metrics, "Metrics");
        ui.checkbox(&mut display.show_graphs, "Graphs");
        ui.checkbox(&mut display.show_reports, "Classification reports");
        ui.add_space(6.0);
        if ui
            .button(RichText::new("Generate report").color(palette.action))
            .clicked()
        {
            self.controller.on_generate_report();
        }
    }

    fn apply_selector_edit(&mut self, edit: SelectorEdit) {
        let applied = match &edit {
            SelectorEdit::Comparator(block, name) => self.controller.select_comparator(*block, name),
            SelectorEdit::Scenario(block, name) => self.controller.select_scenario(*block, name),
            SelectorEdit::Model(block, name) => self.controller.select_model(*block, name),
        };
        if !applied {
            tracing::debug!("Ignored stale selector edit");
        }
    }
}

/// Draw one combo box; returns the newly picked option, if any.
fn choice_combo(ui: &mut Ui, id: (&str, usize), choice: &Choice) -> Option<String> {
    let mut picked = None;
    let selected = choice.selected().unwrap_or("");
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected)
        .width(COMBO_WIDTH)
        .show_ui(ui, |ui| {
            for option in choice.options() {
                if ui
                    .selectable_label(option == selected, option)
                    .clicked()
                    && option != selected
                {
                    picked = Some(option.clone());
                }
            }
        });
    picked
}
