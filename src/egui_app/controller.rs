use crate::config::{self, ViewerSettings};
use crate::egui_app::selector::SelectorChain;
use crate::egui_app::state::{StatusTone, UiState};
use crate::report::{
    ChartFactory, ChartRegistry, DisplayOptions, LineChartFactory, ReportOutput, SelectedModel,
    render_report,
};
use crate::results::{ResultTree, resolve};

/// Owns the loaded tree, every model block and the rendered report, and
/// bridges them to the egui UI. Lives for the whole window lifetime.
pub struct ReportController<F: ChartFactory = LineChartFactory> {
    pub ui: UiState,
    tree: ResultTree,
    selectors: Vec<SelectorChain>,
    settings: ViewerSettings,
    persist_settings: bool,
    factory: F,
    charts: ChartRegistry<F::Chart>,
    output: ReportOutput,
}

/// Summary of one report generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerateOutcome {
    /// Blocks that produced a column.
    pub rendered: usize,
    /// Blocks dropped for an incomplete selection or a missing summary.
    pub skipped: usize,
}

impl<F: ChartFactory> ReportController<F> {
    /// Start with one model block, display toggles taken from `settings`.
    pub fn new(tree: ResultTree, settings: ViewerSettings, factory: F) -> Self {
        let ui = UiState {
            display: settings.display,
            ..UiState::default()
        };
        let mut controller = Self {
            ui,
            tree,
            selectors: Vec::new(),
            settings,
            persist_settings: true,
            factory,
            charts: ChartRegistry::new(),
            output: ReportOutput::default(),
        };
        controller.on_add_selector();
        controller
    }

    /// Keep display toggle changes in memory only.
    pub fn without_persistence(mut self) -> Self {
        self.persist_settings = false;
        self
    }

    pub fn set_source_label(&mut self, label: impl Into<String>) {
        self.ui.source_label = label.into();
    }

    pub fn tree(&self) -> &ResultTree {
        &self.tree
    }

    pub fn selectors(&self) -> &[SelectorChain] {
        &self.selectors
    }

    pub fn output(&self) -> &ReportOutput {
        &self.output
    }

    pub fn charts(&self) -> &ChartRegistry<F::Chart> {
        &self.charts
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Append a new, independent model block.
    pub fn on_add_selector(&mut self) {
        self.selectors.push(SelectorChain::new(&self.tree));
        tracing::debug!(blocks = self.selectors.len(), "Added model selector");
    }

    pub fn select_comparator(&mut self, block: usize, name: &str) -> bool {
        let Some(chain) = self.selectors.get_mut(block) else {
            return false;
        };
        chain.select_comparator(&self.tree, name)
    }

    pub fn select_scenario(&mut self, block: usize, name: &str) -> bool {
        let Some(chain) = self.selectors.get_mut(block) else {
            return false;
        };
        chain.select_scenario(&self.tree, name)
    }

    pub fn select_model(&mut self, block: usize, name: &str) -> bool {
        self.selectors
            .get_mut(block)
            .is_some_and(|chain| chain.select_model(name))
    }

    /// Rebuild the report from every block's current selection.
    pub fn on_generate_report(&mut self) -> GenerateOutcome {
        let options = self.ui.display;
        let mut skipped = 0usize;
        let models: Vec<SelectedModel<'_>> = self
            .selectors
            .iter()
            .filter_map(|chain| {
                let selected = chain.resolve().and_then(|path| {
                    resolve(&self.tree, &path)
                        .and_then(|result| SelectedModel::from_result(&path, result))
                });
                if selected.is_none() {
                    skipped += 1;
                }
                selected
            })
            .collect();
        let rendered = models.len();
        render_report(
            &models,
            options,
            self.settings.metric_policy,
            &mut self.output,
            &mut self.factory,
            &mut self.charts,
        );
        drop(models);

        let outcome = GenerateOutcome { rendered, skipped };
        if skipped > 0 {
            tracing::warn!(skipped, "Skipped model blocks without data");
            self.set_status(
                format!("Rendered {rendered} model(s); skipped {skipped} without data"),
                StatusTone::Warning,
            );
        } else {
            tracing::info!(rendered, "Generated report");
            self.set_status(format!("Rendered {rendered} model(s)"), StatusTone::Info);
        }
        self.remember_display(options);
        outcome
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.text = text.into();
        self.ui.status.tone = tone;
    }

    fn remember_display(&mut self, options: DisplayOptions) {
        if self.settings.display == options {
            return;
        }
        self.settings.display = options;
        if !self.persist_settings {
            return;
        }
        if let Err(err) = config::save(&self.settings) {
            tracing::warn!("Failed to save display options: {err}");
            self.set_status(
                format!("Report rendered, but settings were not saved: {err}"),
                StatusTone::Warning,
            );
        }
    }
}
