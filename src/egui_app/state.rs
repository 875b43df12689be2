//! UI-facing state owned by the controller.

use crate::report::DisplayOptions;

/// Severity of the current status message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Info,
    Warning,
    Error,
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub tone: StatusTone,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Pick models and generate a report".into(),
            tone: StatusTone::Idle,
        }
    }

    pub fn badge_label(&self) -> &'static str {
        match self.tone {
            StatusTone::Idle => "Idle",
            StatusTone::Info => "Info",
            StatusTone::Warning => "Warning",
            StatusTone::Error => "Error",
        }
    }
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    pub status: StatusBarState,
    /// Checkbox state; read when a report is generated.
    pub display: DisplayOptions,
    /// Where the document was loaded from, shown in the top bar.
    pub source_label: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            display: DisplayOptions::default(),
            source_label: String::new(),
        }
    }
}
