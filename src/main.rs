//! Entry point for the egui-based experiment report viewer.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use evalview::config::{self, ViewerSettings};
use evalview::egui_app::controller::ReportController;
use evalview::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use evalview::logging;
use evalview::report::LineChartFactory;
use evalview::results::{self, DEFAULT_REPORT_SOURCE, ReportSource};

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    report: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = match parse_args(std::env::args().skip(1).collect()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let settings = config::load_or_default().unwrap_or_else(|err| {
        tracing::warn!("Using default settings: {err}");
        ViewerSettings::default()
    });
    let source = ReportSource::parse(
        options
            .report
            .as_deref()
            .or(settings.report_source.as_deref())
            .unwrap_or(DEFAULT_REPORT_SOURCE),
    );

    let app: Box<dyn eframe::App> = match results::load(&source) {
        Ok(tree) => {
            let mut controller = ReportController::new(tree, settings, LineChartFactory);
            controller.set_source_label(source.to_string());
            Box::new(EguiApp::new(controller))
        }
        Err(err) => {
            tracing::error!("Failed to load report: {err}");
            Box::new(LaunchError {
                message: err.to_string(),
            })
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_min_inner_size(MIN_VIEWPORT_SIZE)
            .with_maximized(true),
        ..Default::default()
    };
    eframe::run_native(
        "Experiment report",
        native_options,
        Box::new(move |_cc| Ok(app)),
    )?;
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--report" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--report requires a value".to_string())?;
                options.report = Some(value.clone());
            }
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }
    Ok(options)
}

fn help_text() -> String {
    [
        "evalview",
        "",
        "Usage:",
        "  evalview [--report <path-or-url>]",
        "",
        "Options:",
        "  --report <path-or-url>  Result document to open (default: final_report.json)",
        "  -h, --help              Show this help",
    ]
    .join("\n")
}

/// Minimal fallback app shown when the report cannot be loaded.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to load report");
                ui.label(&self.message);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn no_arguments_use_defaults() {
        assert_eq!(parse_args(Vec::new()).unwrap(), CliOptions::default());
    }

    #[test]
    fn report_flag_takes_a_value() {
        let options = parse_args(args(&["--report", "http://localhost/final_report.json"])).unwrap();
        assert_eq!(options.report.as_deref(), Some("http://localhost/final_report.json"));
        assert!(parse_args(args(&["--report"])).is_err());
    }

    #[test]
    fn unknown_flags_and_help_return_usage() {
        let err = parse_args(args(&["--bogus"])).unwrap_err();
        assert!(err.contains("Unknown argument: --bogus"));
        assert!(parse_args(args(&["--help"])).unwrap_err().contains("Usage:"));
    }
}
