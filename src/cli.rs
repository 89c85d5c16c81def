//! Command-line host
//!
//! Plays the part of the PCB editor: loads a board file into a
//! [`MemoryBoard`], registers the panel action, feeds it settings assembled
//! from a settings file and command-line overrides, and saves the result.

use anyhow::{bail, Context};
use clap::Parser;
use pcbpanel_core::MemoryBoard;
use pcbpanel_panelizer::{ActionOutcome, ActionTable, HostNotifier, PanelAction, PanelReport};
use pcbpanel_settings::{PanelSettings, SeparationMethod};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Board file (JSON) to panelize
    #[arg(long)]
    pub board: PathBuf,

    /// Where to write the panel; defaults to `<board>_panel.json`
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Settings file (.json or .toml) used as the base for overrides
    #[arg(long)]
    pub settings: Option<PathBuf>,

    #[arg(long)]
    pub columns: Option<u32>,

    #[arg(long)]
    pub rows: Option<u32>,

    /// Gap between copies in mm
    #[arg(long)]
    pub gap: Option<f64>,

    /// Separation method: V-score or Mousebites
    #[arg(long)]
    pub method: Option<SeparationMethod>,

    /// Panel width in mm
    #[arg(long)]
    pub panel_width: Option<f64>,

    /// Panel height in mm
    #[arg(long)]
    pub panel_height: Option<f64>,

    /// Save the effective settings to this file
    #[arg(long)]
    pub write_settings: Option<PathBuf>,
}

impl CliArgs {
    /// Settings file (or defaults) with command-line overrides applied
    pub fn effective_settings(&self) -> anyhow::Result<PanelSettings> {
        let mut settings = match &self.settings {
            Some(path) => PanelSettings::load_from_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => PanelSettings::default(),
        };

        if let Some(columns) = self.columns {
            settings.columns = columns;
        }
        if let Some(rows) = self.rows {
            settings.rows = rows;
        }
        if let Some(gap) = self.gap {
            settings.gap_mm = gap;
        }
        if let Some(method) = self.method {
            settings.method = method;
        }
        if let Some(width) = self.panel_width {
            settings.panel_width_mm = width;
        }
        if let Some(height) = self.panel_height {
            settings.panel_height_mm = height;
        }

        settings.validate().context("Invalid panel settings")?;
        Ok(settings)
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => default_output(&self.board),
        }
    }
}

fn default_output(board: &Path) -> PathBuf {
    let stem = board
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "board".to_string());
    board.with_file_name(format!("{stem}_panel.json"))
}

/// Reports user-facing failures on the log and keeps the last one
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    pub last: Option<(String, String)>,
}

impl HostNotifier for ConsoleNotifier {
    fn show_error(&mut self, title: &str, message: &str) {
        error!("{}: {}", title, message);
        self.last = Some((title.to_string(), message.to_string()));
    }
}

/// Panelize the board named by `args` and write the result
pub fn run(args: &CliArgs) -> anyhow::Result<PanelReport> {
    let settings = args.effective_settings()?;

    if let Some(path) = &args.write_settings {
        settings
            .save_to_file(path)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        info!("Settings written to {}", path.display());
    }

    let mut board = MemoryBoard::load_from_file(&args.board)
        .with_context(|| format!("Failed to load board from {}", args.board.display()))?;

    let action = PanelAction::new();
    let mut registry = ActionTable::new();
    action
        .register(&mut registry)
        .context("Failed to register the panel action")?;

    let mut notifier = ConsoleNotifier::default();
    let mut source = Some(settings);
    let report = match action.run(&mut board, &mut notifier, &mut source) {
        ActionOutcome::Completed(report) => report,
        ActionOutcome::Cancelled => bail!("Panelization cancelled"),
        ActionOutcome::Failed(e) => match notifier.last {
            Some((_, message)) => bail!("{}", message),
            None => return Err(e).context("Panelization failed"),
        },
    };

    let output = args.output_path();
    board
        .save_to_file(&output)
        .with_context(|| format!("Failed to save panel to {}", output.display()))?;
    info!(
        "Panel with {} copies written to {}",
        report.board_copies(),
        output.display()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["pcbpanel", "--board", "boards/demo.json"];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_overrides_apply_to_defaults() {
        let settings = args(&["--columns", "3", "--gap", "1.5", "--method", "Mousebites"])
            .effective_settings()
            .unwrap();
        assert_eq!(settings.columns, 3);
        assert_eq!(settings.rows, 2);
        assert_eq!(settings.gap_mm, 1.5);
        assert_eq!(settings.method, SeparationMethod::Mousebites);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        assert!(args(&["--rows", "0"]).effective_settings().is_err());
    }

    #[test]
    fn test_unknown_method_fails_to_parse() {
        let result =
            CliArgs::try_parse_from(["pcbpanel", "--board", "b.json", "--method", "laser"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            args(&[]).output_path(),
            PathBuf::from("boards/demo_panel.json")
        );
        assert_eq!(
            args(&["--output", "out.json"]).output_path(),
            PathBuf::from("out.json")
        );
    }
}
