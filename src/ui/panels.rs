use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use rusty_trace::chart::ChartSpec;
use rusty_trace::data::loader::RawUpload;
use rusty_trace::session::{Event, Session};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – column toggles
// ---------------------------------------------------------------------------

/// Render the left column panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Columns");
    ui.separator();

    if state.chart.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let n_selected = state.selection.len();
    let n_total = state.columns.len();
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Toggle all").clicked() {
            state.push_event(Event::ToggleAllPressed);
        }
        ui.label(format!("{n_selected}/{n_total}"));
    });
    ui.separator();

    let columns = state.columns.clone();
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in columns.iter() {
                let mut checked = state.selection.contains(col);
                let text = RichText::new(col).color(state.colors.color_for(col));
                if ui.checkbox(&mut checked, text).changed() {
                    let requested = state.selection_with(col, checked);
                    state.push_event(Event::SelectionChanged(requested));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, session: &Session) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.chart.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export chart spec…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(loaded) = session.loaded() {
            ui.label(format!(
                "{} rows, {} columns, {} selected",
                loaded.dataset.len(),
                loaded.columns.len(),
                loaded.selection.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open time series")
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        match read_upload(&path) {
            Ok(upload) => state.push_event(Event::FileUploaded(upload)),
            Err(e) => {
                log::error!("Failed to read file: {e:#}");
                state.status_message = Some(format!("could not read file: {e:#}"));
            }
        }
    }
}

fn read_upload(path: &Path) -> Result<RawUpload> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(RawUpload::utf8(name, bytes))
}

fn export_dialog(state: &mut AppState) {
    let Some(chart) = state.chart.clone() else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export chart spec")
        .add_filter("JSON", &["json"])
        .set_file_name("chart.json")
        .save_file();

    if let Some(path) = file {
        match export_chart(&chart, &path) {
            Ok(()) => log::info!("Exported chart spec to {}", path.display()),
            Err(e) => {
                log::error!("Failed to export chart spec: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn export_chart(chart: &ChartSpec, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(chart).context("serializing chart spec")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
