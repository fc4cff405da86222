use std::sync::Arc;

use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use rusty_trace::chart::ChartSpec;
use rusty_trace::config::ViewerConfig;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Time-series plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected columns in the central panel.
pub fn series_plot(ui: &mut Ui, state: &AppState, config: &ViewerConfig) {
    let chart = match &state.chart {
        Some(chart) => Arc::clone(chart),
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a CSV file to view it  (File → Open…)");
            });
            return;
        }
    };

    let data = match chart.as_ref() {
        ChartSpec::Populated(data) => data,
        ChartSpec::Empty { reason } => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(reason);
            });
            return;
        }
    };

    ui.heading(&data.title);

    let precision = config.tooltip_precision;
    let hover_chart = Arc::clone(&chart);

    Plot::new("series_plot")
        .legend(Legend::default())
        .x_axis_label("Time")
        .x_axis_formatter(|mark, _range| clock_label(mark.value))
        .label_formatter(move |_name, point| {
            let ChartSpec::Populated(data) = hover_chart.as_ref() else {
                return String::new();
            };
            let Some(idx) = data.nearest_index(point.x) else {
                return String::new();
            };
            let tip = &data.tooltips[idx];
            let time = tip
                .timestamp
                .map(|t| t.to_string())
                .unwrap_or_else(|| "—".to_string());
            let mut lines = vec![time];
            lines.extend(tip.lines(precision));
            lines.join("\n")
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &data.series {
                let color = state.colors.color_for(&series.column);
                // Each run is its own line so missing values leave a gap.
                for run in data.segments(series) {
                    let line = Line::new(PlotPoints::from(run))
                        .name(&series.column)
                        .color(color)
                        .width(config.line_width);
                    plot_ui.line(line);
                }
            }
        });
}

/// `HH:MM:SS` for an axis position in seconds since midnight.
fn clock_label(seconds: f64) -> String {
    if !(0.0..86_400.0).contains(&seconds) {
        return String::new();
    }
    let millis = (seconds * 1000.0).round() as u64;
    let total = millis / 1000;
    let base = format!("{:02}:{:02}:{:02}", total / 3600, total / 60 % 60, total % 60);
    match millis % 1000 {
        0 => base,
        ms => format!("{base}.{ms:03}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_labels() {
        assert_eq!(clock_label(3723.0), "01:02:03");
        assert_eq!(clock_label(1.5), "00:00:01.500");
        assert_eq!(clock_label(-1.0), "");
    }

    #[test]
    fn clock_label_rounding_carries_into_seconds() {
        assert_eq!(clock_label(1.9996), "00:00:02");
        assert_eq!(clock_label(59.9999), "00:01:00");
        assert_eq!(clock_label(1.0004), "00:00:01");
        assert_eq!(clock_label(1.0006), "00:00:01.001");
    }
}
