use eframe::egui;

use rusty_trace::config::ViewerConfig;
use rusty_trace::session::Session;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyTraceApp {
    pub session: Session,
    pub state: AppState,
    pub config: ViewerConfig,
}

impl RustyTraceApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            session: Session::new(),
            state: AppState::default(),
            config,
        }
    }

    /// Feed this frame's events to the session, one at a time.
    fn dispatch(&mut self, ctx: &egui::Context) {
        let events = self.state.take_events();
        if events.is_empty() {
            return;
        }
        for event in events {
            let outcome = self.session.handle(event, &mut self.state);
            log::debug!("Event handled: {outcome:?}");
        }
        ctx.request_repaint();
    }
}

impl eframe::App for RustyTraceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &self.session);
        });

        // ---- Left side panel: column toggles ----
        egui::SidePanel::left("column_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::series_plot(ui, &self.state, &self.config);
        });

        self.dispatch(ctx);
    }
}
