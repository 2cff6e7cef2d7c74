use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: site dropdown + payload slider ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: records behind the scatter chart ----
        egui::TopBottomPanel::bottom("records_panel")
            .default_height(180.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::records_table(ui, &self.state);
            });

        // ---- Central panel: pie above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let chart_height = (ui.available_height() / 2.0 - 30.0).max(120.0);
            plot::pie_chart(ui, &self.state, chart_height);
            ui.separator();
            plot::scatter_plot(ui, &self.state, chart_height);
        });
    }
}
