use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::{PayloadRange, SiteSelector};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – dropdown and payload slider
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(
            RichText::new(state.config.title.as_str()).color(Color32::from_rgb(0x50, 0x3D, 0x36)),
        );
    });
    ui.separator();

    site_dropdown(ui, state);
    ui.add_space(12.0);
    payload_slider(ui, state);
}

fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Launch Site");

    let options = state.site_options();
    let all_value = state.config.all_sites_value.clone();
    let current = match &state.site {
        SiteSelector::All => all_value.clone(),
        SiteSelector::Site(s) => s.clone(),
    };
    let current_label = options
        .iter()
        .find(|(value, _)| *value == current)
        .map(|(_, label)| label.clone())
        .unwrap_or_else(|| current.clone());

    let mut picked = current.clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current_label)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for (value, label) in &options {
                ui.selectable_value(&mut picked, value.clone(), label.as_str());
            }
        });

    if picked != current {
        state.set_site(SiteSelector::from_value(&picked, &all_value));
    }
}

fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Payload range (Kg):");

    let slider = state.config.slider;
    let PayloadRange { mut low, mut high } = state.payload_range;

    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, slider.min..=slider.max)
                .step_by(slider.step)
                .suffix(" kg")
                .text("from"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, slider.min..=slider.max)
                .step_by(slider.step)
                .suffix(" kg")
                .text("to"),
        )
        .changed();

    if low_changed || high_changed {
        // Keep the two handles from crossing.
        if low_changed && low > high {
            high = low;
        } else if high_changed && high < low {
            low = high;
        }
        state.set_payload_range(PayloadRange::new(low, high));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} launches loaded, {} in payload range",
                ds.len(),
                state.visible_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
