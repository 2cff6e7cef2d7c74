use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Outcome;
use crate::state::AppState;

/// Rows behind the scatter chart, in dataset order.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let (Some(ds), Some(scatter)) = (&state.dataset, &state.scatter) else {
        return;
    };
    let records = ds.records();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Launch Site", "Payload Mass (kg)", "Booster Version", "Outcome"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, scatter.points.len(), |mut row| {
                let rec = &records[scatter.points[row.index()].record_index];
                row.col(|ui: &mut Ui| {
                    ui.label(rec.site.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", rec.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.booster_version.as_str());
                });
                row.col(|ui: &mut Ui| {
                    let color = match rec.outcome {
                        Outcome::Success => Color32::from_rgb(0x2E, 0x9E, 0x4F),
                        Outcome::Failure => Color32::from_rgb(0xC8, 0x3A, 0x3A),
                    };
                    ui.label(RichText::new(rec.outcome.label()).color(color));
                });
            });
        });
}
