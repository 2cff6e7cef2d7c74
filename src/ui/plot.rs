use std::f32::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Legend, MarkerShape, Plot, Points};

use crate::config::MarkerConfig;
use crate::state::AppState;

/// Segments per full turn when tessellating pie wedges.
const PIE_SEGMENTS: f32 = 128.0;

// ---------------------------------------------------------------------------
// Pie chart: launch counts
// ---------------------------------------------------------------------------

/// Paint the outcome pie chart with a legend on the right.
pub fn pie_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let Some(pie) = &state.pie else {
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(pie.title.as_str());
    });

    let size = Vec2::new(ui.available_width(), height);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let radius = (rect.height() * 0.45).min(rect.width() * 0.3);
    let center = Pos2::new(rect.left() + rect.width() * 0.4, rect.center().y);

    let total = pie.total();
    if total == 0 {
        painter.circle_stroke(center, radius, Stroke::new(1.0, Color32::GRAY));
        painter.text(
            center,
            Align2::CENTER_CENTER,
            "No launches",
            FontId::proportional(14.0),
            ui.visuals().weak_text_color(),
        );
    }

    let mut start = -TAU / 4.0;
    for slice in &pie.slices {
        if slice.count == 0 {
            continue;
        }
        let fraction = slice.count as f32 / total as f32;
        let sweep = fraction * TAU;
        let color = state.pie_colors.color_for(&slice.label);

        // Fan of thin wedges; each one is convex.
        let steps = ((sweep / TAU) * PIE_SEGMENTS).ceil().max(1.0) as usize;
        for k in 0..steps {
            let a0 = start + sweep * k as f32 / steps as f32;
            let a1 = start + sweep * (k + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![
                    center,
                    center + radius * Vec2::angled(a0),
                    center + radius * Vec2::angled(a1),
                ],
                color,
                Stroke::NONE,
            ));
        }

        let mid = start + sweep / 2.0;
        painter.text(
            center + radius * 0.65 * Vec2::angled(mid),
            Align2::CENTER_CENTER,
            format!("{:.1}%", fraction * 100.0),
            FontId::proportional(13.0),
            Color32::WHITE,
        );
        start += sweep;
    }

    // Legend
    let mut y = rect.top() + 8.0;
    let x = center.x + radius + 24.0;
    for slice in &pie.slices {
        let swatch = egui::Rect::from_min_size(Pos2::new(x, y), Vec2::splat(12.0));
        painter.rect_filled(swatch, 2.0, state.pie_colors.color_for(&slice.label));
        painter.text(
            Pos2::new(x + 18.0, y + 6.0),
            Align2::LEFT_CENTER,
            format!("{}  ({})", slice.label, slice.count),
            FontId::proportional(13.0),
            ui.visuals().text_color(),
        );
        y += 20.0;
    }
}

// ---------------------------------------------------------------------------
// Scatter chart: payload vs. outcome
// ---------------------------------------------------------------------------

/// Marker radius growing linearly with payload mass.
pub fn marker_radius(size: f64, max_size: f64, marker: &MarkerConfig) -> f32 {
    if max_size <= 0.0 {
        return marker.min_radius;
    }
    let t = (size / max_size).clamp(0.0, 1.0) as f32;
    marker.min_radius + t * (marker.max_radius - marker.min_radius)
}

/// Render the payload/outcome scatter plot.
pub fn scatter_plot(ui: &mut Ui, state: &AppState, height: f32) {
    let Some(scatter) = &state.scatter else {
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(scatter.title.as_str());
    });

    let max_size = scatter.max_size();
    let marker = state.config.marker;

    Plot::new("payload_scatter")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(state.config.slider.min)
        .include_x(state.config.slider.max)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // One item per point so each marker keeps its own radius; the
            // legend merges items sharing a booster version name.
            for version in scatter.booster_versions() {
                let color = state.booster_colors.color_for(version);
                for p in scatter.points.iter().filter(|p| p.booster_version == version) {
                    let point = Points::new(vec![[p.x, p.y]])
                        .name(version)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(marker_radius(p.size, max_size, &marker));
                    plot_ui.points(point);
                }
            }
        });
}
