use std::collections::BTreeMap;
use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::generate_palette;
use crate::data::query::{AggregatedCount, GroupKey};
use crate::state::AppState;

// Arc resolution for a full circle.
const PIE_SEGMENTS: f64 = 96.0;

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

/// Render the success-count pie for the current site selection.
pub fn success_pie(ui: &mut Ui, state: &AppState) {
    ui.strong(state.pie_title());

    let slices = pie_slices(&state.summary);
    let palette = generate_palette(slices.len());

    Plot::new("success_pie")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            if slices.is_empty() {
                plot_ui.text(Text::new(PlotPoint::new(0.0, 0.0), RichText::new("No data").weak()));
                return;
            }
            for (slice, color) in slices.iter().zip(palette) {
                let polygon = Polygon::new(PlotPoints::new(slice.outline()))
                    .name(&slice.label)
                    .fill_color(color)
                    .stroke(Stroke::new(1.0, Color32::WHITE));
                plot_ui.polygon(polygon);

                let [x, y] = slice.label_anchor();
                plot_ui.text(Text::new(
                    PlotPoint::new(x, y),
                    RichText::new(format!("{:.1}%", slice.fraction * 100.0)).strong(),
                ));
            }
        });
}

/// One wedge of the pie, as fractions of a full turn.
#[derive(Debug, Clone, PartialEq)]
struct PieSlice {
    label: String,
    start: f64,
    fraction: f64,
}

impl PieSlice {
    fn outline(&self) -> Vec<[f64; 2]> {
        let steps = ((self.fraction * PIE_SEGMENTS).ceil() as usize).max(2);
        let mut points = vec![[0.0, 0.0]];
        points.extend((0..=steps).map(|i| {
            let turn = self.start + self.fraction * i as f64 / steps as f64;
            polar(1.0, turn)
        }));
        points
    }

    fn label_anchor(&self) -> [f64; 2] {
        polar(0.65, self.start + self.fraction / 2.0)
    }
}

/// Point at `radius` and `turn` (fraction of a circle, clockwise from 12 o'clock).
fn polar(radius: f64, turn: f64) -> [f64; 2] {
    let angle = TAU * turn;
    [radius * angle.sin(), radius * angle.cos()]
}

fn slice_label(key: &GroupKey) -> String {
    match key {
        GroupKey::Site(site) => site.clone(),
        GroupKey::Outcome(o) => format!("{o} ({})", o.label()),
    }
}

fn pie_slices(summary: &[AggregatedCount]) -> Vec<PieSlice> {
    let total: usize = summary.iter().map(|c| c.count).sum();
    if total == 0 {
        return Vec::new();
    }
    let mut start = 0.0;
    summary
        .iter()
        .map(|c| {
            let fraction = c.count as f64 / total as f64;
            let slice = PieSlice {
                label: slice_label(&c.key),
                start,
                fraction,
            };
            start += fraction;
            slice
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Payload / outcome scatter chart
// ---------------------------------------------------------------------------

/// Render payload mass against class, one series per booster category.
pub fn payload_scatter(ui: &mut Ui, state: &AppState) {
    ui.strong(state.scatter_title());

    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for rec in &state.rows {
        series
            .entry(rec.booster_category.as_str())
            .or_default()
            .push([rec.payload_mass_kg, f64::from(rec.outcome.class())]);
    }

    let bounds = state.engine.bounds();

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(bounds.min)
        .include_x(bounds.max)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if series.is_empty() {
                let mid = (bounds.min + bounds.max) / 2.0;
                plot_ui.text(Text::new(PlotPoint::new(mid, 0.5), RichText::new("No data").weak()));
                return;
            }
            for (category, points) in series {
                let color = state.color_map.color_for(category);
                plot_ui.points(
                    Points::new(PlotPoints::new(points))
                        .name(category)
                        .color(color)
                        .radius(4.0),
                );
            }
        });
}
