use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::PayloadRange;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Launch Site");
    ui.separator();

    let options = state.engine.catalog().options();
    let mut chosen = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(state.site.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in &options {
                if ui.selectable_label(state.site == *opt, opt.label()).clicked() {
                    chosen = Some(opt.clone());
                }
            }
        });
    if let Some(site) = chosen {
        state.set_site(site);
    }

    ui.add_space(12.0);
    ui.strong("Payload range (Kg):");

    let slider = state.slider;
    let mut low = state.range.low;
    let mut high = state.range.high;
    let mut changed = false;
    for (value, label) in [(&mut low, "Low"), (&mut high, "High")] {
        changed |= ui
            .add(
                egui::Slider::new(value, slider.min..=slider.max)
                    .step_by(slider.step)
                    .clamping(egui::SliderClamping::Edits)
                    .text(label),
            )
            .changed();
    }

    ui.horizontal(|ui: &mut Ui| {
        for mark in slider.marks() {
            ui.small(format!("{mark:.0}"));
        }
    });

    if ui.button("Reset range").clicked() {
        state.reset_range();
    } else if changed {
        state.set_range(PayloadRange::new(low, high));
    }

    if state.range.is_degenerate() {
        ui.label(RichText::new("Low is above High: no launch can match.").weak());
    }

    ui.add_space(12.0);
    ui.strong("Booster Version Category");
    for (category, color) in state.color_map.legend_entries() {
        ui.label(RichText::new(format!("● {category}")).color(color));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title and dataset counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("SpaceX Launch Records Dashboard").size(28.0));
    });
    ui.horizontal(|ui: &mut Ui| {
        let bounds = state.engine.bounds();
        ui.label(format!(
            "{} launches loaded, {} in selection",
            state.engine.dataset().len(),
            state.rows.len()
        ));
        ui.separator();
        ui.label(format!("Payload {:.0}–{:.0} kg", bounds.min, bounds.max));
    });
}

// ---------------------------------------------------------------------------
// Filtered row table
// ---------------------------------------------------------------------------

pub fn rows_table(ui: &mut Ui, state: &AppState) {
    if state.rows.is_empty() {
        ui.label("No launches match the current selection.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Launch Site", "Payload Mass (kg)", "Booster", "class"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, state.rows.len(), |mut row| {
                let rec = &state.rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(rec.site.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", rec.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(
                        RichText::new(&rec.booster_category)
                            .color(state.color_map.color_for(&rec.booster_category)),
                    );
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{} ({})", rec.outcome, rec.outcome.label()));
                });
            });
        });
}
