//! egui rendering: selection panels, charts and the row table.

pub mod panels;
pub mod plot;
