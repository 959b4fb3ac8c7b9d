//! SpaceX launch records dashboard.
//!
//! The [`data`] module is the UI-independent core: it loads the launch table
//! once and answers the two dashboard queries. Everything else renders those
//! results with egui.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use data::model::{LaunchDataset, LaunchRecord, Outcome, PayloadRange, SiteFilter};
pub use data::query::{AggregatedCount, GroupKey, QueryEngine};
pub use error::{DataFormatError, LoadError, SelectionError};
