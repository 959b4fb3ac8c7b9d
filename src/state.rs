use crate::color::ColorMap;
use crate::config::SliderConfig;
use crate::data::model::{LaunchRecord, PayloadRange, SiteFilter};
use crate::data::query::{AggregatedCount, QueryEngine};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub engine: QueryEngine,

    /// Current dropdown value.
    pub site: SiteFilter,

    /// Current slider values.
    pub range: PayloadRange,

    /// Slider scale.
    pub slider: SliderConfig,

    /// Pie chart data for the current selection.
    pub summary: Vec<AggregatedCount>,

    /// Scatter chart / table rows for the current selection.
    pub rows: Vec<LaunchRecord>,

    /// Booster category colours.
    pub color_map: ColorMap,
}

impl AppState {
    /// Start with the given selection and evaluate it once.
    pub fn new(
        engine: QueryEngine,
        site: SiteFilter,
        range: PayloadRange,
        slider: SliderConfig,
    ) -> Self {
        let color_map = ColorMap::new(engine.dataset().booster_categories());
        let mut state = Self {
            engine,
            site,
            range,
            slider,
            summary: Vec::new(),
            rows: Vec::new(),
            color_map,
        };
        state.refresh();
        state
    }

    /// Re-evaluate both queries for the current selection.
    pub fn refresh(&mut self) {
        self.summary = self.engine.success_summary(&self.site);
        self.rows = self
            .engine
            .filtered_rows(&self.site, self.range)
            .into_iter()
            .cloned()
            .collect();
    }

    pub fn set_site(&mut self, site: SiteFilter) {
        if site != self.site {
            self.site = site;
            self.refresh();
        }
    }

    pub fn set_range(&mut self, range: PayloadRange) {
        if range != self.range {
            self.range = range;
            self.refresh();
        }
    }

    /// Restore the slider to the dataset's payload bounds.
    pub fn reset_range(&mut self) {
        self.set_range(self.engine.full_range());
    }

    pub fn pie_title(&self) -> String {
        match &self.site {
            SiteFilter::All => "Total Success Launches by Site".to_string(),
            SiteFilter::Site(name) => format!("Total Success Launches for site {name}"),
        }
    }

    pub fn scatter_title(&self) -> String {
        match &self.site {
            SiteFilter::All => "Correlation between Payload and Success for all Sites".to_string(),
            SiteFilter::Site(name) => {
                format!("Correlation between Payload and Success for site {name}")
            }
        }
    }
}
