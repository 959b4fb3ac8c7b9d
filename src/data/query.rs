use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::model::{
    LaunchDataset, LaunchRecord, Outcome, PayloadBounds, PayloadRange, SiteCatalog, SiteFilter,
};

// ---------------------------------------------------------------------------
// Aggregation result types
// ---------------------------------------------------------------------------

/// What a success-summary slice is grouped by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    Site(String),
    Outcome(Outcome),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Site(s) => f.write_str(s),
            GroupKey::Outcome(o) => write!(f, "{o}"),
        }
    }
}

/// Sites serialise as their name, outcomes as the 0/1 class.
impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GroupKey::Site(s) => serializer.serialize_str(s),
            GroupKey::Outcome(o) => o.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedCount {
    pub key: GroupKey,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Pure query operations
// ---------------------------------------------------------------------------

/// Success counts for the pie chart.
///
/// * `All` → successful launches grouped by site, sorted by site name.
/// * `Site(s)` → launches of `s` grouped by outcome, failures first.
///
/// Only groups with at least one record are emitted, so a selection that
/// matches nothing (including a site name outside the catalog) yields an
/// empty vector.
pub fn success_summary(records: &[LaunchRecord], site: &SiteFilter) -> Vec<AggregatedCount> {
    let mut groups: BTreeMap<GroupKey, usize> = BTreeMap::new();
    match site {
        SiteFilter::All => {
            for r in records.iter().filter(|r| r.is_success()) {
                *groups
                    .entry(GroupKey::Site(r.site.as_str().to_string()))
                    .or_default() += 1;
            }
        }
        SiteFilter::Site(_) => {
            for r in records.iter().filter(|r| site.matches(&r.site)) {
                *groups.entry(GroupKey::Outcome(r.outcome)).or_default() += 1;
            }
        }
    }
    groups
        .into_iter()
        .map(|(key, count)| AggregatedCount { key, count })
        .collect()
}

/// Records for the scatter chart: payload within `range` (inclusive) and
/// site matching `site`, in original order.
pub fn filtered_rows<'a>(
    records: &'a [LaunchRecord],
    site: &SiteFilter,
    range: PayloadRange,
) -> Vec<&'a LaunchRecord> {
    records
        .iter()
        .filter(|r| range.contains(r.payload_mass_kg) && site.matches(&r.site))
        .collect()
}

// ---------------------------------------------------------------------------
// QueryEngine – shared read-only context
// ---------------------------------------------------------------------------

/// Owns a handle to the immutable dataset. Cloning shares the same data.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    dataset: Arc<LaunchDataset>,
}

impl QueryEngine {
    pub fn new(dataset: LaunchDataset) -> Self {
        Self::from_shared(Arc::new(dataset))
    }

    pub fn from_shared(dataset: Arc<LaunchDataset>) -> Self {
        QueryEngine { dataset }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn catalog(&self) -> &SiteCatalog {
        self.dataset.catalog()
    }

    pub fn bounds(&self) -> PayloadBounds {
        self.dataset.bounds()
    }

    /// Range covering every record.
    pub fn full_range(&self) -> PayloadRange {
        self.bounds().into()
    }

    pub fn success_summary(&self, site: &SiteFilter) -> Vec<AggregatedCount> {
        let summary = success_summary(self.dataset.records(), site);
        log::debug!("success_summary({site}) -> {} groups", summary.len());
        summary
    }

    pub fn filtered_rows(&self, site: &SiteFilter, range: PayloadRange) -> Vec<&LaunchRecord> {
        let rows = filtered_rows(self.dataset.records(), site, range);
        log::debug!(
            "filtered_rows({site}, {}..={}) -> {} rows",
            range.low,
            range.high,
            rows.len()
        );
        rows
    }
}
