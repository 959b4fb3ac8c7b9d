use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{DataFormatError, LoadError, SelectionError};

/// Textual form of the "all sites" selection.
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Launch outcome. `Failure < Success`, matching the numeric class order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value (0 or 1).
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// Parse the text of a `class` cell. Accepts `0`/`1` and `0.0`/`1.0`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(i) = s.parse::<i64>() {
            return Self::from_class(i);
        }
        s.parse::<f64>().ok().and_then(Self::from_f64)
    }

    /// Numeric class read as a float; only exactly 0.0 and 1.0 are valid.
    pub fn from_f64(class: f64) -> Option<Self> {
        if class == 0.0 {
            Some(Outcome::Failure)
        } else if class == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.class())
    }
}

// ---------------------------------------------------------------------------
// Site – a validated launch-site name
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Site(String);

impl Site {
    /// Validate a site name: non-empty, and never the `ALL` sentinel.
    pub fn new(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() || name == ALL_SITES {
            return None;
        }
        Some(Site(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub site: Site,
    pub payload_mass_kg: f64,
    pub booster_category: String,
    pub outcome: Outcome,
}

impl LaunchRecord {
    /// Build a record from already-parsed cells, enforcing the row contract.
    /// `row` is only used for error reporting.
    pub fn new(
        row: usize,
        site: &str,
        payload_mass_kg: f64,
        booster_category: &str,
        outcome: Outcome,
    ) -> Result<Self, DataFormatError> {
        let site = Site::new(site).ok_or_else(|| DataFormatError::InvalidValue {
            row,
            column: super::COL_SITE,
            value: site.to_string(),
            reason: "is not a valid launch site name",
        })?;
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(DataFormatError::InvalidValue {
                row,
                column: super::COL_PAYLOAD,
                value: payload_mass_kg.to_string(),
                reason: "is not a finite non-negative mass",
            });
        }
        let booster_category = booster_category.trim();
        if booster_category.is_empty() {
            return Err(DataFormatError::InvalidValue {
                row,
                column: super::COL_BOOSTER,
                value: String::new(),
                reason: "is empty",
            });
        }
        Ok(LaunchRecord {
            site,
            payload_mass_kg,
            booster_category: booster_category.to_string(),
            outcome,
        })
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

// ---------------------------------------------------------------------------
// SiteFilter – the dropdown value
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteFilter {
    #[default]
    All,
    Site(String),
}

impl SiteFilter {
    /// Lenient parse: `ALL` is the sentinel, anything else is taken as a site
    /// name without checking the catalog.
    pub fn parse(s: &str) -> Self {
        if s == ALL_SITES {
            SiteFilter::All
        } else {
            SiteFilter::Site(s.to_string())
        }
    }

    pub fn matches(&self, site: &Site) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(name) => site.as_str() == name,
        }
    }

    /// Human label for dropdowns.
    pub fn label(&self) -> &str {
        match self {
            SiteFilter::All => "All Sites",
            SiteFilter::Site(name) => name,
        }
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteFilter::All => f.write_str(ALL_SITES),
            SiteFilter::Site(name) => f.write_str(name),
        }
    }
}

impl Serialize for SiteFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// SiteCatalog
// ---------------------------------------------------------------------------

/// Distinct launch sites present in the dataset, sorted by name.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteCatalog {
    sites: Vec<Site>,
}

impl SiteCatalog {
    pub fn from_records(records: &[LaunchRecord]) -> Self {
        let unique: BTreeSet<&Site> = records.iter().map(|r| &r.site).collect();
        SiteCatalog {
            sites: unique.into_iter().cloned().collect(),
        }
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sites.iter().any(|s| s.as_str() == name)
    }

    /// Dropdown options: the sentinel first, then every site.
    pub fn options(&self) -> Vec<SiteFilter> {
        std::iter::once(SiteFilter::All)
            .chain(self.sites.iter().map(|s| SiteFilter::Site(s.as_str().to_string())))
            .collect()
    }

    /// Strict parse used for user-typed input.
    pub fn resolve(&self, s: &str) -> Result<SiteFilter, SelectionError> {
        match SiteFilter::parse(s) {
            SiteFilter::All => Ok(SiteFilter::All),
            SiteFilter::Site(name) if self.contains(&name) => Ok(SiteFilter::Site(name)),
            SiteFilter::Site(name) => Err(SelectionError::InvalidSelection { site: name }),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload bounds and ranges
// ---------------------------------------------------------------------------

/// Global min / max payload over the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

impl PayloadBounds {
    /// `None` for an empty slice.
    pub fn from_records(records: &[LaunchRecord]) -> Option<Self> {
        let first = records.first()?.payload_mass_kg;
        let (min, max) = records
            .iter()
            .map(|r| r.payload_mass_kg)
            .fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(PayloadBounds { min, max })
    }
}

/// Closed interval `[low, high]`. A range with `low > high` contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    pub fn contains(&self, payload: f64) -> bool {
        self.low <= payload && payload <= self.high
    }

    pub fn is_degenerate(&self) -> bool {
        self.low.partial_cmp(&self.high).map_or(true, |o| o.is_gt())
    }
}

impl From<PayloadBounds> for PayloadRange {
    fn from(b: PayloadBounds) -> Self {
        PayloadRange::new(b.min, b.max)
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable dataset with its derived static facts.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    catalog: SiteCatalog,
    bounds: PayloadBounds,
    booster_categories: BTreeSet<String>,
}

impl LaunchDataset {
    /// Build the catalog, bounds and category index. Fails on an empty table.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, LoadError> {
        let bounds = PayloadBounds::from_records(&records).ok_or(LoadError::EmptyDataset)?;
        let catalog = SiteCatalog::from_records(&records);
        let booster_categories = records
            .iter()
            .map(|r| r.booster_category.clone())
            .collect();
        Ok(LaunchDataset {
            records,
            catalog,
            bounds,
            booster_categories,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn catalog(&self) -> &SiteCatalog {
        &self.catalog
    }

    pub fn bounds(&self) -> PayloadBounds {
        self.bounds
    }

    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
