/// Data layer: core types, loading, and querying.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, site catalog, payload bounds
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  selection → success counts / filtered rows
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod query;

/// Column names of the launch table. These are a compatibility contract
/// with the published dataset file.
pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_BOOSTER: &str = "Booster Version Category";
pub const COL_CLASS: &str = "class";
