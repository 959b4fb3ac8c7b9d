use launch_dash::data::model::{LaunchDataset, LaunchRecord, Outcome, PayloadRange, SiteFilter};
use launch_dash::data::query::{filtered_rows, success_summary, QueryEngine};
use proptest::prelude::*;

const SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];

fn arb_record() -> impl Strategy<Value = LaunchRecord> {
    (
        prop::sample::select(SITES.to_vec()),
        0.0..10_000.0f64,
        prop::sample::select(vec!["v1.0", "v1.1", "FT", "B4", "B5"]),
        any::<bool>(),
    )
        .prop_map(|(site, payload, booster, ok)| {
            let outcome = if ok { Outcome::Success } else { Outcome::Failure };
            LaunchRecord::new(0, site, payload, booster, outcome).unwrap()
        })
}

fn arb_records() -> impl Strategy<Value = Vec<LaunchRecord>> {
    prop::collection::vec(arb_record(), 1..60)
}

fn arb_filter() -> impl Strategy<Value = SiteFilter> {
    prop_oneof![
        Just(SiteFilter::All),
        prop::sample::select(SITES.to_vec()).prop_map(|s| SiteFilter::Site(s.to_string())),
        Just(SiteFilter::Site("Boca Chica".to_string())),
    ]
}

/// `sub` appears in `full` in the same relative order, by identity.
fn is_subsequence(sub: &[&LaunchRecord], full: &[LaunchRecord]) -> bool {
    let mut it = full.iter();
    sub.iter().all(|s| it.any(|f| std::ptr::eq(*s, f)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_rows_are_an_ordered_subsequence(
        records in arb_records(),
        site in arb_filter(),
        low in 0.0..10_000.0f64,
        high in 0.0..10_000.0f64,
    ) {
        let rows = filtered_rows(&records, &site, PayloadRange::new(low, high));
        prop_assert!(is_subsequence(&rows, &records));
        for r in &rows {
            prop_assert!(low <= r.payload_mass_kg && r.payload_mass_kg <= high);
            prop_assert!(site.matches(&r.site));
        }
    }

    #[test]
    fn prop_queries_are_idempotent(
        records in arb_records(),
        site in arb_filter(),
        low in 0.0..10_000.0f64,
        high in 0.0..10_000.0f64,
    ) {
        let range = PayloadRange::new(low, high);
        prop_assert_eq!(filtered_rows(&records, &site, range), filtered_rows(&records, &site, range));
        prop_assert_eq!(success_summary(&records, &site), success_summary(&records, &site));
    }

    #[test]
    fn prop_all_sites_summary_conserves_successes(records in arb_records()) {
        let total: usize = success_summary(&records, &SiteFilter::All).iter().map(|c| c.count).sum();
        prop_assert_eq!(total, records.iter().filter(|r| r.is_success()).count());
    }

    #[test]
    fn prop_site_summary_conserves_site_launches(
        records in arb_records(),
        site in prop::sample::select(SITES.to_vec()),
    ) {
        let filter = SiteFilter::Site(site.to_string());
        let total: usize = success_summary(&records, &filter).iter().map(|c| c.count).sum();
        prop_assert_eq!(total, records.iter().filter(|r| r.site.as_str() == site).count());
    }

    #[test]
    fn prop_degenerate_range_is_empty(
        records in arb_records(),
        site in arb_filter(),
        low in 0.0..10_000.0f64,
        gap in 0.001..5_000.0f64,
    ) {
        let range = PayloadRange::new(low + gap, low);
        prop_assert!(filtered_rows(&records, &site, range).is_empty());
    }

    #[test]
    fn prop_full_bounds_return_everything(records in arb_records()) {
        let n = records.len();
        let engine = QueryEngine::new(LaunchDataset::from_records(records).unwrap());
        prop_assert_eq!(engine.filtered_rows(&SiteFilter::All, engine.full_range()).len(), n);
    }
}

#[test]
fn worked_example() {
    let records = vec![
        LaunchRecord::new(0, "A", 500.0, "FT", Outcome::Success).unwrap(),
        LaunchRecord::new(1, "A", 3000.0, "FT", Outcome::Failure).unwrap(),
        LaunchRecord::new(2, "B", 1500.0, "FT", Outcome::Success).unwrap(),
    ];

    let all: Vec<(String, usize)> = success_summary(&records, &SiteFilter::All)
        .into_iter()
        .map(|c| (c.key.to_string(), c.count))
        .collect();
    assert_eq!(all, vec![("A".to_string(), 1), ("B".to_string(), 1)]);

    let mut site_a: Vec<(String, usize)> = success_summary(&records, &SiteFilter::Site("A".into()))
        .into_iter()
        .map(|c| (c.key.to_string(), c.count))
        .collect();
    site_a.sort();
    assert_eq!(site_a, vec![("0".to_string(), 1), ("1".to_string(), 1)]);

    let rows = filtered_rows(&records, &SiteFilter::All, PayloadRange::new(0.0, 2000.0));
    assert_eq!(rows, vec![&records[0], &records[2]]);

    let rows = filtered_rows(&records, &SiteFilter::Site("A".into()), PayloadRange::new(0.0, 1000.0));
    assert_eq!(rows, vec![&records[0]]);
}
