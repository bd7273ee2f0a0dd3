// File: crates/scene-core/tests/aggregate.rs
// Purpose: Group-by reducers, dropped measures, role bucketing and series pivoting.

use proptest::prelude::*;
use scene_core::{aggregate, bucketize, mean, pivot_series, position_matcher, sample_stddev};
use scene_core::{GroupKey, KeyPart, Mark, Record, Reducer};

fn rec(season: &str, pos: &str, val: &str) -> Record {
    Record::from_pairs([("season", season), ("pos", pos), ("val", val)])
}

fn by_season_pos(r: &Record) -> GroupKey {
    GroupKey::Two(KeyPart::parse(r.get("season").unwrap()), KeyPart::parse(r.get("pos").unwrap()))
}

#[test]
fn mean_by_season_and_position() {
    let records = vec![rec("2020", "PG", "5"), rec("2020", "PG", "7"), rec("2020", "C", "1")];
    let out = aggregate(&records, by_season_pos, |r| r.number("val"), Reducer::Mean);

    assert_eq!(out.len(), 2);
    assert_eq!(out.get(&GroupKey::pair(2020i64, "PG")), Some(6.0));
    assert_eq!(out.get(&GroupKey::pair(2020i64, "C")), Some(1.0));
}

#[test]
fn single_value_bucket() {
    assert_eq!(mean(&[4.5]), Some(4.5));
    assert_eq!(sample_stddev(&[4.5]), Some(0.0));
    assert_eq!(Reducer::StdDev.reduce(&[4.5]), Some(0.0));
    assert_eq!(Reducer::Count.reduce(&[4.5]), Some(1.0));
    assert_eq!(Reducer::Mean.reduce(&[]), None);
}

#[test]
fn stddev_uses_sample_divisor() {
    // mean 5, squared deviations 9 + 1 + 1 + 9 = 20, / (4 - 1)
    let sd = sample_stddev(&[2.0, 4.0, 6.0, 8.0]).unwrap();
    assert!((sd - (20.0f64 / 3.0).sqrt()).abs() < 1e-12);
}

#[test]
fn non_numeric_measures_are_dropped_and_empty_groups_absent() {
    let records = vec![
        rec("2019", "SG", "3"),
        rec("2019", "SG", "n/a"),
        rec("2019", "C", ""),
        rec("2019", "C", "NaN"),
        rec("2019", "PF", "inf"),
    ];
    let out = aggregate(&records, by_season_pos, |r| r.number("val"), Reducer::Count);
    assert_eq!(out.get(&GroupKey::pair(2019i64, "SG")), Some(1.0));
    assert_eq!(out.get(&GroupKey::pair(2019i64, "C")), None);
    assert_eq!(out.get(&GroupKey::pair(2019i64, "PF")), None);
    assert_eq!(out.len(), 1);
}

#[test]
fn bucketize_classifies_multi_role_positions() {
    let matchers = vec![
        position_matcher("G", "pos", &["PG", "SG"]),
        position_matcher("Big", "pos", &["C"]),
    ];
    let r = Record::from_pairs([("pos", "PG-SF")]);
    let records = vec![r];
    let buckets = bucketize(&records, &matchers);

    assert_eq!(buckets.labels().collect::<Vec<_>>(), vec!["G", "Big"]);
    assert_eq!(buckets.get("G").map(|b| b.len()), Some(1));
    assert_eq!(buckets.get("Big").map(|b| b.len()), Some(0));
}

#[test]
fn bucketize_is_not_a_partition() {
    let matchers = vec![
        position_matcher("Guards", "pos", &["PG", "SG"]),
        position_matcher("Wings", "pos", &["SG", "SF"]),
    ];
    let records = vec![
        Record::from_pairs([("pos", "SG")]),
        Record::from_pairs([("pos", "C")]),
        Record::from_pairs([("pos", "sf-pf")]),
    ];
    let buckets = bucketize(&records, &matchers);
    assert_eq!(buckets.get("Guards").unwrap().len(), 1);
    assert_eq!(buckets.get("Wings").unwrap().len(), 2);
}

#[test]
fn pivot_fills_holes_with_fallback() {
    let records = vec![
        rec("2018", "PG", "4"),
        rec("2019", "PG", "6"),
        rec("2019", "C", "1"),
    ];
    let out = aggregate(&records, by_season_pos, |r| r.number("val"), Reducer::Mean);
    let series = pivot_series(&out, Mark::Line, 0.0);

    assert_eq!(series.len(), 2);
    let c = series.iter().find(|s| s.label == "C").unwrap();
    let pts: Vec<(f64, f64)> = c.points().iter().map(|p| (p.ordinal, p.value)).collect();
    assert_eq!(pts, vec![(2018.0, 0.0), (2019.0, 1.0)]);
    let pg = series.iter().find(|s| s.label == "PG").unwrap();
    assert_eq!(pg.points().len(), 2);
}

fn arb_records() -> impl Strategy<Value = Vec<(i64, u8, Option<f64>)>> {
    prop::collection::vec((2000i64..2004, 0u8..3, prop::option::of(-50.0f64..50.0)), 1..60)
}

fn to_records(raw: &[(i64, u8, Option<f64>)]) -> Vec<Record> {
    raw.iter()
        .map(|(season, pos, val)| {
            let pos = ["PG", "SF", "C"][*pos as usize];
            let val = val.map(|v| v.to_string()).unwrap_or_else(|| "x".to_string());
            Record::from_pairs([("season".to_string(), season.to_string()), ("pos".to_string(), pos.to_string()), ("val".to_string(), val)])
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn counts_cover_every_numeric_record(raw in arb_records()) {
        let records = to_records(&raw);
        let out = aggregate(&records, by_season_pos, |r| r.number("val"), Reducer::Count);
        let total: f64 = out.iter().map(|(_, v)| v).sum();
        let numeric = raw.iter().filter(|(_, _, v)| v.is_some()).count();
        prop_assert_eq!(total as usize, numeric);
    }

    #[test]
    fn stddev_ignores_record_order(raw in arb_records(), seed in any::<u64>()) {
        let records = to_records(&raw);
        let mut shuffled = records.clone();
        // deterministic rotation + reversal keyed by the seed
        let k = (seed as usize) % shuffled.len();
        shuffled.rotate_left(k);
        if seed % 2 == 0 { shuffled.reverse(); }

        let a = aggregate(&records, by_season_pos, |r| r.number("val"), Reducer::StdDev);
        let b = aggregate(&shuffled, by_season_pos, |r| r.number("val"), Reducer::StdDev);
        prop_assert_eq!(a.len(), b.len());
        for (k, v) in a.iter() {
            let w = b.get(k).unwrap();
            prop_assert!((v - w).abs() < 1e-9, "{:?}: {} vs {}", k, v, w);
        }
    }
}

#[test]
fn integer_valued_keys_are_canonical() {
    assert_eq!(KeyPart::parse("2020"), KeyPart::Int(2020));
    assert_eq!(KeyPart::parse(" 2020.0 "), KeyPart::Int(2020));
    assert_eq!(KeyPart::from_ordinal(2020.0), KeyPart::Int(2020));
    assert_eq!(KeyPart::parse("PG"), KeyPart::Text("PG".into()));
    assert_eq!(KeyPart::parse("2020.5").as_ordinal(), Some(2020.5));

    let records = vec![rec("2020", "PG", "1"), rec("2020.0", "PG", "3")];
    let out = aggregate(&records, by_season_pos, |r| r.number("val"), Reducer::Mean);
    assert_eq!(out.len(), 1);
    assert_eq!(out.get(&GroupKey::pair(2020i64, "PG")), Some(2.0));
}
