// File: crates/scene-core/tests/deck.rs
// Purpose: Sample deck parsing, per-scene computation (rates, filters, ordinals) and deck validation.

use std::path::PathBuf;

use scene_core::{
    ChartDescriptor, CsvDirSource, DataSource, Domain, Filter, Grouping, Mark, Measure, Record, Reducer, SceneDeck,
    SceneError, ScenePlan, Series, Table,
};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

#[test]
fn sample_deck_parses() {
    let deck = SceneDeck::from_path(&data_dir().join("deck.json")).expect("deck");
    assert_eq!(deck.len(), 4);

    let s2 = deck.scene(2).unwrap();
    assert!(matches!(&s2.grouping, Grouping::Roles { roles, .. } if roles.len() == 3));
    assert_eq!(s2.chart.x_domain, Domain::fixed(1980.0, 2017.0));
    assert!(s2.chart.y_domain.is_auto());
    assert_eq!(deck.scene(3).unwrap().reducer, Reducer::StdDev);
    assert_eq!(deck.scene(4).unwrap().mark, Mark::Scatter);
    assert!(deck.scene(0).is_none());
    assert!(deck.scene(5).is_none());
    assert!(deck.caption(1).starts_with("Across the league"));
}

#[test]
fn every_sample_scene_computes() {
    let dir = data_dir();
    let deck = SceneDeck::from_path(&dir.join("deck.json")).unwrap();
    let source = CsvDirSource::new(&dir);
    for (i, plan) in deck.scenes.iter().enumerate() {
        let table = source.fetch(&plan.source).unwrap();
        let series = plan.compute(&table).unwrap_or_else(|e| panic!("scene {}: {e}", i + 1));
        assert!(!series.is_empty(), "scene {} produced no series", i + 1);
        for s in &series {
            let ords: Vec<f64> = s.points().iter().map(|p| p.ordinal).collect();
            assert!(ords.windows(2).all(|w| w[0] < w[1]), "scene {} series {} unordered", i + 1, s.label);
            assert!(s.points().iter().all(|p| p.value.is_finite()));
        }
    }
}

#[test]
fn role_scene_yields_one_series_per_role() {
    let dir = data_dir();
    let deck = SceneDeck::from_path(&dir.join("deck.json")).unwrap();
    let table = CsvDirSource::new(&dir).fetch("player_seasons.csv").unwrap();
    let series = deck.scene(2).unwrap().compute(&table).unwrap();
    let mut labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
    labels.sort();
    assert_eq!(labels, vec!["Centers", "Forwards", "Guards"]);
}

#[test]
fn empty_deck_is_rejected() {
    let err = SceneDeck::from_json_str(r#"{ "scenes": [] }"#).unwrap_err();
    assert!(matches!(err, SceneError::Config(_)));
}

#[test]
fn malformed_deck_is_a_json_error() {
    let err = SceneDeck::from_json_str(r#"{ "scenes": [ { "caption": 3 } ] }"#).unwrap_err();
    assert!(matches!(err, SceneError::Json(_)));
}

#[test]
fn missing_data_file_is_an_io_error() {
    let err = CsvDirSource::new(data_dir()).fetch("no_such_file.csv").unwrap_err();
    assert!(matches!(err, SceneError::Io { .. }));
}

fn table(csv: &str) -> Table {
    Table::from_reader("t.csv", csv.as_bytes()).unwrap()
}

fn league_plan(measure: Measure) -> ScenePlan {
    ScenePlan {
        caption: "League".into(),
        source: "t.csv".into(),
        ordinal: "Season".into(),
        measure,
        reducer: Reducer::Mean,
        grouping: Grouping::All { label: "League".into() },
        filters: Vec::new(),
        mark: Mark::Line,
        fallback: 0.0,
        chart: ChartDescriptor::new("League"),
    }
}

fn points(series: &[Series]) -> Vec<(f64, f64)> {
    series[0].points().iter().map(|p| (p.ordinal, p.value)).collect()
}

#[test]
fn seasons_written_as_floats_share_one_bucket() {
    let t = table("Season,v\n2020,1\n2020.0,3\n2021,5\n");
    let series = league_plan(Measure::column("v")).compute(&t).unwrap();
    assert_eq!(points(&series), vec![(2020.0, 2.0), (2021.0, 5.0)]);
}

#[test]
fn per_game_rate_drops_zero_and_non_numeric_divisors() {
    let t = table("Season,3PA,G\n2020,10,5\n2020,8,0\n2020,9,n/a\n2020,6,2\n");
    let series = league_plan(Measure::per("3PA", "G")).compute(&t).unwrap();
    // only 10/5 and 6/2 contribute
    assert_eq!(points(&series), vec![(2020.0, 2.5)]);
}

#[test]
fn filters_are_inclusive_and_drop_non_numeric_values() {
    let filter = Filter { column: "G".into(), min: Some(10.0), max: Some(20.0) };
    let rec = |g: &str| Record::from_pairs([("G", g)]);
    assert!(filter.accepts(&rec("10")));
    assert!(filter.accepts(&rec("20")));
    assert!(filter.accepts(&rec("15")));
    assert!(!filter.accepts(&rec("9.5")));
    assert!(!filter.accepts(&rec("21")));
    assert!(!filter.accepts(&rec("n/a")));
    assert!(!filter.accepts(&rec("")));

    let mut plan = league_plan(Measure::column("v"));
    plan.filters = vec![filter];
    let t = table("Season,G,v\n2020,10,1\n2020,25,100\n2020,x,100\n2020,20,3\n");
    assert_eq!(points(&plan.compute(&t).unwrap()), vec![(2020.0, 2.0)]);
}

#[test]
fn scene_without_any_numeric_measure_is_empty() {
    let t = table("Season,v\n2020,n/a\n2021,\n");
    let err = league_plan(Measure::column("v")).compute(&t).unwrap_err();
    assert!(matches!(err, SceneError::Empty(_)), "{err}");
}

#[test]
fn required_columns_are_listed_once() {
    let mut plan = league_plan(Measure::per("3PA", "G"));
    plan.grouping = Grouping::Column { column: "Pos".into() };
    plan.filters = vec![
        Filter { column: "G".into(), min: Some(10.0), max: None },
        Filter { column: "3PA".into(), min: Some(1.0), max: None },
        Filter { column: "Age".into(), min: None, max: Some(40.0) },
    ];
    assert_eq!(plan.required_columns(), vec!["Season", "3PA", "G", "Pos", "Age"]);
}

#[test]
fn empty_source_and_empty_roles_are_config_errors() {
    let mut deck = SceneDeck { title: String::new(), scenes: vec![league_plan(Measure::column("v"))] };
    assert!(deck.validate().is_ok());

    deck.scenes[0].source = "  ".into();
    assert!(matches!(deck.validate(), Err(SceneError::Config(msg)) if msg.contains("scene 1")));

    deck.scenes[0].source = "t.csv".into();
    deck.scenes[0].grouping = Grouping::Roles { column: "Pos".into(), roles: Vec::new() };
    assert!(matches!(deck.validate(), Err(SceneError::Config(_))));
}
