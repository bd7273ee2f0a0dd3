// File: crates/scene-core/tests/renderer.rs
// Purpose: Scene sequencing: captions, full redraw, stale load rejection and visible failures.

use scene_core::{
    Action, ChartDescriptor, Completion, FrameStatus, Grouping, Measure, MemorySource, Reducer, RenderOptions,
    SceneDeck, SceneError, ScenePlan, SceneRenderer, Table,
};

fn plan(caption: &str, source: &str, measure: &str) -> ScenePlan {
    ScenePlan {
        caption: caption.to_string(),
        source: source.to_string(),
        ordinal: "Season".to_string(),
        measure: Measure::column(measure),
        reducer: Reducer::Mean,
        grouping: Grouping::Column { column: "Pos".to_string() },
        filters: Vec::new(),
        mark: Default::default(),
        fallback: 0.0,
        chart: ChartDescriptor::new(caption),
    }
}

fn deck() -> SceneDeck {
    SceneDeck {
        title: "test".into(),
        scenes: vec![
            plan("Scene one", "stats.csv", "3PA"),
            plan("Scene two", "missing.csv", "3PA"),
            plan("Scene three", "stats.csv", "FTA"),
            plan("Scene four", "stats.csv", "3PA"),
        ],
    }
}

fn source() -> MemorySource {
    let csv = "Season,Pos,3PA\n2019,PG,5\n2019,PG,7\n2019,C,1\n2020,PG,8\n2020,C,n/a\n";
    MemorySource::new().with_table(Table::from_reader("stats.csv", csv.as_bytes()).unwrap())
}

#[test]
fn initial_load_draws_scene_one_with_caption() {
    let src = source();
    let mut r = SceneRenderer::new(deck(), RenderOptions::default());
    assert!(r.frame().is_none());

    assert_eq!(r.refresh(&src), Some(Completion::Drawn));
    let frame = r.frame().unwrap();
    assert_eq!(frame.status, FrameStatus::Ready);
    assert_eq!(frame.caption, "Scene one");
    assert_eq!(frame.count_paths(), 2); // PG and C
}

#[test]
fn prev_at_first_scene_is_a_no_op() {
    let src = source();
    let mut r = SceneRenderer::new(deck(), RenderOptions::default());
    r.refresh(&src);
    let generation = r.generation();
    assert_eq!(r.step(Action::Prev, &src), None);
    assert_eq!(r.generation(), generation);
    assert_eq!(r.frame().unwrap().status, FrameStatus::Ready);
}

#[test]
fn failed_fetch_shows_an_error_and_navigation_continues() {
    let src = source();
    let mut r = SceneRenderer::new(deck(), RenderOptions::default());
    r.refresh(&src);

    assert_eq!(r.step(Action::Next, &src), Some(Completion::Failed));
    let frame = r.frame().unwrap();
    assert_eq!(frame.status, FrameStatus::Failed);
    assert!(frame.caption.contains("Could not load scene 2"), "{}", frame.caption);
    assert!(frame.primitives.is_empty());

    assert_eq!(r.step(Action::Prev, &src), Some(Completion::Drawn));
    assert_eq!(r.frame().unwrap().caption, "Scene one");
}

#[test]
fn missing_measure_column_fails_loudly() {
    let src = source();
    let mut r = SceneRenderer::new(deck(), RenderOptions::default());
    let ticket = r.dispatch(Action::Jump(3)).unwrap();
    let load = ticket.run(&src);
    assert!(matches!(&load.result, Err(SceneError::MissingColumn { column, .. }) if column == "FTA"));
    assert_eq!(r.complete(load), Completion::Failed);
    assert!(r.frame().unwrap().caption.contains("FTA"));
}

#[test]
fn stale_loads_never_replace_the_current_frame() {
    let src = source();
    let mut r = SceneRenderer::new(deck(), RenderOptions::default());

    // user clicks next twice before the first load resolves
    let t1 = r.dispatch(Action::Jump(4)).unwrap();
    let t2 = r.dispatch(Action::Prev).unwrap();
    let t3 = r.dispatch(Action::Next).unwrap();
    assert!(t1.generation < t2.generation && t2.generation < t3.generation);

    let loading = r.frame().unwrap().clone();
    assert_eq!(loading.status, FrameStatus::Loading);
    assert_eq!(loading.caption, "Scene four");

    // t1 targets scene 4 too, but was issued under an older generation
    assert_eq!(r.complete(t1.run(&src)), Completion::Stale);
    assert_eq!(r.complete(t2.run(&src)), Completion::Stale);
    assert_eq!(r.frame(), Some(&loading));

    assert_eq!(r.complete(t3.run(&src)), Completion::Drawn);
    assert_eq!(r.frame().unwrap().caption, "Scene four");
    assert_eq!(r.frame().unwrap().status, FrameStatus::Ready);
}

#[test]
fn every_transition_is_a_full_redraw() {
    let src = source();
    let mut r = SceneRenderer::new(deck(), RenderOptions::default());
    r.refresh(&src);
    let before = r.frame().unwrap().primitives.len();
    assert!(before > 0);

    let _ticket = r.dispatch(Action::Jump(4)).unwrap();
    // nothing from scene one survives while scene four loads
    assert!(r.frame().unwrap().primitives.is_empty());
}

#[test]
fn opening_past_the_end_of_a_one_scene_deck_still_draws() {
    let src = source();
    let deck = SceneDeck { title: "solo".into(), scenes: vec![plan("Only scene", "stats.csv", "3PA")] };
    let mut r = SceneRenderer::new(deck, RenderOptions::default());

    assert_eq!(r.open(2, &src), Some(Completion::Drawn));
    assert_eq!(r.state().index(), 1);
    assert_eq!(r.frame().unwrap().caption, "Only scene");
}

#[test]
fn opening_at_a_later_scene_jumps_there() {
    let src = source();
    let mut r = SceneRenderer::new(deck(), RenderOptions::default());
    assert_eq!(r.open(4, &src), Some(Completion::Drawn));
    assert_eq!(r.state().index(), 4);
    assert_eq!(r.frame().unwrap().caption, "Scene four");
}
