// File: crates/scene-core/tests/scene_state.rs
// Purpose: Pure transition function: bounds, no wraparound, jumps and navigation scripts.

use scene_core::scene::parse_script;
use scene_core::{transition, Action, SceneError, SceneState};

#[test]
fn starts_at_one() {
    let s = SceneState::new(5);
    assert_eq!(s.index(), 1);
    assert!(s.is_first());
    assert_eq!(s.count(), 5);
}

#[test]
fn boundaries_are_idempotent() {
    let first = SceneState::new(4);
    assert_eq!(transition(first, Action::Prev), first);

    let last = SceneState::at(4, 4);
    assert!(last.is_last());
    assert_eq!(transition(last, Action::Next), last);
    assert_eq!(transition(transition(last, Action::Next), Action::Next), last);
}

#[test]
fn walk_forward_and_back() {
    let mut s = SceneState::new(3);
    s = transition(s, Action::Next);
    s = transition(s, Action::Next);
    assert_eq!(s.index(), 3);
    s = transition(s, Action::Next);
    assert_eq!(s.index(), 3);
    s = transition(s, Action::Prev);
    assert_eq!(s.index(), 2);
}

#[test]
fn jump_is_clamped() {
    let s = SceneState::new(7);
    assert_eq!(transition(s, Action::Jump(5)).index(), 5);
    assert_eq!(transition(s, Action::Jump(0)).index(), 1);
    assert_eq!(transition(s, Action::Jump(99)).index(), 7);
}

#[test]
fn single_scene_deck_never_moves() {
    let s = SceneState::new(1);
    assert_eq!(transition(s, Action::Next), s);
    assert_eq!(transition(s, Action::Prev), s);
    assert_eq!(SceneState::new(0).count(), 1);
}

#[test]
fn scripts() {
    assert_eq!(parse_script("nnp").unwrap(), vec![Action::Next, Action::Next, Action::Prev]);
    assert_eq!(parse_script("next, prev 3").unwrap(), vec![Action::Next, Action::Prev, Action::Jump(3)]);
    let err = parse_script("nx").unwrap_err();
    assert!(matches!(&err, SceneError::Config(msg) if msg.contains("'x'")), "{err}");
    assert!(parse_script("").unwrap().is_empty());
}
