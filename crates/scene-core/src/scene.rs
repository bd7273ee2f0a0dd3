// File: crates/scene-core/src/scene.rs
// Summary: Scene index state machine: explicit state value plus a pure transition function.

use crate::error::{SceneError, SceneResult};

/// Navigation input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Next,
    Prev,
    /// Direct set, clamped into `[1, count]`.
    Jump(usize),
}

/// Current scene (1-based) out of `count` scenes.
/// Contract: `1 <= index <= count` and `count >= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneState {
    index: usize,
    count: usize,
}

impl SceneState {
    /// Start at scene 1. A zero count is treated as a single scene.
    pub fn new(count: usize) -> Self {
        Self { index: 1, count: count.max(1) }
    }

    pub fn at(index: usize, count: usize) -> Self {
        let count = count.max(1);
        Self { index: index.clamp(1, count), count }
    }

    pub const fn index(&self) -> usize { self.index }
    pub const fn count(&self) -> usize { self.count }
    pub const fn is_first(&self) -> bool { self.index == 1 }
    pub const fn is_last(&self) -> bool { self.index == self.count }
}

/// No wraparound; moves past either end are no-ops.
pub fn transition(state: SceneState, action: Action) -> SceneState {
    let index = match action {
        Action::Next if state.index < state.count => state.index + 1,
        Action::Prev if state.index > 1 => state.index - 1,
        Action::Next | Action::Prev => state.index,
        Action::Jump(k) => k.clamp(1, state.count),
    };
    SceneState { index, count: state.count }
}

/// Parse a navigation script such as `"nnp"` or `"next,prev"`.
/// Letters: `n` next, `p` prev; digits jump. Unknown tokens are rejected.
pub fn parse_script(script: &str) -> SceneResult<Vec<Action>> {
    let mut out = Vec::new();
    for token in script.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()) {
        match token.to_ascii_lowercase().as_str() {
            "next" => out.push(Action::Next),
            "prev" => out.push(Action::Prev),
            t if t.chars().all(|c| c.is_ascii_digit()) => {
                let k = t.parse::<usize>().map_err(|e| SceneError::config(format!("bad jump '{t}': {e}")))?;
                out.push(Action::Jump(k));
            }
            t => {
                for c in t.chars() {
                    match c {
                        'n' => out.push(Action::Next),
                        'p' => out.push(Action::Prev),
                        other => return Err(SceneError::config(format!("unknown navigation step '{other}'"))),
                    }
                }
            }
        }
    }
    Ok(out)
}
