// File: crates/scene-core/src/renderer.rs
// Summary: Scene renderer: sequences transitions (discard, load, draw, caption) and drops stale loads.
// Notes:
// - Loads are split into `LoadTicket` (issued on the event thread) and `SceneLoad`
//   (produced wherever the ticket runs). Only a load whose generation matches the
//   renderer's current generation is drawn.

use crate::chart::{status_frame, RenderOptions};
use crate::deck::{SceneDeck, ScenePlan};
use crate::error::SceneResult;
use crate::primitive::{Frame, FrameStatus};
use crate::record::DataSource;
use crate::scene::{transition, Action, SceneState};
use crate::series::Series;

/// Work order for one scene load. Self-contained so it can move to another thread.
#[derive(Clone, Debug)]
pub struct LoadTicket {
    pub scene: usize,
    pub generation: u64,
    pub plan: ScenePlan,
}

impl LoadTicket {
    /// Fetch the scene's table and compute its series.
    pub fn run<S: DataSource + ?Sized>(self, source: &S) -> SceneLoad {
        let result = source.fetch(&self.plan.source).and_then(|table| self.plan.compute(&table));
        SceneLoad { scene: self.scene, generation: self.generation, result }
    }
}

/// Outcome of a ticket: series on success, typed failure otherwise.
#[derive(Debug)]
pub struct SceneLoad {
    pub scene: usize,
    pub generation: u64,
    pub result: SceneResult<Vec<Series>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Drawn,
    Failed,
    /// Superseded by a later transition; nothing changed.
    Stale,
}

pub struct SceneRenderer {
    deck: SceneDeck,
    opts: RenderOptions,
    state: SceneState,
    generation: u64,
    frame: Option<Frame>,
}

impl SceneRenderer {
    pub fn new(deck: SceneDeck, opts: RenderOptions) -> Self {
        let state = SceneState::new(deck.len());
        Self { deck, opts, state, generation: 0, frame: None }
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn deck(&self) -> &SceneDeck {
        &self.deck
    }

    pub fn options(&self) -> &RenderOptions {
        &self.opts
    }

    /// The currently materialized frame, if any.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Ticket for the current scene without moving (initial draw, reload).
    pub fn reload(&mut self) -> Option<LoadTicket> {
        self.begin()
    }

    /// Ticket for opening the deck at scene `index` (clamped). Always issues a load,
    /// even when `index` clamps onto the current scene.
    pub fn start_at(&mut self, index: usize) -> Option<LoadTicket> {
        self.dispatch(Action::Jump(index)).or_else(|| self.reload())
    }

    /// Apply `action`. Returns a ticket when the scene changed; boundary no-ops return `None`.
    pub fn dispatch(&mut self, action: Action) -> Option<LoadTicket> {
        let next = transition(self.state, action);
        if next == self.state {
            tracing::debug!(scene = self.state.index(), ?action, "navigation no-op");
            return None;
        }
        tracing::info!(from = self.state.index(), to = next.index(), ?action, "scene transition");
        self.state = next;
        self.begin()
    }

    fn begin(&mut self) -> Option<LoadTicket> {
        let index = self.state.index();
        let plan = self.deck.scene(index)?.clone();
        // full redraw: the old geometry is replaced by a loading frame, never patched
        self.generation += 1;
        self.frame = Some(status_frame(self.deck.caption(index), FrameStatus::Loading, &self.opts));
        Some(LoadTicket { scene: index, generation: self.generation, plan })
    }

    /// Accept a finished load. Stale loads are dropped.
    pub fn complete(&mut self, load: SceneLoad) -> Completion {
        if load.generation != self.generation || load.scene != self.state.index() {
            tracing::warn!(
                scene = load.scene,
                generation = load.generation,
                current = self.generation,
                "discarding stale scene load"
            );
            return Completion::Stale;
        }

        let index = self.state.index();
        let caption = self.deck.caption(index);
        match load.result {
            Ok(series) => {
                let Some(plan) = self.deck.scene(index) else { return Completion::Stale };
                let mut frame = plan.chart.build_frame(&series, &self.opts);
                frame.caption = caption.to_string();
                tracing::info!(scene = index, series = series.len(), primitives = frame.primitives.len(), "scene drawn");
                self.frame = Some(frame);
                Completion::Drawn
            }
            Err(err) => {
                tracing::error!(scene = index, error = %err, "scene load failed");
                let msg = format!("Could not load scene {index}: {err}");
                self.frame = Some(status_frame(msg, FrameStatus::Failed, &self.opts));
                Completion::Failed
            }
        }
    }

    /// Synchronous dispatch + load + complete.
    pub fn step<S: DataSource + ?Sized>(&mut self, action: Action, source: &S) -> Option<Completion> {
        let ticket = self.dispatch(action)?;
        Some(self.complete(ticket.run(source)))
    }

    /// Synchronous `start_at`.
    pub fn open<S: DataSource + ?Sized>(&mut self, index: usize, source: &S) -> Option<Completion> {
        let ticket = self.start_at(index)?;
        Some(self.complete(ticket.run(source)))
    }

    /// Synchronous load of the current scene.
    pub fn refresh<S: DataSource + ?Sized>(&mut self, source: &S) -> Option<Completion> {
        let ticket = self.reload()?;
        Some(self.complete(ticket.run(source)))
    }
}
