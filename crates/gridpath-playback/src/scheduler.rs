//! Step-by-step replay of a [`SearchResult`] onto a live grid.
//!
//! A [`Scheduler`] hands out at most one [`Playback`] at a time. The
//! playback is a cooperative task: each call to [`Playback::step`] applies
//! exactly one node of the visit trace (then of the path) to the grid and
//! reports how long the host should wait before the next call. Mutations
//! are never reordered or batched, even with zero delays.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use gridpath_core::{Classification, Coord, Grid, Node};
use gridpath_search::SearchResult;

use crate::context::Context;
use crate::error::PlaybackError;
use crate::timing::Timing;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Where the scheduler is in its cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaybackState {
    #[default]
    Idle,
    ReplayingVisits,
    ReplayingPath,
}

impl PlaybackState {
    /// Whether a playback owns the grid.
    #[inline]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Scheduler state shared with the in-flight playback and its handles.
#[derive(Debug, Default)]
struct Slot {
    state: PlaybackState,
    /// Id of the most recent run; stale handles compare against it.
    run: u64,
}

type Shared = Arc<Mutex<Slot>>;

fn lock(shared: &Shared) -> MutexGuard<'_, Slot> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Move run `run` to `state`, unless a newer run has started since.
fn transition(shared: &Shared, run: u64, state: PlaybackState) {
    let mut slot = lock(shared);
    if slot.run == run {
        slot.state = state;
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Figures published when a playback completes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Number of nodes the algorithm finalized.
    pub visited_count: usize,
    /// Number of nodes on the path, both ends included. Zero when no path.
    pub path_length: usize,
    /// Time spent in the search itself, playback excluded.
    pub elapsed: Duration,
}

impl Stats {
    fn of(result: &SearchResult, elapsed: Duration) -> Self {
        Self {
            visited_count: result.visit_order.len(),
            path_length: result.path.len(),
            elapsed,
        }
    }
}

// ---------------------------------------------------------------------------
// CancelHandle
// ---------------------------------------------------------------------------

/// Stops a playback from anywhere. Cloneable and idempotent.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    ctx: Context,
    shared: Shared,
    run: u64,
}

impl CancelHandle {
    /// Stop the playback. The scheduler is Idle again when this returns,
    /// and the playback applies no further mutation, even when it is being
    /// stepped on another thread. A step already in progress finishes first.
    pub fn cancel(&self) {
        if !self.ctx.is_done() {
            log::debug!("playback run {} cancelled", self.run);
        }
        self.ctx.cancel();
        transition(&self.shared, self.run, PlaybackState::Idle);
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.ctx.is_done()
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Guards that only one playback runs at a time.
#[derive(Debug, Default)]
pub struct Scheduler {
    shared: Shared,
    current: Option<CancelHandle>,
}

impl Scheduler {
    /// Create an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        lock(&self.shared).state
    }

    /// Whether a playback is in progress.
    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    /// Start replaying `result`.
    ///
    /// `elapsed` is the measured search time reported in the final
    /// [`Stats`]. Fails with [`PlaybackError::ReentrancyViolation`] while
    /// another playback is active; that playback is not affected.
    pub fn begin(
        &mut self,
        result: SearchResult,
        elapsed: Duration,
        timing: Timing,
    ) -> Result<Playback, PlaybackError> {
        let run = {
            let mut slot = lock(&self.shared);
            if slot.state.is_active() {
                log::debug!("rejected playback: run {} still active", slot.run);
                return Err(PlaybackError::ReentrancyViolation);
            }
            slot.run += 1;
            slot.state = PlaybackState::ReplayingVisits;
            slot.run
        };

        let handle = CancelHandle {
            ctx: Context::new(),
            shared: Arc::clone(&self.shared),
            run,
        };
        self.current = Some(handle.clone());
        log::debug!(
            "playback run {run}: {} visits, {} path nodes, {timing:?}",
            result.visit_order.len(),
            result.path.len()
        );

        Ok(Playback {
            stats: Stats::of(&result, elapsed),
            result,
            timing,
            handle,
            phase: Phase::Visits,
            cursor: 0,
        })
    }

    /// Cancel the active playback, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.cancel();
        }
    }
}

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Visits,
    Path,
    Finished,
    Cancelled,
}

/// Result of one [`Playback::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// One trace node was processed.
    Applied {
        at: Coord,
        classification: Classification,
        /// `false` when the live node is Start or End and was left alone.
        mutated: bool,
        /// How long to wait before the next step.
        delay: Duration,
    },
    /// Both phases are done.
    Finished(Stats),
    /// The playback was cancelled; nothing more will be applied.
    Cancelled,
}

/// How a blocking [`Playback::run`] ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Completed(Stats),
    Cancelled,
}

/// An in-flight replay. Returned by [`Scheduler::begin`].
///
/// Dropping an unfinished playback returns the scheduler to Idle.
#[derive(Debug)]
pub struct Playback {
    result: SearchResult,
    stats: Stats,
    timing: Timing,
    handle: CancelHandle,
    phase: Phase,
    cursor: usize,
}

impl Playback {
    /// A handle that can cancel this playback.
    pub fn handle(&self) -> CancelHandle {
        self.handle.clone()
    }

    /// The trace being replayed.
    pub fn result(&self) -> &SearchResult {
        &self.result
    }

    /// Statistics that will be published on completion.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Current state of this playback.
    pub fn state(&self) -> PlaybackState {
        match self.phase {
            Phase::Visits => PlaybackState::ReplayingVisits,
            Phase::Path => PlaybackState::ReplayingPath,
            Phase::Finished | Phase::Cancelled => PlaybackState::Idle,
        }
    }

    /// Apply the next trace node to `grid`.
    ///
    /// Visit nodes become [`Classification::Visited`], then path nodes
    /// become [`Classification::Path`]. Start and End are never
    /// overwritten. Once finished or cancelled, further calls keep
    /// returning the same terminal step without touching `grid`.
    pub fn step(&mut self, grid: &mut Grid) -> Step {
        if self.handle.is_cancelled() && self.phase != Phase::Finished {
            self.stop(Phase::Cancelled);
        }

        loop {
            match self.phase {
                Phase::Visits => {
                    if let Some(node) = self.result.visit_order.get(self.cursor) {
                        let coord = node.coord;
                        self.cursor += 1;
                        if let Some(step) =
                            self.apply(grid, coord, Classification::Visited, self.timing.visit)
                        {
                            return step;
                        }
                        self.stop(Phase::Cancelled);
                        continue;
                    }
                    let entered = self.guarded(|slot| slot.state = PlaybackState::ReplayingPath);
                    if entered.is_none() {
                        self.stop(Phase::Cancelled);
                        continue;
                    }
                    self.phase = Phase::Path;
                    self.cursor = 0;
                }
                Phase::Path => {
                    if let Some(node) = self.result.path.get(self.cursor) {
                        let coord = node.coord;
                        self.cursor += 1;
                        if let Some(step) =
                            self.apply(grid, coord, Classification::Path, self.timing.path)
                        {
                            return step;
                        }
                        self.stop(Phase::Cancelled);
                        continue;
                    }
                    self.stop(Phase::Finished);
                    log::debug!(
                        "playback run {} finished: {:?}",
                        self.handle.run,
                        self.stats
                    );
                }
                Phase::Finished => return Step::Finished(self.stats),
                Phase::Cancelled => return Step::Cancelled,
            }
        }
    }

    /// Drive the playback to the end on the current thread.
    ///
    /// `on_step` sees the grid after every applied step. Non-zero delays
    /// are slept through and wake early on cancellation; zero delays do not
    /// suspend at all. `on_complete` is called only when the run completes.
    pub fn run<S, C>(mut self, grid: &mut Grid, mut on_step: S, on_complete: C) -> Outcome
    where
        S: FnMut(&Grid),
        C: FnOnce(Stats),
    {
        let ctx = self.handle.ctx.clone();
        loop {
            match self.step(grid) {
                Step::Applied { delay, .. } => {
                    on_step(grid);
                    if !delay.is_zero() {
                        ctx.sleep(delay);
                    }
                }
                Step::Finished(stats) => {
                    on_complete(stats);
                    return Outcome::Completed(stats);
                }
                Step::Cancelled => return Outcome::Cancelled,
            }
        }
    }

    /// Run `f` on the slot, holding its lock, unless this run was cancelled.
    ///
    /// [`CancelHandle::cancel`] takes the same lock, so once it returns no
    /// guarded section of this run can start.
    fn guarded<T>(&self, f: impl FnOnce(&mut Slot) -> T) -> Option<T> {
        let mut slot = lock(&self.handle.shared);
        if self.handle.is_cancelled() || slot.run != self.handle.run {
            return None;
        }
        Some(f(&mut slot))
    }

    fn apply(
        &self,
        grid: &mut Grid,
        at: Coord,
        classification: Classification,
        delay: Duration,
    ) -> Option<Step> {
        let mutated = self.guarded(|_| grid.mark(at, classification))?;
        log::trace!("run {}: {at} -> {classification} ({mutated})", self.handle.run);
        Some(Step::Applied {
            at,
            classification,
            mutated,
            delay,
        })
    }

    fn stop(&mut self, phase: Phase) {
        self.phase = phase;
        transition(&self.handle.shared, self.handle.run, PlaybackState::Idle);
    }
}

impl Drop for Playback {
    fn drop(&mut self) {
        if matches!(self.phase, Phase::Visits | Phase::Path) {
            transition(&self.handle.shared, self.handle.run, PlaybackState::Idle);
        }
    }
}

/// Trace nodes of `result` in replay order, paired with the class applied.
pub fn replay_order(result: &SearchResult) -> impl Iterator<Item = (&Node, Classification)> {
    result
        .visit_order
        .iter()
        .map(|n| (n, Classification::Visited))
        .chain(result.path.iter().map(|n| (n, Classification::Path)))
}
