//! The owning context of one visualiser window.

use std::time::Instant;

use gridpath_core::{Coord, DEFAULT_WALL_DENSITY, Grid, scatter_walls};
use gridpath_search::{Algorithm, run_search};
use rand::Rng;

use crate::error::SessionError;
use crate::scheduler::{Outcome, Playback, Scheduler, Stats, Step};
use crate::timing::{Speed, Timing};

/// Initial layout and selections of a [`Session`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    pub rows: i32,
    pub cols: i32,
    pub start: Coord,
    pub end: Coord,
    pub algorithm: Algorithm,
    pub speed: Speed,
    /// Probability of a wall per cell in [`Session::scatter_walls`].
    pub wall_density: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: 25,
            cols: 50,
            start: Coord::new(12, 10),
            end: Coord::new(12, 40),
            algorithm: Algorithm::Dijkstra,
            speed: Speed::Fast,
            wall_density: DEFAULT_WALL_DENSITY,
        }
    }
}

/// Live grid, selections and playback bookkeeping.
///
/// Grid edits are refused with [`SessionError::Busy`] while a playback
/// started by [`run`](Session::run) is in progress.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    grid: Grid,
    algorithm: Algorithm,
    speed: Speed,
    stats: Option<Stats>,
    scheduler: Scheduler,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let grid = Grid::new(config.rows, config.cols, config.start, config.end)?;
        Ok(Self {
            config,
            grid,
            algorithm: config.algorithm,
            speed: config.speed,
            stats: None,
            scheduler: Scheduler::new(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The current grid version.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Write access for driving a [`Playback`] by hand.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Figures from the last completed playback.
    pub fn stats(&self) -> Option<Stats> {
        self.stats
    }

    /// Whether a playback currently owns the grid.
    pub fn is_busy(&self) -> bool {
        self.scheduler.is_active()
    }

    pub fn toggle_wall(&mut self, at: Coord) -> Result<(), SessionError> {
        self.edit(|g| g.toggle_wall(at))
    }

    pub fn relocate_start(&mut self, at: Coord) -> Result<(), SessionError> {
        self.edit(|g| g.relocate_start(at))
    }

    pub fn relocate_end(&mut self, at: Coord) -> Result<(), SessionError> {
        self.edit(|g| g.relocate_end(at))
    }

    /// Replace every wall with a fresh random layout.
    pub fn scatter_walls<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SessionError> {
        let density = self.config.wall_density;
        self.edit(|g| scatter_walls(g, density, rng))
    }

    /// Wipe visited and path marks, keeping walls and anchors.
    pub fn clear_path(&mut self) -> Result<(), SessionError> {
        self.edit(Grid::clear_search_state)?;
        self.stats = None;
        Ok(())
    }

    /// Rebuild the grid from the session configuration.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        let c = &self.config;
        self.grid = Grid::new(c.rows, c.cols, c.start, c.end)?;
        self.stats = None;
        log::debug!("grid reset to {}x{}", c.rows, c.cols);
        Ok(())
    }

    /// Search the current grid with the selected algorithm and begin
    /// replaying the result.
    ///
    /// Previous marks are cleared first. The search works on a private
    /// snapshot; only the returned [`Playback`] writes to the grid.
    pub fn run(&mut self) -> Result<Playback, SessionError> {
        if self.is_busy() {
            log::debug!("run rejected: playback in progress");
            return Err(crate::error::PlaybackError::ReentrancyViolation.into());
        }
        self.grid = self.grid.clear_search_state();
        self.stats = None;

        let snapshot = self.grid.snapshot();
        let began = Instant::now();
        let result = run_search(self.algorithm, &snapshot, snapshot.start(), snapshot.end())?;
        let elapsed = began.elapsed();
        log::debug!(
            "{} finished in {elapsed:?}: {} visited, path of {}",
            self.algorithm,
            result.visit_order.len(),
            result.path.len()
        );

        let playback = self
            .scheduler
            .begin(result, elapsed, Timing::from(self.speed))?;
        Ok(playback)
    }

    /// Advance `playback` by one step on this session's grid.
    ///
    /// Stats are recorded when the playback finishes.
    pub fn step(&mut self, playback: &mut Playback) -> Step {
        let step = playback.step(&mut self.grid);
        if let Step::Finished(stats) = step {
            self.stats = Some(stats);
        }
        step
    }

    /// Drive `playback` to the end, blocking the current thread.
    pub fn play<S>(&mut self, playback: Playback, on_step: S) -> Outcome
    where
        S: FnMut(&Grid),
    {
        let outcome = playback.run(&mut self.grid, on_step, |_| {});
        if let Outcome::Completed(stats) = outcome {
            self.stats = Some(stats);
        }
        outcome
    }

    /// Stop the playback in progress, if any. Marks applied so far stay.
    pub fn cancel(&mut self) {
        self.scheduler.cancel();
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.is_busy() {
            log::debug!("grid edit rejected: playback in progress");
            return Err(SessionError::Busy);
        }
        Ok(())
    }

    fn edit<F>(&mut self, f: F) -> Result<(), SessionError>
    where
        F: FnOnce(&Grid) -> Grid,
    {
        self.ensure_idle()?;
        self.grid = f(&self.grid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::Classification;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn small() -> Session {
        Session::new(SessionConfig {
            rows: 4,
            cols: 6,
            start: Coord::new(1, 0),
            end: Coord::new(1, 5),
            speed: Speed::Instant,
            ..SessionConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn default_config_matches_visualiser() {
        let s = Session::new(SessionConfig::default()).unwrap();
        assert_eq!(s.grid().rows(), 25);
        assert_eq!(s.grid().cols(), 50);
        assert_eq!(s.grid().start(), Coord::new(12, 10));
        assert_eq!(s.grid().end(), Coord::new(12, 40));
        assert_eq!(s.algorithm(), Algorithm::Dijkstra);
        assert_eq!(s.speed(), Speed::Fast);
        assert!(s.stats().is_none());
    }

    #[test]
    fn bad_config_is_rejected() {
        let cfg = SessionConfig {
            end: Coord::new(12, 10),
            ..SessionConfig::default()
        };
        assert!(matches!(Session::new(cfg), Err(SessionError::Grid(_))));
    }

    #[test]
    fn edits_are_refused_while_busy() {
        let mut s = small();
        let mut pb = s.run().unwrap();
        s.step(&mut pb);
        let before = s.grid().clone();

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(s.toggle_wall(Coord::new(0, 2)), Err(SessionError::Busy));
        assert_eq!(s.relocate_start(Coord::new(0, 0)), Err(SessionError::Busy));
        assert_eq!(s.relocate_end(Coord::new(3, 5)), Err(SessionError::Busy));
        assert_eq!(s.scatter_walls(&mut rng), Err(SessionError::Busy));
        assert_eq!(s.clear_path(), Err(SessionError::Busy));
        assert_eq!(s.reset(), Err(SessionError::Busy));
        assert!(s.run().is_err());
        assert_eq!(s.grid(), &before);

        s.cancel();
        assert!(s.toggle_wall(Coord::new(0, 2)).is_ok());
    }

    #[test]
    fn play_records_stats() {
        let mut s = small();
        let pb = s.run().unwrap();
        let outcome = s.play(pb, |_| {});
        let Outcome::Completed(stats) = outcome else {
            panic!("expected completion");
        };
        assert_eq!(stats.path_length, 6);
        assert_eq!(s.stats(), Some(stats));
        assert!(!s.is_busy());
        let marked = s
            .grid()
            .iter()
            .filter(|n| n.classification == Classification::Path)
            .count();
        assert_eq!(marked, 4);
    }

    #[test]
    fn rerun_clears_previous_marks() {
        let mut s = small();
        let pb = s.run().unwrap();
        s.play(pb, |_| {});
        let mut pb = s.run().unwrap();
        assert!(s.stats().is_none());
        assert!(
            s.grid()
                .iter()
                .all(|n| !n.classification.is_search_mark())
        );
        while !matches!(s.step(&mut pb), Step::Finished(_)) {}
        assert!(s.stats().is_some());
    }

    #[test]
    fn clear_path_and_reset() {
        let mut s = small();
        s.toggle_wall(Coord::new(0, 2)).unwrap();
        let pb = s.run().unwrap();
        s.play(pb, |_| {});

        s.clear_path().unwrap();
        assert!(s.stats().is_none());
        assert!(s.grid().get(Coord::new(0, 2)).unwrap().is_wall);
        assert!(s.grid().iter().all(|n| !n.classification.is_search_mark()));

        s.relocate_start(Coord::new(3, 3)).unwrap();
        s.reset().unwrap();
        assert_eq!(s.grid().start(), Coord::new(1, 0));
        assert!(s.grid().iter().all(|n| !n.is_wall));
    }

    #[test]
    fn scatter_keeps_anchors() {
        let mut s = small();
        let mut rng = StdRng::seed_from_u64(7);
        s.scatter_walls(&mut rng).unwrap();
        let g = s.grid();
        assert_eq!(g.get(g.start()).unwrap().classification, Classification::Start);
        assert_eq!(g.get(g.end()).unwrap().classification, Classification::End);
        assert!(g.check_invariants().is_ok());
    }

    #[test]
    fn stats_come_only_from_completed_playbacks() {
        let mut s = small();
        let mut pb = s.run().unwrap();
        s.step(&mut pb);
        s.cancel();
        assert_eq!(s.step(&mut pb), Step::Cancelled);
        assert!(s.stats().is_none());

        let mut pb = s.run().unwrap();
        let stats = loop {
            if let Step::Finished(stats) = s.step(&mut pb) {
                break stats;
            }
        };
        assert_eq!(s.stats(), Some(stats));
        assert_eq!(s.stats().map(|st| st.path_length), Some(6));
    }
}
