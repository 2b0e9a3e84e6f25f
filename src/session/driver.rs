//! Interactive-session state built around a [`GameEngine`]

use super::{EditHistory, PopulationStats, Timeline};
use crate::error::Result;
use crate::game_of_life::{GameEngine, Grid};
use crate::patterns::{PatternDetector, PatternLibrary, PatternType};
use rand::Rng;
use serde::Serialize;

/// Consecutive stable ticks before auto-pause kicks in
const STABLE_CONFIRMATIONS: u32 = 3;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub history_size: usize,
    pub timeline_size: usize,
    pub auto_pause_on_stable: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            history_size: super::history::DEFAULT_HISTORY_SIZE,
            timeline_size: super::timeline::DEFAULT_TIMELINE_SIZE,
            auto_pause_on_stable: true,
        }
    }
}

/// Summary of one simulated generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    pub generation: u64,
    pub population: usize,
    pub pattern: PatternType,
    pub pattern_name: String,
    pub oscillator_period: u64,
    /// The step was a fixed point
    pub engine_stable: bool,
    pub paused: bool,
}

/// Engine plus the bookkeeping a front end needs: behavior detection,
/// population statistics, undo/redo of hand edits and optional recording.
#[derive(Debug, Clone)]
pub struct LifeSession {
    engine: GameEngine,
    detector: PatternDetector,
    stats: PopulationStats,
    history: EditHistory,
    timeline: Timeline,
    recording: bool,
    paused: bool,
    auto_pause_on_stable: bool,
    stable_streak: u32,
    was_stable: bool,
}

impl LifeSession {
    pub fn new(seed: Grid, toroidal: bool, options: SessionOptions) -> Self {
        let mut history = EditHistory::new(options.history_size);
        history.record(&seed);

        Self {
            stats: PopulationStats::observe(&seed, 0),
            engine: GameEngine::new(seed, toroidal),
            detector: PatternDetector::new(),
            history,
            timeline: Timeline::new(options.timeline_size),
            recording: false,
            paused: false,
            auto_pause_on_stable: options.auto_pause_on_stable,
            stable_streak: 0,
            was_stable: false,
        }
    }

    /// Advance one generation regardless of the pause state
    pub fn step(&mut self) -> TickReport {
        self.engine.step();
        let grid = self.engine.current_grid();
        let generation = self.engine.generation();

        self.stats.update(grid, generation);
        self.detector.update(grid, generation);
        if self.recording {
            self.timeline.record(grid, generation);
        }

        if self.auto_pause_on_stable && self.detector.is_stable() {
            self.stable_streak += 1;
            if self.stable_streak >= STABLE_CONFIRMATIONS && !self.was_stable {
                self.paused = true;
                self.was_stable = true;
                log::info!(
                    "pausing at generation {}: {}",
                    generation,
                    self.detector.pattern_name()
                );
            }
        } else {
            self.stable_streak = 0;
            self.was_stable = false;
        }

        self.report()
    }

    /// Advance one generation unless paused
    pub fn advance(&mut self) -> Option<TickReport> {
        if self.paused {
            None
        } else {
            Some(self.step())
        }
    }

    pub fn report(&self) -> TickReport {
        TickReport {
            generation: self.engine.generation(),
            population: self.stats.population,
            pattern: self.detector.pattern_type(),
            pattern_name: self.detector.pattern_name(),
            oscillator_period: self.detector.oscillator_period(),
            engine_stable: self.engine.is_stable(),
            paused: self.paused,
        }
    }

    /// Set one cell by hand, returning its previous state
    pub fn edit_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<bool> {
        let before = self.engine.apply_cell_edit(row, col, alive)?;
        self.after_edit();
        Ok(before)
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<bool> {
        let now = self.engine.toggle_cell(row, col)?;
        self.after_edit();
        Ok(now)
    }

    /// Kill every cell on the board
    pub fn clear(&mut self) -> Result<()> {
        self.engine.edit(Grid::clear)?;
        self.after_edit();
        Ok(())
    }

    pub fn invert(&mut self) -> Result<()> {
        self.engine.edit(Grid::invert)?;
        self.after_edit();
        Ok(())
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) -> Result<()> {
        self.engine.edit(|grid| grid.randomize(density, rng))??;
        self.after_edit();
        Ok(())
    }

    /// Stamp a library pattern using the engine's wrap setting
    pub fn insert_pattern(&mut self, library: &PatternLibrary, key: &str, row: isize, col: isize) -> Result<bool> {
        let toroidal = self.engine.is_toroidal();
        let inserted = self
            .engine
            .edit(|grid| library.insert_pattern(grid, key, row, col, toroidal))?;
        if inserted {
            self.after_edit();
        }
        Ok(inserted)
    }

    fn after_edit(&mut self) {
        self.history.record(self.engine.current_grid());
        self.detector.reset();
        self.stats.population = self.engine.current_grid().count_living();
    }

    /// Restore the previous hand-edited board; `false` if there is none
    pub fn undo(&mut self) -> Result<bool> {
        match self.history.undo().cloned() {
            Some(grid) => self.restore(grid),
            None => Ok(false),
        }
    }

    pub fn redo(&mut self) -> Result<bool> {
        match self.history.redo().cloned() {
            Some(grid) => self.restore(grid),
            None => Ok(false),
        }
    }

    fn restore(&mut self, grid: Grid) -> Result<bool> {
        self.engine.set_current_grid(grid)?;
        self.detector.reset();
        self.stats.population = self.engine.current_grid().count_living();
        Ok(true)
    }

    /// Put recorded frame `index` on the board
    pub fn show_frame(&mut self, index: usize) -> Result<bool> {
        match self.timeline.frame(index).cloned() {
            Some(grid) => self.restore(grid),
            None => Ok(false),
        }
    }

    /// Back to the seed board and generation 0
    pub fn reset(&mut self) {
        self.engine.reset();
        self.reset_bookkeeping();
    }

    /// Replace the seed board (e.g. after loading a file)
    pub fn load(&mut self, seed: Grid) {
        self.engine.replace_initial(seed);
        self.reset_bookkeeping();
    }

    fn reset_bookkeeping(&mut self) {
        let grid = self.engine.current_grid();
        self.detector.reset();
        self.stats = PopulationStats::observe(grid, 0);
        self.history.clear();
        self.history.record(grid);
        self.paused = false;
        self.stable_streak = 0;
        self.was_stable = false;
    }

    pub fn start_recording(&mut self) {
        if !self.recording {
            self.timeline.clear();
            self.timeline
                .record(self.engine.current_grid(), self.engine.generation());
            self.recording = true;
        }
    }

    pub fn stop_recording(&mut self) {
        self.recording = false;
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_auto_pause_on_stable(&mut self, enabled: bool) {
        self.auto_pause_on_stable = enabled;
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn grid(&self) -> &Grid {
        self.engine.current_grid()
    }

    pub fn detector(&self) -> &PatternDetector {
        &self.detector
    }

    pub fn stats(&self) -> &PopulationStats {
        &self.stats
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session_with(key: &str) -> LifeSession {
        let library = PatternLibrary::new();
        let mut grid = Grid::new(12, 12).unwrap();
        library.insert_centered(&mut grid, key, false);
        LifeSession::new(grid, false, SessionOptions::default())
    }

    #[test]
    fn test_auto_pause_on_still_life() {
        let mut session = session_with("block");
        let mut ticks = 0;
        while session.advance().is_some() {
            ticks += 1;
            assert!(ticks < 10, "never paused");
        }

        // Stable from generation 2, confirmed over 3 ticks
        assert_eq!(session.engine().generation(), 4);
        assert!(session.is_paused());
        assert!(session.report().paused);
        assert!(session.report().engine_stable);

        // Staying stable does not re-trigger after resuming
        session.resume();
        assert!(session.advance().is_some());
        assert!(!session.is_paused());
    }

    #[test]
    fn test_oscillator_report() {
        let mut session = session_with("blinker");
        session.set_auto_pause_on_stable(false);
        session.step();
        session.step();
        let report = session.step();

        // The seed is not observed, so the first repeat shows at generation 3
        assert_eq!(report.generation, 3);
        assert_eq!(report.pattern, PatternType::Oscillator);
        assert_eq!(report.oscillator_period, 2);
        assert_eq!(report.pattern_name, "Oscillator (Period 2)");
        assert!(!report.engine_stable);
        assert_eq!(report.population, 3);
    }

    #[test]
    fn test_extinction() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set_cell(2, 2, true).unwrap();
        let mut session = LifeSession::new(grid, false, SessionOptions::default());

        let report = session.step();
        assert_eq!(report.pattern, PatternType::Extinct);
        assert_eq!(report.population, 0);
        assert_eq!(session.stats().deaths, 1);
    }

    #[test]
    fn test_edits_undo_redo() {
        let mut session = session_with("block");
        let seed = session.grid().clone();

        session.edit_cell(0, 0, true).unwrap();
        session.toggle_cell(0, 1).unwrap();
        assert_eq!(session.grid().count_living(), 6);

        assert!(session.undo().unwrap());
        assert_eq!(session.grid().count_living(), 5);
        assert!(session.undo().unwrap());
        assert_eq!(session.grid(), &seed);
        assert!(!session.undo().unwrap());

        assert!(session.redo().unwrap());
        assert_eq!(session.grid().count_living(), 5);

        assert!(session.edit_cell(12, 0, true).is_err());
    }

    #[test]
    fn test_board_wide_edits() {
        let mut session = session_with("glider");
        session.clear().unwrap();
        assert!(session.grid().is_empty());

        session.invert().unwrap();
        assert_eq!(session.grid().count_living(), 144);

        let mut rng = StdRng::seed_from_u64(1);
        session.randomize(0.0, &mut rng).unwrap();
        assert!(session.grid().is_empty());
        assert!(session.randomize(-0.1, &mut rng).is_err());

        let library = PatternLibrary::new();
        assert!(session.insert_pattern(&library, "block", 11, 11).unwrap());
        assert_eq!(session.grid().count_living(), 1);
        assert!(!session.insert_pattern(&library, "nope", 0, 0).unwrap());
        assert_eq!(session.history().len(), 5);
    }

    #[test]
    fn test_hand_edit_resets_detection() {
        let mut session = session_with("block");
        session.set_auto_pause_on_stable(false);
        session.step();
        session.step();
        assert!(session.detector().is_stable());

        session.edit_cell(0, 0, true).unwrap();
        assert_eq!(session.detector().pattern_type(), PatternType::Unknown);
    }

    #[test]
    fn test_reset_and_load() {
        let mut session = session_with("glider");
        let seed = session.grid().clone();
        for _ in 0..5 {
            session.step();
        }
        session.edit_cell(0, 0, true).unwrap();

        session.reset();
        assert_eq!(session.grid(), &seed);
        assert_eq!(session.engine().generation(), 0);
        assert_eq!(session.history().len(), 1);

        let replacement = Grid::new(3, 4).unwrap();
        session.load(replacement.clone());
        assert_eq!(session.grid(), &replacement);
        assert_eq!(session.engine().initial_grid(), &replacement);
    }

    #[test]
    fn test_recording_and_playback() {
        let mut session = session_with("glider");
        session.start_recording();
        for _ in 0..4 {
            session.step();
        }
        session.stop_recording();
        session.step();

        assert_eq!(session.timeline().frame_count(), 5);
        assert_eq!(session.timeline().generation_at(4), 4);

        let first = session.timeline().frame(0).cloned().unwrap();
        assert!(session.show_frame(0).unwrap());
        assert_eq!(session.grid(), &first);
    }
}
