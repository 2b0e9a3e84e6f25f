//! Classification of a running board's long-term behavior

use crate::game_of_life::Grid;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Serialized states kept in the rolling history
pub const HISTORY_LIMIT: usize = 100;
/// Seen-state entries tolerated before the map is cleared
pub const SEEN_STATES_LIMIT: usize = 1000;
/// Longest repeat gap still reported as an oscillator
pub const MAX_OSCILLATOR_PERIOD: u64 = 30;
/// Unchanged-population streak at which growth/shrink labels stop updating
const POPULATION_STREAK_LIMIT: u32 = 3;

/// Behavior classes reported by [`PatternDetector`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    #[default]
    Unknown,
    StillLife,
    Oscillator,
    Growing,
    Shrinking,
    Extinct,
}

impl PatternType {
    /// Short label; `period` is only shown for oscillators
    pub fn name(self, period: u64) -> String {
        match self {
            PatternType::Unknown => "Unknown".to_string(),
            PatternType::StillLife => "Still Life".to_string(),
            PatternType::Oscillator => format!("Oscillator (Period {})", period),
            PatternType::Growing => "Growing".to_string(),
            PatternType::Shrinking => "Shrinking".to_string(),
            PatternType::Extinct => "Extinct".to_string(),
        }
    }

    pub fn description(self, period: u64) -> String {
        match self {
            PatternType::Unknown => "Pattern behavior not yet determined".to_string(),
            PatternType::StillLife => "Pattern never changes - stable formation".to_string(),
            PatternType::Oscillator => format!("Pattern repeats every {} generations", period),
            PatternType::Growing => "Population is increasing".to_string(),
            PatternType::Shrinking => "Population is decreasing".to_string(),
            PatternType::Extinct => "All cells are dead".to_string(),
        }
    }
}

/// Watches successive boards and labels what they are doing.
///
/// The detector keeps its own history and is independent of the engine;
/// feed it the board and generation number after every step. Repeats are
/// measured against the generation a state was *first* seen.
#[derive(Debug, Clone, Default)]
pub struct PatternDetector {
    current: PatternType,
    oscillator_period: u64,
    stable_generations: u64,
    history: VecDeque<String>,
    seen_states: HashMap<String, u64>,
    last_population: usize,
    same_population_count: u32,
}

impl PatternDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the board at `generation` and reclassify
    pub fn update(&mut self, grid: &Grid, generation: u64) {
        let before = self.current;
        self.classify(grid, generation);

        if self.current != before {
            log::debug!(
                "generation {}: {} -> {}",
                generation,
                before.name(self.oscillator_period),
                self.pattern_name()
            );
        }
    }

    fn classify(&mut self, grid: &Grid, generation: u64) {
        let state = grid.canonical_string();
        let population = grid.count_living();

        if population == 0 {
            self.current = PatternType::Extinct;
            return;
        }

        let previous_population = self.last_population;
        if population == previous_population {
            self.same_population_count += 1;
        } else {
            self.same_population_count = 0;
        }
        self.last_population = population;

        self.history.push_back(state.clone());
        if self.history.len() > HISTORY_LIMIT {
            self.history.pop_front();
        }

        match self.seen_states.get(&state) {
            Some(&first_seen) => match generation.checked_sub(first_seen) {
                Some(0 | 1) => {
                    self.current = PatternType::StillLife;
                    self.oscillator_period = 0;
                    self.stable_generations += 1;
                }
                Some(period) if period <= MAX_OSCILLATOR_PERIOD => {
                    self.current = PatternType::Oscillator;
                    self.oscillator_period = period;
                    self.stable_generations += 1;
                }
                // Too long ago (or out of order) to call it a cycle
                _ => {}
            },
            None => {
                self.seen_states.insert(state, generation);

                if self.same_population_count < POPULATION_STREAK_LIMIT {
                    if population > previous_population {
                        self.current = PatternType::Growing;
                    } else if population < previous_population {
                        self.current = PatternType::Shrinking;
                    }
                }
            }
        }

        if self.seen_states.len() > SEEN_STATES_LIMIT {
            self.seen_states.clear();
        }
    }

    pub fn pattern_type(&self) -> PatternType {
        self.current
    }

    pub fn pattern_name(&self) -> String {
        self.current.name(self.oscillator_period)
    }

    pub fn pattern_description(&self) -> String {
        self.current.description(self.oscillator_period)
    }

    /// Detected period, 0 unless the board is oscillating
    pub fn oscillator_period(&self) -> u64 {
        self.oscillator_period
    }

    /// True for still lifes and oscillators
    pub fn is_stable(&self) -> bool {
        matches!(self.current, PatternType::StillLife | PatternType::Oscillator)
    }

    /// Number of updates that hit a repeat
    pub fn stable_generations(&self) -> u64 {
        self.stable_generations
    }

    /// Most recent serialized states, oldest first
    pub fn history(&self) -> &VecDeque<String> {
        &self.history
    }

    pub fn seen_state_count(&self) -> usize {
        self.seen_states.len()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for PatternDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pattern_name(), self.pattern_description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> Grid {
        Grid::from_rows(&["0000", "0110", "0110", "0000"]).unwrap()
    }

    fn blinker_phases() -> (Grid, Grid) {
        (
            Grid::from_rows(&["00000", "00000", "01110", "00000", "00000"]).unwrap(),
            Grid::from_rows(&["00000", "00100", "00100", "00100", "00000"]).unwrap(),
        )
    }

    /// Distinct non-empty 1x12 boards encoding `n`
    fn numbered(n: usize) -> Grid {
        let row: String = (0..12)
            .map(|bit| if ((n + 1) >> bit) & 1 == 1 { '1' } else { '0' })
            .collect();
        Grid::from_rows(&[row.as_str()]).unwrap()
    }

    #[test]
    fn test_starts_unknown() {
        let detector = PatternDetector::new();
        assert_eq!(detector.pattern_type(), PatternType::Unknown);
        assert_eq!(detector.pattern_name(), "Unknown");
        assert!(!detector.is_stable());
    }

    #[test]
    fn test_still_life() {
        let mut detector = PatternDetector::new();
        let grid = block();

        detector.update(&grid, 0);
        assert!(!detector.is_stable());

        detector.update(&grid, 1);
        assert_eq!(detector.pattern_type(), PatternType::StillLife);
        assert_eq!(detector.oscillator_period(), 0);
        assert!(detector.is_stable());
        assert_eq!(detector.stable_generations(), 1);
    }

    #[test]
    fn test_period_two_oscillator() {
        let mut detector = PatternDetector::new();
        let (a, b) = blinker_phases();

        detector.update(&a, 0);
        detector.update(&b, 1);
        assert!(!detector.is_stable());

        detector.update(&a, 2);
        assert_eq!(detector.pattern_type(), PatternType::Oscillator);
        assert_eq!(detector.oscillator_period(), 2);
        assert_eq!(detector.pattern_name(), "Oscillator (Period 2)");
        assert_eq!(detector.pattern_description(), "Pattern repeats every 2 generations");

        detector.update(&b, 3);
        assert_eq!(detector.oscillator_period(), 2);
    }

    #[test]
    fn test_extinct_skips_history() {
        let mut detector = PatternDetector::new();
        detector.update(&block(), 0);
        assert_eq!(detector.history().len(), 1);

        detector.update(&Grid::new(4, 4).unwrap(), 1);
        assert_eq!(detector.pattern_type(), PatternType::Extinct);
        assert!(!detector.is_stable());
        assert_eq!(detector.history().len(), 1);

        let mut fresh = PatternDetector::new();
        fresh.update(&Grid::new(3, 3).unwrap(), 42);
        assert_eq!(fresh.pattern_type(), PatternType::Extinct);
    }

    #[test]
    fn test_growing_and_shrinking() {
        let mut detector = PatternDetector::new();

        detector.update(&Grid::from_rows(&["100", "000"]).unwrap(), 0);
        assert_eq!(detector.pattern_type(), PatternType::Growing);

        detector.update(&Grid::from_rows(&["110", "100"]).unwrap(), 1);
        assert_eq!(detector.pattern_type(), PatternType::Growing);

        detector.update(&Grid::from_rows(&["010", "000"]).unwrap(), 2);
        assert_eq!(detector.pattern_type(), PatternType::Shrinking);

        // Same population, new state: label is left alone
        detector.update(&Grid::from_rows(&["001", "000"]).unwrap(), 3);
        assert_eq!(detector.pattern_type(), PatternType::Shrinking);
    }

    #[test]
    fn test_long_gap_is_not_an_oscillator() {
        let mut detector = PatternDetector::new();
        let first = numbered(0);
        detector.update(&first, 0);
        for generation in 1..40 {
            detector.update(&numbered(generation as usize), generation);
        }
        let before = detector.pattern_type();

        detector.update(&first, 40);
        assert_eq!(detector.pattern_type(), before);
        assert!(!detector.is_stable());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut detector = PatternDetector::new();
        for generation in 0..150 {
            detector.update(&numbered(generation), generation as u64);
        }
        assert_eq!(detector.history().len(), HISTORY_LIMIT);
        assert_eq!(detector.history().back(), Some(&numbered(149).canonical_string()));
    }

    #[test]
    fn test_seen_states_cleared_on_overflow() {
        let mut detector = PatternDetector::new();
        for generation in 0..=SEEN_STATES_LIMIT {
            detector.update(&numbered(generation), generation as u64);
        }
        assert_eq!(detector.seen_state_count(), 0);

        // The earliest state is forgotten, so a quick repeat goes unnoticed
        let generation = SEEN_STATES_LIMIT as u64 + 1;
        detector.update(&numbered(0), generation);
        assert!(!detector.is_stable());
        assert_eq!(detector.seen_state_count(), 1);
    }

    #[test]
    fn test_reset() {
        let mut detector = PatternDetector::new();
        let grid = block();
        detector.update(&grid, 0);
        detector.update(&grid, 1);
        assert!(detector.is_stable());

        detector.reset();
        assert_eq!(detector.pattern_type(), PatternType::Unknown);
        assert_eq!(detector.oscillator_period(), 0);
        assert_eq!(detector.stable_generations(), 0);
        assert!(detector.history().is_empty());
        assert_eq!(detector.seen_state_count(), 0);

        // Previously seen state is new again
        detector.update(&grid, 5);
        assert!(!detector.is_stable());
    }

    #[test]
    fn test_pattern_type_labels() {
        assert_eq!(PatternType::StillLife.name(0), "Still Life");
        assert_eq!(PatternType::Extinct.description(0), "All cells are dead");
        assert_eq!(PatternType::Oscillator.name(3), "Oscillator (Period 3)");
    }
}
