//! Running population statistics

use crate::game_of_life::Grid;
use serde::Serialize;
use std::collections::VecDeque;

const POPULATION_WINDOW: usize = 200;

#[derive(Debug, Clone, Serialize)]
pub struct PopulationStats {
    pub generation: u64,
    pub population: usize,
    /// Net population gain since the previous update
    pub births: usize,
    /// Net population loss since the previous update
    pub deaths: usize,
    pub max_population: usize,
    /// Smallest non-zero population seen, `None` until one is observed
    pub min_population: Option<usize>,
    pub average_population: f64,
    #[serde(skip)]
    history: VecDeque<usize>,
}

impl Default for PopulationStats {
    fn default() -> Self {
        Self {
            generation: 0,
            population: 0,
            births: 0,
            deaths: 0,
            max_population: 0,
            min_population: None,
            average_population: 0.0,
            history: VecDeque::with_capacity(POPULATION_WINDOW),
        }
    }
}

impl PopulationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the counters from a board without counting births or deaths
    pub fn observe(grid: &Grid, generation: u64) -> Self {
        let mut stats = Self::new();
        stats.population = grid.count_living();
        stats.update(grid, generation);
        stats
    }

    pub fn update(&mut self, grid: &Grid, generation: u64) {
        let population = grid.count_living();

        self.births = population.saturating_sub(self.population);
        self.deaths = self.population.saturating_sub(population);
        self.population = population;
        self.generation = generation;

        self.max_population = self.max_population.max(population);
        if population > 0 {
            self.min_population = Some(self.min_population.map_or(population, |m| m.min(population)));
        }

        self.history.push_back(population);
        if self.history.len() > POPULATION_WINDOW {
            self.history.pop_front();
        }
        self.average_population = self.history.iter().sum::<usize>() as f64 / self.history.len() as f64;
    }

    /// Recent populations, oldest first
    pub fn history(&self) -> &VecDeque<usize> {
        &self.history
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
