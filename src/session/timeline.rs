//! Recording of generations for later playback

use crate::game_of_life::Grid;
use std::collections::{BTreeMap, VecDeque};

pub const DEFAULT_TIMELINE_SIZE: usize = 1000;

#[derive(Debug, Clone)]
struct Frame {
    grid: Grid,
    generation: u64,
}

/// A bounded sequence of recorded boards with a playback cursor and
/// labelled bookmarks keyed by frame index.
#[derive(Debug, Clone)]
pub struct Timeline {
    frames: VecDeque<Frame>,
    current: usize,
    capacity: usize,
    bookmarks: BTreeMap<usize, String>,
    playback_speed: f32,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(DEFAULT_TIMELINE_SIZE)
    }
}

impl Timeline {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: VecDeque::new(),
            current: 0,
            capacity: capacity.max(1),
            bookmarks: BTreeMap::new(),
            playback_speed: 1.0,
        }
    }

    /// Append a frame after the cursor.
    ///
    /// Frames (and bookmarks) past the cursor are discarded first. When the
    /// timeline is full the oldest frame is dropped and bookmark indices
    /// shift down with it.
    pub fn record(&mut self, grid: &Grid, generation: u64) {
        if self.current + 1 < self.frames.len() {
            self.frames.truncate(self.current + 1);
            let current = self.current;
            self.bookmarks.retain(|&index, _| index <= current);
        }

        self.frames.push_back(Frame {
            grid: grid.clone(),
            generation,
        });

        if self.frames.len() > self.capacity {
            self.frames.pop_front();
            self.bookmarks = std::mem::take(&mut self.bookmarks)
                .into_iter()
                .filter(|&(index, _)| index > 0)
                .map(|(index, label)| (index - 1, label))
                .collect();
        } else if self.frames.len() > 1 {
            self.current += 1;
        }
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.bookmarks.clear();
        self.current = 0;
    }

    /// The frame at `index`, falling back to the cursor frame
    pub fn frame(&self, index: usize) -> Option<&Grid> {
        self.frames
            .get(index)
            .or_else(|| self.frames.get(self.current))
            .map(|frame| &frame.grid)
    }

    pub fn current_frame(&self) -> Option<&Grid> {
        self.frames.get(self.current).map(|frame| &frame.grid)
    }

    /// Generation recorded with frame `index`, 0 if there is none
    pub fn generation_at(&self, index: usize) -> u64 {
        self.frames.get(index).map_or(0, |frame| frame.generation)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn set_current_index(&mut self, index: usize) {
        if index < self.frames.len() {
            self.current = index;
        }
    }

    pub fn next(&mut self) {
        if self.current + 1 < self.frames.len() {
            self.current += 1;
        }
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn jump_to_start(&mut self) {
        self.current = 0;
    }

    pub fn jump_to_end(&mut self) {
        if !self.frames.is_empty() {
            self.current = self.frames.len() - 1;
        }
    }

    /// Move to the first frame recorded at `generation`, if any
    pub fn jump_to_generation(&mut self, generation: u64) {
        if let Some(index) = self.frames.iter().position(|f| f.generation == generation) {
            self.current = index;
        }
    }

    /// Label frame `index`; an empty label becomes "Bookmark"
    pub fn add_bookmark(&mut self, index: usize, label: &str) {
        if index < self.frames.len() {
            let label = if label.is_empty() { "Bookmark" } else { label };
            self.bookmarks.insert(index, label.to_string());
        }
    }

    pub fn remove_bookmark(&mut self, index: usize) {
        self.bookmarks.remove(&index);
    }

    /// Bookmarked frame indices in ascending order
    pub fn bookmarks(&self) -> Vec<usize> {
        self.bookmarks.keys().copied().collect()
    }

    pub fn bookmark_label(&self, index: usize) -> Option<&str> {
        self.bookmarks.get(&index).map(String::as_str)
    }

    pub fn playback_speed(&self) -> f32 {
        self.playback_speed
    }

    pub fn set_playback_speed(&mut self, speed: f32) {
        self.playback_speed = speed;
    }
}
