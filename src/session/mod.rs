//! Front-end bookkeeping around the engine: undo/redo, recording and statistics

pub mod driver;
pub mod history;
pub mod stats;
pub mod timeline;

pub use driver::{LifeSession, SessionOptions, TickReport};
pub use history::EditHistory;
pub use stats::PopulationStats;
pub use timeline::Timeline;
