//! Pattern catalog and behavior detection

pub mod detector;
pub mod library;

pub use detector::{PatternDetector, PatternType};
pub use library::{Pattern, PatternLibrary};
