//! Value objects carried by filter conditions.

mod level_range;
mod relevancy;
mod text_pattern;

pub use level_range::LevelRange;
pub use relevancy::RelevancyLevel;
pub use text_pattern::TextPattern;
