//! Assemble Engine library.
//!
//! Ranks live party listings against user filters.
//!
//! ## Structure
//!
//! - `use_cases/` - Refresh and ranking orchestration
//! - `infrastructure/` - Port traits, feed wire format and adapters
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
