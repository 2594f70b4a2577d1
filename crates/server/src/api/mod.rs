//! HTTP endpoint handlers.

mod error;
mod health;
mod summarize;


pub use health::{health, models};
pub use summarize::{download, summarize};
