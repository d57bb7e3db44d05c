//! Resume fit analysis library

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeFitError};
pub use processing::analyzer::{MatchEngine, MatchReport};
pub use processing::document::{Document, DocumentRole};
