pub mod cli;
pub mod combine;
pub mod config;
pub mod constants;
pub mod error;
pub mod gather;
pub mod session;
pub mod ui;

pub use combine::{CombineEvent, CombineJob, CombineSummary, CombinerEngine, Progress, SelectionSet};
pub use error::CombineError;
pub use session::Session;
