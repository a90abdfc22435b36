pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::TuningConfig;
pub use error::{BoardroomError, Rejected, Result};
pub use random::{RandomSource, ScriptedSource};
