//! The boardroom game: a turn-based business decision simulation
//!
//! Each round presents a generated scenario with three options (aggressive,
//! balanced, conservative). Resolving a choice moves the company's resources,
//! may fire a random market event, and can push the company into a crisis
//! that only a last-resort rescue can undo.

pub mod catalog;
pub mod effects;
pub mod engine;
pub mod events;
pub mod output;
pub mod resources;
pub mod scenario;
pub mod state;
pub mod systems;

pub use engine::{Engine, Phase};
pub use output::SessionSummary;
pub use resources::ResourceState;
pub use scenario::{GameOption, Scenario};
pub use state::GameState;
pub use systems::{Achievement, DecisionOutcome, LastResort, PassAction, TerminalReason};
