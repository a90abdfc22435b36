//! Game systems

mod achievements;
mod emergency;
mod generation;
mod loans;
mod resolution;
mod terminal;

pub use achievements::{qualifying_achievements, Achievement};
pub use emergency::{apply_last_resort, apply_pass_action, LastResort, PassAction};
pub use generation::{adjusted_difficulty, generate_scenario, resource_multiplier};
pub use loans::{auto_payment, interest_due, interest_rate, loan_ceiling, repay_loan, take_loan};
pub use resolution::{difficulty_multiplier, resolve, success_chance, DecisionOutcome, Resolution};
pub use terminal::{check_terminal, TerminalReason};
