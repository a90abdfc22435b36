//! Boardroom - Business Decision Simulation Game

pub mod core;
pub mod game;
