//! Route planner CLI library.
//!
//! Command handlers and output formatting for the `routeplanner-cli`
//! binary, exposed as a library so they can be tested in isolation.

pub mod commands;
pub mod output;
pub mod terminal;
