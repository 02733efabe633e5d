//! Library components of the `qbank` command.
//!
//! The binary parses arguments and prints tables; everything that touches a
//! question source or a store lives here so it can be driven from tests.

pub mod commands;
pub mod logging;
pub mod types;
