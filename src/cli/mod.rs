//! Command implementations behind the `qtally` binary.

pub mod commands;
