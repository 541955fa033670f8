//! Command implementations for the `ascent` binary.
//!
//! Output is agent-first: the default format is JSON with ready-to-run
//! follow-up commands merged into each item, so an automated caller can
//! navigate the service without memorizing the command tree.

pub mod commands;
pub mod output;
pub mod provider;
