//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Running `jsonmask` without a
//! subcommand behaves like `jsonmask mask`.

pub mod check_config;
pub mod completions;
pub mod dispatcher;
pub mod mask;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
