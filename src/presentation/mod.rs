//! Presentation layer: navigation guard and command-line runner.

/// Command runner.
pub mod cli;
/// Route table and authentication guard.
pub mod navigation;

pub use cli::{Cli, CliError};
pub use navigation::{GateDecision, NavigationGate, Route};
