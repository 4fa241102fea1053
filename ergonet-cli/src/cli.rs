//! CLI module: argument types, command execution and summary rendering.

pub mod commands;

pub use commands::{
    Cli, CliError, Command, EstimateArgs, SimulateArgs, Summary, render_summary, run_cli,
};
