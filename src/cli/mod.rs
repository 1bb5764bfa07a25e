pub mod commands;
pub mod context;
pub mod output;
pub mod registry;
pub mod render;
mod shell;

pub use context::{CliMode, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};

#[cfg(test)]
mod tests;
