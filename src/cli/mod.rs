//! Command line interface

pub mod args;
pub mod commands;

pub use args::{parse_args, Args};
pub use commands::Command;
