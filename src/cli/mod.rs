//! Command-line interface

mod ask;
mod auth;
mod root;

pub use root::Cli;
