//! `fringe-patterns` library crate.
//!
//! The binary (`fringe`) is a thin wrapper around this library so that:
//!
//! - the fitting and table-building core is testable without spawning processes
//! - modules are reusable (e.g., calibrating several projector channels from
//!   one process, each with its own sample set)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod debug;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod lut;
pub mod math;
pub mod models;
pub mod pattern;
