//! # CLI
//!
//! One client of `vitrinapp`. Everything terminal-specific lives here; the
//! library never prints.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: logging setup, context wiring and dispatch
//! - `render`: tables, media lists and messages as strings
//! - `styles`: terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
