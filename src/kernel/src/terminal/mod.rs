//! Terminal subsystem for RunkoOS.
//!
//! Provides the text console and the command-line interface on top of it.
//!
//! # Architecture
//!
//! - `writer`: terminal engine (cursor, colors, centered layout)
//! - `shell`: line-editing read-eval-print loop
//! - `commands`: built-in command dispatch

pub mod commands;
pub mod shell;
pub mod writer;

pub use commands::Command;
pub use writer::Writer;
