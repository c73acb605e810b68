//! Builds the distributable interpreter bundles.
//!
//! Each bundle is an ordered list of source files, concatenated with their
//! `;;;` debug lines removed and streamed through an external minifier into
//! the target file. Bundles are built one after another and the first
//! failure ends the run.

pub mod cli;
pub mod core;
pub mod infrastructure;
pub mod utils;
