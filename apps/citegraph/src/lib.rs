//! # citegraph
//!
//! The application around `citegraph-core`: configuration, the corpus
//! loader and the command-line interface.

pub mod cli;
pub mod config;
pub mod loader;
