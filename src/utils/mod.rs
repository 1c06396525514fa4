//! Common utilities for the library.
//!

pub mod cli;
pub mod log;
