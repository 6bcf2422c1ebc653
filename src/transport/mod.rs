//! Transport layer for CLI interaction

pub mod cli;
