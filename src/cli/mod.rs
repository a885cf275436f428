//! Command-line interface for running and inspecting network games

pub mod commands;
pub mod config;
pub mod logger;
pub mod output;
