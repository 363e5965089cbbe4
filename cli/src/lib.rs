//! EcoWise terminal shell
//!
//! Runs the footprint engine, coach and eco-city rules from the command line
//! and keeps the session profile in a JSON file between runs.

pub mod commands;
pub mod config;
pub mod report;
pub mod storage;
