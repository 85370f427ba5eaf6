//! QosMesh command-line front end
//!
//! Loads a topology description, runs the path optimizer or the random
//! baseline generator, and renders the result.

pub mod commands;
pub mod config;
pub mod loader;
pub mod report;
