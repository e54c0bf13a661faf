//! crashscanctl - CLI front end for crashscan
//!
//! Reads captured console logs and prints crash reports.

pub mod cli;
pub mod commands;
pub mod errors;
pub mod logging;
pub mod output;
