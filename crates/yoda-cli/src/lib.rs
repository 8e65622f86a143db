//! # YODA CLI Library
//!
//! Runs the MQA server or scores a local metadata document from the command line

pub mod commands;

pub use commands::*;
