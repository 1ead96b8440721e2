// aipatch/src/lib.rs
//! # aipatch CLI
//!
//! This crate provides the command-line front end for the aipatch engine:
//! argument parsing, logger setup, the apply command, and terminal output
//! (confirmation message and unified diff preview).

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
