//! Chefcito — a simulated cooking robot.
//!
//! A recipe catalog, pluggable cooking programs behind a dispatcher, and a
//! menu → cooking → rating flow driven over a terminal.

pub mod cli;
pub mod core;
pub mod programs;
pub mod ui;
