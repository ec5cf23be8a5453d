//! Core kitchen logic — types, config, catalog, supplies, programs, dispatch,
//! and the user flow.

pub mod catalog;
pub mod config;
pub mod dispatcher;
pub mod flow;
pub mod registry;
pub mod supplies;
pub mod types;
