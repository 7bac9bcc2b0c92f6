//! stormwatch library
//!
//! This library exports the dashboard state machine and the fetch routine for
//! testing and potential reuse.

pub mod config;
pub mod dashboard;
pub mod event;
pub mod fetch;
pub mod logging;
pub mod search;
pub mod tui;
