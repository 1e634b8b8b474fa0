//! fibdrv library: application logic for the Fibonacci device client.

pub mod app;
pub mod config;
pub mod errors;
