// Library modules for integration tests
pub mod annotate;
pub mod capture;
pub mod config;
pub mod detect;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod hotkey;
pub mod logging;
pub mod merge;
pub mod models;
pub mod pipeline;
pub mod utils;
