//! CLI command implementations

pub mod config;
pub mod export;
pub mod options;
pub mod plot;
pub mod run;

pub use options::ConfigArgs;
