//! pcmlab CLI library
//!
//! Command implementations plus the figure and table writers used by the
//! `pcmlab` binary. Exposed as a library so integration tests can drive the
//! commands directly.

pub mod commands;
pub mod plot;
pub mod table;
