//! pcmlab End-to-End Test Infrastructure
//!
//! Shared fixtures for the integration tests in `tests/`:
//!
//! - **Fixtures**: temporary output directories and config files
//! - **Determinism**: hashing helpers for byte-identical output checks
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pcmlab-tests
//! ```

pub mod determinism;
pub mod fixtures;

// Re-export commonly used items
pub use determinism::{compute_hash, hash_dir, verify_determinism, DeterminismResult};
pub use fixtures::{pure_tone, RunFixture};
