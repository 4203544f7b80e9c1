//! Determinism helpers.
//!
//! Identical configurations must produce identical codes, tables and PNG
//! bytes. These helpers hash outputs so runs can be compared cheaply.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// Index of the first run whose hash differed.
    pub first_mismatch: Option<usize>,
}

/// BLAKE3 hex digest of `data`.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Runs `generate` `runs` times and compares the output hashes.
pub fn verify_determinism<F>(generate: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> Vec<u8>,
{
    let hash = compute_hash(&generate());
    let first_mismatch = (1..runs).find(|_| compute_hash(&generate()) != hash);
    DeterminismResult {
        is_deterministic: first_mismatch.is_none(),
        runs,
        hash,
        first_mismatch,
    }
}

/// Hashes every regular file directly inside `dir`, keyed by file name.
pub fn hash_dir(dir: &Path) -> io::Result<BTreeMap<String, String>> {
    let mut hashes = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            let name = entry.file_name().to_string_lossy().into_owned();
            hashes.insert(name, compute_hash(&fs::read(entry.path())?));
        }
    }
    Ok(hashes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_constant_output_is_deterministic() {
        let result = verify_determinism(|| vec![1, 2, 3], 3);
        assert!(result.is_deterministic);
        assert_eq!(result.runs, 3);
        assert_eq!(result.hash, compute_hash(&[1, 2, 3]));
    }

    #[test]
    fn test_changing_output_is_detected() {
        let counter = Cell::new(0u8);
        let result = verify_determinism(
            || {
                counter.set(counter.get() + 1);
                vec![counter.get()]
            },
            3,
        );
        assert!(!result.is_deterministic);
        assert_eq!(result.first_mismatch, Some(1));
    }

    #[test]
    fn test_hash_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let hashes = hash_dir(dir.path()).unwrap();
        assert_eq!(hashes.len(), 1);
        assert_eq!(hashes["a.txt"], compute_hash(b"a"));
    }
}
