//! Test fixtures for pipeline runs.

use pcmlab_core::PipelineConfig;
use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary workspace holding a config file and an output directory.
pub struct RunFixture {
    pub root: TempDir,
    pub out_dir: PathBuf,
}

impl RunFixture {
    /// Create a new empty fixture.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let out_dir = root.path().join("results");
        Self { root, out_dir }
    }

    /// Get the fixture root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write a config file and return its path.
    pub fn write_config(&self, config: &PipelineConfig) -> PathBuf {
        let path = self.root.path().join("config.json");
        let json = config.to_json_pretty().expect("Failed to serialize config");
        fs::write(&path, json).expect("Failed to write config");
        path
    }

    /// Write raw JSON as the config file and return its path.
    pub fn write_config_json(&self, json: &str) -> PathBuf {
        let path = self.root.path().join("config.json");
        fs::write(&path, json).expect("Failed to write config");
        path
    }

    /// Path of a file inside the output directory.
    pub fn output(&self, name: &str) -> PathBuf {
        self.out_dir.join(name)
    }
}

impl Default for RunFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// `amplitude * cos(2 pi f0 t)` sampled at `fs` for `n` points.
pub fn pure_tone(f0: f64, fs: f64, n: usize, amplitude: f64) -> Vec<f64> {
    (0..n)
        .map(|i| amplitude * (2.0 * PI * f0 * i as f64 / fs).cos())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_tone_starts_at_amplitude() {
        let tone = pure_tone(1.0, 8.0, 8, 2.0);
        assert_eq!(tone.len(), 8);
        assert_eq!(tone[0], 2.0);
        assert!((tone[4] + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_fixture_writes_config() {
        let fixture = RunFixture::new();
        let path = fixture.write_config(&PipelineConfig::default());
        assert!(path.starts_with(fixture.path()));
        let loaded = PipelineConfig::from_file(&path).unwrap();
        assert_eq!(loaded, PipelineConfig::default());
    }
}
