//! The four pipeline figures.

use anyhow::{Context, Result};
use pcmlab_core::PipelineOutput;
use std::fs;
use std::path::{Path, PathBuf};

use super::render::{encode_png, render_panels, Panel, BLUE, GREEN, RED};

/// A rendered figure.
#[derive(Debug, Clone)]
pub struct Figure {
    /// File name inside the output directory.
    pub file_name: String,
    /// PNG-encoded image.
    pub png_data: Vec<u8>,
    /// BLAKE3 hash of `png_data`.
    pub hash: String,
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
}

impl Figure {
    fn from_panels(file_name: String, panels: &[Panel<'_>]) -> Result<Self> {
        let canvas = render_panels(panels);
        let png_data = encode_png(&canvas)
            .with_context(|| format!("Failed to encode figure: {}", file_name))?;
        let hash = blake3::hash(&png_data).to_hex().to_string();
        Ok(Self {
            file_name,
            png_data,
            hash,
            width: canvas.width(),
            height: canvas.height(),
        })
    }
}

/// File name of the sampled-signal figure for a sampling frequency.
pub fn sampled_figure_name(sampling_frequency: f64) -> String {
    format!("2_sampled_signal_{}hz.png", sampling_frequency)
}

/// Renders all four figures for a pipeline run.
pub fn render_figures(output: &PipelineOutput) -> Result<Vec<Figure>> {
    let analog = &output.analog;
    let sampled = &output.sampled;
    let times = &sampled.series.times;
    let codec = &output.codec;

    Ok(vec![
        Figure::from_panels(
            "1_analog_signal.png".to_string(),
            &[
                Panel::line(&analog.series.times, &analog.series.values, BLUE),
                Panel::line(&analog.spectrum.frequencies, &analog.spectrum.magnitudes, RED),
            ],
        )?,
        Figure::from_panels(
            sampled_figure_name(output.config.sampling_frequency),
            &[
                Panel::stem(times, &sampled.series.values, BLUE),
                Panel::line(&sampled.spectrum.frequencies, &sampled.spectrum.magnitudes, RED),
            ],
        )?,
        Figure::from_panels(
            "3_encoded_decoded.png".to_string(),
            &[
                Panel::line(times, &codec.encoded.compressed, BLUE),
                Panel::line(times, &codec.decoded, GREEN),
            ],
        )?,
        Figure::from_panels(
            "4_quantization_error.png".to_string(),
            &[Panel::line(times, &codec.report.errors, RED)],
        )?,
    ])
}

/// Writes figures into `out_dir`, returning the written paths.
pub fn write_figures(figures: &[Figure], out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create directory: {}", out_dir.display()))?;

    figures
        .iter()
        .map(|figure| {
            let path = out_dir.join(&figure.file_name);
            fs::write(&path, &figure.png_data)
                .with_context(|| format!("Failed to write figure: {}", path.display()))?;
            log::info!("wrote {} ({})", path.display(), &figure.hash[..16]);
            Ok(path)
        })
        .collect()
}
