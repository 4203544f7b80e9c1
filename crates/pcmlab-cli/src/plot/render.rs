//! Deterministic raster plots.
//!
//! Panels are drawn into an RGB buffer and stacked vertically into a figure.
//! There is no text: each panel autoscales to its data and shows a frame plus
//! the zero axes so shape and sign can be read at a glance.

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use std::io::Write;

/// Figure width in pixels.
pub const FIGURE_WIDTH: u32 = 1024;
/// Height of a single panel in pixels.
pub const PANEL_HEIGHT: u32 = 320;

const MARGIN: usize = 16;

const BACKGROUND_COLOR: [u8; 3] = [32, 32, 32];
const FRAME_COLOR: [u8; 3] = [96, 96, 96];
const AXIS_COLOR: [u8; 3] = [64, 64, 64];
const SEPARATOR_COLOR: [u8; 3] = [16, 16, 16];

/// Trace colors.
pub const BLUE: [u8; 3] = [64, 192, 255];
pub const RED: [u8; 3] = [255, 96, 80];
pub const GREEN: [u8; 3] = [96, 220, 96];

/// How a panel's points are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotStyle {
    /// Consecutive points joined by straight segments.
    Line,
    /// A vertical stem from the zero line to each point, with a marker.
    Stem,
}

/// One x/y trace drawn in its own panel.
#[derive(Debug, Clone, Copy)]
pub struct Panel<'a> {
    /// Horizontal coordinates.
    pub xs: &'a [f64],
    /// Vertical coordinates, aligned with `xs`.
    pub ys: &'a [f64],
    /// Drawing style.
    pub style: PlotStyle,
    /// Trace color.
    pub color: [u8; 3],
}

impl<'a> Panel<'a> {
    /// A line panel.
    pub fn line(xs: &'a [f64], ys: &'a [f64], color: [u8; 3]) -> Self {
        Self {
            xs,
            ys,
            style: PlotStyle::Line,
            color,
        }
    }

    /// A stem panel.
    pub fn stem(xs: &'a [f64], ys: &'a [f64], color: [u8; 3]) -> Self {
        Self {
            xs,
            ys,
            style: PlotStyle::Stem,
            color,
        }
    }

    fn finite_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs
            .iter()
            .zip(self.ys)
            .map(|(&x, &y)| (x, y))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    }
}

/// An RGB pixel buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Creates a canvas filled with the background color.
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as usize, height as usize);
        let mut pixels = Vec::with_capacity(w * h * 3);
        for _ in 0..w * h {
            pixels.extend_from_slice(&BACKGROUND_COLOR);
        }
        Self {
            width: w,
            height: h,
            pixels,
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width as u32
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height as u32
    }

    /// Raw RGB bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 3;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }

    fn set(&mut self, x: i64, y: i64, color: [u8; 3]) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 3;
        self.pixels[idx..idx + 3].copy_from_slice(&color);
    }

    fn hline(&mut self, x0: usize, x1: usize, y: usize, color: [u8; 3]) {
        for x in x0..=x1 {
            self.set(x as i64, y as i64, color);
        }
    }

    fn vline(&mut self, x: usize, y0: usize, y1: usize, color: [u8; 3]) {
        for y in y0..=y1 {
            self.set(x as i64, y as i64, color);
        }
    }

    /// Bresenham line between two pixel coordinates.
    fn line(&mut self, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: [u8; 3]) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn marker(&mut self, (x, y): (i64, i64), color: [u8; 3]) {
        for oy in -1..=1 {
            for ox in -1..=1 {
                self.set(x + ox, y + oy, color);
            }
        }
    }
}

/// Data range of one axis, never empty.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Range {
    min: f64,
    max: f64,
}

impl Range {
    fn of(values: impl Iterator<Item = f64>, include_zero: bool) -> Self {
        let (mut min, mut max) = if include_zero {
            (0.0, 0.0)
        } else {
            (f64::INFINITY, f64::NEG_INFINITY)
        };
        for v in values {
            min = min.min(v);
            max = max.max(v);
        }
        if min > max {
            return Self { min: -1.0, max: 1.0 };
        }
        if min == max {
            return Self {
                min: min - 0.5,
                max: max + 0.5,
            };
        }
        Self { min, max }
    }

    fn padded(self, fraction: f64) -> Self {
        let pad = (self.max - self.min) * fraction;
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// Maps `v` onto `[0, span]`.
    fn project(&self, v: f64, span: usize) -> f64 {
        (v - self.min) / (self.max - self.min) * span as f64
    }
}

/// Draws `panel` into the horizontal band starting at row `top`.
fn draw_panel(canvas: &mut Canvas, panel: &Panel<'_>, top: usize, height: usize) {
    let left = MARGIN;
    let right = canvas.width - 1 - MARGIN;
    let upper = top + MARGIN;
    let lower = top + height - 1 - MARGIN;
    let plot_w = right - left;
    let plot_h = lower - upper;

    let x_range = Range::of(panel.finite_points().map(|(x, _)| x), false);
    let y_range = Range::of(panel.finite_points().map(|(_, y)| y), true).padded(0.05);

    let to_px = |x: f64, y: f64| -> (i64, i64) {
        let px = left as f64 + x_range.project(x, plot_w);
        // y grows downward
        let py = lower as f64 - y_range.project(y, plot_h);
        (px.round() as i64, py.round() as i64)
    };

    // frame
    canvas.hline(left, right, upper, FRAME_COLOR);
    canvas.hline(left, right, lower, FRAME_COLOR);
    canvas.vline(left, upper, lower, FRAME_COLOR);
    canvas.vline(right, upper, lower, FRAME_COLOR);

    // zero axes
    let (_, zero_y) = to_px(x_range.min, 0.0);
    canvas.hline(left + 1, right - 1, zero_y as usize, AXIS_COLOR);
    if x_range.contains(0.0) && x_range.min < 0.0 {
        let (zero_x, _) = to_px(0.0, 0.0);
        canvas.vline(zero_x as usize, upper + 1, lower - 1, AXIS_COLOR);
    }

    match panel.style {
        PlotStyle::Line => {
            let mut previous: Option<(i64, i64)> = None;
            for (x, y) in panel.xs.iter().zip(panel.ys) {
                if !(x.is_finite() && y.is_finite()) {
                    previous = None;
                    continue;
                }
                let point = to_px(*x, *y);
                match previous {
                    Some(p) => canvas.line(p, point, panel.color),
                    None => canvas.set(point.0, point.1, panel.color),
                }
                previous = Some(point);
            }
        }
        PlotStyle::Stem => {
            for (x, y) in panel.finite_points() {
                let point = to_px(x, y);
                canvas.line((point.0, zero_y), point, panel.color);
                canvas.marker(point, panel.color);
            }
        }
    }
}

/// Renders panels stacked top to bottom into one canvas.
pub fn render_panels(panels: &[Panel<'_>]) -> Canvas {
    let count = panels.len().max(1);
    let panel_h = PANEL_HEIGHT as usize;
    let mut canvas = Canvas::new(FIGURE_WIDTH, PANEL_HEIGHT * count as u32);

    for (i, panel) in panels.iter().enumerate() {
        let top = i * panel_h;
        draw_panel(&mut canvas, panel, top, panel_h);
        if i > 0 {
            let last = canvas.width - 1;
            canvas.hline(0, last, top, SEPARATOR_COLOR);
        }
    }

    canvas
}

/// Encodes a canvas as PNG with fixed settings.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>, png::EncodingError> {
    let mut buffer = Vec::new();
    encode_png_to_writer(canvas, &mut buffer)?;
    Ok(buffer)
}

/// Encodes a canvas as PNG to a writer.
pub fn encode_png_to_writer<W: Write>(
    canvas: &Canvas,
    writer: W,
) -> Result<(), png::EncodingError> {
    let mut encoder = Encoder::new(writer, canvas.width(), canvas.height());
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    // Use fixed compression settings for determinism
    encoder.set_compression(Compression::Default);
    encoder.set_filter(FilterType::NoFilter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(canvas.pixels())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_range_includes_zero() {
        let range = Range::of([2.0, 3.0].into_iter(), true);
        assert_eq!(range, Range { min: 0.0, max: 3.0 });
    }

    #[test]
    fn test_range_degenerate() {
        assert_eq!(
            Range::of([4.0].into_iter(), false),
            Range { min: 3.5, max: 4.5 }
        );
        assert_eq!(
            Range::of(std::iter::empty(), false),
            Range { min: -1.0, max: 1.0 }
        );
    }

    #[test]
    fn test_canvas_size() {
        let xs = [0.0, 1.0];
        let ys = [0.0, 1.0];
        let canvas = render_panels(&[Panel::line(&xs, &ys, BLUE), Panel::stem(&xs, &ys, RED)]);
        assert_eq!(canvas.width(), FIGURE_WIDTH);
        assert_eq!(canvas.height(), 2 * PANEL_HEIGHT);
        assert_eq!(canvas.pixels().len(), (FIGURE_WIDTH * 2 * PANEL_HEIGHT * 3) as usize);
    }

    #[test]
    fn test_line_reaches_corners() {
        // both endpoints land on the frame columns
        let xs = [0.0, 1.0];
        let ys = [0.0, 1.0];
        let canvas = render_panels(&[Panel::line(&xs, &ys, BLUE)]);
        let left = MARGIN;
        let right = FIGURE_WIDTH as usize - 1 - MARGIN;
        let colored = |x: usize| {
            (0..PANEL_HEIGHT as usize).any(|y| canvas.pixel(x, y) == Some(BLUE))
        };
        assert!(colored(left));
        assert!(colored(right));
    }

    #[test]
    fn test_stem_draws_markers() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [1.0, -1.0, 0.5];
        let canvas = render_panels(&[Panel::stem(&xs, &ys, RED)]);
        let count = canvas
            .pixels()
            .chunks(3)
            .filter(|p| *p == RED.as_slice())
            .count();
        assert!(count > 9);
    }

    #[test]
    fn test_non_finite_points_are_skipped() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [f64::NAN, f64::INFINITY, f64::NAN];
        let canvas = render_panels(&[Panel::line(&xs, &ys, GREEN)]);
        assert!(!canvas.pixels().chunks(3).any(|p| p == GREEN.as_slice()));
    }

    #[test]
    fn test_empty_panel_renders() {
        let canvas = render_panels(&[Panel::line(&[], &[], BLUE)]);
        let png = encode_png(&canvas).unwrap();
        assert_eq!(&png[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let xs: Vec<f64> = (0..500).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| (x * 0.05).sin()).collect();
        let a = encode_png(&render_panels(&[Panel::line(&xs, &ys, BLUE)])).unwrap();
        let b = encode_png(&render_panels(&[Panel::line(&xs, &ys, BLUE)])).unwrap();
        assert_eq!(a, b);
    }
}
