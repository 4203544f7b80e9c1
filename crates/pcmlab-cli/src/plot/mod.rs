//! PNG figures for pipeline runs.

pub mod figures;
pub mod render;

pub use figures::{render_figures, sampled_figure_name, write_figures, Figure};
pub use render::{encode_png, render_panels, Canvas, Panel, PlotStyle};
