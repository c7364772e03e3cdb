pub mod camera;
pub mod png;
pub mod window;

use crate::error::Result;
use crate::figure::{SurfaceFigure, TrajectoryFigure};
use std::path::PathBuf;

/// A built figure, ready for one of the drawing backends.
#[derive(Debug, Clone)]
pub enum Figure {
    Trajectory(TrajectoryFigure),
    Surface(SurfaceFigure),
}

/// Where a figure ends up.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Blocking interactive window
    Window,
    Png(PathBuf),
}

/// Draw `figure` to `output`. With [`Output::Window`] this returns once the window is closed.
pub fn render(figure: Figure, title: &str, output: &Output) -> Result<()> {
    match (output, figure) {
        (Output::Window, figure) => window::show(figure, title),
        (Output::Png(path), Figure::Trajectory(figure)) => png::save_trajectory(&figure, path),
        (Output::Png(path), Figure::Surface(figure)) => png::save_surface(&figure, path),
    }
}
