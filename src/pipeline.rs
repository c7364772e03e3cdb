//! Load → filter → build steps for each view, with inputs passed in explicitly.

use crate::config::{SurfaceView, TrajectoryView};
use crate::error::Result;
use crate::figure::{SurfaceFigure, TrajectoryFigure};
use crate::filter::{apply_cutoff, select_thermals, wind_slice};
use crate::loader::{load_thermals, load_trajectory, load_wind_field};
use crate::model::{ThermalRecord, Trajectory, WindFieldSample};
use std::path::Path;
use tracing::info;

/// Filter already loaded tables and build the 2-D figure.
///
/// With a fixed cutoff, `ActiveAtFinal` picks the thermals alive at the cutoff
/// itself; otherwise at the last sample that survives it.
pub fn prepare_trajectory(
    trajectory: &Trajectory,
    thermals: &[ThermalRecord],
    view: &TrajectoryView,
) -> Result<TrajectoryFigure> {
    let trajectory = apply_cutoff(trajectory, view.cutoff)?;
    let policy = view.thermals.at_cutoff(view.cutoff);
    let active = select_thermals(thermals, policy, &trajectory)?;
    info!(
        samples = trajectory.len(),
        thermals = active.len(),
        "filtered trajectory view"
    );
    Ok(TrajectoryFigure::new(&trajectory, &active, view))
}

pub fn trajectory_figure(
    trajectory_path: &Path,
    thermals_path: &Path,
    view: &TrajectoryView,
) -> Result<TrajectoryFigure> {
    let trajectory = load_trajectory(trajectory_path)?;
    let thermals = load_thermals(thermals_path)?;
    prepare_trajectory(&trajectory, &thermals, view)
}

/// Slice the wind field at the view's time and triangulate it.
pub fn prepare_surface(samples: &[WindFieldSample], view: &SurfaceView) -> Result<SurfaceFigure> {
    let slice = wind_slice(samples, view.slice_time);
    info!(t = view.slice_time, samples = slice.len(), "sliced wind field");
    SurfaceFigure::build(&slice, view.slice_time)
}

pub fn surface_figure(wind_field_path: &Path, view: &SurfaceView) -> Result<SurfaceFigure> {
    let samples = load_wind_field(wind_field_path)?;
    prepare_surface(&samples, view)
}
