use crate::colormap;
use crate::config::ThermalMarker;
use crate::constants::{MARKER_RGB, THERMAL_RGB, TRAJECTORY_RGB};
use crate::error::{PlotError, Result};
use crate::figure::{SurfaceFigure, TrajectoryFigure};
use crate::render::camera::{CUBE_AXES, CUBE_ORIGIN, OrbitCamera, project_surface};
use glam::DVec3;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;
use tracing::info;

const IMAGE_SIZE: (u32, u32) = (900, 900);
const MARKER_SIZE: u32 = 6;
const COLORBAR_WIDTH: u32 = 120;
const COLORBAR_STEPS: i32 = 64;
// half width of the projected unit cube view, leaves room for tick labels
const CUBE_VIEW_EXTENT: f64 = 2.0;

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

/// Write a trajectory figure to a PNG file.
pub fn save_trajectory(figure: &TrajectoryFigure, path: &Path) -> Result<()> {
    draw_trajectory(figure, path).map_err(|e| PlotError::Render(format!("plotting error: {}", e)))?;
    info!(path = %path.display(), "wrote trajectory plot");
    Ok(())
}

/// Write an updraft surface figure to a PNG file.
pub fn save_surface(figure: &SurfaceFigure, path: &Path) -> Result<()> {
    draw_surface(figure, path).map_err(|e| PlotError::Render(format!("plotting error: {}", e)))?;
    info!(path = %path.display(), "wrote updraft surface plot");
    Ok(())
}

fn draw_trajectory(figure: &TrajectoryFigure, path: &Path) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (lo, hi) = figure.bounds();
    // equal label areas on both axes keep the plot square
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 50)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(lo.x..hi.x, lo.y..hi.y)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(figure.x_label.as_str())
        .y_desc(figure.y_label.as_str())
        .draw()?;

    chart.draw_series(LineSeries::new(
        figure.path.iter().map(|p| (p.x, p.y)),
        &rgb(TRAJECTORY_RGB),
    ))?;

    let thermals = figure.thermals.iter().map(|p| (p.x, p.y));
    match figure.thermal_marker {
        ThermalMarker::Circle => chart.draw_series(
            thermals.map(|p| Circle::new(p, MARKER_SIZE, rgb(THERMAL_RGB).filled())),
        )?,
        ThermalMarker::Cross => {
            chart.draw_series(thermals.map(|p| Cross::new(p, MARKER_SIZE, rgb(THERMAL_RGB))))?
        }
    };

    for annotation in &figure.annotations {
        chart.draw_series(std::iter::once(Cross::new(
            (annotation.marker.x, annotation.marker.y),
            MARKER_SIZE,
            rgb(MARKER_RGB),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            annotation.text.clone(),
            (annotation.text_anchor.x, annotation.text_anchor.y),
            ("sans-serif", 16).into_font().color(&rgb(MARKER_RGB)),
        )))?;
    }

    chart.draw_series(LineSeries::new(
        figure.boundary_outline().into_iter().map(|p| (p.x, p.y)),
        &rgb(MARKER_RGB),
    ))?;

    root.present()?;
    Ok(())
}

fn draw_surface(figure: &SurfaceFigure, path: &Path) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(figure.title.as_str(), ("sans-serif", 24))?;
    let (plot_area, bar_area) = root.split_horizontally(IMAGE_SIZE.0 - COLORBAR_WIDTH);

    let (lo, hi) = figure.bounds();
    let camera = OrbitCamera::default();

    // drawn in the camera's screen plane, same projection as the window
    let mut chart = ChartBuilder::on(&plot_area).margin(20).build_cartesian_2d(
        -CUBE_VIEW_EXTENT..CUBE_VIEW_EXTENT,
        -CUBE_VIEW_EXTENT..CUBE_VIEW_EXTENT,
    )?;
    let project = |p: DVec3| {
        let s = camera.project(p);
        (s.x, s.y)
    };

    let tick_font = ("sans-serif", 14).into_font().color(&rgb((64, 64, 64)));
    let label_font = ("sans-serif", 18).into_font();
    let axes = [
        (figure.x_label.as_str(), lo.x, hi.x),
        (figure.y_label.as_str(), lo.y, hi.y),
        ("", lo.z, hi.z),
    ];
    for (end, (label, min, max)) in CUBE_AXES.into_iter().zip(axes) {
        let near = project(CUBE_ORIGIN + (end - CUBE_ORIGIN) * 0.08);
        chart.draw_series(LineSeries::new(
            [project(CUBE_ORIGIN), project(end)],
            &rgb((64, 64, 64)),
        ))?;
        chart.draw_series([
            Text::new(format!("{:.1}", min), near, tick_font.clone()),
            Text::new(format!("{:.1}", max), project(end), tick_font.clone()),
        ])?;
        if !label.is_empty() {
            chart.draw_series(std::iter::once(Text::new(
                label.to_string(),
                project((CUBE_ORIGIN + end) * 0.5),
                label_font.clone(),
            )))?;
        }
    }

    chart.draw_series(project_surface(figure, &camera).into_iter().map(|triangle| {
        let corners: Vec<(f64, f64)> = triangle.corners.iter().map(|c| (c.x, c.y)).collect();
        Polygon::new(corners, rgb(triangle.color).filled())
    }))?;

    draw_colorbar(&bar_area, lo.z, hi.z)?;

    root.present()?;
    Ok(())
}

fn draw_colorbar(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    min: f64,
    max: f64,
) -> std::result::Result<(), Box<dyn Error>> {
    let (_, height) = area.dim_in_pixel();
    let (left, right) = (20, 44);
    let bottom = height as i32 / 2 + 150;
    let step = 300 / COLORBAR_STEPS;
    let top = bottom - COLORBAR_STEPS * step;

    for i in 0..COLORBAR_STEPS {
        let v = (i as f64 + 0.5) / COLORBAR_STEPS as f64;
        let y_bottom = bottom - i * step;
        area.draw(&Rectangle::new(
            [(left, y_bottom - step), (right, y_bottom)],
            rgb(colormap::jet(v)).filled(),
        ))?;
    }
    area.draw(&Rectangle::new([(left, top), (right, bottom)], rgb((64, 64, 64))))?;

    let font = ("sans-serif", 14).into_font();
    area.draw(&Text::new(format!("{:.2}", max), (right + 4, top - 7), font.clone()))?;
    area.draw(&Text::new(format!("{:.2}", min), (right + 4, bottom - 7), font))?;
    Ok(())
}
