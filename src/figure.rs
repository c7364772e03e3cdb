//! Backend independent description of what gets drawn.
//!
//! Figures are plain data built from filtered tables. The window and PNG
//! backends in [`crate::render`] only turn them into pixels.

use crate::colormap;
use crate::config::{ThermalMarker, TrajectoryView};
use crate::constants::{ANNOTATION_OFFSET_M, CIRCLE_SEGMENTS, UPDRAFT_TITLE};
use crate::error::{PlotError, Result};
use crate::model::{ThermalRecord, Trajectory, WindFieldSample};
use delaunator::{triangulate, Point};
use glam::{DVec2, DVec3};
use std::f64::consts::TAU;
use tracing::debug;

/// A cross marker with a text label next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub marker: DVec2,
    pub text_anchor: DVec2,
    pub text: String,
}

impl Annotation {
    fn at(marker: DVec2, text: &str) -> Self {
        Self {
            marker,
            text_anchor: marker + DVec2::splat(ANNOTATION_OFFSET_M),
            text: text.to_string(),
        }
    }
}

/// Unfilled circle marking the edge of the flight zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryCircle {
    pub center: DVec2,
    pub radius: f64,
}

impl BoundaryCircle {
    /// Closed polyline approximating the circle; first and last points coincide.
    pub fn outline(&self, segments: usize) -> Vec<DVec2> {
        let segments = segments.max(3);
        (0..=segments)
            .map(|i| {
                let angle = TAU * i as f64 / segments as f64;
                self.center + DVec2::new(angle.cos(), angle.sin()) * self.radius
            })
            .collect()
    }
}

/// Flight path over the thermal positions.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryFigure {
    pub path: Vec<DVec2>,
    pub annotations: Vec<Annotation>,
    pub thermals: Vec<DVec2>,
    pub thermal_marker: ThermalMarker,
    pub boundary: BoundaryCircle,
    /// Plot spans [-axis_limit, axis_limit] on both axes
    pub axis_limit: f64,
    pub x_label: String,
    pub y_label: String,
}

impl TrajectoryFigure {
    pub fn new(trajectory: &Trajectory, thermals: &[ThermalRecord], view: &TrajectoryView) -> Self {
        let path = trajectory.positions();

        let mut annotations = Vec::new();
        if view.annotate_ends {
            if let (Some(first), Some(last)) = (trajectory.first(), trajectory.last()) {
                annotations.push(Annotation::at(first.position(), "Start"));
                annotations.push(Annotation::at(last.position(), "End"));
            }
        }

        debug!(
            points = path.len(),
            thermals = thermals.len(),
            axis_limit = view.axis_limit,
            "built trajectory figure"
        );

        Self {
            path,
            annotations,
            thermals: thermals.iter().map(ThermalRecord::position).collect(),
            thermal_marker: view.thermal_marker,
            boundary: BoundaryCircle {
                center: DVec2::ZERO,
                radius: view.boundary_radius,
            },
            axis_limit: view.axis_limit,
            x_label: "x".to_string(),
            y_label: "y".to_string(),
        }
    }

    pub fn bounds(&self) -> (DVec2, DVec2) {
        (DVec2::splat(-self.axis_limit), DVec2::splat(self.axis_limit))
    }

    pub fn boundary_outline(&self) -> Vec<DVec2> {
        self.boundary.outline(CIRCLE_SEGMENTS)
    }
}

/// Triangulated updraft surface: z and colour both follow the updraft value.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceFigure {
    pub vertices: Vec<DVec3>,
    pub triangles: Vec<[usize; 3]>,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl SurfaceFigure {
    /// Delaunay triangulate the (x, y) positions of one wind field time slice.
    ///
    /// Fails with [`PlotError::EmptySurface`] when the samples do not span a
    /// single triangle (fewer than three points, or all collinear).
    pub fn build(samples: &[WindFieldSample], slice_time: f64) -> Result<Self> {
        let points: Vec<Point> = samples.iter().map(|s| Point { x: s.x, y: s.y }).collect();
        let triangulation = triangulate(&points);

        let triangles: Vec<[usize; 3]> = triangulation
            .triangles
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();
        if triangles.is_empty() {
            return Err(PlotError::EmptySurface { t: slice_time });
        }

        debug!(
            vertices = samples.len(),
            triangles = triangles.len(),
            "triangulated updraft surface"
        );

        Ok(Self {
            vertices: samples.iter().map(|s| DVec3::new(s.x, s.y, s.updraft)).collect(),
            triangles,
            title: UPDRAFT_TITLE.to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
        })
    }

    /// Axis aligned bounds of the vertices, `(min, max)`.
    pub fn bounds(&self) -> (DVec3, DVec3) {
        self.vertices.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(lo, hi), v| (lo.min(*v), hi.max(*v)),
        )
    }

    /// Colour of a triangle, from the mean updraft of its corners.
    pub fn triangle_color(&self, triangle: &[usize; 3]) -> (u8, u8, u8) {
        let (lo, hi) = self.bounds();
        let mean = triangle.iter().map(|&i| self.vertices[i].z).sum::<f64>() / 3.0;
        colormap::jet(colormap::normalize(mean, lo.z, hi.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrajectorySample;
    use approx::assert_abs_diff_eq;

    fn trajectory(points: &[(f64, f64, f64)]) -> Trajectory {
        Trajectory::new(
            points
                .iter()
                .map(|&(x, y, t)| {
                    let mut fields = vec![0.0; 11];
                    fields[0] = x;
                    fields[1] = y;
                    fields[10] = t;
                    TrajectorySample::new(fields).unwrap()
                })
                .collect(),
        )
    }

    #[test]
    fn test_final_view_annotations() {
        let traj = trajectory(&[(0.0, 0.0, 0.0), (5.0, 5.0, 1.0), (100.0, -20.0, 2.0)]);
        let thermals = [ThermalRecord { x: 300.0, y: 400.0, t_birth: 0.0, lifespan: 10.0 }];
        let figure = TrajectoryFigure::new(&traj, &thermals, &TrajectoryView::final_state());

        assert_eq!(figure.path.len(), 3);
        assert_eq!(figure.annotations.len(), 2);
        assert_eq!(figure.annotations[0].text, "Start");
        assert_eq!(figure.annotations[0].text_anchor, DVec2::new(10.0, 10.0));
        assert_eq!(figure.annotations[1].text, "End");
        assert_eq!(figure.annotations[1].marker, DVec2::new(100.0, -20.0));
        assert_eq!(figure.annotations[1].text_anchor, DVec2::new(110.0, -10.0));
        assert_eq!(figure.thermals, vec![DVec2::new(300.0, 400.0)]);
        assert_eq!(figure.thermal_marker, ThermalMarker::Cross);
        assert_eq!(figure.bounds(), (DVec2::splat(-1500.0), DVec2::splat(1500.0)));
        assert_eq!(figure.x_label, "x");
        assert_eq!(figure.y_label, "y");
    }

    #[test]
    fn test_overview_has_no_annotations() {
        let traj = trajectory(&[(0.0, 0.0, 0.0), (5.0, 5.0, 1.0)]);
        let figure = TrajectoryFigure::new(&traj, &[], &TrajectoryView::overview());
        assert!(figure.annotations.is_empty());
        assert_eq!(figure.axis_limit, 1300.0);
        assert_eq!(figure.thermal_marker, ThermalMarker::Circle);
    }

    #[test]
    fn test_bounds_ignore_points_outside_limit() {
        let traj = trajectory(&[(0.0, 0.0, 0.0), (2000.0, -1800.0, 1.0)]);
        let thermals = [ThermalRecord { x: -1700.0, y: 0.0, t_birth: 0.0, lifespan: 10.0 }];
        let figure = TrajectoryFigure::new(&traj, &thermals, &TrajectoryView::final_state());
        assert_eq!(figure.bounds(), (DVec2::splat(-1500.0), DVec2::splat(1500.0)));
    }

    #[test]
    fn test_boundary_outline_radius() {
        let circle = BoundaryCircle { center: DVec2::ZERO, radius: 1200.0 };
        let outline = circle.outline(64);
        assert_eq!(outline.len(), 65);
        for point in &outline {
            assert_abs_diff_eq!(point.length(), 1200.0, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(outline[0].x, outline[64].x, epsilon = 1e-9);
        assert_abs_diff_eq!(outline[0].y, outline[64].y, epsilon = 1e-9);
    }

    #[test]
    fn test_grid_surface() {
        let mut samples = Vec::new();
        for i in 0..4 {
            for j in 0..3 {
                samples.push(WindFieldSample {
                    x: i as f64 * 100.0,
                    y: j as f64 * 100.0,
                    t: 100.0,
                    updraft: (i + j) as f64,
                });
            }
        }
        let surface = SurfaceFigure::build(&samples, 100.0).unwrap();
        // triangles tile the 300 x 200 grid without gaps or overlaps
        let area: f64 = surface
            .triangles
            .iter()
            .map(|&[a, b, c]| {
                let (a, b, c) = (surface.vertices[a], surface.vertices[b], surface.vertices[c]);
                ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2.0
            })
            .sum();
        assert_abs_diff_eq!(area, 60_000.0, epsilon = 1e-6);
        assert_eq!(surface.title, "Updraft velocity[m/s]");

        let (lo, hi) = surface.bounds();
        assert_eq!(lo, DVec3::new(0.0, 0.0, 0.0));
        assert_eq!(hi, DVec3::new(300.0, 200.0, 5.0));
    }

    #[test]
    fn test_degenerate_surface() {
        let samples = [
            WindFieldSample { x: 0.0, y: 0.0, t: 100.0, updraft: 1.0 },
            WindFieldSample { x: 1.0, y: 1.0, t: 100.0, updraft: 1.0 },
        ];
        assert!(matches!(
            SurfaceFigure::build(&samples, 100.0),
            Err(PlotError::EmptySurface { .. })
        ));
        assert!(SurfaceFigure::build(&[], 100.0).is_err());
    }
}
