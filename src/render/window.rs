use crate::colormap;
use crate::config::ThermalMarker;
use crate::constants::{MARKER_RGB, THERMAL_RGB, TRAJECTORY_RGB};
use crate::error::{PlotError, Result};
use crate::figure::{SurfaceFigure, TrajectoryFigure};
use crate::render::Figure;
use crate::render::camera::{CUBE_AXES, CUBE_ORIGIN, OrbitCamera, project_surface};
use egui::{Align2, Color32, FontId, Mesh, Pos2, Rect, Sense, Shape, Stroke};
use egui_plot::{Line, MarkerShape, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Text};
use glam::{DVec2, DVec3};
use tracing::info;

const MARKER_RADIUS: f32 = 6.0;
const COLORBAR_STEPS: usize = 64;

fn color32((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

fn plot_points(points: &[DVec2]) -> PlotPoints {
    PlotPoints::from(points.iter().map(|p| [p.x, p.y]).collect::<Vec<[f64; 2]>>())
}

/// Open a native window showing `figure` and block until it is closed.
pub fn show(figure: Figure, title: &str) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 900.0])
            .with_title(title),
        ..Default::default()
    };

    info!(title, "opening plot window");
    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(FigureApp::new(figure)))),
    )
    .map_err(|e| PlotError::Render(format!("window error: {}", e)))
}

struct FigureApp {
    figure: Figure,
    camera: OrbitCamera,
}

impl FigureApp {
    fn new(figure: Figure) -> Self {
        Self {
            figure,
            camera: OrbitCamera::default(),
        }
    }
}

impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(Color32::WHITE).inner_margin(12.0))
            .show(ctx, |ui| match &self.figure {
                Figure::Trajectory(figure) => draw_trajectory(ui, figure),
                Figure::Surface(figure) => draw_surface(ui, figure, &mut self.camera),
            });
    }
}

/// The figure's square axis range. Set every frame, so data outside it is clipped.
fn fixed_bounds(figure: &TrajectoryFigure) -> PlotBounds {
    let (lo, hi) = figure.bounds();
    PlotBounds::from_min_max([lo.x, lo.y], [hi.x, hi.y])
}

fn marker_shape(marker: ThermalMarker) -> MarkerShape {
    match marker {
        ThermalMarker::Circle => MarkerShape::Circle,
        ThermalMarker::Cross => MarkerShape::Cross,
    }
}

fn draw_trajectory(ui: &mut egui::Ui, figure: &TrajectoryFigure) {
    // square widget, square bounds: equal aspect
    Plot::new("trajectory_plot")
        .view_aspect(1.0)
        .x_axis_label(figure.x_label.clone())
        .y_axis_label(figure.y_label.clone())
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(fixed_bounds(figure));
            plot_ui.line(Line::new(plot_points(&figure.path)).color(color32(TRAJECTORY_RGB)));

            for annotation in &figure.annotations {
                plot_ui.points(
                    Points::new(plot_points(&[annotation.marker]))
                        .shape(MarkerShape::Cross)
                        .radius(MARKER_RADIUS)
                        .color(color32(MARKER_RGB)),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(annotation.text_anchor.x, annotation.text_anchor.y),
                        annotation.text.clone(),
                    )
                    .anchor(Align2::LEFT_BOTTOM)
                    .color(color32(MARKER_RGB)),
                );
            }

            if !figure.thermals.is_empty() {
                plot_ui.points(
                    Points::new(plot_points(&figure.thermals))
                        .shape(marker_shape(figure.thermal_marker))
                        .radius(MARKER_RADIUS)
                        .color(color32(THERMAL_RGB)),
                );
            }

            plot_ui.line(
                Line::new(plot_points(&figure.boundary_outline())).color(color32(MARKER_RGB)),
            );
        });
}

fn draw_surface(ui: &mut egui::Ui, figure: &SurfaceFigure, camera: &mut OrbitCamera) {
    ui.vertical_centered(|ui| {
        ui.heading(egui::RichText::new(figure.title.as_str()).color(Color32::BLACK));
    });

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
    if response.dragged() {
        let drag = response.drag_delta();
        camera.orbit(DVec2::new(drag.x as f64, drag.y as f64));
    }

    let rect = response.rect;
    let plot_rect = Rect::from_min_max(rect.min, Pos2::new(rect.max.x - 90.0, rect.max.y));
    let scale = (plot_rect.width().min(plot_rect.height()) * 0.32) as f64;
    let center = plot_rect.center();
    let to_screen = |p: DVec2| {
        Pos2::new(center.x + (p.x * scale) as f32, center.y - (p.y * scale) as f32)
    };

    let mut mesh = Mesh::default();
    for triangle in project_surface(figure, camera) {
        let color = color32(triangle.color);
        let base = mesh.vertices.len() as u32;
        for corner in triangle.corners {
            mesh.colored_vertex(to_screen(corner), color);
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }

    // axes along the back edges of the unit cube
    let project = |p: DVec3| to_screen(camera.project(p).truncate());
    let (lo, hi) = figure.bounds();
    let axis_stroke = Stroke::new(1.0, Color32::DARK_GRAY);
    let font = FontId::proportional(14.0);
    let labels = [
        (figure.x_label.as_str(), lo.x, hi.x),
        (figure.y_label.as_str(), lo.y, hi.y),
        ("", lo.z, hi.z),
    ];
    for (end, (label, min, max)) in CUBE_AXES.into_iter().zip(labels) {
        let a = project(CUBE_ORIGIN);
        let b = project(end);
        painter.line_segment([a, b], axis_stroke);
        let tick = Color32::DARK_GRAY;
        painter.text(a + (b - a) * 0.08, Align2::RIGHT_TOP, format!("{:.1}", min), font.clone(), tick);
        painter.text(b, Align2::LEFT_TOP, format!("{:.1}", max), font.clone(), tick);
        if !label.is_empty() {
            let mid = project((CUBE_ORIGIN + end) * 0.5);
            painter.text(mid, Align2::RIGHT_TOP, label, font.clone(), Color32::BLACK);
        }
    }
    painter.add(Shape::mesh(mesh));

    draw_colorbar(&painter, rect, lo.z, hi.z, &font);
}

fn draw_colorbar(painter: &egui::Painter, rect: Rect, min: f64, max: f64, font: &FontId) {
    let bar = Rect::from_min_max(
        Pos2::new(rect.max.x - 70.0, rect.center().y - 150.0),
        Pos2::new(rect.max.x - 50.0, rect.center().y + 150.0),
    );
    let step = bar.height() / COLORBAR_STEPS as f32;
    for i in 0..COLORBAR_STEPS {
        let v = (i as f64 + 0.5) / COLORBAR_STEPS as f64;
        let y_bottom = bar.max.y - i as f32 * step;
        let cell = Rect::from_min_max(
            Pos2::new(bar.min.x, y_bottom - step),
            Pos2::new(bar.max.x, y_bottom),
        );
        painter.rect_filled(cell, 0.0, color32(colormap::jet(v)));
    }
    painter.rect_stroke(bar, 0.0, Stroke::new(1.0, Color32::DARK_GRAY));
    painter.text(
        Pos2::new(bar.max.x + 4.0, bar.min.y),
        Align2::LEFT_CENTER,
        format!("{:.2}", max),
        font.clone(),
        Color32::BLACK,
    );
    painter.text(
        Pos2::new(bar.max.x + 4.0, bar.max.y),
        Align2::LEFT_CENTER,
        format!("{:.2}", min),
        font.clone(),
        Color32::BLACK,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrajectoryView;
    use crate::model::{ThermalRecord, Trajectory, TrajectorySample};

    #[test]
    fn test_plot_bounds_stay_fixed() {
        let mut fields = vec![0.0; 11];
        fields[0] = 2000.0;
        fields[1] = -1800.0;
        let trajectory = Trajectory::new(vec![TrajectorySample::new(fields).unwrap()]);
        let thermals = [ThermalRecord { x: -1700.0, y: 1600.0, t_birth: 0.0, lifespan: 1.0 }];
        let figure = TrajectoryFigure::new(&trajectory, &thermals, &TrajectoryView::final_state());

        let bounds = fixed_bounds(&figure);
        assert_eq!(bounds.min(), [-1500.0, -1500.0]);
        assert_eq!(bounds.max(), [1500.0, 1500.0]);
    }

    #[test]
    fn test_marker_shape_follows_view() {
        assert!(matches!(marker_shape(ThermalMarker::Circle), MarkerShape::Circle));
        assert!(matches!(marker_shape(ThermalMarker::Cross), MarkerShape::Cross));
    }
}
