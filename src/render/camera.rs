use crate::figure::SurfaceFigure;
use glam::{DMat3, DVec2, DVec3};

/// Orbit camera looking at the origin, orthographic projection.
///
/// Angles follow the usual 3-D axes convention: azimuth about the vertical
/// axis, elevation above the x-y plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub azimuth: f64,
    pub elevation: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            azimuth: (-60.0_f64).to_radians(),
            elevation: 30.0_f64.to_radians(),
        }
    }
}

// radians of rotation per dragged pixel
const ORBIT_SPEED: f64 = 0.01;

impl OrbitCamera {
    /// Screen x, screen y (up) and depth (larger is farther from the viewer).
    pub fn project(&self, p: DVec3) -> DVec3 {
        let r = DMat3::from_rotation_z(-self.azimuth) * p;
        let (sin_el, cos_el) = self.elevation.sin_cos();
        DVec3::new(
            r.x,
            r.z * cos_el + r.y * sin_el,
            r.y * cos_el - r.z * sin_el,
        )
    }

    /// Rotate by a mouse drag, in pixels. Elevation stays within ±90°.
    pub fn orbit(&mut self, drag: DVec2) {
        let limit = std::f64::consts::FRAC_PI_2;
        self.azimuth -= drag.x * ORBIT_SPEED;
        self.elevation = (self.elevation + drag.y * ORBIT_SPEED).clamp(-limit, limit);
    }
}

/// Maps a box of data space onto the [-1, 1] cube, each axis scaled on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitBox {
    center: DVec3,
    half_extent: DVec3,
}

impl UnitBox {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self {
            center: (min + max) * 0.5,
            half_extent: (max - min) * 0.5,
        }
    }

    /// Flat axes collapse to 0.
    pub fn apply(&self, p: DVec3) -> DVec3 {
        let d = p - self.center;
        let scale = |v: f64, h: f64| if h > 0.0 { v / h } else { 0.0 };
        DVec3::new(
            scale(d.x, self.half_extent.x),
            scale(d.y, self.half_extent.y),
            scale(d.z, self.half_extent.z),
        )
    }
}

/// Triangle indices ordered farthest first, for painter's algorithm drawing.
pub fn back_to_front(projected: &[DVec3], triangles: &[[usize; 3]]) -> Vec<usize> {
    let depth = |t: &[usize; 3]| t.iter().map(|&i| projected[i].z).sum::<f64>();
    let mut order: Vec<usize> = (0..triangles.len()).collect();
    order.sort_by(|&a, &b| depth(&triangles[b]).total_cmp(&depth(&triangles[a])));
    order
}

/// Corner the three drawn cube edges start from.
pub const CUBE_ORIGIN: DVec3 = DVec3::splat(-1.0);

/// Far ends of the x, y and z edges of the unit cube, from [`CUBE_ORIGIN`].
pub const CUBE_AXES: [DVec3; 3] = [
    DVec3::new(1.0, -1.0, -1.0),
    DVec3::new(-1.0, 1.0, -1.0),
    DVec3::new(-1.0, -1.0, 1.0),
];

/// A surface triangle after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTriangle {
    /// Screen x and y (up) of each corner, in unit cube space
    pub corners: [DVec2; 3],
    pub color: (u8, u8, u8),
}

/// Project the surface into the unit cube seen by `camera`, farthest triangle first.
///
/// Both backends draw from this list, so placement and draw order come
/// from one projection.
pub fn project_surface(figure: &SurfaceFigure, camera: &OrbitCamera) -> Vec<ScreenTriangle> {
    let (lo, hi) = figure.bounds();
    let unit = UnitBox::new(lo, hi);
    let projected: Vec<DVec3> = figure
        .vertices
        .iter()
        .map(|v| camera.project(unit.apply(*v)))
        .collect();

    back_to_front(&projected, &figure.triangles)
        .into_iter()
        .map(|index| {
            let triangle = &figure.triangles[index];
            ScreenTriangle {
                corners: triangle.map(|i| projected[i].truncate()),
                color: figure.triangle_color(triangle),
            }
        })
        .collect()
}
