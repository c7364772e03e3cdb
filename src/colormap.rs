//! The "jet" colour scale used to shade the updraft surface.

use once_cell::sync::Lazy;

const LUT_SIZE: usize = 256;

// (position, value) control points of each channel
const RED: &[(f64, f64)] = &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)];
const GREEN: &[(f64, f64)] = &[
    (0.0, 0.0),
    (0.125, 0.0),
    (0.375, 1.0),
    (0.64, 1.0),
    (0.91, 0.0),
    (1.0, 0.0),
];
const BLUE: &[(f64, f64)] = &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)];

static JET_LUT: Lazy<Vec<(u8, u8, u8)>> = Lazy::new(|| {
    (0..LUT_SIZE)
        .map(|i| {
            let v = i as f64 / (LUT_SIZE - 1) as f64;
            (
                channel_byte(RED, v),
                channel_byte(GREEN, v),
                channel_byte(BLUE, v),
            )
        })
        .collect()
});

fn interpolate(points: &[(f64, f64)], v: f64) -> f64 {
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if v <= x1 {
            let frac = if x1 > x0 { (v - x0) / (x1 - x0) } else { 0.0 };
            return y0 + (y1 - y0) * frac;
        }
    }
    points.last().map(|&(_, y)| y).unwrap_or(0.0)
}

fn channel_byte(points: &[(f64, f64)], v: f64) -> u8 {
    (interpolate(points, v) * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Colour for a value already normalized to [0, 1]; out of range values are clamped.
pub fn jet(v: f64) -> (u8, u8, u8) {
    let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
    let index = (v * (LUT_SIZE - 1) as f64).round() as usize;
    JET_LUT[index]
}

/// Position of `value` inside `[min, max]`. A flat range maps to the middle of the scale.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    }
}
