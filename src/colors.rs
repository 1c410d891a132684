use crate::interpolate::BlendSpec;
use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Where the "between" frames start and end on the color scale.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorRamp {
    pub ramp_start: f64,
    pub ramp_end: f64,
}

impl Default for ColorRamp {
    fn default() -> Self {
        ColorRamp {
            ramp_start: 0.25,
            ramp_end: 0.75,
        }
    }
}

/// Position in [0, 1] of every output frame on the color scale.
///
/// Frames before path 1 fill `[0, ramp_start)`, path 1 through path 2 span
/// `[ramp_start, ramp_end]` and the frames after path 2 run up to 1.
pub fn color_positions(blend: &BlendSpec, ramp: &ColorRamp) -> Vec<f64> {
    let y1 = ramp.ramp_start;
    let y2 = ramp.ramp_end;
    (0..blend.total())
        .map(|i| {
            if i < blend.before {
                y1 * i as f64 / blend.before as f64
            } else if i <= blend.path2_index() {
                y1 + (i - blend.before) as f64 / (blend.between + 1) as f64 * (y2 - y1)
            } else {
                y2 + (1.0 - y2) * (i - blend.path2_index()) as f64 / blend.after as f64
            }
        })
        .collect()
}

/// Rainbow color map, violet at 0 through red at 1.
pub fn rainbow(y: f64) -> Srgb<f64> {
    let y = y.clamp(0.0, 1.0);
    Srgb::new(
        (2.0 * y - 0.5).abs().min(1.0),
        (PI * y).sin().clamp(0.0, 1.0),
        (PI * y / 2.0).cos().clamp(0.0, 1.0),
    )
}

pub fn path_colors(blend: &BlendSpec, ramp: &ColorRamp) -> Vec<Srgb<f64>> {
    color_positions(blend, ramp).into_iter().map(rainbow).collect()
}

pub fn to_hex(color: Srgb<f64>) -> String {
    let rgb: Srgb<u8> = color.into_format();
    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}
