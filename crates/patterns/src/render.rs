//! Pure evaluation of a `BackgroundsState` into an ordered draw-primitive
//! sequence. Same state and canvas size always yield the same sequence; the
//! pseudo-random point layouts live in the state and are never re-rolled
//! here. Primitives follow the painter's algorithm: later entries draw over
//! earlier ones, no z-sorting.
//!
//! Types:
//!
//! - `CanvasSize` is the target surface in physical pixels.
//! - `Brush` describes solid, linear-gradient, and radial-gradient fills.
//! - `DrawPrimitive` is the closed vocabulary the host painter consumes:
//!   full-canvas rects, circles, and closed filled paths.
//!
//! Functions:
//!
//! - `render` emits the base-color rect, the selected pattern's primitives in
//!   recipe order, and the vignette overlay last when enabled.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::state::{BackgroundsState, PatternType};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileMode {
    Clamp,
    Mirror,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Brush {
    Solid {
        color: Rgba,
    },
    LinearGradient {
        colors: Vec<Rgba>,
        start: [f32; 2],
        end: [f32; 2],
        tile: TileMode,
    },
    RadialGradient {
        colors: Vec<Rgba>,
        center: [f32; 2],
        radius: f32,
        tile: TileMode,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "primitive", rename_all = "kebab-case")]
pub enum DrawPrimitive {
    /// Full-canvas rectangle filled with `brush`.
    Rect { brush: Brush },
    Circle {
        center: [f32; 2],
        radius: f32,
        brush: Brush,
    },
    /// Closed polyline filled with a solid color.
    Path { points: Vec<[f32; 2]>, color: Rgba },
}

/// Evaluates the selected pattern against the canvas. Emission order is
/// fixed: base color, pattern recipe, vignette (when enabled).
pub fn render(state: &BackgroundsState, size: CanvasSize) -> Vec<DrawPrimitive> {
    let w = size.width;
    let h = size.height;
    let mut out = Vec::new();

    out.push(DrawPrimitive::Rect {
        brush: Brush::Solid {
            color: state.base_color(),
        },
    });

    match state.pattern_type {
        PatternType::SoftMesh => soft_mesh(state, w, h, &mut out),
        PatternType::Aurora => aurora(state, w, h, &mut out),
        PatternType::Voronoi => voronoi(state, w, h, &mut out),
        PatternType::Geometric => geometric(state, w, h, &mut out),
        PatternType::Waves => waves(state, w, h, &mut out),
        PatternType::PerlinNoise => perlin_noise(state, w, h, &mut out),
    }

    if state.vignette_enabled {
        out.push(DrawPrimitive::Rect {
            brush: Brush::RadialGradient {
                colors: vec![
                    Rgba::TRANSPARENT,
                    Rgba::BLACK.with_alpha(state.vignette_strength),
                ],
                center: [w * 0.5, h * 0.4],
                radius: w * 1.2,
                tile: TileMode::Clamp,
            },
        });
    }

    out
}

/// One clamped radial-gradient rect per blob, blob color fading to the
/// shared gradient end color.
fn soft_mesh(state: &BackgroundsState, w: f32, h: f32, out: &mut Vec<DrawPrimitive>) {
    for blob in &state.blobs {
        out.push(DrawPrimitive::Rect {
            brush: Brush::RadialGradient {
                colors: vec![blob.color(), state.gradient_end_color()],
                center: [w * blob.position_x, h * blob.position_y],
                radius: w * blob.radius * state.pattern_scale,
                tile: TileMode::Clamp,
            },
        });
    }
}

/// Five mirrored diagonal bands built from the first three blobs' colors.
fn aurora(state: &BackgroundsState, w: f32, h: f32, out: &mut Vec<DrawPrimitive>) {
    for i in 0..5 {
        let offset = i as f32 * 0.2;
        let mut colors: Vec<Rgba> = state
            .blobs
            .iter()
            .take(3)
            .map(|blob| {
                blob.color().with_alpha(
                    blob.alpha * state.aurora_alpha_multiplier * state.pattern_intensity,
                )
            })
            .collect();
        colors.push(state.gradient_end_color());
        out.push(DrawPrimitive::Rect {
            brush: Brush::LinearGradient {
                colors,
                start: [w * offset, 0.0],
                end: [w * (1.0 - offset), h],
                tile: TileMode::Mirror,
            },
        });
    }
}

/// Gradient-filled cell per geometric point; the brush radius is tighter
/// than the circle so cells overlap with soft edges.
fn voronoi(state: &BackgroundsState, w: f32, h: f32, out: &mut Vec<DrawPrimitive>) {
    for point in &state.geometric_points {
        let center = [w * point.x, h * point.y];
        out.push(DrawPrimitive::Circle {
            center,
            radius: w * 0.2 * point.size * state.pattern_scale,
            brush: Brush::RadialGradient {
                colors: vec![
                    point
                        .color
                        .with_alpha(state.pattern_intensity * state.voronoi_alpha_multiplier),
                    state.gradient_end_color(),
                ],
                center,
                radius: w * 0.15 * point.size * state.pattern_scale,
                tile: TileMode::Clamp,
            },
        });
    }
}

/// Solid circles pushed off their anchor by a per-index rotation step.
fn geometric(state: &BackgroundsState, w: f32, h: f32, out: &mut Vec<DrawPrimitive>) {
    for (index, point) in state.geometric_points.iter().enumerate() {
        let angle = state.pattern_rotation + index as f32 * 15.0;
        let rad = angle * PI / 180.0;
        out.push(DrawPrimitive::Circle {
            center: [w * point.x + rad.cos() * 20.0, h * point.y + rad.sin() * 20.0],
            radius: w * 0.1 * point.size * state.pattern_scale,
            brush: Brush::Solid {
                color: point
                    .color
                    .with_alpha(state.pattern_intensity * state.geometric_alpha_multiplier),
            },
        });
    }
}

/// Six horizontal bands with a sine-traced top edge, sampled every 50 px,
/// each closed down to the canvas bottom and filled with a cycling blob
/// color.
fn waves(state: &BackgroundsState, w: f32, h: f32, out: &mut Vec<DrawPrimitive>) {
    let phase = state.pattern_rotation / 60.0;
    for i in 0..6 {
        let y_offset = h * i as f32 / 6.0;
        let mut points = vec![[0.0, y_offset]];
        let mut x = 0i64;
        while x <= w as i64 {
            let wave = ((x as f32 / w) * 4.0 * PI + phase).sin() * 50.0 * state.pattern_scale;
            points.push([x as f32, y_offset + wave]);
            x += 50;
        }
        let final_wave = (4.0 * PI + phase).sin() * 50.0 * state.pattern_scale;
        points.push([w, y_offset + final_wave]);
        points.push([w, h]);
        points.push([0.0, h]);

        let blob = &state.blobs[i % state.blobs.len()];
        out.push(DrawPrimitive::Path {
            points,
            color: blob
                .color()
                .with_alpha(state.pattern_intensity * state.waves_alpha_multiplier),
        });
    }
}

/// Deterministic modular-arithmetic scatter. The layout constants (37, 73,
/// 13) are load-bearing for visual parity: this is intentionally not real
/// Perlin noise, and the loop is inclusive (31 circles).
fn perlin_noise(state: &BackgroundsState, w: f32, h: f32, out: &mut Vec<DrawPrimitive>) {
    for i in 0..=30u32 {
        let x = (i * 37 % 100) as f32 / 100.0;
        let y = (i * 73 % 100) as f32 / 100.0;
        let size = ((i * 13 % 50) + 30) as f32 * state.pattern_scale;
        let blob = &state.blobs[i as usize % state.blobs.len()];
        out.push(DrawPrimitive::Circle {
            center: [w * x, h * y],
            radius: size,
            brush: Brush::Solid {
                color: blob
                    .color()
                    .with_alpha(state.pattern_intensity * state.perlin_noise_alpha_multiplier),
            },
        });
    }
}
