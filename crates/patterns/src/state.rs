//! Immutable state record for the background designer plus the default
//! construction helpers the reducer leans on. Every intent produces a new
//! `BackgroundsState` value; nothing here mutates in place.
//!
//! Types:
//!
//! - `PatternType` enumerates the six procedural background algorithms.
//! - `GradientBlob` is a positioned radial color influence used by the
//!   gradient-driven patterns, addressed by id.
//! - `GeometricPoint` is a positioned, colored, sized point used by the
//!   cell/shape patterns, regenerated in bulk rather than edited.
//! - `BackgroundsState` carries the full parameter set, the vignette
//!   settings, and the UI flags the presentation layer reads.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternType {
    SoftMesh,
    Aurora,
    Voronoi,
    Geometric,
    Waves,
    PerlinNoise,
}

impl PatternType {
    pub const ALL: [PatternType; 6] = [
        PatternType::SoftMesh,
        PatternType::Aurora,
        PatternType::Voronoi,
        PatternType::Geometric,
        PatternType::Waves,
        PatternType::PerlinNoise,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            PatternType::SoftMesh => "Soft Mesh",
            PatternType::Aurora => "Aurora",
            PatternType::Voronoi => "Voronoi",
            PatternType::Geometric => "Geometric",
            PatternType::Waves => "Waves",
            PatternType::PerlinNoise => "Perlin Noise",
        }
    }
}

impl std::fmt::Display for PatternType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBlob {
    pub id: u32,
    pub name: String,
    pub color_red: f32,
    pub color_green: f32,
    pub color_blue: f32,
    pub alpha: f32,
    pub position_x: f32,
    pub position_y: f32,
    pub radius: f32,
}

impl GradientBlob {
    pub fn color(&self) -> Rgba {
        Rgba::new(self.color_red, self.color_green, self.color_blue, self.alpha)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometricPoint {
    pub x: f32,
    pub y: f32,
    pub color: Rgba,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundsState {
    pub pattern_type: PatternType,

    pub base_color_red: f32,
    pub base_color_green: f32,
    pub base_color_blue: f32,

    pub blobs: Vec<GradientBlob>,
    pub geometric_points: Vec<GeometricPoint>,

    pub pattern_intensity: f32,
    pub pattern_scale: f32,
    /// Rotation in degrees; only Geometric and Waves read it.
    pub pattern_rotation: f32,

    pub geometric_hue_offset: f32,
    pub geometric_saturation: f32,
    pub geometric_value: f32,

    pub gradient_end_color_red: f32,
    pub gradient_end_color_green: f32,
    pub gradient_end_color_blue: f32,
    pub gradient_end_color_alpha: f32,

    pub aurora_alpha_multiplier: f32,
    pub voronoi_alpha_multiplier: f32,
    pub geometric_alpha_multiplier: f32,
    pub waves_alpha_multiplier: f32,
    pub perlin_noise_alpha_multiplier: f32,

    pub vignette_enabled: bool,
    pub vignette_strength: f32,

    pub show_controls: bool,
    pub selected_blob_id: u32,
    pub is_generating: bool,
}

impl Default for BackgroundsState {
    fn default() -> Self {
        Self {
            pattern_type: PatternType::SoftMesh,
            base_color_red: 0.95,
            base_color_green: 0.95,
            base_color_blue: 0.98,
            blobs: default_blobs(),
            geometric_points: default_geometric_points(0.0, 0.7, 0.9),
            pattern_intensity: 0.8,
            pattern_scale: 1.0,
            pattern_rotation: 0.0,
            geometric_hue_offset: 0.0,
            geometric_saturation: 0.7,
            geometric_value: 0.9,
            gradient_end_color_red: 0.0,
            gradient_end_color_green: 0.0,
            gradient_end_color_blue: 0.0,
            gradient_end_color_alpha: 0.0,
            aurora_alpha_multiplier: 0.6,
            voronoi_alpha_multiplier: 0.8,
            geometric_alpha_multiplier: 0.7,
            waves_alpha_multiplier: 0.3,
            perlin_noise_alpha_multiplier: 0.4,
            vignette_enabled: true,
            vignette_strength: 0.2,
            show_controls: true,
            selected_blob_id: 1,
            is_generating: false,
        }
    }
}

impl BackgroundsState {
    pub fn base_color(&self) -> Rgba {
        Rgba::rgb(self.base_color_red, self.base_color_green, self.base_color_blue)
    }

    pub fn gradient_end_color(&self) -> Rgba {
        Rgba::new(
            self.gradient_end_color_red,
            self.gradient_end_color_green,
            self.gradient_end_color_blue,
            self.gradient_end_color_alpha,
        )
    }

    pub fn selected_blob(&self) -> Option<&GradientBlob> {
        self.blobs.iter().find(|blob| blob.id == self.selected_blob_id)
    }
}

pub fn default_blobs() -> Vec<GradientBlob> {
    vec![
        GradientBlob {
            id: 1,
            name: "Teal".into(),
            color_red: 0.4,
            color_green: 0.8,
            color_blue: 0.8,
            alpha: 0.75,
            position_x: 0.1,
            position_y: 0.2,
            radius: 0.9,
        },
        GradientBlob {
            id: 2,
            name: "Lavender".into(),
            color_red: 0.7,
            color_green: 0.6,
            color_blue: 0.9,
            alpha: 0.8,
            position_x: 0.85,
            position_y: 0.35,
            radius: 0.9,
        },
        GradientBlob {
            id: 3,
            name: "Peach".into(),
            color_red: 1.0,
            color_green: 0.8,
            color_blue: 0.7,
            alpha: 0.8,
            position_x: 0.25,
            position_y: 0.9,
            radius: 1.0,
        },
    ]
}

/// Deterministic 20-point spiral layout used at default construction. The
/// per-index ring radius and hue stride keep the layout stable across runs;
/// only the HSV controls influence the colors.
pub fn default_geometric_points(hue_offset: f32, saturation: f32, value: f32) -> Vec<GeometricPoint> {
    (0..20)
        .map(|index| {
            let angle = (index as f32 / 20.0) * 2.0 * std::f32::consts::PI;
            let ring = 0.3 + (index % 5) as f32 * 0.1;
            GeometricPoint {
                x: 0.5 + ring * angle.cos(),
                y: 0.5 + ring * angle.sin(),
                color: Rgba::hsv((index as f32 * 18.0 + hue_offset) % 360.0, saturation, value),
                size: 0.5 + (index % 3) as f32 * 0.3,
            }
        })
        .collect()
}
