//! Serializes the current designer state into a standalone source snippet
//! that reproduces the pattern against a small canvas vocabulary. Pure text
//! templating: a header naming the pattern, one body formatter per pattern
//! variant, and a footer summarizing the key parameters. Deterministic for a
//! fixed state and never panics; formatter failures surface as
//! `GenerationError`.

use std::f32::consts::PI;
use std::fmt::Write;

use crate::state::{BackgroundsState, PatternType};

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("failed to format theme snippet: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Renders the state into a Rust snippet. The emitted function draws with a
/// `Canvas` trait offering `fill_rect`, `fill_circle`, and `fill_path`, the
/// same vocabulary `render` emits.
pub fn generate_theme(state: &BackgroundsState) -> Result<String, GenerationError> {
    let mut out = String::new();

    writeln!(out, "// Generated {} background", state.pattern_type.display_name())?;
    writeln!(out, "// Drop this function into a project exposing the canvas")?;
    writeln!(out, "// vocabulary below (fill_rect / fill_circle / fill_path).")?;
    writeln!(out)?;
    writeln!(out, "fn creative_background(canvas: &mut impl Canvas, w: f32, h: f32) {{")?;
    writeln!(
        out,
        "    canvas.fill_rect(Brush::solid(rgb({}, {}, {})));",
        state.base_color_red, state.base_color_green, state.base_color_blue
    )?;
    writeln!(out)?;

    match state.pattern_type {
        PatternType::SoftMesh => write_soft_mesh(&mut out, state)?,
        PatternType::Aurora => write_aurora(&mut out, state)?,
        PatternType::Voronoi => write_voronoi(&mut out, state)?,
        PatternType::Geometric => write_geometric(&mut out, state)?,
        PatternType::Waves => write_waves(&mut out, state)?,
        PatternType::PerlinNoise => write_perlin_noise(&mut out, state)?,
    }

    if state.vignette_enabled {
        writeln!(out)?;
        writeln!(out, "    // Vignette")?;
        writeln!(out, "    canvas.fill_rect(Brush::radial(")?;
        writeln!(
            out,
            "        &[TRANSPARENT, BLACK.with_alpha({})],",
            state.vignette_strength
        )?;
        writeln!(out, "        [w * 0.5, h * 0.4], w * 1.2));")?;
    }

    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "// Configuration:")?;
    writeln!(out, "// Pattern: {}", state.pattern_type.display_name())?;
    writeln!(out, "// Intensity: {}", state.pattern_intensity)?;
    writeln!(out, "// Scale: {}", state.pattern_scale)?;
    if matches!(state.pattern_type, PatternType::Geometric | PatternType::Waves) {
        writeln!(out, "// Rotation: {}", state.pattern_rotation)?;
    }
    if state.vignette_enabled {
        writeln!(out, "// Vignette: enabled ({})", state.vignette_strength)?;
    } else {
        writeln!(out, "// Vignette: disabled")?;
    }

    Ok(out)
}

fn write_soft_mesh(out: &mut String, state: &BackgroundsState) -> std::fmt::Result {
    writeln!(out, "    // Soft mesh")?;
    let end = state.gradient_end_color();
    for blob in &state.blobs {
        writeln!(out, "    canvas.fill_rect(Brush::radial(")?;
        writeln!(
            out,
            "        &[rgba({}, {}, {}, {}), rgba({}, {}, {}, {})],",
            blob.color_red, blob.color_green, blob.color_blue, blob.alpha,
            end.r, end.g, end.b, end.a
        )?;
        writeln!(
            out,
            "        [w * {}, h * {}], w * {}));",
            blob.position_x,
            blob.position_y,
            blob.radius * state.pattern_scale
        )?;
    }
    Ok(())
}

fn write_aurora(out: &mut String, state: &BackgroundsState) -> std::fmt::Result {
    writeln!(out, "    // Aurora bands")?;
    writeln!(out, "    for i in 0..5 {{")?;
    writeln!(out, "        let offset = i as f32 * 0.2;")?;
    writeln!(out, "        canvas.fill_rect(Brush::linear_mirrored(")?;
    writeln!(out, "            &[")?;
    for blob in state.blobs.iter().take(3) {
        let alpha = blob.alpha * state.aurora_alpha_multiplier * state.pattern_intensity;
        writeln!(
            out,
            "                rgba({}, {}, {}, {}),",
            blob.color_red, blob.color_green, blob.color_blue, alpha
        )?;
    }
    let end = state.gradient_end_color();
    writeln!(out, "                rgba({}, {}, {}, {}),", end.r, end.g, end.b, end.a)?;
    writeln!(out, "            ],")?;
    writeln!(out, "            [w * offset, 0.0], [w * (1.0 - offset), h]));")?;
    writeln!(out, "    }}")?;
    Ok(())
}

fn write_voronoi(out: &mut String, state: &BackgroundsState) -> std::fmt::Result {
    writeln!(out, "    // Voronoi cells")?;
    let alpha = state.pattern_intensity * state.voronoi_alpha_multiplier;
    let end = state.gradient_end_color();
    for point in &state.geometric_points {
        writeln!(
            out,
            "    canvas.fill_circle([w * {}, h * {}], w * {}, Brush::radial(",
            point.x,
            point.y,
            0.2 * point.size * state.pattern_scale
        )?;
        writeln!(
            out,
            "        &[rgba({}, {}, {}, {}), rgba({}, {}, {}, {})],",
            point.color.r, point.color.g, point.color.b, alpha, end.r, end.g, end.b, end.a
        )?;
        writeln!(
            out,
            "        [w * {}, h * {}], w * {}));",
            point.x,
            point.y,
            0.15 * point.size * state.pattern_scale
        )?;
    }
    Ok(())
}

fn write_geometric(out: &mut String, state: &BackgroundsState) -> std::fmt::Result {
    writeln!(out, "    // Geometric scatter")?;
    let alpha = state.pattern_intensity * state.geometric_alpha_multiplier;
    for (index, point) in state.geometric_points.iter().enumerate() {
        let angle = state.pattern_rotation + index as f32 * 15.0;
        let rad = angle * PI / 180.0;
        writeln!(
            out,
            "    canvas.fill_circle([w * {} + {}, h * {} + {}], w * {},",
            point.x,
            rad.cos() * 20.0,
            point.y,
            rad.sin() * 20.0,
            0.1 * point.size * state.pattern_scale
        )?;
        writeln!(
            out,
            "        Brush::solid(rgba({}, {}, {}, {})));",
            point.color.r, point.color.g, point.color.b, alpha
        )?;
    }
    Ok(())
}

fn write_waves(out: &mut String, state: &BackgroundsState) -> std::fmt::Result {
    writeln!(out, "    // Wave bands")?;
    let alpha = state.pattern_intensity * state.waves_alpha_multiplier;
    writeln!(out, "    let colors = [")?;
    for blob in &state.blobs {
        writeln!(
            out,
            "        rgba({}, {}, {}, {}),",
            blob.color_red, blob.color_green, blob.color_blue, alpha
        )?;
    }
    writeln!(out, "    ];")?;
    writeln!(out, "    for i in 0..6 {{")?;
    writeln!(out, "        let y_offset = h * i as f32 / 6.0;")?;
    writeln!(out, "        let mut points = vec![[0.0, y_offset]];")?;
    writeln!(out, "        let mut x = 0i64;")?;
    writeln!(out, "        while x <= w as i64 {{")?;
    writeln!(
        out,
        "            let wave = ((x as f32 / w) * 4.0 * PI + {}).sin() * 50.0 * {};",
        state.pattern_rotation / 60.0,
        state.pattern_scale
    )?;
    writeln!(out, "            points.push([x as f32, y_offset + wave]);")?;
    writeln!(out, "            x += 50;")?;
    writeln!(out, "        }}")?;
    writeln!(
        out,
        "        let final_wave = (4.0 * PI + {}).sin() * 50.0 * {};",
        state.pattern_rotation / 60.0,
        state.pattern_scale
    )?;
    writeln!(out, "        points.push([w, y_offset + final_wave]);")?;
    writeln!(out, "        points.push([w, h]);")?;
    writeln!(out, "        points.push([0.0, h]);")?;
    writeln!(out, "        canvas.fill_path(&points, colors[i % colors.len()]);")?;
    writeln!(out, "    }}")?;
    Ok(())
}

fn write_perlin_noise(out: &mut String, state: &BackgroundsState) -> std::fmt::Result {
    writeln!(out, "    // Pseudo-noise scatter")?;
    let alpha = state.pattern_intensity * state.perlin_noise_alpha_multiplier;
    writeln!(out, "    let colors = [")?;
    for blob in &state.blobs {
        writeln!(
            out,
            "        rgba({}, {}, {}, {}),",
            blob.color_red, blob.color_green, blob.color_blue, alpha
        )?;
    }
    writeln!(out, "    ];")?;
    writeln!(out, "    for i in 0..=30u32 {{")?;
    writeln!(out, "        let x = (i * 37 % 100) as f32 / 100.0;")?;
    writeln!(out, "        let y = (i * 73 % 100) as f32 / 100.0;")?;
    writeln!(
        out,
        "        let size = ((i * 13 % 50) + 30) as f32 * {};",
        state.pattern_scale
    )?;
    writeln!(
        out,
        "        canvas.fill_circle([w * x, h * y], size, Brush::solid(colors[i as usize % colors.len()]));"
    )?;
    writeln!(out, "    }}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BackgroundsState;

    #[test]
    fn output_is_deterministic_for_fixed_state() {
        let state = BackgroundsState::default();
        assert_eq!(generate_theme(&state).unwrap(), generate_theme(&state).unwrap());
    }

    #[test]
    fn header_names_pattern_and_footer_summarizes() {
        let state = BackgroundsState::default();
        let code = generate_theme(&state).unwrap();
        assert!(code.starts_with("// Generated Soft Mesh background"));
        assert!(code.contains("// Configuration:"));
        assert!(code.contains("// Intensity: 0.8"));
        assert!(code.contains("// Vignette: enabled (0.2)"));
    }

    #[test]
    fn rotation_appears_only_for_rotation_driven_patterns() {
        let mut state = BackgroundsState::default();
        state.pattern_rotation = 45.0;

        let mesh = generate_theme(&state).unwrap();
        assert!(!mesh.contains("// Rotation:"));

        state.pattern_type = PatternType::Waves;
        let waves = generate_theme(&state).unwrap();
        assert!(waves.contains("// Rotation: 45"));
    }

    #[test]
    fn every_pattern_generates_without_error() {
        for pattern in PatternType::ALL {
            let mut state = BackgroundsState::default();
            state.pattern_type = pattern;
            let code = generate_theme(&state).unwrap();
            assert!(code.contains(pattern.display_name()));
            assert!(code.contains("fn creative_background"));
        }
    }

    #[test]
    fn disabled_vignette_is_reported_and_not_drawn() {
        let mut state = BackgroundsState::default();
        state.vignette_enabled = false;
        let code = generate_theme(&state).unwrap();
        assert!(code.contains("// Vignette: disabled"));
        assert!(!code.contains("// Vignette\n"));
    }
}
