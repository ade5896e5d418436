//! Reducer for the background designer: owns the observable state cell, the
//! event channel, and the random source, and maps every intent to exactly
//! one pure state replacement. Slider inputs arrive pre-clamped by the UI;
//! the reducer still clamps colors to `[0, 1]` and keeps sizes positive so a
//! misbehaving caller cannot wedge the renderer.
//!
//! Types:
//!
//! - `BackgroundsModel` pairs the `mvi::Store` with a seedable `StdRng` so
//!   randomization is reproducible in tests.
//!
//! Functions:
//!
//! - `BackgroundsModel::handle_intent` is total over `BackgroundsIntent`.
//! - `randomize_blobs` / `randomize_geometric_points` build fresh random
//!   layouts for the gradient- and point-driven patterns.

use mvi::{Receiver, Store, StoreError};
use rand::prelude::*;
use tracing::debug;

use crate::color::Rgba;
use crate::event::BackgroundsEvent;
use crate::intent::BackgroundsIntent;
use crate::state::{BackgroundsState, GeometricPoint, GradientBlob, PatternType};
use crate::themegen;

/// Lower bound for blob radii and point sizes after defensive clamping.
const MIN_SIZE: f32 = 0.01;

/// Six-color palette the randomizer picks blob colors from.
const BLOB_PALETTE: [(f32, f32, f32); 6] = [
    (0.4, 0.8, 0.9), // cyan
    (0.9, 0.5, 0.7), // pink
    (0.7, 0.9, 0.4), // lime
    (0.9, 0.7, 0.3), // orange
    (0.6, 0.4, 0.9), // purple
    (0.9, 0.9, 0.4), // yellow
];

pub struct BackgroundsModel {
    store: Store<BackgroundsState, BackgroundsEvent>,
    rng: StdRng,
}

impl BackgroundsModel {
    pub fn seeded(seed: u64) -> Self {
        Self::with_state(BackgroundsState::default(), seed)
    }

    pub fn with_state(state: BackgroundsState, seed: u64) -> Self {
        Self {
            store: Store::new(state),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            store: Store::new(BackgroundsState::default()),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn state(&self) -> &BackgroundsState {
        self.store.state()
    }

    pub fn snapshot(&self) -> BackgroundsState {
        self.store.snapshot()
    }

    pub fn events(&mut self) -> Result<Receiver<BackgroundsEvent>, StoreError> {
        self.store.events()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&BackgroundsState) + Send + 'static) {
        self.store.subscribe(subscriber)
    }

    pub fn handle_intent(&mut self, intent: BackgroundsIntent) {
        use BackgroundsIntent::*;

        debug!(?intent, "handling backgrounds intent");
        match intent {
            SelectPatternType(pattern) => self.update(|state| BackgroundsState {
                pattern_type: pattern,
                ..state
            }),

            UpdateBaseColorRed(value) => self.update(|state| BackgroundsState {
                base_color_red: clamp01(value),
                ..state
            }),
            UpdateBaseColorGreen(value) => self.update(|state| BackgroundsState {
                base_color_green: clamp01(value),
                ..state
            }),
            UpdateBaseColorBlue(value) => self.update(|state| BackgroundsState {
                base_color_blue: clamp01(value),
                ..state
            }),

            UpdatePatternIntensity(value) => self.update(|state| BackgroundsState {
                pattern_intensity: clamp01(value),
                ..state
            }),
            UpdatePatternScale(value) => self.update(|state| BackgroundsState {
                pattern_scale: value.max(MIN_SIZE),
                ..state
            }),
            UpdatePatternRotation(value) => self.update(|state| BackgroundsState {
                pattern_rotation: value,
                ..state
            }),

            UpdateGeometricHueOffset(value) => {
                let saturation = self.state().geometric_saturation;
                let brightness = self.state().geometric_value;
                let points =
                    randomize_geometric_points(&mut self.rng, value, saturation, brightness);
                self.update(|state| BackgroundsState {
                    geometric_hue_offset: value,
                    geometric_points: points,
                    ..state
                });
            }
            UpdateGeometricSaturation(value) => {
                let value = clamp01(value);
                let hue_offset = self.state().geometric_hue_offset;
                let brightness = self.state().geometric_value;
                let points =
                    randomize_geometric_points(&mut self.rng, hue_offset, value, brightness);
                self.update(|state| BackgroundsState {
                    geometric_saturation: value,
                    geometric_points: points,
                    ..state
                });
            }
            UpdateGeometricValue(value) => {
                let value = clamp01(value);
                let hue_offset = self.state().geometric_hue_offset;
                let saturation = self.state().geometric_saturation;
                let points =
                    randomize_geometric_points(&mut self.rng, hue_offset, saturation, value);
                self.update(|state| BackgroundsState {
                    geometric_value: value,
                    geometric_points: points,
                    ..state
                });
            }
            RegenerateGeometricPoints => {
                let hue_offset = self.state().geometric_hue_offset;
                let saturation = self.state().geometric_saturation;
                let brightness = self.state().geometric_value;
                let points =
                    randomize_geometric_points(&mut self.rng, hue_offset, saturation, brightness);
                self.update(|state| BackgroundsState {
                    geometric_points: points,
                    ..state
                });
            }

            UpdateGradientEndColorRed(value) => self.update(|state| BackgroundsState {
                gradient_end_color_red: clamp01(value),
                ..state
            }),
            UpdateGradientEndColorGreen(value) => self.update(|state| BackgroundsState {
                gradient_end_color_green: clamp01(value),
                ..state
            }),
            UpdateGradientEndColorBlue(value) => self.update(|state| BackgroundsState {
                gradient_end_color_blue: clamp01(value),
                ..state
            }),
            UpdateGradientEndColorAlpha(value) => self.update(|state| BackgroundsState {
                gradient_end_color_alpha: clamp01(value),
                ..state
            }),

            UpdateAuroraAlphaMultiplier(value) => self.update(|state| BackgroundsState {
                aurora_alpha_multiplier: clamp01(value),
                ..state
            }),
            UpdateVoronoiAlphaMultiplier(value) => self.update(|state| BackgroundsState {
                voronoi_alpha_multiplier: clamp01(value),
                ..state
            }),
            UpdateGeometricAlphaMultiplier(value) => self.update(|state| BackgroundsState {
                geometric_alpha_multiplier: clamp01(value),
                ..state
            }),
            UpdateWavesAlphaMultiplier(value) => self.update(|state| BackgroundsState {
                waves_alpha_multiplier: clamp01(value),
                ..state
            }),
            UpdatePerlinNoiseAlphaMultiplier(value) => self.update(|state| BackgroundsState {
                perlin_noise_alpha_multiplier: clamp01(value),
                ..state
            }),

            SelectBlob(blob_id) => self.update(|state| BackgroundsState {
                selected_blob_id: blob_id,
                ..state
            }),
            UpdateBlobColorRed(value) => self.update_selected_blob(|blob| GradientBlob {
                color_red: clamp01(value),
                ..blob.clone()
            }),
            UpdateBlobColorGreen(value) => self.update_selected_blob(|blob| GradientBlob {
                color_green: clamp01(value),
                ..blob.clone()
            }),
            UpdateBlobColorBlue(value) => self.update_selected_blob(|blob| GradientBlob {
                color_blue: clamp01(value),
                ..blob.clone()
            }),
            UpdateBlobAlpha(value) => self.update_selected_blob(|blob| GradientBlob {
                alpha: clamp01(value),
                ..blob.clone()
            }),
            UpdateBlobPositionX(value) => self.update_selected_blob(|blob| GradientBlob {
                position_x: clamp01(value),
                ..blob.clone()
            }),
            UpdateBlobPositionY(value) => self.update_selected_blob(|blob| GradientBlob {
                position_y: clamp01(value),
                ..blob.clone()
            }),
            UpdateBlobRadius(value) => self.update_selected_blob(|blob| GradientBlob {
                radius: value.max(MIN_SIZE),
                ..blob.clone()
            }),

            ToggleVignette(enabled) => self.update(|state| BackgroundsState {
                vignette_enabled: enabled,
                ..state
            }),
            UpdateVignetteStrength(value) => self.update(|state| BackgroundsState {
                vignette_strength: clamp01(value),
                ..state
            }),

            RandomizePattern => self.randomize(),

            ToggleControls => self.update(|state| BackgroundsState {
                show_controls: !state.show_controls,
                ..state
            }),
            GenerateTheme => self.generate_theme(),
        }
    }

    fn update(&mut self, transform: impl FnOnce(BackgroundsState) -> BackgroundsState) {
        self.store.update(transform);
    }

    /// Applies `transform` to the selected blob only; every other blob keeps
    /// its fields untouched (identity-by-id update).
    fn update_selected_blob(&mut self, transform: impl Fn(&GradientBlob) -> GradientBlob) {
        self.store.update(|state| {
            let blobs = state
                .blobs
                .iter()
                .map(|blob| {
                    if blob.id == state.selected_blob_id {
                        transform(blob)
                    } else {
                        blob.clone()
                    }
                })
                .collect();
            BackgroundsState { blobs, ..state }
        });
    }

    fn randomize(&mut self) {
        let rng = &mut self.rng;
        let pattern = *PatternType::ALL
            .choose(rng)
            .unwrap_or(&PatternType::SoftMesh);
        let base = Rgba::hsv(rng.gen::<f32>() * 360.0, 0.1, 0.9 + rng.gen::<f32>() * 0.1);
        let blobs = randomize_blobs(rng);
        let hue_offset = rng.gen::<f32>() * 360.0;
        let saturation = 0.6 + rng.gen::<f32>() * 0.3;
        let value = 0.8 + rng.gen::<f32>() * 0.2;
        let points = randomize_geometric_points(rng, hue_offset, saturation, value);
        let intensity = 0.6 + rng.gen::<f32>() * 0.3;
        let scale = 0.7 + rng.gen::<f32>() * 0.6;
        let rotation = rng.gen::<f32>() * 360.0;
        let vignette_enabled = rng.gen_bool(0.5);
        let vignette_strength = if rng.gen_bool(0.5) {
            0.1 + rng.gen::<f32>() * 0.3
        } else {
            0.2
        };

        self.update(|state| BackgroundsState {
            pattern_type: pattern,
            base_color_red: base.r,
            base_color_green: base.g,
            base_color_blue: base.b,
            blobs,
            geometric_points: points,
            pattern_intensity: intensity,
            pattern_scale: scale,
            pattern_rotation: rotation,
            vignette_enabled,
            vignette_strength,
            ..state
        });

        self.store.send(BackgroundsEvent::Message(format!(
            "Generated {} pattern!",
            pattern.display_name()
        )));
    }

    fn generate_theme(&mut self) {
        self.update(|state| BackgroundsState {
            is_generating: true,
            ..state
        });

        match themegen::generate_theme(self.state()) {
            Ok(code) => {
                self.store.send(BackgroundsEvent::ThemeGenerated(code));
                self.store
                    .send(BackgroundsEvent::Message("Theme code generated!".into()));
            }
            Err(err) => {
                self.store
                    .send(BackgroundsEvent::GenerationError(err.to_string()));
            }
        }

        self.update(|state| BackgroundsState {
            is_generating: false,
            ..state
        });
    }
}

fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Builds 3-4 blobs from the fixed palette with randomized placement.
pub fn randomize_blobs(rng: &mut StdRng) -> Vec<GradientBlob> {
    let count = 3 + rng.gen_range(0..2);
    (0..count)
        .map(|index| {
            let (r, g, b) = BLOB_PALETTE[rng.gen_range(0..BLOB_PALETTE.len())];
            GradientBlob {
                id: index as u32 + 1,
                name: format!("Blob{}", index + 1),
                color_red: r,
                color_green: g,
                color_blue: b,
                alpha: 0.6 + rng.gen::<f32>() * 0.3,
                position_x: rng.gen(),
                position_y: rng.gen(),
                radius: 0.6 + rng.gen::<f32>() * 0.8,
            }
        })
        .collect()
}

/// Scatters 15-39 points with HSV-derived colors. Called for every HSV
/// slider change, so point layouts shift along with the palette.
pub fn randomize_geometric_points(
    rng: &mut StdRng,
    hue_offset: f32,
    saturation: f32,
    value: f32,
) -> Vec<GeometricPoint> {
    let count = 15 + rng.gen_range(0..25);
    (0..count)
        .map(|_| GeometricPoint {
            x: rng.gen(),
            y: rng.gen(),
            color: Rgba::hsv(
                (rng.gen::<f32>() * 360.0 + hue_offset) % 360.0,
                saturation,
                value,
            ),
            size: 0.3 + rng.gen::<f32>() * 0.7,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, CanvasSize};

    #[test]
    fn blob_update_touches_only_the_selected_blob() {
        let mut model = BackgroundsModel::seeded(1);
        model.handle_intent(BackgroundsIntent::SelectBlob(2));
        let before = model.snapshot();

        model.handle_intent(BackgroundsIntent::UpdateBlobColorRed(0.25));

        let after = model.state();
        for (old, new) in before.blobs.iter().zip(&after.blobs) {
            if old.id == 2 {
                assert_eq!(new.color_red, 0.25);
                assert_eq!(new.color_green, old.color_green);
                assert_eq!(new.color_blue, old.color_blue);
                assert_eq!(new.alpha, old.alpha);
                assert_eq!(new.position_x, old.position_x);
                assert_eq!(new.position_y, old.position_y);
                assert_eq!(new.radius, old.radius);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn color_channels_are_clamped_defensively() {
        let mut model = BackgroundsModel::seeded(1);
        model.handle_intent(BackgroundsIntent::UpdateBaseColorRed(7.0));
        model.handle_intent(BackgroundsIntent::UpdateBlobAlpha(-3.0));
        model.handle_intent(BackgroundsIntent::UpdateBlobRadius(-1.0));

        let state = model.state();
        assert_eq!(state.base_color_red, 1.0);
        let blob = state.selected_blob().unwrap();
        assert_eq!(blob.alpha, 0.0);
        assert!(blob.radius > 0.0);
    }

    #[test]
    fn randomize_selects_a_declared_pattern_and_renders() {
        for seed in 0..32 {
            let mut model = BackgroundsModel::seeded(seed);
            model.handle_intent(BackgroundsIntent::RandomizePattern);
            let state = model.snapshot();

            assert!(PatternType::ALL.contains(&state.pattern_type));
            assert!((3..=4).contains(&state.blobs.len()));
            assert!((15..=39).contains(&state.geometric_points.len()));

            let primitives = render(&state, CanvasSize::new(640.0, 480.0));
            assert!(!primitives.is_empty());
        }
    }

    #[test]
    fn randomize_is_reproducible_for_a_seed() {
        let mut first = BackgroundsModel::seeded(99);
        let mut second = BackgroundsModel::seeded(99);
        first.handle_intent(BackgroundsIntent::RandomizePattern);
        second.handle_intent(BackgroundsIntent::RandomizePattern);
        assert_eq!(first.snapshot(), second.snapshot());
    }

    #[test]
    fn randomize_emits_a_pattern_message() {
        let mut model = BackgroundsModel::seeded(5);
        let events = model.events().unwrap();
        model.handle_intent(BackgroundsIntent::RandomizePattern);

        match events.try_recv().unwrap() {
            BackgroundsEvent::Message(message) => {
                assert!(message.starts_with("Generated "));
                assert!(message.ends_with(" pattern!"));
            }
            other => panic!("expected message event, got {other:?}"),
        }
    }

    #[test]
    fn hsv_slider_regenerates_points_in_bulk() {
        let mut model = BackgroundsModel::seeded(3);
        let before = model.snapshot().geometric_points;
        model.handle_intent(BackgroundsIntent::UpdateGeometricHueOffset(120.0));
        let after = model.snapshot();
        assert_eq!(after.geometric_hue_offset, 120.0);
        assert_ne!(before, after.geometric_points);
        assert!((15..=39).contains(&after.geometric_points.len()));
    }

    #[test]
    fn generate_theme_emits_code_then_clears_busy_flag() {
        let mut model = BackgroundsModel::seeded(1);
        let events = model.events().unwrap();
        model.handle_intent(BackgroundsIntent::GenerateTheme);

        assert!(!model.state().is_generating);
        match events.try_recv().unwrap() {
            BackgroundsEvent::ThemeGenerated(code) => {
                assert!(code.contains("Soft Mesh"));
            }
            other => panic!("expected generated theme, got {other:?}"),
        }
        assert!(matches!(
            events.try_recv().unwrap(),
            BackgroundsEvent::Message(_)
        ));
    }

    #[test]
    fn toggle_controls_flips_the_flag() {
        let mut model = BackgroundsModel::seeded(1);
        assert!(model.state().show_controls);
        model.handle_intent(BackgroundsIntent::ToggleControls);
        assert!(!model.state().show_controls);
        model.handle_intent(BackgroundsIntent::ToggleControls);
        assert!(model.state().show_controls);
    }
}
