use crate::state::PatternType;

/// Discrete user actions for the background designer. Each variant sets
/// exactly one state field or triggers a bulk regeneration; the reducer in
/// `model` handles every variant without failing.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundsIntent {
    SelectPatternType(PatternType),

    UpdateBaseColorRed(f32),
    UpdateBaseColorGreen(f32),
    UpdateBaseColorBlue(f32),

    UpdatePatternIntensity(f32),
    UpdatePatternScale(f32),
    UpdatePatternRotation(f32),

    UpdateGeometricHueOffset(f32),
    UpdateGeometricSaturation(f32),
    UpdateGeometricValue(f32),
    RegenerateGeometricPoints,

    UpdateGradientEndColorRed(f32),
    UpdateGradientEndColorGreen(f32),
    UpdateGradientEndColorBlue(f32),
    UpdateGradientEndColorAlpha(f32),

    UpdateAuroraAlphaMultiplier(f32),
    UpdateVoronoiAlphaMultiplier(f32),
    UpdateGeometricAlphaMultiplier(f32),
    UpdateWavesAlphaMultiplier(f32),
    UpdatePerlinNoiseAlphaMultiplier(f32),

    SelectBlob(u32),
    UpdateBlobColorRed(f32),
    UpdateBlobColorGreen(f32),
    UpdateBlobColorBlue(f32),
    UpdateBlobAlpha(f32),
    UpdateBlobPositionX(f32),
    UpdateBlobPositionY(f32),
    UpdateBlobRadius(f32),

    ToggleVignette(bool),
    UpdateVignetteStrength(f32),

    RandomizePattern,

    ToggleControls,
    GenerateTheme,
}
