//! Fixed catalog of bundled preset shaders, embedded at build time. Read
//! only: the editor offers them as starting points and never writes back.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShaderPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub source: &'static str,
}

pub struct PresetCatalog {
    presets: Vec<ShaderPreset>,
}

impl PresetCatalog {
    pub fn bundled() -> Self {
        Self {
            presets: vec![
                ShaderPreset {
                    id: "gradient-flow",
                    name: "Gradient Flow",
                    description: "Slow diagonal color wash between two pastel tones.",
                    source: include_str!("../presets/gradient_flow.glsl"),
                },
                ShaderPreset {
                    id: "plasma",
                    name: "Plasma",
                    description: "Classic layered sine interference plasma.",
                    source: include_str!("../presets/plasma.glsl"),
                },
                ShaderPreset {
                    id: "ripples",
                    name: "Ripples",
                    description: "Concentric waves radiating from the touch point.",
                    source: include_str!("../presets/ripples.glsl"),
                },
                ShaderPreset {
                    id: "starfield",
                    name: "Starfield",
                    description: "Hash-based twinkling points on a dark sky.",
                    source: include_str!("../presets/starfield.glsl"),
                },
            ],
        }
    }

    pub fn all(&self) -> &[ShaderPreset] {
        &self.presets
    }

    pub fn find(&self, id: &str) -> Option<&ShaderPreset> {
        self.presets.iter().find(|preset| preset.id == id)
    }

    pub fn first(&self) -> Option<&ShaderPreset> {
        self.presets.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_has_unique_ids_and_sources() {
        let catalog = PresetCatalog::bundled();
        assert!(!catalog.all().is_empty());
        for (index, preset) in catalog.all().iter().enumerate() {
            assert!(!preset.source.is_empty());
            for other in &catalog.all()[index + 1..] {
                assert_ne!(preset.id, other.id);
            }
        }
    }

    #[test]
    fn find_resolves_known_ids() {
        let catalog = PresetCatalog::bundled();
        assert_eq!(catalog.find("plasma").map(|p| p.name), Some("Plasma"));
        assert!(catalog.find("missing").is_none());
    }
}
