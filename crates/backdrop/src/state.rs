use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use patterns::BackgroundsState;

/// Reads a pattern state TOML; missing fields fall back to the defaults.
pub fn load_state(path: &Path) -> Result<BackgroundsState> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read state file at {}", path.display()))?;
    let state: BackgroundsState = toml::from_str(&contents)
        .with_context(|| format!("failed to parse state file at {}", path.display()))?;
    Ok(state)
}

pub fn save_state(state: &BackgroundsState, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| {
            format!(
                "failed to prepare directory for state file at {}",
                dir.display()
            )
        })?;
    }
    let serialized =
        to_toml_string(state).with_context(|| "failed to serialize pattern state".to_string())?;
    fs::write(path, serialized)
        .with_context(|| format!("failed to write state file to {}", path.display()))?;
    Ok(())
}

pub fn to_toml_string(state: &BackgroundsState) -> Result<String> {
    Ok(toml::to_string_pretty(state)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use patterns::PatternType;

    #[test]
    fn state_round_trips_through_toml_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("state.toml");

        let mut state = BackgroundsState::default();
        state.pattern_type = PatternType::Waves;
        state.pattern_rotation = 42.0;

        save_state(&state, &path).unwrap();
        let loaded = load_state(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("sparse.toml");
        fs::write(&path, "pattern_type = \"aurora\"\n").unwrap();

        let loaded = load_state(&path).unwrap();
        assert_eq!(loaded.pattern_type, PatternType::Aurora);
        assert_eq!(loaded.blobs.len(), 3);
    }
}
