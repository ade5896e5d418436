//! Shader editor state machine. Holds the source text, cursor, and current
//! shader identity; delegates compilation to the `ShaderRuntime` collaborator
//! and persistence to `ShaderStorage`. Every failure is caught at the
//! operation boundary and turned into a one-time event; nothing here
//! terminates the process, and a failed load never touches the current
//! source text.
//!
//! Types:
//!
//! - `EditorState` is the immutable per-screen record (code, uniforms, lists,
//!   busy flags, dialog flags).
//! - `EditorIntent` / `EditorEvent` are the closed action/notification enums.
//! - `EditorModel` owns the store and the collaborators and implements the
//!   reducer.

use mvi::{Receiver, Store, StoreError};
use tracing::{debug, warn};

use crate::presets::{PresetCatalog, ShaderPreset};
use crate::runtime::{CompileError, CompiledShader, ShaderRuntime};
use crate::storage::{FileMeta, ShaderStorage};

/// Flat color the preview falls back to while the source does not compile.
pub const FALLBACK_COLOR: [f32; 4] = [0.12, 0.12, 0.16, 1.0];

#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub source: String,
    pub cursor: usize,

    pub is_code_expanded: bool,
    pub is_keyboard_visible: bool,

    pub current_name: String,
    pub is_preset: bool,
    pub compile_error: Option<String>,
    pub is_compiled: bool,

    pub elapsed_time: f32,
    pub touch_position: [f32; 2],
    pub resolution: [f32; 2],

    pub presets: Vec<ShaderPreset>,
    pub saved_shaders: Vec<FileMeta>,

    pub is_saving: bool,
    pub is_loading: bool,
    pub show_save_dialog: bool,
    pub show_load_dialog: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            source: String::new(),
            cursor: 0,
            is_code_expanded: true,
            is_keyboard_visible: false,
            current_name: String::new(),
            is_preset: true,
            compile_error: None,
            is_compiled: false,
            elapsed_time: 0.0,
            touch_position: [0.0, 0.0],
            resolution: [0.0, 0.0],
            presets: Vec::new(),
            saved_shaders: Vec::new(),
            is_saving: false,
            is_loading: false,
            show_save_dialog: false,
            show_load_dialog: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorIntent {
    UpdateCode { code: String, cursor: usize },
    ToggleCodeVisibility,
    KeyboardVisibilityChanged(bool),

    SaveShader(String),
    LoadPreset(String),
    LoadSavedShader(FileMeta),
    DeleteShader(FileMeta),

    ShowSaveDialog,
    HideSaveDialog,
    ShowLoadDialog,
    HideLoadDialog,

    UpdateCursorPosition(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    Message(String),
    ScrollToCode(usize),
    Saved(FileMeta),
    CompileFailed(String),
    Compiled,
}

pub struct EditorModel {
    store: Store<EditorState, EditorEvent>,
    storage: ShaderStorage,
    catalog: PresetCatalog,
}

impl EditorModel {
    /// Builds the editor: bundled presets and the saved-shader list are
    /// loaded up front, and the first preset becomes the working source.
    pub fn new(storage: ShaderStorage, catalog: PresetCatalog) -> Self {
        let mut model = Self {
            store: Store::new(EditorState::default()),
            storage,
            catalog,
        };

        let presets = model.catalog.all().to_vec();
        let saved = model.storage.list().unwrap_or_else(|err| {
            warn!(error = %err, "failed to list saved shaders at startup");
            Vec::new()
        });
        let first = model.catalog.first().cloned();

        model.store.update(|state| {
            let mut state = EditorState {
                presets,
                saved_shaders: saved,
                ..state
            };
            if let Some(preset) = &first {
                state.source = preset.source.to_string();
                state.current_name = preset.name.to_string();
                state.is_preset = true;
                state.is_compiled = true;
            }
            state
        });
        model
    }

    pub fn state(&self) -> &EditorState {
        self.store.state()
    }

    pub fn snapshot(&self) -> EditorState {
        self.store.snapshot()
    }

    pub fn events(&mut self) -> Result<Receiver<EditorEvent>, StoreError> {
        self.store.events()
    }

    pub fn handle_intent(&mut self, intent: EditorIntent) {
        debug!(?intent, "handling editor intent");
        match intent {
            EditorIntent::UpdateCode { code, cursor } => self.store.update(|state| EditorState {
                source: code,
                cursor,
                compile_error: None,
                ..state
            }),
            EditorIntent::ToggleCodeVisibility => self.store.update(|state| EditorState {
                is_code_expanded: !state.is_code_expanded,
                ..state
            }),
            EditorIntent::KeyboardVisibilityChanged(visible) => {
                self.store.update(|state| EditorState {
                    is_keyboard_visible: visible,
                    ..state
                });
                if visible {
                    let cursor = self.state().cursor;
                    self.store.send(EditorEvent::ScrollToCode(cursor));
                }
            }

            EditorIntent::SaveShader(name) => self.save_shader(&name),
            EditorIntent::LoadPreset(id) => self.load_preset(&id),
            EditorIntent::LoadSavedShader(meta) => self.load_saved_shader(meta),
            EditorIntent::DeleteShader(meta) => self.delete_shader(meta),

            EditorIntent::ShowSaveDialog => self.store.update(|state| EditorState {
                show_save_dialog: true,
                ..state
            }),
            EditorIntent::HideSaveDialog => self.store.update(|state| EditorState {
                show_save_dialog: false,
                ..state
            }),
            EditorIntent::ShowLoadDialog => self.store.update(|state| EditorState {
                show_load_dialog: true,
                ..state
            }),
            EditorIntent::HideLoadDialog => self.store.update(|state| EditorState {
                show_load_dialog: false,
                ..state
            }),

            EditorIntent::UpdateCursorPosition(position) => {
                self.store.update(|state| EditorState {
                    cursor: position,
                    ..state
                })
            }
        }
    }

    fn save_shader(&mut self, name: &str) {
        self.store.update(|state| EditorState {
            is_saving: true,
            ..state
        });

        match self.storage.save(name, &self.state().source) {
            Ok(meta) => {
                let saved = self.storage.list().unwrap_or_else(|err| {
                    warn!(error = %err, "failed to refresh saved shader list");
                    self.state().saved_shaders.clone()
                });
                let display = meta.name.clone();
                self.store.update(|state| EditorState {
                    saved_shaders: saved,
                    current_name: display.clone(),
                    is_preset: false,
                    is_saving: false,
                    show_save_dialog: false,
                    ..state
                });
                self.store.send(EditorEvent::Saved(meta));
                self.store
                    .send(EditorEvent::Message(format!("Shader saved: {display}")));
            }
            Err(err) => {
                self.store.update(|state| EditorState {
                    is_saving: false,
                    ..state
                });
                self.store
                    .send(EditorEvent::Message(format!("Failed to save shader: {err}")));
            }
        }
    }

    fn load_preset(&mut self, id: &str) {
        self.store.update(|state| EditorState {
            is_loading: true,
            ..state
        });

        match self.catalog.find(id).cloned() {
            Some(preset) => {
                self.store.update(|state| EditorState {
                    source: preset.source.to_string(),
                    current_name: preset.name.to_string(),
                    is_preset: true,
                    compile_error: None,
                    is_loading: false,
                    show_load_dialog: false,
                    is_compiled: true,
                    ..state
                });
                self.store
                    .send(EditorEvent::Message(format!("Loaded preset: {}", preset.name)));
            }
            None => {
                self.store.update(|state| EditorState {
                    is_loading: false,
                    ..state
                });
                self.store
                    .send(EditorEvent::Message("Preset not found".into()));
            }
        }
    }

    fn load_saved_shader(&mut self, meta: FileMeta) {
        self.store.update(|state| EditorState {
            is_loading: true,
            ..state
        });

        match self.storage.load(&meta) {
            Ok(source) => {
                let name = meta.name.clone();
                self.store.update(|state| EditorState {
                    source,
                    current_name: name.clone(),
                    is_preset: false,
                    compile_error: None,
                    is_loading: false,
                    show_load_dialog: false,
                    is_compiled: true,
                    ..state
                });
                self.store
                    .send(EditorEvent::Message(format!("Loaded shader: {name}")));
            }
            Err(err) => {
                // Current source stays untouched on a failed load.
                self.store.update(|state| EditorState {
                    is_loading: false,
                    ..state
                });
                self.store
                    .send(EditorEvent::Message(format!("Failed to load shader: {err}")));
            }
        }
    }

    fn delete_shader(&mut self, meta: FileMeta) {
        match self.storage.delete(&meta) {
            Ok(()) => {
                let saved = self.storage.list().unwrap_or_else(|err| {
                    warn!(error = %err, "failed to refresh saved shader list");
                    self.state().saved_shaders.clone()
                });
                self.store.update(|state| EditorState {
                    saved_shaders: saved,
                    ..state
                });
                self.store
                    .send(EditorEvent::Message(format!("Shader deleted: {}", meta.name)));
            }
            Err(err) => {
                self.store
                    .send(EditorEvent::Message(format!("Failed to delete shader: {err}")));
            }
        }
    }

    /// Compiles the current source against the runtime collaborator. On
    /// success the handle is returned for the preview; on failure the state
    /// records the error and the preview keeps drawing `FALLBACK_COLOR`.
    pub fn compile_with(
        &mut self,
        runtime: &mut dyn ShaderRuntime,
    ) -> Option<Box<dyn CompiledShader>> {
        match runtime.compile(&self.state().source) {
            Ok(handle) => {
                self.update_compile_status(true, None);
                Some(handle)
            }
            Err(CompileError::Compile(message)) | Err(CompileError::Draw(message)) => {
                self.update_compile_status(false, Some(message));
                None
            }
        }
    }

    pub fn update_compile_status(&mut self, is_compiled: bool, error: Option<String>) {
        self.store.update(|state| EditorState {
            is_compiled,
            compile_error: error.clone(),
            ..state
        });
        match error {
            Some(message) => self.store.send(EditorEvent::CompileFailed(message)),
            None if is_compiled => self.store.send(EditorEvent::Compiled),
            None => {}
        }
    }

    pub fn update_time(&mut self, time: f32) {
        self.store.update(|state| EditorState {
            elapsed_time: time,
            ..state
        });
    }

    pub fn update_touch_position(&mut self, x: f32, y: f32) {
        self.store.update(|state| EditorState {
            touch_position: [x, y],
            ..state
        });
    }

    pub fn update_resolution(&mut self, width: f32, height: f32) {
        self.store.update(|state| EditorState {
            resolution: [width, height],
            ..state
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Uniform;
    use chrono::Utc;

    struct FakeRuntime {
        fail_with: Option<String>,
    }

    struct FakeHandle;

    impl CompiledShader for FakeHandle {
        fn set_uniform(&mut self, _uniform: Uniform) {}

        fn draw(&mut self, _target_size: (u32, u32)) -> Result<(), CompileError> {
            Ok(())
        }
    }

    impl ShaderRuntime for FakeRuntime {
        fn compile(&mut self, _source: &str) -> Result<Box<dyn CompiledShader>, CompileError> {
            match &self.fail_with {
                Some(message) => Err(CompileError::Compile(message.clone())),
                None => Ok(Box::new(FakeHandle)),
            }
        }
    }

    fn model_with_tempdir() -> (EditorModel, tempfile::TempDir) {
        let temp = tempfile::tempdir().unwrap();
        let model = EditorModel::new(
            ShaderStorage::new(temp.path().join("shaders")),
            PresetCatalog::bundled(),
        );
        (model, temp)
    }

    #[test]
    fn startup_selects_first_preset() {
        let (model, _temp) = model_with_tempdir();
        let state = model.state();
        assert_eq!(state.current_name, "Gradient Flow");
        assert!(state.is_preset);
        assert!(state.is_compiled);
        assert!(!state.source.is_empty());
        assert_eq!(state.presets.len(), 4);
        assert!(state.saved_shaders.is_empty());
    }

    #[test]
    fn save_refreshes_list_and_emits_events() {
        let (mut model, _temp) = model_with_tempdir();
        let events = model.events().unwrap();

        model.handle_intent(EditorIntent::UpdateCode {
            code: "// mine".into(),
            cursor: 7,
        });
        model.handle_intent(EditorIntent::SaveShader("My Shader!#1".into()));

        let state = model.state();
        assert!(!state.is_saving);
        assert!(!state.is_preset);
        assert_eq!(state.current_name, "My_Shader__1");
        assert_eq!(state.saved_shaders.len(), 1);

        match events.try_recv().unwrap() {
            EditorEvent::Saved(meta) => assert_eq!(meta.name, "My_Shader__1"),
            other => panic!("expected saved event, got {other:?}"),
        }
        assert!(matches!(
            events.try_recv().unwrap(),
            EditorEvent::Message(_)
        ));
    }

    #[test]
    fn failed_load_leaves_source_untouched() {
        let (mut model, temp) = model_with_tempdir();
        let before = model.snapshot().source;

        let ghost = FileMeta {
            name: "ghost".into(),
            path: temp.path().join("shaders/ghost.glsl"),
            created_at: Utc::now(),
            modified_at: Utc::now(),
        };
        model.handle_intent(EditorIntent::LoadSavedShader(ghost));

        let state = model.state();
        assert_eq!(state.source, before);
        assert!(!state.is_loading);
    }

    #[test]
    fn load_saved_round_trips_through_storage() {
        let (mut model, _temp) = model_with_tempdir();
        model.handle_intent(EditorIntent::UpdateCode {
            code: "// stored".into(),
            cursor: 0,
        });
        model.handle_intent(EditorIntent::SaveShader("stored".into()));

        model.handle_intent(EditorIntent::LoadPreset("plasma".into()));
        assert!(model.state().is_preset);

        let meta = model.state().saved_shaders[0].clone();
        model.handle_intent(EditorIntent::LoadSavedShader(meta));
        let state = model.state();
        assert_eq!(state.source, "// stored");
        assert_eq!(state.current_name, "stored");
        assert!(!state.is_preset);
    }

    #[test]
    fn delete_refreshes_saved_list() {
        let (mut model, _temp) = model_with_tempdir();
        model.handle_intent(EditorIntent::SaveShader("doomed".into()));
        assert_eq!(model.state().saved_shaders.len(), 1);

        let meta = model.state().saved_shaders[0].clone();
        model.handle_intent(EditorIntent::DeleteShader(meta));
        assert!(model.state().saved_shaders.is_empty());
    }

    #[test]
    fn unknown_preset_reports_without_changing_source() {
        let (mut model, _temp) = model_with_tempdir();
        let mut events = model.events().unwrap();
        let before = model.snapshot().source;

        model.handle_intent(EditorIntent::LoadPreset("does-not-exist".into()));
        assert_eq!(model.state().source, before);
        assert!(!model.state().is_loading);
        assert_message(&mut events, "Preset not found");
    }

    #[test]
    fn compile_failure_records_error_and_keeps_fallback() {
        let (mut model, _temp) = model_with_tempdir();
        let events = model.events().unwrap();
        let mut runtime = FakeRuntime {
            fail_with: Some("syntax error at line 3".into()),
        };

        assert!(model.compile_with(&mut runtime).is_none());
        let state = model.state();
        assert!(!state.is_compiled);
        assert_eq!(state.compile_error.as_deref(), Some("syntax error at line 3"));
        assert!(matches!(
            events.try_recv().unwrap(),
            EditorEvent::CompileFailed(_)
        ));
    }

    #[test]
    fn successful_compile_clears_error_and_emits_compiled() {
        let (mut model, _temp) = model_with_tempdir();
        let events = model.events().unwrap();
        model.update_compile_status(false, Some("old error".into()));
        assert!(matches!(
            events.try_recv().unwrap(),
            EditorEvent::CompileFailed(_)
        ));

        let mut runtime = FakeRuntime { fail_with: None };
        let handle = model.compile_with(&mut runtime);
        assert!(handle.is_some());
        assert!(model.state().is_compiled);
        assert!(model.state().compile_error.is_none());
        assert!(matches!(events.try_recv().unwrap(), EditorEvent::Compiled));
    }

    #[test]
    fn editing_code_clears_stale_compile_error() {
        let (mut model, _temp) = model_with_tempdir();
        model.update_compile_status(false, Some("boom".into()));
        model.handle_intent(EditorIntent::UpdateCode {
            code: "// fixed".into(),
            cursor: 0,
        });
        assert!(model.state().compile_error.is_none());
    }

    #[test]
    fn keyboard_visibility_scrolls_to_cursor() {
        let (mut model, _temp) = model_with_tempdir();
        model.handle_intent(EditorIntent::UpdateCursorPosition(42));
        let events = model.events().unwrap();

        model.handle_intent(EditorIntent::KeyboardVisibilityChanged(true));
        assert!(matches!(
            events.try_recv().unwrap(),
            EditorEvent::ScrollToCode(42)
        ));
    }

    fn assert_message(events: &mut Receiver<EditorEvent>, expected: &str) {
        match events.try_recv().unwrap() {
            EditorEvent::Message(message) => assert_eq!(message, expected),
            other => panic!("expected message, got {other:?}"),
        }
    }
}
