mod editor;
mod presets;
mod runtime;
mod storage;
mod ticker;
mod worker;

pub use editor::{EditorEvent, EditorIntent, EditorModel, EditorState, FALLBACK_COLOR};
pub use presets::{PresetCatalog, ShaderPreset};
pub use runtime::{CompileError, CompiledShader, ShaderRuntime, Uniform};
pub use storage::{sanitize_file_name, FileMeta, ShaderStorage, StorageError, SHADER_EXTENSION};
pub use ticker::{Ticker, FRAME_INTERVAL};
pub use worker::{StorageRequest, StorageResponse, StorageWorker};
