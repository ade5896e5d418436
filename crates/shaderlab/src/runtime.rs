//! Contract for the GPU shader runtime collaborator. The editor treats
//! shader source as opaque text: it hands the text to a `ShaderRuntime`,
//! receives either a drawable handle or a compile error string, and feeds
//! uniforms into the handle each frame. No GPU code lives in this crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("shader compilation failed: {0}")]
    Compile(String),

    #[error("shader draw failed: {0}")]
    Draw(String),
}

/// Uniform bindings the editor feeds into a compiled shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform {
    /// Elapsed time in seconds.
    Time(f32),
    /// Surface resolution in physical pixels.
    Resolution([f32; 2]),
    /// Last touch/pointer position in surface coordinates.
    Mouse([f32; 2]),
}

pub trait CompiledShader {
    fn set_uniform(&mut self, uniform: Uniform);

    fn draw(&mut self, target_size: (u32, u32)) -> Result<(), CompileError>;
}

pub trait ShaderRuntime {
    fn compile(&mut self, source: &str) -> Result<Box<dyn CompiledShader>, CompileError>;
}
