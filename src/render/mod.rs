//! Shader loading, GL error checking and the quad draw path
pub mod check;
pub mod mesh;
pub mod pipeline;
pub mod shaders;

// Public interface
pub use check::{GlCallError, GlErrorKind};
pub use mesh::{Mesh, Vertex};
pub use pipeline::{RenderError, RenderPipeline};
pub use shaders::{ShaderError, ShaderProgram, ShaderSource, ShaderStage};
