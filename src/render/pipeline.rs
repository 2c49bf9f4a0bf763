use log::info;
use thiserror::Error;

use super::check::GlCallError;
use super::mesh::Mesh;
use super::shaders::{ShaderError, ShaderProgram, ShaderSource};
use crate::config::RenderConfig;
use crate::gl_call;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error(transparent)]
    Gl(#[from] GlCallError),
}

/// Owns the shader program and the quad geometry for the lifetime of the
/// process; one draw call per frame.
pub struct RenderPipeline {
    program: ShaderProgram,
    quad: Mesh,
    clear_color: [f32; 4],
}

impl RenderPipeline {
    pub fn new(config: &RenderConfig) -> Result<Self, RenderError> {
        let source = ShaderSource::from_file(&config.shader_path)?;
        let program = ShaderProgram::from_source(&source)?;
        info!(
            "Shader program {} ready ({})",
            program.id(),
            config.shader_path.display()
        );

        let quad = Mesh::quad()?;
        program.set_used();

        Ok(Self {
            program,
            quad,
            clear_color: config.clear_color,
        })
    }

    pub fn draw_frame(&self) -> Result<(), GlCallError> {
        let [r, g, b, a] = self.clear_color;
        gl_call!(gl::ClearColor(r, g, b, a))?;
        gl_call!(gl::Clear(gl::COLOR_BUFFER_BIT))?;
        self.quad.draw()
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }
}
