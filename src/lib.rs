pub mod config;
pub mod render;

// Re-export commonly used types
pub use config::core::AppConfig;
pub use config::core::RenderConfig;
pub use config::core::WindowConfig;
pub use render::check::GlCallError;
pub use render::check::GlErrorKind;
pub use render::mesh::Mesh;
pub use render::pipeline::RenderPipeline;
pub use render::shaders::ShaderProgram;
pub use render::shaders::ShaderSource;
pub use render::shaders::ShaderStage;
