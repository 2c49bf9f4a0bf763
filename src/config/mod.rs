pub mod core;

pub use core::load_or_create_config;
pub use core::AppConfig;
pub use core::RenderConfig;
pub use core::WindowConfig;
