pub mod app;
pub mod config;
pub mod render;
pub mod shader;

// Re-export commonly used types
pub use app::App;
pub use config::{DemoConfig, Shape, WindowConfig};
pub use render::mesh::Mesh;
pub use render::scene::Scene;
pub use render::texture::Texture;
pub use shader::program::{ShaderProgram, StageKind};
pub use shader::source::ShaderSource;
pub use shader::ShaderError;
