pub mod mesh;
pub mod scene;
pub mod texture;

pub use mesh::Mesh;
pub use scene::Scene;
pub use texture::Texture;
