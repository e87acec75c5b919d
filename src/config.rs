use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Primitive rendered by the demo runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shape {
    #[default]
    Triangle,
    Quad,
    Cube,
}

impl Shape {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "triangle" | "tri" => Some(Shape::Triangle),
            "quad" | "rect" => Some(Shape::Quad),
            "cube" => Some(Shape::Cube),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Triangle => "triangle",
            Shape::Quad => "quad",
            Shape::Cube => "cube",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "glint".to_string(),
            width: 800,
            height: 640,
        }
    }
}

/// Variant selection for the demo runner: which primitive, whether it spins,
/// and where its shader/texture come from. Absent paths fall back to the
/// built-in sources and untextured rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    pub shape: Shape,
    pub spin: bool,
    pub shader_path: Option<PathBuf>,
    pub texture_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_from_name() {
        assert_eq!(Shape::from_name("triangle"), Some(Shape::Triangle));
        assert_eq!(Shape::from_name("QUAD"), Some(Shape::Quad));
        assert_eq!(Shape::from_name("Cube"), Some(Shape::Cube));
        assert_eq!(Shape::from_name("teapot"), None);
    }

    #[test]
    fn test_shape_name_round_trip() {
        for shape in [Shape::Triangle, Shape::Quad, Shape::Cube] {
            assert_eq!(Shape::from_name(shape.name()), Some(shape));
        }
    }

    #[test]
    fn test_window_defaults() {
        let config = WindowConfig::default();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 640);
    }

    #[test]
    fn test_demo_defaults() {
        let config = DemoConfig::default();
        assert_eq!(config.shape, Shape::Triangle);
        assert!(!config.spin);
        assert!(config.shader_path.is_none());
        assert!(config.texture_path.is_none());
    }
}
