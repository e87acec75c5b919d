use crate::config::{DemoConfig, Shape};
use crate::render::mesh::Mesh;
use crate::render::texture::Texture;
use crate::shader::ShaderProgram;
use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use log::{info, warn};

/// Built-in demo shaders, used when no shader file is given on the command
/// line. They cover every runner variant: the matrices collapse to identity
/// for the flat shapes and `useTexture` gates the sampler.
pub mod demo_shaders {
    pub const VERTEX_SRC: &str = r#"
    #version 330 core
    layout (location = 0) in vec3 aPos;
    layout (location = 1) in vec2 aTexCoord;

    out vec2 TexCoord;

    uniform mat4 model;
    uniform mat4 view;
    uniform mat4 projection;

    void main() {
        TexCoord = aTexCoord;
        gl_Position = projection * view * model * vec4(aPos, 1.0);
    }
    "#;

    pub const FRAGMENT_SRC: &str = r#"
    #version 330 core
    out vec4 FragColor;

    in vec2 TexCoord;

    uniform sampler2D tex0;
    uniform bool useTexture;

    void main() {
        if (useTexture) {
            FragColor = texture(tex0, TexCoord);
        } else {
            FragColor = vec4(0.9, 0.4, 0.2, 1.0);
        }
    }
    "#;
}

/// One demo variant, ready to draw: the mesh for the selected primitive, its
/// shader program and the optional texture.
pub struct Scene {
    mesh: Mesh,
    program: ShaderProgram,
    texture: Option<Texture>,
    shape: Shape,
    spinning: bool,
}

impl Scene {
    /// Requires a current GL context on the calling thread.
    pub fn new(config: &DemoConfig) -> Result<Self> {
        let program = match &config.shader_path {
            Some(path) => ShaderProgram::from_file(path)
                .with_context(|| format!("failed to build shader program from {:?}", path))?,
            None => {
                ShaderProgram::from_sources(demo_shaders::VERTEX_SRC, demo_shaders::FRAGMENT_SRC)?
            }
        };
        if !program.link_ok() {
            warn!(
                "shader program did not link cleanly, drawing may produce nothing:\n{}",
                program.link_log()
            );
        }

        let texture = match &config.texture_path {
            Some(path) => match Texture::from_file(path) {
                Ok(texture) => {
                    info!(
                        "loaded {}x{} texture from {:?}",
                        texture.width(),
                        texture.height(),
                        path
                    );
                    Some(texture)
                }
                Err(e) => {
                    warn!("falling back to untextured rendering: {:#}", e);
                    None
                }
            },
            None => None,
        };

        info!("rendering a {} ({})", config.shape.name(), if config.spin { "spinning" } else { "static" });

        Ok(Self {
            mesh: Mesh::build(config.shape),
            program,
            texture,
            shape: config.shape,
            spinning: config.spin,
        })
    }

    pub fn draw(&mut self, elapsed: f32, aspect: f32) {
        self.program.set_used();

        let model = if self.spinning {
            Mat4::from_rotation_y(elapsed) * Mat4::from_rotation_x(elapsed * 0.5)
        } else {
            Mat4::IDENTITY
        };
        let (view, projection) = if self.shape == Shape::Cube {
            (
                Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0)),
                Mat4::perspective_rh_gl(45.0_f32.to_radians(), aspect, 0.1, 100.0),
            )
        } else {
            (Mat4::IDENTITY, Mat4::IDENTITY)
        };

        self.program.set_mat4("model", &model);
        self.program.set_mat4("view", &view);
        self.program.set_mat4("projection", &projection);
        self.program.set_float("time", elapsed);

        if let Some(texture) = &self.texture {
            texture.bind();
            self.program.set_int("tex0", 0);
        }
        self.program.set_bool("useTexture", self.texture.is_some());

        self.mesh.draw();
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::ShaderSource;

    #[test]
    fn test_demo_shaders_are_direct_sources() {
        // The built-in pair is fed to from_sources directly; it must not
        // carry #shader directives of its own.
        assert!(!demo_shaders::VERTEX_SRC.contains("#shader"));
        assert!(!demo_shaders::FRAGMENT_SRC.contains("#shader"));
    }

    #[test]
    fn test_demo_shaders_declare_expected_uniforms() {
        for name in ["model", "view", "projection"] {
            assert!(demo_shaders::VERTEX_SRC.contains(name));
        }
        assert!(demo_shaders::FRAGMENT_SRC.contains("useTexture"));
    }

    #[test]
    fn test_demo_shader_pair_survives_split_format() {
        // Users can paste the built-ins into a #shader file and get the
        // identical sections back out.
        let file = format!(
            "#shader vertex\n{}#shader fragment\n{}",
            demo_shaders::VERTEX_SRC, demo_shaders::FRAGMENT_SRC
        );
        let source = ShaderSource::parse(&file);
        assert!(source.vertex.contains("gl_Position"));
        assert!(source.fragment.contains("FragColor"));
    }
}
