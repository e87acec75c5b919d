use super::source::ShaderSource;
use super::ShaderError;
use gl::types::*;
use glam::Mat4;
use log::{debug, error, warn};
use std::collections::HashMap;
use std::ffi::{CStr, CString};
use std::path::Path;
use std::ptr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    fn gl_enum(self) -> GLenum {
        match self {
            StageKind::Vertex => gl::VERTEX_SHADER,
            StageKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    /// Tag used in compile diagnostics.
    pub fn tag(self) -> &'static str {
        match self {
            StageKind::Vertex => "VERTEX",
            StageKind::Fragment => "FRAGMENT",
        }
    }
}

/// A compiled shader object. Lives only between compilation and link-time
/// detachment; the underlying handle is released exactly once, on drop.
struct Stage {
    id: GLuint,
    kind: StageKind,
}

impl Stage {
    /// Single compile attempt, no retry. A failed stage is reported as
    /// `None` after its driver log has been emitted and the handle released;
    /// callers must not attach in that case.
    fn compile(kind: StageKind, source: &CStr) -> Option<Stage> {
        let id = unsafe { gl::CreateShader(kind.gl_enum()) };

        unsafe {
            gl::ShaderSource(id, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(id);
        }

        let mut success = 1;
        unsafe {
            gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            error!(
                "{} shader compilation failed:\n{}",
                kind.tag(),
                shader_info_log(id)
            );
            unsafe {
                gl::DeleteShader(id);
            }
            return None;
        }

        debug!("compiled {} stage", kind.tag());
        Some(Stage { id, kind })
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        }
    }
}

/// A linked program object plus a name-to-location cache for its uniforms.
/// The handle is owned for the whole rendering session and released exactly
/// once, on drop.
///
/// Linking is permissive: a program that failed to link is still returned
/// with the failure logged, and callers can inspect `link_ok` / `link_log`
/// before trusting it.
pub struct ShaderProgram {
    id: GLuint,
    uniforms: HashMap<String, GLint>,
    link_ok: bool,
    link_log: String,
}

impl ShaderProgram {
    /// Builds a program from a single `#shader`-tagged source file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ShaderError> {
        let sources = ShaderSource::from_file(path)?;
        Self::link(&sources)
    }

    /// Builds a program from two stage sources supplied directly.
    pub fn from_sources(vertex: &str, fragment: &str) -> Result<Self, ShaderError> {
        Self::link(&ShaderSource {
            vertex: vertex.to_string(),
            fragment: fragment.to_string(),
        })
    }

    /// Builds a single-stage program.
    pub fn from_single_stage(source: &str, kind: StageKind) -> Result<Self, ShaderError> {
        Self::link(&ShaderSource::from_single(source, kind))
    }

    /// The one link step every constructor funnels into: compile each
    /// non-empty stage, attach the ones that compiled, link, validate
    /// (diagnostic only), then detach the stages so their handles can go.
    fn link(sources: &ShaderSource) -> Result<Self, ShaderError> {
        // Interior nul bytes are rejected up front, before any GL object
        // exists.
        let mut pending = Vec::new();
        for (kind, text) in [
            (StageKind::Vertex, sources.vertex.as_str()),
            (StageKind::Fragment, sources.fragment.as_str()),
        ] {
            if text.is_empty() {
                continue;
            }
            pending.push((kind, CString::new(text.as_bytes())?));
        }

        let program = unsafe { gl::CreateProgram() };

        let mut stages = Vec::new();
        for (kind, source) in &pending {
            if let Some(stage) = Stage::compile(*kind, source) {
                unsafe {
                    gl::AttachShader(program, stage.id);
                }
                stages.push(stage);
            }
        }

        unsafe {
            gl::LinkProgram(program);
            gl::ValidateProgram(program);
        }

        let mut validated = 1;
        unsafe {
            gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut validated);
        }
        if validated == 0 {
            debug!("program validation reported:\n{}", program_info_log(program));
        }

        let mut linked = 1;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut linked);
        }
        let link_log = program_info_log(program);
        if linked == 0 {
            warn!("program linking failed:\n{}", link_log);
        }

        for stage in &stages {
            unsafe {
                gl::DetachShader(program, stage.id);
            }
            debug!("detached {} stage after link", stage.kind.tag());
        }

        Ok(ShaderProgram {
            id: program,
            uniforms: HashMap::new(),
            link_ok: linked != 0,
            link_log,
        })
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn link_ok(&self) -> bool {
        self.link_ok
    }

    pub fn link_log(&self) -> &str {
        &self.link_log
    }

    pub fn set_used(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    /// Looks the location up once and caches it. Unknown names warn on
    /// first lookup and resolve to -1, which the GL uniform calls treat as
    /// a silent no-op.
    pub fn get_uniform_location(&mut self, name: &str) -> GLint {
        if let Some(location) = self.uniforms.get(name) {
            return *location;
        }

        let location = match CString::new(name) {
            Ok(cname) => unsafe { gl::GetUniformLocation(self.id, cname.as_ptr()) },
            Err(_) => -1,
        };

        if location == -1 {
            warn!("uniform '{}' not found in shader program", name);
        }

        self.uniforms.insert(name.to_string(), location);
        location
    }

    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.set_int(name, value as i32);
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        self.set_used();
        let location = self.get_uniform_location(name);
        unsafe {
            gl::Uniform1i(location, value);
        }
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.set_used();
        let location = self.get_uniform_location(name);
        unsafe {
            gl::Uniform1f(location, value);
        }
    }

    pub fn set_mat4(&mut self, name: &str, mat: &Mat4) {
        self.set_used();
        let location = self.get_uniform_location(name);
        let columns = mat.to_cols_array();
        unsafe {
            gl::UniformMatrix4fv(location, 1, gl::FALSE, columns.as_ptr());
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

fn shader_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }
    let buffer = whitespace_cstring(len as usize);
    unsafe {
        gl::GetShaderInfoLog(id, len, ptr::null_mut(), buffer.as_ptr() as *mut GLchar);
    }
    buffer.to_string_lossy().into_owned()
}

fn program_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }
    let buffer = whitespace_cstring(len as usize);
    unsafe {
        gl::GetProgramInfoLog(id, len, ptr::null_mut(), buffer.as_ptr() as *mut GLchar);
    }
    buffer.to_string_lossy().into_owned()
}

fn whitespace_cstring(len: usize) -> CString {
    let mut buffer: Vec<u8> = Vec::with_capacity(len + 1);
    buffer.extend([b' '].iter().cycle().take(len));
    unsafe { CString::from_vec_unchecked(buffer) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_kind_tags() {
        assert_eq!(StageKind::Vertex.tag(), "VERTEX");
        assert_eq!(StageKind::Fragment.tag(), "FRAGMENT");
    }

    #[test]
    fn test_stage_kind_gl_mapping() {
        assert_eq!(StageKind::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(StageKind::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn test_whitespace_cstring_length() {
        assert_eq!(whitespace_cstring(0).as_bytes().len(), 0);
        assert_eq!(whitespace_cstring(16).as_bytes().len(), 16);
    }
}
