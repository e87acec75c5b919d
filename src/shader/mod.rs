pub mod program;
pub mod source;

pub use program::{ShaderProgram, StageKind};
pub use source::ShaderSource;

use std::ffi::NulError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("can't open the shader file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("null byte in shader source: {0}")]
    Nul(#[from] NulError),
}
