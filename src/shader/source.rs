use super::program::StageKind;
use super::ShaderError;
use std::fs;
use std::path::Path;

/// The two stage sections split out of a single shader file. Built once,
/// never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Vertex,
    Fragment,
}

impl ShaderSource {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Splits `#shader vertex` / `#shader fragment` tagged text into the two
    /// stage buffers. Directive lines are consumed and never accumulated; a
    /// directive with an unrecognized tag leaves the active section as-is.
    /// Lines before the first directive belong to no section and are dropped.
    pub fn parse(text: &str) -> Self {
        let mut out = ShaderSource::default();
        let mut section = Section::None;

        for line in text.lines() {
            if line.contains("#shader") {
                if line.contains("vertex") {
                    section = Section::Vertex;
                } else if line.contains("fragment") {
                    section = Section::Fragment;
                }
                continue;
            }

            let buffer = match section {
                Section::None => continue,
                Section::Vertex => &mut out.vertex,
                Section::Fragment => &mut out.fragment,
            };
            buffer.push_str(line);
            buffer.push('\n');
        }

        out
    }

    /// Source for a single-stage program; the other buffer stays empty.
    pub fn from_single(text: &str, kind: StageKind) -> Self {
        let mut out = ShaderSource::default();
        match kind {
            StageKind::Vertex => out.vertex = text.to_string(),
            StageKind::Fragment => out.fragment = text.to_string(),
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_well_formed() {
        let text = "#shader vertex\nvoid main() {}\n#shader fragment\nout vec4 c;\nvoid main() {}\n";
        let source = ShaderSource::parse(text);
        assert_eq!(source.vertex, "void main() {}\n");
        assert_eq!(source.fragment, "out vec4 c;\nvoid main() {}\n");
    }

    #[test]
    fn test_lines_before_first_directive_are_dropped() {
        let text = "// prelude comment\nfloat shared;\n#shader vertex\nvoid main() {}\n";
        let source = ShaderSource::parse(text);
        assert_eq!(source.vertex, "void main() {}\n");
        assert!(source.fragment.is_empty());
        assert!(!source.vertex.contains("prelude"));
        assert!(!source.vertex.contains("shared"));
    }

    #[test]
    fn test_directive_lines_never_accumulate() {
        let text = "#shader vertex\na\n#shader fragment\nb\n";
        let source = ShaderSource::parse(text);
        assert!(!source.vertex.contains("#shader"));
        assert!(!source.fragment.contains("#shader"));
    }

    #[test]
    fn test_round_trip() {
        let vertex = "layout (location = 0) in vec3 aPos;\nvoid main() { gl_Position = vec4(aPos, 1.0); }\n";
        let fragment = "out vec4 FragColor;\nvoid main() { FragColor = vec4(1.0); }\n";
        let file = format!("#shader vertex\n{vertex}#shader fragment\n{fragment}");
        let source = ShaderSource::parse(&file);
        assert_eq!(source.vertex, vertex);
        assert_eq!(source.fragment, fragment);
    }

    #[test]
    fn test_unknown_directive_tag_keeps_current_section() {
        let text = "#shader vertex\na\n#shader geometry\nb\n";
        let source = ShaderSource::parse(text);
        // The unknown directive line is consumed, but the section stays vertex.
        assert_eq!(source.vertex, "a\nb\n");
        assert!(source.fragment.is_empty());
    }

    #[test]
    fn test_each_line_gains_one_trailing_newline() {
        let text = "#shader fragment\nline without terminator";
        let source = ShaderSource::parse(text);
        assert_eq!(source.fragment, "line without terminator\n");
    }

    #[test]
    fn test_empty_input() {
        let source = ShaderSource::parse("");
        assert!(source.vertex.is_empty());
        assert!(source.fragment.is_empty());
    }

    #[test]
    fn test_sections_in_reverse_order() {
        let text = "#shader fragment\nf\n#shader vertex\nv\n";
        let source = ShaderSource::parse(text);
        assert_eq!(source.vertex, "v\n");
        assert_eq!(source.fragment, "f\n");
    }

    #[test]
    fn test_from_single_fills_exactly_one_buffer() {
        let source = ShaderSource::from_single("void main() {}", StageKind::Vertex);
        assert_eq!(source.vertex, "void main() {}");
        assert!(source.fragment.is_empty());

        let source = ShaderSource::from_single("void main() {}", StageKind::Fragment);
        assert!(source.vertex.is_empty());
        assert_eq!(source.fragment, "void main() {}");
    }

    #[test]
    fn test_from_file_missing_path_reports_path() {
        let err = ShaderSource::from_file("no/such/file.shader").unwrap_err();
        assert!(err.to_string().contains("no/such/file.shader"));
    }

    #[test]
    fn test_bundled_demo_files_split_cleanly() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/demos");
        for name in ["basic.shader", "pulse.shader"] {
            let source = ShaderSource::from_file(format!("{dir}/{name}")).unwrap();
            assert!(source.vertex.starts_with("#version"), "{name} vertex section");
            assert!(source.fragment.starts_with("#version"), "{name} fragment section");
        }
    }
}
