use gl::types::{GLchar, GLenum, GLuint};
use std::ffi::{CString, NulError};
use std::fmt;
use std::fs;
use std::path::Path;
use std::ptr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to compile {stage} shader: {log}")]
    CompilationFailed { stage: ShaderStage, log: String },
    #[error("failed to link shader program: {0}")]
    LinkingFailed(String),
    #[error("failed to read shader file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("shader source contains an interior nul byte: {0}")]
    NulError(#[from] NulError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Vertex and fragment source split out of one annotated file.
///
/// A line containing `#shader` is a marker: it is consumed, and if it also
/// names a stage (`vertex` or `fragment`) it selects that stage's section.
/// Every other line belongs to the most recently selected section. Lines
/// before the first marker are discarded, and a section with no marker stays
/// empty; the driver's compiler is the one that complains about an empty
/// string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn from_file(path: &Path) -> Result<Self, ShaderError> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    pub fn parse(text: &str) -> Self {
        let mut source = ShaderSource::default();
        let mut current: Option<ShaderStage> = None;

        for line in text.lines() {
            if line.contains("#shader") {
                if line.contains("vertex") {
                    current = Some(ShaderStage::Vertex);
                } else if line.contains("fragment") {
                    current = Some(ShaderStage::Fragment);
                }
            } else if let Some(stage) = current {
                let section = match stage {
                    ShaderStage::Vertex => &mut source.vertex,
                    ShaderStage::Fragment => &mut source.fragment,
                };
                section.push_str(line);
                section.push('\n');
            }
        }

        source
    }
}

pub struct ShaderProgram {
    id: GLuint,
}

impl ShaderProgram {
    pub fn from_file(path: &Path) -> Result<Self, ShaderError> {
        Self::from_source(&ShaderSource::from_file(path)?)
    }

    pub fn from_source(source: &ShaderSource) -> Result<Self, ShaderError> {
        let vertex_shader = Self::compile_stage(ShaderStage::Vertex, &source.vertex)?;
        let fragment_shader = Self::compile_stage(ShaderStage::Fragment, &source.fragment)?;

        let program = unsafe { gl::CreateProgram() };
        unsafe {
            gl::AttachShader(program, vertex_shader);
            gl::AttachShader(program, fragment_shader);
            gl::LinkProgram(program);
            gl::ValidateProgram(program);
            gl::DeleteShader(vertex_shader);
            gl::DeleteShader(fragment_shader);
        }

        Self::check_link_status(program)
    }

    fn compile_stage(stage: ShaderStage, source: &str) -> Result<GLuint, ShaderError> {
        let c_source = CString::new(source.as_bytes())?;

        let shader = unsafe { gl::CreateShader(stage.gl_enum()) };
        unsafe {
            gl::ShaderSource(shader, 1, &c_source.as_ptr(), ptr::null());
            gl::CompileShader(shader);
        }

        let mut success = 1;
        unsafe {
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            let mut len = 0;
            unsafe {
                gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            }

            let info_log = whitespace_cstring_with_len(len as usize);
            unsafe {
                gl::GetShaderInfoLog(shader, len, ptr::null_mut(), info_log.as_ptr() as *mut GLchar);
                gl::DeleteShader(shader);
            }

            return Err(ShaderError::CompilationFailed {
                stage,
                log: info_log.to_string_lossy().into_owned(),
            });
        }

        Ok(shader)
    }

    fn check_link_status(program: GLuint) -> Result<Self, ShaderError> {
        let mut success = 1;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        }

        if success == 0 {
            let mut len = 0;
            unsafe {
                gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            }

            let info_log = whitespace_cstring_with_len(len as usize);
            unsafe {
                gl::GetProgramInfoLog(program, len, ptr::null_mut(), info_log.as_ptr() as *mut GLchar);
            }

            return Err(ShaderError::LinkingFailed(
                info_log.to_string_lossy().into_owned(),
            ));
        }

        Ok(ShaderProgram { id: program })
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn set_used(&self) {
        unsafe {
            gl::UseProgram(self.id);
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

fn whitespace_cstring_with_len(len: usize) -> CString {
    let mut buffer: Vec<u8> = Vec::with_capacity(len + 1);
    buffer.extend([b' '].iter().cycle().take(len));
    unsafe { CString::from_vec_unchecked(buffer) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_SECTIONS: &str = "\
#shader vertex
#version 330 core
void main() { gl_Position = vec4(0.0); }
#shader fragment
#version 330 core
void main() {}
";

    #[test]
    fn test_parse_two_sections() {
        let source = ShaderSource::parse(TWO_SECTIONS);
        assert_eq!(
            source.vertex,
            "#version 330 core\nvoid main() { gl_Position = vec4(0.0); }\n"
        );
        assert_eq!(source.fragment, "#version 330 core\nvoid main() {}\n");
    }

    #[test]
    fn test_parse_is_order_independent() {
        let text = "\
#shader fragment
frag line
#shader vertex
vert line
";
        let source = ShaderSource::parse(text);
        assert_eq!(source.vertex, "vert line\n");
        assert_eq!(source.fragment, "frag line\n");
    }

    #[test]
    fn test_parse_without_markers_yields_empty_sections() {
        let source = ShaderSource::parse("void main() {}\nmore text\n");
        assert_eq!(source.vertex, "");
        assert_eq!(source.fragment, "");
    }

    #[test]
    fn test_parse_discards_lines_before_first_marker() {
        let text = "\
// stray comment
stray line
#shader vertex
kept line
";
        let source = ShaderSource::parse(text);
        assert_eq!(source.vertex, "kept line\n");
        assert_eq!(source.fragment, "");
        assert!(!source.vertex.contains("stray"));
    }

    #[test]
    fn test_parse_consumes_unrecognized_marker_lines() {
        let text = "\
#shader vertex
vert line
#shader geometry
still vertex
";
        let source = ShaderSource::parse(text);
        // The marker line itself never lands in a section, and an unknown
        // stage name leaves the selector where it was.
        assert_eq!(source.vertex, "vert line\nstill vertex\n");
        assert_eq!(source.fragment, "");
    }

    #[test]
    fn test_parse_missing_fragment_section_stays_empty() {
        let source = ShaderSource::parse("#shader vertex\nonly vertex\n");
        assert_eq!(source.vertex, "only vertex\n");
        assert_eq!(source.fragment, "");
    }

    #[test]
    fn test_from_file_reads_and_splits() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_SECTIONS.as_bytes()).unwrap();

        let source = ShaderSource::from_file(file.path()).unwrap();
        assert!(source.vertex.contains("gl_Position"));
        assert!(source.fragment.contains("void main"));
    }

    #[test]
    fn test_from_file_missing_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ShaderSource::from_file(&dir.path().join("nope.shader"));
        assert!(matches!(result, Err(ShaderError::IoError(_))));
    }

    #[test]
    fn test_compile_error_names_the_stage() {
        let err = ShaderError::CompilationFailed {
            stage: ShaderStage::Fragment,
            log: "0:1(1): error: syntax error".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("fragment"));
        assert!(text.contains("syntax error"));
    }
}
