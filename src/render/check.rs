use gl::types::GLenum;
use thiserror::Error;

/// Decoded `glGetError` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GlErrorKind {
    #[error("GL_INVALID_ENUM")]
    InvalidEnum,
    #[error("GL_INVALID_VALUE")]
    InvalidValue,
    #[error("GL_INVALID_OPERATION")]
    InvalidOperation,
    #[error("GL_STACK_OVERFLOW")]
    StackOverflow,
    #[error("GL_STACK_UNDERFLOW")]
    StackUnderflow,
    #[error("GL_OUT_OF_MEMORY")]
    OutOfMemory,
    #[error("GL_INVALID_FRAMEBUFFER_OPERATION")]
    InvalidFramebufferOperation,
    #[error("unknown GL error 0x{0:04x}")]
    Unknown(u32),
}

impl GlErrorKind {
    pub fn from_raw(code: GLenum) -> Option<Self> {
        match code {
            gl::NO_ERROR => None,
            gl::INVALID_ENUM => Some(Self::InvalidEnum),
            gl::INVALID_VALUE => Some(Self::InvalidValue),
            gl::INVALID_OPERATION => Some(Self::InvalidOperation),
            gl::STACK_OVERFLOW => Some(Self::StackOverflow),
            gl::STACK_UNDERFLOW => Some(Self::StackUnderflow),
            gl::OUT_OF_MEMORY => Some(Self::OutOfMemory),
            gl::INVALID_FRAMEBUFFER_OPERATION => Some(Self::InvalidFramebufferOperation),
            other => Some(Self::Unknown(other)),
        }
    }
}

/// A GL error attributed to one bracketed call.
#[derive(Debug, Clone, Error)]
#[error("{kind} in `{call}` at {file}:{line}")]
pub struct GlCallError {
    pub kind: GlErrorKind,
    pub call: &'static str,
    pub file: &'static str,
    pub line: u32,
}

/// Drains any pending error codes so the next check is attributed to the
/// right call.
pub fn clear_error_queue() {
    while unsafe { gl::GetError() } != gl::NO_ERROR {}
}

/// Polls once for a pending error. Reports only the first pending code even
/// if several accumulated; the rest are flushed by the next bracket's
/// [`clear_error_queue`].
pub fn take_error(call: &'static str, file: &'static str, line: u32) -> Result<(), GlCallError> {
    match GlErrorKind::from_raw(unsafe { gl::GetError() }) {
        None => Ok(()),
        Some(kind) => {
            let err = GlCallError {
                kind,
                call,
                file,
                line,
            };
            log::error!("{err}");
            Err(err)
        }
    }
}

/// Brackets a GL call with an error-queue drain before and a single error
/// poll after, yielding the call's value as a `Result`.
#[macro_export]
macro_rules! gl_call {
    ($call:expr) => {{
        $crate::render::check::clear_error_queue();
        let ret = unsafe { $call };
        $crate::render::check::take_error(stringify!($call), file!(), line!()).map(|()| ret)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_codes() {
        assert_eq!(GlErrorKind::from_raw(gl::NO_ERROR), None);
        assert_eq!(
            GlErrorKind::from_raw(gl::INVALID_ENUM),
            Some(GlErrorKind::InvalidEnum)
        );
        assert_eq!(
            GlErrorKind::from_raw(gl::INVALID_VALUE),
            Some(GlErrorKind::InvalidValue)
        );
        assert_eq!(
            GlErrorKind::from_raw(gl::INVALID_OPERATION),
            Some(GlErrorKind::InvalidOperation)
        );
        assert_eq!(
            GlErrorKind::from_raw(gl::OUT_OF_MEMORY),
            Some(GlErrorKind::OutOfMemory)
        );
        assert_eq!(
            GlErrorKind::from_raw(gl::INVALID_FRAMEBUFFER_OPERATION),
            Some(GlErrorKind::InvalidFramebufferOperation)
        );
    }

    #[test]
    fn test_decode_unknown_code() {
        assert_eq!(
            GlErrorKind::from_raw(0xBEEF),
            Some(GlErrorKind::Unknown(0xBEEF))
        );
    }

    #[test]
    fn test_call_error_names_the_site() {
        let err = GlCallError {
            kind: GlErrorKind::InvalidOperation,
            call: "gl::DrawElements(..)",
            file: "src/render/mesh.rs",
            line: 42,
        };
        let text = err.to_string();
        assert!(text.contains("GL_INVALID_OPERATION"));
        assert!(text.contains("gl::DrawElements(..)"));
        assert!(text.contains("src/render/mesh.rs:42"));
    }
}
