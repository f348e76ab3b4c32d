use std::path::{Path, PathBuf};

pub type TgaResult<T> = Result<T, TgaError>;

#[derive(thiserror::Error, Debug)]
pub enum TgaError {
    #[error("invalid file name '{}' (expected a .tga path)", .0.display())]
    InvalidFilename(PathBuf),

    #[error("file does not exist: '{}'", .0.display())]
    FileNotFound(PathBuf),

    #[error("missing argument for '{command}'")]
    MissingOperand { command: String },

    #[error("invalid argument for '{command}': expected a number, got '{token}'")]
    InvalidNumericArgument { command: String, token: String },

    #[error("invalid method name '{0}'")]
    UnknownCommand(String),

    #[error("shape mismatch in {op}: {left} bytes vs {right} bytes")]
    ShapeMismatch {
        op: &'static str,
        left: usize,
        right: usize,
    },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("truncated image '{}': expected {expected} bytes, found {actual}", .path.display())]
    Truncated {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("i/o error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TgaError {
    pub fn missing_operand(command: impl Into<String>) -> Self {
        Self::MissingOperand {
            command: command.into(),
        }
    }

    pub fn invalid_header(msg: impl Into<String>) -> Self {
        Self::InvalidHeader(msg.into())
    }

    pub fn shape_mismatch(op: &'static str, left: usize, right: usize) -> Self {
        Self::ShapeMismatch { op, left, right }
    }

    /// Wraps an I/O failure on `path`, promoting `NotFound` to [`TgaError::FileNotFound`].
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::FileNotFound(path.to_path_buf());
        }
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            TgaError::missing_operand("multiply")
                .to_string()
                .contains("missing argument for 'multiply'")
        );
        assert!(
            TgaError::invalid_header("x")
                .to_string()
                .contains("invalid header:")
        );
        assert!(
            TgaError::shape_mismatch("screen", 6, 3)
                .to_string()
                .contains("shape mismatch in screen")
        );
    }

    #[test]
    fn io_not_found_becomes_file_not_found() {
        let err = TgaError::io(
            Path::new("nope.tga"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(err, TgaError::FileNotFound(p) if p == Path::new("nope.tga")));

        let err = TgaError::io(Path::new("x.tga"), std::io::Error::other("boom"));
        assert!(matches!(err, TgaError::Io { .. }));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = TgaError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
