use std::fmt;

/// Errors produced while rendering or saving the icon
#[derive(Debug)]
pub enum Error {
    /// Filesystem failure, e.g. missing output directory or permission denied
    Io(std::io::Error),
    /// PNG encoder rejected the image
    Encoding(png::EncodingError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(error) => write!(f, "I/O error: {}", error),
            Error::Encoding(error) => write!(f, "PNG encoding error: {}", error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(error) => Some(error),
            Error::Encoding(error) => Some(error),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<png::EncodingError> for Error {
    fn from(error: png::EncodingError) -> Self {
        match error {
            png::EncodingError::IoError(error) => Error::Io(error),
            error => Error::Encoding(error),
        }
    }
}
