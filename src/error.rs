//! Connection-scoped error types.

use std::io;

/// Errors that terminate a single connection's echo loop.
///
/// These never propagate beyond the connection's task; the server logs
/// them and moves on.
#[derive(Debug)]
pub enum ConnectionError {
    /// Read or write on the stream failed.
    Io(io::Error),
    /// A read of `len` bytes contained no line terminator.
    MissingTerminator { len: usize },
}

impl std::fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionError::Io(e) => write!(f, "stream I/O failed: {e}"),
            ConnectionError::MissingTerminator { len } => {
                write!(f, "no line terminator found in {len}-byte read")
            }
        }
    }
}

impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConnectionError::Io(e) => Some(e),
            ConnectionError::MissingTerminator { .. } => None,
        }
    }
}

impl From<io::Error> for ConnectionError {
    fn from(e: io::Error) -> Self {
        ConnectionError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_terminator_display() {
        let e = ConnectionError::MissingTerminator { len: 17 };
        assert_eq!(e.to_string(), "no line terminator found in 17-byte read");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::ConnectionReset, "reset");
        let e = ConnectionError::from(io_err);
        assert!(matches!(e, ConnectionError::Io(_)));
        assert!(e.to_string().contains("reset"));
    }
}
