//! Line terminator search over a single read's bytes.
//!
//! The echo loop hands each read's bytes to `scan` and echoes the prefix
//! through the first newline. Bytes are never accumulated across reads,
//! so a read without a newline is a terminal condition for the caller.

/// Result of scanning one read's bytes for a line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanResult {
    /// A newline was found; `len` bytes (terminator included) form the echo.
    Line {
        /// Byte count from the start of the read through the newline.
        len: usize,
    },
    /// No newline in this read's bytes.
    MissingTerminator,
}

/// Find the first newline byte in `input`.
///
/// Returns the echo length (newline included) or `MissingTerminator`.
pub fn scan(input: &[u8]) -> ScanResult {
    match input.iter().position(|&b| b == b'\n') {
        Some(pos) => ScanResult::Line { len: pos + 1 },
        None => ScanResult::MissingTerminator,
    }
}
