/// Construction-time configuration for a [`ByteSource`](crate::ByteSource).
///
/// # Examples
///
/// ```rust
/// use dumpfeed::{ByteSource, SourceOptions};
///
/// let options = SourceOptions { max_line_len: 80 };
/// let mut source = ByteSource::from_bytes(b"short line\n".to_vec(), options);
/// assert_eq!(source.read_line().unwrap(), Some(&b"short line"[..]));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SourceOptions {
    /// Upper bound, in bytes, on the content of a single line, excluding
    /// the newline terminator.
    ///
    /// The line scratch never grows past this bound: a longer line is
    /// reported as [`SourceError::LineTooLong`](crate::SourceError::LineTooLong)
    /// rather than accommodated. Callers reading headers of a known
    /// protocol should size this to that protocol's contract.
    ///
    /// # Default
    ///
    /// `10_000`
    pub max_line_len: usize,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            max_line_len: 10_000,
        }
    }
}
