use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by [`ByteSource`](crate::ByteSource) operations.
///
/// Short reads are not failures; they surface through returned lengths.
/// Everything here is terminal for the operation that returned it, and
/// nothing is retried internally.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The input path could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying system error.
        source: io::Error,
    },

    /// A low-level read on the underlying stream failed.
    ///
    /// Raised by the failing operation and again by
    /// [`close`](crate::ByteSource::close) via the sticky flag.
    #[error("read error on input stream: {0}")]
    Read(#[from] io::Error),

    /// A line ran past the configured bound without a terminator.
    ///
    /// Line lengths are bounded by protocol contract; outrunning the
    /// bound is malformed input, and the stream position afterwards is
    /// unspecified.
    #[error("line exceeds {limit} bytes without a newline")]
    LineTooLong {
        /// The configured bound on line content, in bytes.
        limit: usize,
    },

    /// The destination sink failed while bytes were being forwarded.
    ///
    /// The input side has already been advanced past the whole requested
    /// run when this is returned.
    #[error("write error on copy destination: {0}")]
    SinkWrite(#[source] io::Error),
}
