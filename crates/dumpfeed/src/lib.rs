//! Buffered byte input for stream-oriented dump and delta parsers.
//!
//! A dump stream mixes three consumption disciplines over one sequence of
//! bytes: newline-delimited header lines, length-prefixed binary payloads,
//! and long runs of raw bytes that are either discarded or forwarded
//! verbatim to an output. [`ByteSource`] reconciles the three against a
//! single buffered input, so that the parser layered on top never has to
//! touch the transport itself and always knows, byte for byte, how far the
//! stream has advanced.
//!
//! The reader is deliberately small and deliberately strict:
//!
//! - line reads are bounded; a line that outruns the bound is malformed
//!   input, not a reason to grow a buffer,
//! - blob reads reuse one internal buffer, so results are transient views
//!   that the next call invalidates ([`ByteSource::read_blob_into`] is the
//!   retention path),
//! - I/O failures are never retried; they surface as sentinel returns, as
//!   errors, or through a sticky error flag checked once at the end.
//!
//! # Examples
//!
//! ```rust
//! use dumpfeed::{ByteSource, SourceOptions};
//!
//! let record = b"Text-content-length: 5\n\nhello\nNode-path: trunk\n";
//! let mut source = ByteSource::from_bytes(record.to_vec(), SourceOptions::default());
//!
//! assert_eq!(source.read_line().unwrap(), Some(&b"Text-content-length: 5"[..]));
//! assert_eq!(source.read_line().unwrap(), Some(&b""[..]));
//! assert_eq!(source.read_blob(5).unwrap(), &b"hello"[..]);
//! assert_eq!(source.read_byte(), Some(b'\n'));
//! assert_eq!(source.read_line().unwrap(), Some(&b"Node-path: trunk"[..]));
//! assert!(source.at_eof());
//! source.close().unwrap();
//! ```

mod source;

#[cfg(test)]
mod tests;

pub use source::{ByteSource, SourceError, SourceOptions};
