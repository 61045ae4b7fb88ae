//! The buffered byte reader underneath a dump-stream parser.
//!
//! One [`ByteSource`] owns one input handle plus two scratch buffers: a
//! bounded line buffer and a growable blob buffer that is truncated at the
//! start of every binary read. Every operation advances the stream by
//! exactly the number of bytes it reports consuming, which is what lets a
//! parser interleave line reads, length-prefixed blob reads, and raw
//! skip/copy runs over the same handle without ever losing track of its
//! position.
//!
//! End-of-stream peeking is built on a one-byte lookahead slot instead of
//! transport-level pushback, so it works identically for files, standard
//! input, and in-memory buffers. All read paths drain the slot before
//! touching the transport.
//!
//! Low-level read failures are recorded in a sticky flag as well as being
//! reported by the failing call; [`ByteSource::close`] surfaces the flag
//! one final time, so a caller can run a whole sequence of operations and
//! check once at the end instead of checking every call.

mod error;
mod input;
mod options;


use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read, Write};
use std::mem;
use std::path::Path;

use bstr::ByteSlice;

pub use error::SourceError;
use input::Input;
pub use options::SourceOptions;

/// Sequential, buffered reader over one dump-stream input.
///
/// Construct it over a file path, standard input, or an owned byte
/// buffer; drive it with any interleaving of the read, skip, and copy
/// operations; then release it with [`ByteSource::close`], which reports
/// any read failure the sequence left behind.
///
/// Results of [`read_line`](ByteSource::read_line) and
/// [`read_blob`](ByteSource::read_blob) borrow scratch buffers owned by
/// the reader and are invalidated by the next call; copy them out, or use
/// [`read_blob_into`](ByteSource::read_blob_into), when the bytes must
/// outlive the next operation.
#[derive(Debug)]
pub struct ByteSource {
    input: Input,
    /// One byte parked by [`ByteSource::at_eof`]; drained before any read
    /// touches the transport.
    lookahead: Option<u8>,
    /// First low-level read failure observed on this input. Sticky.
    failed: Option<io::ErrorKind>,
    line_buf: Vec<u8>,
    blob_buf: Vec<u8>,
    max_line_len: usize,
}

impl ByteSource {
    /// Opens `path` read-only and binds a reader to it.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Open`] carrying the path and the underlying
    /// system error when the file cannot be opened.
    pub fn open(path: impl AsRef<Path>, options: SourceOptions) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self::new(Input::File(BufReader::new(file)), options))
    }

    /// Binds a reader to the process's standard input.
    ///
    /// The handle is locked for the lifetime of the reader. Standard
    /// input is not closed at [`close`](ByteSource::close); only its
    /// error state is reported.
    #[must_use]
    pub fn stdin(options: SourceOptions) -> Self {
        Self::new(Input::Stdin(io::stdin().lock()), options)
    }

    /// Binds a reader to an owned in-memory byte buffer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dumpfeed::{ByteSource, SourceOptions};
    ///
    /// let mut source = ByteSource::from_bytes(b"K 4\n".to_vec(), SourceOptions::default());
    /// assert_eq!(source.read_line().unwrap(), Some(&b"K 4"[..]));
    /// ```
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, options: SourceOptions) -> Self {
        Self::new(Input::Bytes(Cursor::new(bytes.into())), options)
    }

    fn new(input: Input, options: SourceOptions) -> Self {
        Self {
            input,
            lookahead: None,
            failed: None,
            line_buf: Vec::new(),
            blob_buf: Vec::new(),
            max_line_len: options.max_line_len,
        }
    }

    /// Releases the reader, reporting any failure the session left behind.
    ///
    /// A file-backed input is closed by the release; standard input and
    /// in-memory inputs are not closable and only their error state is
    /// checked.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Read`] when any prior operation raised the
    /// sticky error flag, even if every later operation succeeded.
    pub fn close(self) -> Result<(), SourceError> {
        match self.sticky_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Reports whether any operation on this reader has observed a
    /// low-level I/O error.
    ///
    /// The flag is sticky: later successful operations do not clear it.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.failed.is_some()
    }

    /// Reports whether the next read would return no data, without
    /// consuming anything.
    ///
    /// Implemented by reading one byte into the lookahead slot, so a peek
    /// followed by any read yields exactly the bytes the read alone would
    /// have yielded. A read failure counts as end of stream here and sets
    /// the sticky flag.
    pub fn at_eof(&mut self) -> bool {
        if self.lookahead.is_some() {
            return false;
        }
        match self.read_byte() {
            Some(byte) => {
                self.lookahead = Some(byte);
                false
            }
            None => true,
        }
    }

    /// Returns the next byte, or `None` once the stream is exhausted or
    /// broken.
    ///
    /// This call alone cannot distinguish end of stream from failure;
    /// [`has_error`](ByteSource::has_error) can.
    pub fn read_byte(&mut self) -> Option<u8> {
        if let Some(byte) = self.lookahead.take() {
            return Some(byte);
        }
        loop {
            match self.input.fill_buf() {
                Ok(chunk) => {
                    let byte = *chunk.first()?;
                    self.input.consume(1);
                    return Some(byte);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    self.note_failure(&err);
                    return None;
                }
            }
        }
    }

    /// Reads the next line, stripping the `\n` terminator.
    ///
    /// The stream is treated as opaque bytes; only the single-byte `\n`
    /// marker splits lines, and a `\r` before it is content. A final line
    /// without a terminator is returned as-is; `Ok(None)` means the
    /// stream ended cleanly with no further bytes.
    ///
    /// The returned slice borrows the reader's line scratch and is
    /// invalidated by the next operation.
    ///
    /// # Errors
    ///
    /// - [`SourceError::LineTooLong`] when the line outruns the
    ///   configured bound before a terminator shows up. The line bound is
    ///   a protocol contract, so this is malformed input; the stream
    ///   position is unspecified afterwards and the reader should be
    ///   discarded.
    /// - [`SourceError::Read`] when the transport fails; the sticky flag
    ///   is raised as well.
    pub fn read_line(&mut self) -> Result<Option<&[u8]>, SourceError> {
        self.line_buf.clear();
        if let Some(byte) = self.lookahead.take() {
            if byte == b'\n' {
                return Ok(Some(&self.line_buf));
            }
            self.line_buf.push(byte);
        }
        loop {
            let chunk = match self.input.fill_buf() {
                Ok(chunk) => chunk,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.note_failure(&err);
                    return Err(SourceError::Read(err));
                }
            };
            if chunk.is_empty() {
                // Data exhausted. An unterminated final line is fine.
                return if self.line_buf.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(&self.line_buf))
                };
            }
            match chunk.find_byte(b'\n') {
                Some(at) => {
                    if self.line_buf.len() + at > self.max_line_len {
                        return Err(SourceError::LineTooLong {
                            limit: self.max_line_len,
                        });
                    }
                    self.line_buf.extend_from_slice(&chunk[..at]);
                    self.input.consume(at + 1);
                    return Ok(Some(&self.line_buf));
                }
                None => {
                    if self.line_buf.len() + chunk.len() > self.max_line_len {
                        return Err(SourceError::LineTooLong {
                            limit: self.max_line_len,
                        });
                    }
                    let taken = chunk.len();
                    self.line_buf.extend_from_slice(chunk);
                    self.input.consume(taken);
                }
            }
        }
    }

    /// Reads up to `len` bytes into the reader's blob buffer and returns
    /// a view of them.
    ///
    /// The blob buffer is truncated first, so the view never contains
    /// stale bytes from an earlier read. Fewer than `len` bytes at end of
    /// stream is not an error; the view is simply shorter, and callers
    /// that need exactness compare its length against `len`. The view is
    /// invalidated by the next operation on the reader.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Read`] when the sticky error flag is set
    /// after the read, whether this call raised it or an earlier one did.
    pub fn read_blob(&mut self, len: u64) -> Result<&[u8], SourceError> {
        let mut buf = mem::take(&mut self.blob_buf);
        buf.clear();
        self.pull(len, &mut buf);
        self.blob_buf = buf;
        match self.sticky_error() {
            Some(err) => Err(err),
            None => Ok(&self.blob_buf),
        }
    }

    /// Reads up to `len` bytes, appending them to `dst`.
    ///
    /// The retention-friendly variant of [`read_blob`](ByteSource::read_blob):
    /// the caller owns the buffer, so the bytes survive subsequent reads.
    /// `dst` is appended to, never truncated. Returns the number of bytes
    /// appended; short counts mean the stream ended early.
    ///
    /// # Errors
    ///
    /// Same as [`read_blob`](ByteSource::read_blob). Bytes pulled before
    /// the failure are still in `dst`.
    pub fn read_blob_into(&mut self, len: u64, dst: &mut Vec<u8>) -> Result<u64, SourceError> {
        let pulled = self.pull(len, dst);
        match self.sticky_error() {
            Some(err) => Err(err),
            None => Ok(pulled),
        }
    }

    /// Streams up to `len` bytes from the input to `sink`.
    ///
    /// Bytes move in transport-sized chunks, never one `len`-sized
    /// allocation, so arbitrarily large runs can be forwarded in constant
    /// memory. The copy stops early if the input runs out or fails (the
    /// sticky flag records the latter); the returned count says how many
    /// bytes actually reached the sink.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::SinkWrite`] when the destination fails. The
    /// unread remainder of the run is discarded from the input first, so
    /// the stream position still advances to where a successful copy
    /// would have left it and subsequent reads stay consistent.
    pub fn copy_bytes<W: Write + ?Sized>(
        &mut self,
        len: u64,
        sink: &mut W,
    ) -> Result<u64, SourceError> {
        let mut copied = 0u64;
        if len > 0 {
            if let Some(byte) = self.lookahead.take() {
                if let Err(err) = sink.write_all(&[byte]) {
                    self.skip_bytes(len - 1);
                    return Err(SourceError::SinkWrite(err));
                }
                copied = 1;
            }
        }
        while copied < len {
            let chunk = match self.input.fill_buf() {
                Ok(chunk) => chunk,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.note_failure(&err);
                    break;
                }
            };
            if chunk.is_empty() {
                break;
            }
            let step = chunk.len().min(clamp_to_usize(len - copied));
            let wrote = sink.write_all(&chunk[..step]);
            // The bytes were read off the input either way.
            self.input.consume(step);
            copied += step as u64;
            if let Err(err) = wrote {
                self.skip_bytes(len - copied);
                return Err(SourceError::SinkWrite(err));
            }
        }
        Ok(copied)
    }

    /// Consumes and drops up to `len` bytes.
    ///
    /// Skipped bytes are never materialized for the caller; the transport
    /// window is discarded chunk by chunk. Returns the number of bytes
    /// actually discarded, so a short stream is visible as a short count.
    /// A read failure stops the skip and raises the sticky flag.
    pub fn skip_bytes(&mut self, len: u64) -> u64 {
        let mut skipped = 0u64;
        if len > 0 && self.lookahead.take().is_some() {
            skipped = 1;
        }
        while skipped < len {
            let available = match self.input.fill_buf() {
                Ok(chunk) => chunk.len(),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.note_failure(&err);
                    break;
                }
            };
            if available == 0 {
                break;
            }
            let step = available.min(clamp_to_usize(len - skipped));
            self.input.consume(step);
            skipped += step as u64;
        }
        skipped
    }

    /// Pulls up to `len` bytes into `dst`, draining the lookahead slot
    /// first. Failures raise the sticky flag; whatever was read before
    /// the failure stays appended.
    fn pull(&mut self, len: u64, dst: &mut Vec<u8>) -> u64 {
        let before = dst.len();
        let mut want = len;
        if want > 0 {
            if let Some(byte) = self.lookahead.take() {
                dst.push(byte);
                want -= 1;
            }
        }
        if want > 0 {
            if let Err(err) = (&mut self.input).take(want).read_to_end(dst) {
                self.note_failure(&err);
            }
        }
        (dst.len() - before) as u64
    }

    fn note_failure(&mut self, err: &io::Error) {
        if self.failed.is_none() {
            self.failed = Some(err.kind());
        }
    }

    /// Materializes the sticky flag as an error value.
    ///
    /// `io::Error` is not `Clone`, so the flag keeps only the kind of the
    /// first failure and rebuilds an equivalent error on demand.
    fn sticky_error(&self) -> Option<SourceError> {
        self.failed.map(|kind| SourceError::Read(kind.into()))
    }
}

fn clamp_to_usize(len: u64) -> usize {
    usize::try_from(len).unwrap_or(usize::MAX)
}
