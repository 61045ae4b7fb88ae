//! The transports a reader can sit on.
//!
//! Everything the core needs from a transport is `BufRead`: a borrowed
//! fill window plus an explicit consume. Files get a `BufReader` wrapper;
//! standard input and in-memory buffers already expose their own windows.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read, StdinLock};

#[derive(Debug)]
pub(crate) enum Input {
    File(BufReader<File>),
    Stdin(StdinLock<'static>),
    Bytes(Cursor<Vec<u8>>),
    #[cfg(test)]
    Faulty(FaultyRead),
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Input::File(file) => file.read(buf),
            Input::Stdin(stdin) => stdin.read(buf),
            Input::Bytes(bytes) => bytes.read(buf),
            #[cfg(test)]
            Input::Faulty(faulty) => faulty.read(buf),
        }
    }
}

impl BufRead for Input {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            Input::File(file) => file.fill_buf(),
            Input::Stdin(stdin) => stdin.fill_buf(),
            Input::Bytes(bytes) => bytes.fill_buf(),
            #[cfg(test)]
            Input::Faulty(faulty) => faulty.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Input::File(file) => file.consume(amt),
            Input::Stdin(stdin) => stdin.consume(amt),
            Input::Bytes(bytes) => bytes.consume(amt),
            #[cfg(test)]
            Input::Faulty(faulty) => faulty.consume(amt),
        }
    }
}

/// Test transport: yields its data, then fails every further read with a
/// fixed error kind instead of reporting end of stream.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct FaultyRead {
    data: Cursor<Vec<u8>>,
    kind: io::ErrorKind,
}

#[cfg(test)]
impl FaultyRead {
    pub(crate) fn new(data: &[u8], kind: io::ErrorKind) -> Self {
        Self {
            data: Cursor::new(data.to_vec()),
            kind,
        }
    }

    fn exhausted(&self) -> bool {
        self.data.position() >= self.data.get_ref().len() as u64
    }
}

#[cfg(test)]
impl Read for FaultyRead {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.exhausted() {
            return Err(io::Error::from(self.kind));
        }
        self.data.read(buf)
    }
}

#[cfg(test)]
impl BufRead for FaultyRead {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.exhausted() {
            return Err(io::Error::from(self.kind));
        }
        self.data.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.data.consume(amt);
    }
}
