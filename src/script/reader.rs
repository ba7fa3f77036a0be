use std::collections::VecDeque;
use std::io::Read;

use crate::foundation::error::ScriptResult;
use crate::script::tokenizer::{Record, Tokenizer};

/// Default read size, in bytes, for [`ScriptReader`].
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Pull-based record stream over any byte source.
///
/// Bytes are read in fixed-size chunks and decoded as UTF-8. A multi-byte sequence cut by a
/// chunk boundary is held back until the next read; invalid sequences decode to U+FFFD.
pub struct ScriptReader<R> {
    inner: R,
    buf: Vec<u8>,
    carry: Vec<u8>,
    tokenizer: Tokenizer,
    ready: VecDeque<Record>,
    eof: bool,
}

impl<R: Read> ScriptReader<R> {
    /// Wrap `inner` using [`DEFAULT_CHUNK_SIZE`].
    pub fn new(inner: R) -> Self {
        Self::with_chunk_size(inner, DEFAULT_CHUNK_SIZE)
    }

    /// Wrap `inner`, reading at most `chunk_size` bytes at a time (minimum 1).
    pub fn with_chunk_size(inner: R, chunk_size: usize) -> Self {
        Self {
            inner,
            buf: vec![0u8; chunk_size.max(1)],
            carry: Vec::new(),
            tokenizer: Tokenizer::new(),
            ready: VecDeque::new(),
            eof: false,
        }
    }

    /// Physical lines consumed so far.
    pub fn lines_seen(&self) -> usize {
        self.tokenizer.lines_seen()
    }

    fn fill(&mut self) -> ScriptResult<()> {
        let n = loop {
            match self.inner.read(&mut self.buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };

        if n == 0 {
            self.eof = true;
            if !self.carry.is_empty() {
                let tail = std::mem::take(&mut self.carry);
                let text = String::from_utf8_lossy(&tail).into_owned();
                self.ready.extend(self.tokenizer.feed(&text));
            }
            self.ready.extend(self.tokenizer.finish());
            return Ok(());
        }

        self.carry.extend_from_slice(&self.buf[..n]);
        let text = decode_utf8_prefix(&mut self.carry);
        self.ready.extend(self.tokenizer.feed(&text));
        Ok(())
    }
}

impl<R: Read> Iterator for ScriptReader<R> {
    type Item = ScriptResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(rec) = self.ready.pop_front() {
                return Some(Ok(rec));
            }
            if self.eof {
                return None;
            }
            if let Err(e) = self.fill() {
                self.eof = true;
                return Some(Err(e));
            }
        }
    }
}

/// Decode the longest prefix of `bytes` that cannot change with more input, leaving an
/// incomplete trailing sequence (at most 3 bytes) in place.
fn decode_utf8_prefix(bytes: &mut Vec<u8>) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut start = 0usize;
    loop {
        match std::str::from_utf8(&bytes[start..]) {
            Ok(s) => {
                out.push_str(s);
                start = bytes.len();
                break;
            }
            Err(e) => {
                let valid = start + e.valid_up_to();
                out.push_str(&String::from_utf8_lossy(&bytes[start..valid]));
                match e.error_len() {
                    Some(bad) => {
                        out.push(char::REPLACEMENT_CHARACTER);
                        start = valid + bad;
                    }
                    None => {
                        start = valid;
                        break;
                    }
                }
            }
        }
    }
    bytes.drain(..start);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/script/reader.rs"]
mod tests;
