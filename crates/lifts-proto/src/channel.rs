//! The channel boundary: a polling line reader and a flushing line writer.
//!
//! The reader is the only place in the system that ever suspends: a poll
//! either yields one complete line or reports "nothing yet" after rewinding
//! to where it started, so a half-written line is re-read intact on a later
//! poll.  This is what lets the simulation share a plain file (or any
//! seekable stream) with a controller that writes at its own pace.

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::error::ProtoResult;
use crate::message::Message;

// ── CommandReader ─────────────────────────────────────────────────────────────

/// Polls an inbound stream one line at a time without ever consuming a
/// partial line.
pub struct CommandReader<R: Read + Seek> {
    inner: R,
}

impl<R: Read + Seek> CommandReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// One poll attempt: `Ok(Some(line))` for a complete line (newline
    /// stripped, `\r\n` tolerated), `Ok(None)` if no complete line is
    /// available yet — in which case the stream position is rewound so the
    /// same bytes are offered again next time.
    pub fn poll(&mut self) -> io::Result<Option<String>> {
        let start = self.inner.stream_position()?;
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            if self.inner.read(&mut byte)? == 0 {
                // Partial line (or nothing): rewind and retry later.
                self.inner.seek(SeekFrom::Start(start))?;
                return Ok(None);
            }
            if byte[0] == b'\n' {
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                return Ok(Some(String::from_utf8_lossy(&line).into_owned()));
            }
            line.push(byte[0]);
        }
    }

    /// Access to the underlying stream (tests append through this).
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }
}

// ── MessageWriter ─────────────────────────────────────────────────────────────

/// Writes one message per line, flushing every write so the controller sees
/// messages promptly.
pub struct MessageWriter<W: Write> {
    inner: W,
}

impl<W: Write> MessageWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn send(&mut self, message: &Message) -> ProtoResult<()> {
        let line = message.to_line()?;
        writeln!(self.inner, "{line}")?;
        self.inner.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
