use std::io::{self, ErrorKind, Write};

/// Writer wrapper that swallows broken-pipe errors.
///
/// Lets `gpp_scanner scan | head` exit cleanly once the reader goes away.
pub(crate) struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(buf.len())
            } else {
                Err(e)
            }
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(())
            } else {
                Err(e)
            }
        })
    }
}

/// Locked stdout that ignores a closed pipe.
pub(crate) fn stdout() -> IgnoreBrokenPipe<io::StdoutLock<'static>> {
    IgnoreBrokenPipe::new(io::stdout().lock())
}
