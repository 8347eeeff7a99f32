use std::io::{self, Write};

/// In-memory sink that a rendering engine writes into.
///
/// The scope is released when dropped; output that was never collected with
/// [`CaptureScope::finish`] is discarded.
pub struct CaptureScope {
    buffer: Vec<u8>,
    finished: bool,
}

impl CaptureScope {
    pub fn open() -> Self {
        Self {
            buffer: Vec::new(),
            finished: false,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Close the scope and take the captured bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.finished = true;
        std::mem::take(&mut self.buffer)
    }
}

impl Write for CaptureScope {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for CaptureScope {
    fn drop(&mut self) {
        if !self.finished && !self.buffer.is_empty() {
            tracing::debug!(
                discarded = self.buffer.len(),
                "released output capture with uncollected output"
            );
        }
    }
}

/// Run `f` against a fresh capture scope and return what it wrote.
///
/// The scope is released on every exit path; on error the partial output is dropped.
pub fn capture<E>(f: impl FnOnce(&mut dyn Write) -> Result<(), E>) -> Result<Vec<u8>, E> {
    let mut scope = CaptureScope::open();
    f(&mut scope)?;
    Ok(scope.finish())
}
