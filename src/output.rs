// src/output.rs
// =============================================================================
// The output sink: every discovered URL, one per line, in discovery order.
//
// Writes go through a BufWriter; close() flushes whatever is still buffered
// once every root domain has been processed. The orchestrator owns the sink and handles one domain
// at a time, so lines of different domains never interleave.
// =============================================================================

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub struct OutputSink<W: Write> {
    writer: BufWriter<W>,
    lines: usize,
}

impl OutputSink<File> {
    /// Creates (or truncates) the output file at `path`
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> OutputSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            lines: 0,
        }
    }

    /// Appends one URL as its own line
    pub fn append(&mut self, url: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", url)?;
        self.lines += 1;
        Ok(())
    }

    /// Lines appended so far
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flushes everything and hands back the underlying writer
    pub fn close(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

// Clonable in-memory writer so tests can read what a sink wrote after the
// sink itself has been consumed.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct SharedBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_one_url_per_line() {
        let mut sink = OutputSink::new(Vec::new());
        sink.append("https://a.test/").unwrap();
        sink.append("https://a.test/about").unwrap();
        assert_eq!(sink.lines(), 2);

        let bytes = sink.close().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "https://a.test/\nhttps://a.test/about\n"
        );
    }

    #[test]
    fn test_small_output_buffered_until_close() {
        let buffer = SharedBuffer::default();
        let mut sink = OutputSink::new(buffer.clone());
        sink.append("https://a.test/").unwrap();
        assert!(buffer.lines().is_empty());

        sink.close().unwrap();
        assert_eq!(buffer.lines(), vec!["https://a.test/"]);
    }

    #[test]
    fn test_create_truncates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targetlist.txt");
        std::fs::write(&path, "stale\n").unwrap();

        let mut sink = OutputSink::create(&path).unwrap();
        sink.append("https://a.test/").unwrap();
        sink.close().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "https://a.test/\n");
    }
}
