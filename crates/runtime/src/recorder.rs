//! JSON Lines snapshot recorder.
//!
//! One [`TickSnapshot`] per line, written in tick order. Replay viewers read
//! the file back line by line.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use realm_core::TickSnapshot;

use crate::error::Result;

pub struct SnapshotRecorder<W: Write> {
    writer: W,
    written: usize,
}

impl SnapshotRecorder<BufWriter<File>> {
    /// Creates (or truncates) `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> SnapshotRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn record(&mut self, snapshot: &TickSnapshot) -> Result<()> {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Snapshots recorded so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
