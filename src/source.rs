//! Event source abstraction for flexible data ingestion.
//!
//! This module provides a trait-based abstraction over tick event sources,
//! so the replay pipeline can run from files or from memory without
//! modification.
//!
//! # Example
//!
//! ```ignore
//! use bbo_reconstructor::source::{CsvSource, EventSource};
//!
//! let source = CsvSource::new("data/ticks.csv")?;
//! println!("File size: {:?}", source.metadata().file_size);
//!
//! // Stops at the first malformed line
//! let events = source.collect_events()?;
//! ```
//!
//! # Implementing Custom Sources
//!
//! ```ignore
//! use bbo_reconstructor::source::{EventSource, SourceMetadata};
//! use bbo_reconstructor::{Result, TickEvent};
//!
//! struct MySource {
//!     events: Vec<TickEvent>,
//!     metadata: SourceMetadata,
//! }
//!
//! impl EventSource for MySource {
//!     type EventIter =
//!         std::iter::Map<std::vec::IntoIter<TickEvent>, fn(TickEvent) -> Result<TickEvent>>;
//!
//!     fn events(self) -> Result<Self::EventIter> {
//!         Ok(self.events.into_iter().map(Ok as fn(TickEvent) -> Result<TickEvent>))
//!     }
//!
//!     fn metadata(&self) -> &SourceMetadata {
//!         &self.metadata
//!     }
//! }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::codec::decode_line;
use crate::error::{BboError, Result};
use crate::types::TickEvent;

/// I/O buffer size for file reading and writing.
///
/// Default `BufReader` uses 8KB; a larger buffer cuts syscall overhead on
/// multi-million line inputs.
pub const IO_BUFFER_SIZE: usize = 1024 * 1024; // 1 MB

// ============================================================================
// Source Metadata
// ============================================================================

/// Metadata about an event source.
#[derive(Debug, Clone, Default)]
pub struct SourceMetadata {
    /// Original file path (if loaded from file)
    pub file_path: Option<PathBuf>,

    /// Data provider name (e.g., "csv", "memory")
    pub provider: Option<String>,

    /// Estimated event count (for progress tracking and pre-allocation)
    pub estimated_events: Option<u64>,

    /// File size in bytes (if applicable)
    pub file_size: Option<u64>,
}

impl SourceMetadata {
    /// Create new empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file path.
    pub fn with_file_path(mut self, path: impl AsRef<Path>) -> Self {
        self.file_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the provider.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Set the estimated event count.
    pub fn with_estimated_events(mut self, count: u64) -> Self {
        self.estimated_events = Some(count);
        self
    }

    /// Set the file size.
    pub fn with_file_size(mut self, size: u64) -> Self {
        self.file_size = Some(size);
        self
    }

    /// Metadata for a file on disk (path and size, if readable).
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut metadata = Self::new().with_file_path(path);
        if let Ok(meta) = std::fs::metadata(path) {
            metadata.file_size = Some(meta.len());
        }
        metadata
    }
}

// ============================================================================
// Event Source Trait
// ============================================================================

/// Trait for tick event sources.
///
/// # Implementation Notes
///
/// - `events()` consumes `self` to allow single-pass iteration
/// - The iterator yields `Err` for a record that fails to decode; callers
///   are expected to stop there
pub trait EventSource {
    /// The iterator type for events.
    type EventIter: Iterator<Item = Result<TickEvent>>;

    /// Consume the source and return an iterator over events.
    fn events(self) -> Result<Self::EventIter>;

    /// Get metadata about the source.
    fn metadata(&self) -> &SourceMetadata;

    /// Read every event into memory, failing on the first decode error.
    fn collect_events(self) -> Result<Vec<TickEvent>>
    where
        Self: Sized,
    {
        let capacity = self.metadata().estimated_events.unwrap_or(0) as usize;
        let mut events = Vec::with_capacity(capacity);
        for event in self.events()? {
            events.push(event?);
        }
        Ok(events)
    }
}

// ============================================================================
// Vector Source (for testing)
// ============================================================================

/// A simple in-memory source for testing.
///
/// # Example
///
/// ```
/// use bbo_reconstructor::source::{EventSource, VecSource};
/// use bbo_reconstructor::{Action, Side, TickEvent};
///
/// let events = vec![
///     TickEvent::new(Action::Add, Side::Bid, 1, 100, 5),
///     TickEvent::new(Action::Add, Side::Ask, 2, 101, 5),
/// ];
///
/// let source = VecSource::new(events);
/// assert_eq!(source.collect_events().unwrap().len(), 2);
/// ```
pub struct VecSource {
    events: Vec<TickEvent>,
    metadata: SourceMetadata,
}

impl VecSource {
    /// Create a new vector source.
    pub fn new(events: Vec<TickEvent>) -> Self {
        Self {
            metadata: SourceMetadata::new()
                .with_provider("memory")
                .with_estimated_events(events.len() as u64),
            events,
        }
    }
}

impl EventSource for VecSource {
    type EventIter =
        std::iter::Map<std::vec::IntoIter<TickEvent>, fn(TickEvent) -> Result<TickEvent>>;

    fn events(self) -> Result<Self::EventIter> {
        Ok(self
            .events
            .into_iter()
            .map(Ok as fn(TickEvent) -> Result<TickEvent>))
    }

    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }
}

// ============================================================================
// CSV Source
// ============================================================================

/// Semicolon-delimited file source.
///
/// The first line is a header and is skipped. Blank lines are accepted only
/// as trailing padding at end of file; anywhere else they fail the run.
pub struct CsvSource {
    path: PathBuf,
    metadata: SourceMetadata,
}

impl CsvSource {
    /// Create a source for the file at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(CsvSource)` - Ready to iterate
    /// * `Err(...)` - File not found
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
            .into());
        }

        let mut metadata = SourceMetadata::from_path(path).with_provider("csv");
        // ~32 bytes per record line is typical
        metadata.estimated_events = metadata.file_size.map(|size| size / 32);

        Ok(Self {
            path: path.to_path_buf(),
            metadata,
        })
    }
}

impl EventSource for CsvSource {
    type EventIter = LineIterator<BufReader<File>>;

    fn events(self) -> Result<Self::EventIter> {
        let file = File::open(&self.path)?;
        log::debug!(
            "Reading events from {} ({:?} bytes)",
            self.path.display(),
            self.metadata.file_size
        );
        Ok(LineIterator::new(BufReader::with_capacity(IO_BUFFER_SIZE, file)))
    }

    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }
}

/// Iterator decoding record lines from any buffered reader.
///
/// Output lines pair one-to-one with record lines, so a blank line followed
/// by further records is a decode error rather than a skipped line.
pub struct LineIterator<R: BufRead> {
    lines: Lines<R>,
    line_no: usize,
    header_skipped: bool,
    /// First blank line of the current trailing run, if any
    pending_blank: Option<usize>,
    failed: bool,
}

impl<R: BufRead> LineIterator<R> {
    /// Wrap a reader whose first line is a header.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            header_skipped: false,
            pending_blank: None,
            failed: false,
        }
    }

    /// Number of lines consumed so far, header included.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for LineIterator<R> {
    type Item = Result<TickEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            };
            self.line_no += 1;

            if !self.header_skipped {
                self.header_skipped = true;
                continue;
            }
            if line.trim().is_empty() {
                self.pending_blank.get_or_insert(self.line_no);
                continue;
            }

            let decoded = match self.pending_blank {
                Some(blank_line) => Err(BboError::decode(blank_line, "source_time", "")),
                None => decode_line(&line, self.line_no),
            };
            if let Err(e) = &decoded {
                log::error!("{e}");
                self.failed = true;
            }
            return Some(decoded);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
