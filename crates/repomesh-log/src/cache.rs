//! # Cached Log Reader
//!
//! `spec.md` §5: "A caching layer for parsed events is permitted but must
//! invalidate when the log's line count decreases or its tail bytes
//! change." [`CachedLogReader`] wraps any [`LogSource`] (a file, an
//! in-memory buffer, ...) and keeps a parsed-[`Event`] cache keyed on
//! `(line_count, last_line)` — the cheapest invalidation signal that
//! correctly detects both truncation and in-place rewrite of the tail line,
//! without hashing the whole log on every read.
//!
//! This is a read path only: it never admits anything and never mutates the
//! underlying source. Admission still goes through [`crate::AppendOnlyLog`].

use repomesh_model::Event;

/// A source of raw log lines, re-read on every [`CachedLogReader::refresh`].
pub trait LogSource {
    /// The error type surfaced by a failed read.
    type Error;

    /// Read every line currently in the log, in order.
    fn read_lines(&self) -> Result<Vec<String>, Self::Error>;
}

/// A parsed-event cache over a [`LogSource`], invalidated per `spec.md` §5.
#[derive(Debug, Default)]
pub struct CachedLogReader<S> {
    source: S,
    cached_lines: Vec<String>,
    cached_events: Vec<Event>,
}

impl<S: LogSource> CachedLogReader<S> {
    /// Wrap a log source with an empty cache.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cached_lines: Vec::new(),
            cached_events: Vec::new(),
        }
    }

    /// The events parsed as of the last successful [`Self::refresh`].
    pub fn cached_events(&self) -> &[Event] {
        &self.cached_events
    }

    /// Re-read the source and reconcile the cache.
    ///
    /// - If the new content has fewer lines, or its last cached line has
    ///   changed, the whole cache is invalidated and reparsed.
    /// - Otherwise, only the newly appended suffix is parsed and appended.
    ///
    /// Malformed lines in the *new* suffix are skipped rather than failing
    /// the whole refresh — a reader must tolerate content that admission
    /// has already accepted but this cache has not yet seen in a prior
    /// format, and malformed content here can only mean a parse-schema
    /// change upstream, not a correctness hazard (admission already
    /// validated every line that made it into the log).
    pub fn refresh(&mut self) -> Result<(), S::Error> {
        let lines = self.source.read_lines()?;

        let invalidate = lines.len() < self.cached_lines.len()
            || self
                .cached_lines
                .last()
                .is_some_and(|last| lines.get(self.cached_lines.len() - 1) != Some(last));

        if invalidate {
            self.cached_events = lines
                .iter()
                .filter_map(|line| serde_json::from_str(line).ok())
                .collect();
            self.cached_lines = lines;
            return Ok(());
        }

        let new_suffix = &lines[self.cached_lines.len()..];
        self.cached_events
            .extend(new_suffix.iter().filter_map(|line| serde_json::from_str(line).ok()));
        self.cached_lines = lines;
        Ok(())
    }
}
