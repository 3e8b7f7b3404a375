//! The `search` module scans a [`ByteSource`] for a [`Pattern`] without loading the file.
//!
//! The source is streamed in fixed-size chunks that overlap by the longest possible
//! match minus one byte, so matches spanning a chunk boundary are still found.
//! Forward and backward searches share one chunk routine; the direction only picks
//! which end of the range the next chunk is taken from and which match in a chunk wins.

use crate::config::Config;
use crate::error::ViewerError;
use crate::pattern::Pattern;
use crate::source::ByteSource;
use memchr::memmem;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Match at `offset` spanning `len` bytes. `wrapped` is set if the scan had to
    /// continue from the opposite end of the file.
    Found { offset: u64, len: usize, wrapped: bool },
    NotFound,
    /// The scan was interrupted by the user
    Cancelled,
}

/// Cooperative cancellation signal, checked once per chunk
pub trait Interrupt {
    fn interrupted(&mut self) -> bool;
}

/// Never interrupts
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInterrupt;

impl Interrupt for NoInterrupt {
    fn interrupted(&mut self) -> bool {
        false
    }
}

impl Interrupt for &AtomicBool {
    fn interrupted(&mut self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Bytes read on each side of a regex chunk so `^`, `$` and `\b` see the
/// neighbouring character instead of the chunk edge. Four bytes cover one UTF-8 char.
const REGEX_CONTEXT: usize = 4;

enum Matcher<'p> {
    Literal {
        forward: memmem::Finder<'p>,
        backward: memmem::FinderRev<'p>,
    },
    Regex(&'p regex::bytes::Regex),
}

impl Matcher<'_> {
    /// Bytes of surrounding context each chunk needs
    const fn context(&self) -> usize {
        match self {
            Self::Literal { .. } => 0,
            Self::Regex(_) => REGEX_CONTEXT,
        }
    }

    /// First or last match in `data` starting in `[start, start + limit)`, as
    /// `(position in data, len)`. Bytes before `start` are context only.
    fn find(&self, data: &[u8], start: usize, limit: usize, direction: Direction) -> Option<(usize, usize)> {
        let end = start + limit;
        match (self, direction) {
            (Self::Literal { forward, .. }, Direction::Forward) => forward
                .find(&data[start..])
                .map(|i| start + i)
                .filter(|&i| i < end)
                .map(|i| (i, forward.needle().len())),
            (Self::Literal { backward, .. }, Direction::Backward) => {
                let needle = backward.needle().len();
                let stop = (end + needle - 1).min(data.len());
                backward.rfind(&data[start..stop]).map(|i| (start + i, needle))
            }
            // `find_at` keeps the bytes before `start` visible to `^` and `\b`
            (Self::Regex(re), Direction::Forward) => re
                .find_at(data, start)
                .filter(|m| m.start() < end)
                .map(|m| (m.start(), m.len())),
            (Self::Regex(re), Direction::Backward) => {
                // Matches may overlap, so every start position is tried, not just
                // the non-overlapping ones `find_iter` would yield
                let mut last = None;
                let mut at = start;
                while let Some(m) = re.find_at(data, at).filter(|m| m.start() < end) {
                    last = Some((m.start(), m.len()));
                    at = m.start() + 1;
                }
                last
            }
        }
    }
}

enum Scan {
    Found(u64, usize),
    NotFound,
    Cancelled,
}

/// Chunked pattern scanner with a reusable read buffer
#[derive(Debug)]
pub struct SearchEngine {
    chunk_size: usize,
    regex_max_span: usize,
    buf: Vec<u8>,
    chunks_scanned: u64,
}

impl SearchEngine {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_chunk_size(config.search_chunk_size, config.regex_max_span)
    }

    #[must_use]
    pub fn with_chunk_size(chunk_size: usize, regex_max_span: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            regex_max_span: regex_max_span.max(1),
            buf: Vec::new(),
            chunks_scanned: 0,
        }
    }

    /// Chunks read by the last call to [`SearchEngine::find`]
    #[must_use]
    pub const fn chunks_scanned(&self) -> u64 {
        self.chunks_scanned
    }

    /// Find `pattern` in `source`.
    ///
    /// Forward searches return the first match starting at or after `from`; backward
    /// searches return the last match starting before `from`. With `wrap` the scan
    /// continues from the opposite end and stops once it is back at `from`, so every
    /// start position is examined at most once.
    ///
    /// # Errors
    /// Returns [`ViewerError::Read`] if the source fails.
    pub fn find<S, I>(
        &mut self,
        source: &mut S,
        pattern: &Pattern,
        from: u64,
        direction: Direction,
        wrap: bool,
        interrupt: &mut I,
    ) -> Result<SearchOutcome, ViewerError>
    where
        S: ByteSource + ?Sized,
        I: Interrupt + ?Sized,
    {
        let size = source.size();
        let from = from.min(size);
        self.chunks_scanned = 0;

        let (matcher, overlap) = match (pattern.literal(), pattern.compiled_regex()) {
            (Some([]), _) | (None, None) => return Ok(SearchOutcome::NotFound),
            (Some(needle), _) => (
                Matcher::Literal {
                    forward: memmem::Finder::new(needle),
                    backward: memmem::FinderRev::new(needle),
                },
                needle.len() - 1,
            ),
            (None, Some(re)) => (Matcher::Regex(re), self.regex_max_span - 1),
        };

        info!(
            kind = pattern.kind().label(),
            from,
            ?direction,
            wrap,
            "search started"
        );

        // The first range runs from `from` towards the end in the search direction,
        // the wrapped range covers the rest of the file
        let (first, wrapped) = match direction {
            Direction::Forward => ((from, size), (0, from)),
            Direction::Backward => ((0, from), (from, size)),
        };

        let mut outcome = match self.scan(source, &matcher, overlap, first, direction, interrupt)? {
            Scan::Found(offset, len) => SearchOutcome::Found {
                offset,
                len,
                wrapped: false,
            },
            Scan::Cancelled => SearchOutcome::Cancelled,
            Scan::NotFound => SearchOutcome::NotFound,
        };

        if wrap && outcome == SearchOutcome::NotFound {
            outcome = match self.scan(source, &matcher, overlap, wrapped, direction, interrupt)? {
                Scan::Found(offset, len) => SearchOutcome::Found {
                    offset,
                    len,
                    wrapped: true,
                },
                Scan::Cancelled => SearchOutcome::Cancelled,
                Scan::NotFound => SearchOutcome::NotFound,
            };
        }

        info!(?outcome, chunks = self.chunks_scanned, "search finished");
        Ok(outcome)
    }

    /// Scan match start positions in `[range.0, range.1)` chunk by chunk
    #[allow(clippy::cast_possible_truncation)]
    fn scan<S, I>(
        &mut self,
        source: &mut S,
        matcher: &Matcher<'_>,
        overlap: usize,
        range: (u64, u64),
        direction: Direction,
        interrupt: &mut I,
    ) -> Result<Scan, ViewerError>
    where
        S: ByteSource + ?Sized,
        I: Interrupt + ?Sized,
    {
        let size = source.size();
        let chunk = self.chunk_size as u64;
        let (mut lo, mut hi) = range;

        while lo < hi {
            if interrupt.interrupted() {
                debug!(lo, hi, "search interrupted");
                return Ok(Scan::Cancelled);
            }

            let (chunk_lo, chunk_hi) = match direction {
                Direction::Forward => (lo, (lo + chunk).min(hi)),
                Direction::Backward => (hi.saturating_sub(chunk).max(lo), hi),
            };

            // Read past the chunk so matches crossing its end are complete, plus any
            // context the matcher needs on either side
            let context = matcher.context() as u64;
            let read_lo = chunk_lo.saturating_sub(context);
            let lead = (chunk_lo - read_lo) as usize;
            let read_end = (chunk_hi + overlap as u64 + context).min(size);
            let want = (read_end - read_lo) as usize;
            self.buf.resize(want, 0);
            let count = source.read_at(read_lo, &mut self.buf[..want])?;
            self.chunks_scanned += 1;

            let limit = ((chunk_hi - chunk_lo) as usize).min(count.saturating_sub(lead));
            let hit = if limit > 0 {
                matcher.find(&self.buf[..count], lead, limit, direction)
            } else {
                None
            };
            if let Some((pos, len)) = hit {
                return Ok(Scan::Found(read_lo + pos as u64, len));
            }

            match direction {
                Direction::Forward => lo = chunk_hi,
                Direction::Backward => hi = chunk_lo,
            }
        }

        Ok(Scan::NotFound)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
