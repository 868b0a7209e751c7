//! Playback timeline documents (`GlyphEyesFramesV1`).

use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, Error, Result};
use crate::{Frame, Legend, MATRIX_HEIGHT, MATRIX_WIDTH};

/// Format tag written into every document.
pub const FORMAT_TAG: &str = "GlyphEyesFramesV1";
/// Default per-entry duration.
pub const DEFAULT_DURATION_MS: u64 = 400;
/// Default easing label.
pub const DEFAULT_EASING: &str = "easeInOutSine";

/// Options controlling how frames become timeline entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineOptions {
    /// Duration of every entry in milliseconds
    pub duration_ms: u64,
    /// Easing label copied onto every entry
    pub easing: String,
    /// Loop flag copied into the document
    pub looping: bool,
    /// Consecutive entries emitted per frame (0 behaves as 1)
    pub repeat: usize,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: DEFAULT_EASING.to_string(),
            looping: false,
            repeat: 1,
        }
    }
}

/// Matrix dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixSize {
    pub width: usize,
    pub height: usize,
}

impl Default for MatrixSize {
    fn default() -> Self {
        Self {
            width: MATRIX_WIDTH,
            height: MATRIX_HEIGHT,
        }
    }
}

/// One step of the timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub index: usize,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: String,
    pub pixels: Frame,
}

impl TimelineEntry {
    /// End of this entry (exclusive), saturating at `u64::MAX`.
    #[inline]
    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }
}

/// A complete playback document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDocument {
    pub format: String,
    pub matrix: MatrixSize,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub total_duration_ms: u64,
    pub timeline: Vec<TimelineEntry>,
    pub legend: Legend,
}

/// Build a timeline from frames in order.
///
/// Each frame yields `options.repeat` consecutive entries. Start times are
/// the running sum of previous durations. Fails with
/// [`DocumentError::DurationOverflow`] when that sum does not fit in `u64`.
///
/// ## Example
///
/// ```rust
/// use glyph_eyes::{build_timeline, Frame, TimelineOptions};
///
/// let options = TimelineOptions { repeat: 2, ..Default::default() };
/// let doc = build_timeline(&[Frame::blank(), Frame::blank()], &options).unwrap();
///
/// assert_eq!(doc.timeline.len(), 4);
/// assert_eq!(doc.timeline[3].start_ms, 1200);
/// assert_eq!(doc.total_duration_ms, 1600);
/// ```
pub fn build_timeline(frames: &[Frame], options: &TimelineOptions) -> Result<TimelineDocument> {
    let repeat = options.repeat.max(1);
    let mut timeline = Vec::with_capacity(frames.len() * repeat);
    let mut t = 0u64;

    for frame in frames {
        for _ in 0..repeat {
            timeline.push(TimelineEntry {
                index: timeline.len(),
                start_ms: t,
                duration_ms: options.duration_ms,
                easing: options.easing.clone(),
                pixels: frame.clone(),
            });
            t = t
                .checked_add(options.duration_ms)
                .ok_or(DocumentError::DurationOverflow {
                    index: timeline.len() - 1,
                })?;
        }
    }

    Ok(TimelineDocument {
        format: FORMAT_TAG.to_string(),
        matrix: MatrixSize::default(),
        looping: options.looping,
        total_duration_ms: t,
        timeline,
        legend: Legend::default(),
    })
}

impl TimelineDocument {
    /// Serialize as pretty-printed JSON (two-space indent).
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document, rejecting foreign format tags.
    ///
    /// Pixel grids are validated while decoding, timing and metadata by
    /// [`Self::validate`] afterwards.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let doc: TimelineDocument = serde_json::from_str(s)?;
        if doc.format != FORMAT_TAG {
            return Err(Error::UnknownFormat {
                found: doc.format,
                expected: FORMAT_TAG,
            });
        }
        doc.validate()?;
        Ok(doc)
    }

    /// Check matrix size, legend, sequential indices, start times and the
    /// total duration against the entries.
    pub fn validate(&self) -> std::result::Result<(), DocumentError> {
        if self.matrix != MatrixSize::default() {
            return Err(DocumentError::MatrixSize {
                width: self.matrix.width,
                height: self.matrix.height,
            });
        }
        if self.legend != Legend::default() {
            return Err(DocumentError::Legend {
                off: self.legend.off,
                on: self.legend.on,
            });
        }

        let mut t = 0u64;
        for (position, entry) in self.timeline.iter().enumerate() {
            if entry.index != position {
                return Err(DocumentError::Index {
                    position,
                    found: entry.index,
                });
            }
            if entry.start_ms != t {
                return Err(DocumentError::StartMs {
                    index: position,
                    expected: t,
                    found: entry.start_ms,
                });
            }
            t = t
                .checked_add(entry.duration_ms)
                .ok_or(DocumentError::DurationOverflow { index: position })?;
        }

        if self.total_duration_ms != t {
            return Err(DocumentError::TotalDuration {
                expected: t,
                found: self.total_duration_ms,
            });
        }
        Ok(())
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    /// Check if the timeline has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    /// Pixel grids in timeline order.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.timeline.iter().map(|entry| &entry.pixels)
    }

    /// Position of the entry active at `ms` from the start.
    ///
    /// Looping documents wrap around `total_duration_ms`; others return
    /// None once `ms` reaches the end.
    pub fn index_at(&self, ms: u64) -> Option<usize> {
        if self.total_duration_ms == 0 {
            return None;
        }
        let t = if self.looping {
            ms % self.total_duration_ms
        } else if ms >= self.total_duration_ms {
            return None;
        } else {
            ms
        };
        // Zero-length entries never become active.
        self.timeline
            .iter()
            .position(|entry| t >= entry.start_ms && t < entry.end_ms())
    }

    /// Entry active at `ms` from the start. See [`Self::index_at`].
    pub fn entry_at(&self, ms: u64) -> Option<&TimelineEntry> {
        self.index_at(ms).map(|i| &self.timeline[i])
    }
}
