//! Caller-driven playback cursor over a timeline document.

use crate::{TimelineDocument, TimelineEntry};

/// Current state of playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Playback is stopped or paused
    Stopped,
    /// Playback is advancing
    Playing,
    /// Reached the end of a non-looping document
    Finished,
}

/// Tracks which timeline entry is on screen.
///
/// The cursor does not own a clock. The caller passes elapsed time to
/// [`Playback::advance`] from whatever timer drives the display. Looping
/// follows the document's `loop` flag.
///
/// ## Example
///
/// ```rust
/// use glyph_eyes::{build_timeline, Frame, Playback, PlaybackState, TimelineOptions};
///
/// let doc = build_timeline(&[Frame::blank(), Frame::blank()], &TimelineOptions::default()).unwrap();
/// let mut playback = Playback::new(&doc);
///
/// playback.play();
/// assert!(playback.advance(400)); // moved to the second entry
/// assert_eq!(playback.current_index(), Some(1));
///
/// playback.advance(400);
/// assert_eq!(playback.state(), PlaybackState::Finished);
/// ```
#[derive(Clone, Debug)]
pub struct Playback<'a> {
    document: &'a TimelineDocument,
    /// Time since the start of the timeline, wrapped when looping
    position_ms: u64,
    /// Index of the active entry
    current: Option<usize>,
    state: PlaybackState,
}

impl<'a> Playback<'a> {
    /// Create a stopped cursor at the start of `document`.
    pub fn new(document: &'a TimelineDocument) -> Self {
        Self {
            document,
            position_ms: 0,
            current: document.index_at(0),
            state: PlaybackState::Stopped,
        }
    }

    /// Start or resume playback.
    pub fn play(&mut self) {
        if !self.document.is_empty() && self.state != PlaybackState::Finished {
            self.state = PlaybackState::Playing;
        }
    }

    /// Pause playback.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Stopped;
        }
    }

    /// Stop playback and rewind to the first entry.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.position_ms = 0;
        self.current = self.document.index_at(0);
    }

    /// Get the current playback state.
    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Check if playback is advancing.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Time since the start of the timeline.
    #[inline]
    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    /// Index of the active entry.
    #[inline]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The active entry.
    pub fn current_entry(&self) -> Option<&'a TimelineEntry> {
        let document = self.document;
        self.current.map(move |i| &document.timeline[i])
    }

    /// Advance by `elapsed_ms`.
    ///
    /// Returns true when the active entry changed. A non-looping document
    /// finishes on its last entry.
    pub fn advance(&mut self, elapsed_ms: u64) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }

        let total = self.document.total_duration_ms;
        let target = self.position_ms.saturating_add(elapsed_ms);

        let previous = self.current;
        if self.document.looping && total > 0 {
            self.position_ms = target % total;
            self.current = self.document.index_at(self.position_ms);
        } else if target >= total {
            self.position_ms = total;
            self.current = self.document.len().checked_sub(1);
            self.state = PlaybackState::Finished;
        } else {
            self.position_ms = target;
            self.current = self.document.index_at(target);
        }
        self.current != previous
    }

    /// Jump to `ms` from the start. A finished cursor becomes stopped.
    pub fn seek(&mut self, ms: u64) {
        let total = self.document.total_duration_ms;
        self.position_ms = if self.document.looping && total > 0 {
            ms % total
        } else {
            ms.min(total.saturating_sub(1))
        };
        self.current = self.document.index_at(self.position_ms);
        if self.state == PlaybackState::Finished {
            self.state = PlaybackState::Stopped;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_timeline, look_around, render_sequence, EyePreset, TimelineOptions};

    fn document(looping: bool) -> TimelineDocument {
        let frames = render_sequence(&EyePreset::Loose.geometry(), &look_around());
        let options = TimelineOptions {
            looping,
            ..Default::default()
        };
        build_timeline(&frames, &options).unwrap()
    }

    #[test]
    fn test_basic_playback() {
        let doc = document(false);
        let mut playback = Playback::new(&doc);

        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(playback.current_index(), Some(0));
        assert!(!playback.advance(400)); // not playing yet

        playback.play();
        assert!(!playback.advance(100));
        assert!(playback.advance(300));
        assert_eq!(playback.current_index(), Some(1));

        playback.pause();
        assert!(!playback.advance(400));
        assert_eq!(playback.position_ms(), 400);
    }

    #[test]
    fn test_once_finishes_on_last_entry() {
        let doc = document(false);
        let mut playback = Playback::new(&doc);
        playback.play();

        playback.advance(5_000);
        assert_eq!(playback.state(), PlaybackState::Finished);
        assert_eq!(playback.current_index(), Some(3));
        assert_eq!(playback.current_entry().map(|e| e.start_ms), Some(1200));

        // Finished cursors only restart after a seek or stop.
        playback.play();
        assert_eq!(playback.state(), PlaybackState::Finished);
        playback.stop();
        playback.play();
        assert!(playback.is_playing());
        assert_eq!(playback.current_index(), Some(0));
    }

    #[test]
    fn test_loop_wraps() {
        let doc = document(true);
        let mut playback = Playback::new(&doc);
        playback.play();

        playback.advance(1_500);
        assert_eq!(playback.current_index(), Some(3));
        assert!(playback.advance(200)); // 1700 wraps to 100
        assert_eq!(playback.current_index(), Some(0));
        assert_eq!(playback.position_ms(), 100);
        assert!(playback.is_playing());
    }

    #[test]
    fn test_seek() {
        let doc = document(false);
        let mut playback = Playback::new(&doc);

        playback.seek(850);
        assert_eq!(playback.current_index(), Some(2));

        playback.seek(10_000);
        assert_eq!(playback.current_index(), Some(3));
        assert_eq!(playback.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_empty_document() {
        let doc = build_timeline(&[], &TimelineOptions::default()).unwrap();
        let mut playback = Playback::new(&doc);
        playback.play();
        assert_eq!(playback.state(), PlaybackState::Stopped);
        assert_eq!(playback.current_entry(), None);
    }
}
