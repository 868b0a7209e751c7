//! Text format for frame sequences: one comma-separated row of 625 integers
//! per frame, row-major.

use crate::error::FormatError;
use crate::{Frame, FRAME_LEN};

/// Parse a single CSV row into a frame.
///
/// Surrounding whitespace on each value is ignored. Cells are decoded
/// first, then [`Frame::from_values`] checks them against the legend.
pub fn parse_row(line: &str) -> Result<Frame, FormatError> {
    let cells: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    if cells.len() != FRAME_LEN {
        return Err(FormatError::ValueCount {
            expected: FRAME_LEN,
            actual: cells.len(),
        });
    }

    let mut values = Vec::with_capacity(FRAME_LEN);
    for (column, cell) in cells.into_iter().enumerate() {
        let value: i64 = cell.parse().map_err(|_| FormatError::NotAnInteger {
            column,
            value: cell.to_string(),
        })?;
        let value = u16::try_from(value).map_err(|_| FormatError::OutsideLegend { column, value })?;
        values.push(value);
    }
    Frame::from_values(values)
}

/// Parse every non-blank line of `text` as a frame, preserving order.
///
/// ## Example
///
/// ```rust
/// use glyph_eyes::{parse_frames, write_frames, Frame};
///
/// let text = write_frames(&[Frame::blank(), Frame::blank()]);
/// let frames = parse_frames(&text).unwrap();
/// assert_eq!(frames.len(), 2);
///
/// let err = parse_frames("0,2040,0\n").unwrap_err();
/// assert_eq!(err.line(), Some(1));
/// ```
pub fn parse_frames(text: &str) -> Result<Vec<Frame>, FormatError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_row(line).map_err(|e| e.at_line(i + 1)))
        .collect()
}

/// Format one frame as a CSV row (no trailing newline).
pub fn format_row(frame: &Frame) -> String {
    frame
        .values()
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Format frames as CSV text, one newline-terminated row per frame.
pub fn write_frames(frames: &[Frame]) -> String {
    let mut text = String::new();
    for frame in frames {
        text.push_str(&format_row(frame));
        text.push('\n');
    }
    text
}

/// Repeat each frame `repeat` times in place, to slow playback of players
/// that ignore per-frame durations.
///
/// A `repeat` of zero is treated as one.
pub fn repeat_rows(frames: &[Frame], repeat: usize) -> Vec<Frame> {
    let repeat = repeat.max(1);
    frames
        .iter()
        .flat_map(|frame| std::iter::repeat(frame).take(repeat))
        .cloned()
        .collect()
}
