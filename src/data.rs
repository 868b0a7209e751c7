//! Core data structures for LED-matrix frames.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FormatError;

/// Matrix width in pixels.
pub const MATRIX_WIDTH: usize = 25;
/// Matrix height in pixels.
pub const MATRIX_HEIGHT: usize = 25;
/// Number of values in one flattened frame.
pub const FRAME_LEN: usize = MATRIX_WIDTH * MATRIX_HEIGHT;

/// Pixel value for an unlit LED.
pub const OFF: u16 = 0;
/// Pixel value for a fully lit LED.
pub const ON: u16 = 2040;

/// Mapping of semantic pixel state to numeric value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    pub off: u16,
    pub on: u16,
}

impl Default for Legend {
    fn default() -> Self {
        Self { off: OFF, on: ON }
    }
}

impl Legend {
    /// Check whether `value` is one of the legend values.
    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        value == i64::from(self.off) || value == i64::from(self.on)
    }
}

/// One 25×25 snapshot of the display.
///
/// Pixels are stored row-major and are always either [`OFF`] or [`ON`].
/// A frame cannot be changed once built.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    pixels: Vec<u16>,
}

impl Frame {
    /// An all-off frame.
    pub fn blank() -> Self {
        Self {
            pixels: vec![OFF; FRAME_LEN],
        }
    }

    /// Build a frame from 625 row-major values.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use glyph_eyes::{Frame, FRAME_LEN, ON};
    ///
    /// let mut values = vec![0; FRAME_LEN];
    /// values[12 * 25 + 8] = ON;
    ///
    /// let frame = Frame::from_values(values).unwrap();
    /// assert!(frame.is_on(8, 12));
    /// assert!(Frame::from_values(vec![0; 624]).is_err());
    /// ```
    pub fn from_values(values: Vec<u16>) -> Result<Self, FormatError> {
        if values.len() != FRAME_LEN {
            return Err(FormatError::ValueCount {
                expected: FRAME_LEN,
                actual: values.len(),
            });
        }
        let legend = Legend::default();
        if let Some((column, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !legend.contains(i64::from(**v)))
        {
            return Err(FormatError::OutsideLegend {
                column,
                value: i64::from(value),
            });
        }
        Ok(Self { pixels: values })
    }

    /// Build a frame from 25 rows of 25 values.
    pub fn from_rows(rows: Vec<Vec<u16>>) -> Result<Self, FormatError> {
        if rows.len() != MATRIX_HEIGHT {
            return Err(FormatError::RowCount {
                expected: MATRIX_HEIGHT,
                actual: rows.len(),
            });
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != MATRIX_WIDTH) {
            return Err(FormatError::RowWidth {
                row,
                expected: MATRIX_WIDTH,
                actual: r.len(),
            });
        }
        Self::from_values(rows.into_iter().flatten().collect())
    }

    /// Build a frame by evaluating `lit(x, y)` for every cell.
    pub(crate) fn from_fn(mut lit: impl FnMut(usize, usize) -> bool) -> Self {
        let mut pixels = Vec::with_capacity(FRAME_LEN);
        for y in 0..MATRIX_HEIGHT {
            for x in 0..MATRIX_WIDTH {
                pixels.push(if lit(x, y) { ON } else { OFF });
            }
        }
        Self { pixels }
    }

    /// Get the pixel value at column `x`, row `y`.
    ///
    /// Returns None if position is out of bounds.
    #[inline]
    pub fn pixel_at(&self, x: usize, y: usize) -> Option<u16> {
        if x < MATRIX_WIDTH && y < MATRIX_HEIGHT {
            Some(self.pixels[y * MATRIX_WIDTH + x])
        } else {
            None
        }
    }

    /// Check if the pixel at column `x`, row `y` is lit.
    #[inline]
    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.pixel_at(x, y) == Some(ON)
    }

    /// Flattened row-major values.
    #[inline]
    pub fn values(&self) -> &[u16] {
        &self.pixels
    }

    /// Iterate over the 25 rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u16]> {
        self.pixels.chunks(MATRIX_WIDTH)
    }

    /// Number of lit pixels.
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&v| v == ON).count()
    }

    /// Text preview: `O` for lit pixels, `.` for unlit, one line per row.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use glyph_eyes::Frame;
    ///
    /// let preview = Frame::blank().preview();
    /// assert_eq!(preview.lines().count(), 25);
    /// assert!(preview.lines().all(|l| l == ".".repeat(25)));
    /// ```
    pub fn preview(&self) -> String {
        let mut text = String::with_capacity(FRAME_LEN + MATRIX_HEIGHT);
        for row in self.rows() {
            text.extend(row.iter().map(|&v| if v == ON { 'O' } else { '.' }));
            text.push('\n');
        }
        text
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Frame {{")?;
        for line in self.preview().lines() {
            writeln!(f, "    {line}")?;
        }
        write!(f, "}}")
    }
}

impl Serialize for Frame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

impl<'de> Deserialize<'de> for Frame {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<u16>>::deserialize(deserializer)?;
        Frame::from_rows(rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_lit(x: usize, y: usize) -> Frame {
        Frame::from_fn(|cx, cy| cx == x && cy == y)
    }

    #[test]
    fn test_pixel_accessors() {
        let frame = single_lit(3, 7);

        assert_eq!(frame.pixel_at(3, 7), Some(ON));
        assert_eq!(frame.pixel_at(7, 3), Some(OFF));
        assert_eq!(frame.pixel_at(25, 0), None);
        assert_eq!(frame.pixel_at(0, 25), None);
        assert!(frame.is_on(3, 7));
        assert_eq!(frame.values()[7 * MATRIX_WIDTH + 3], ON);
        assert_eq!(frame.lit_count(), 1);
    }

    #[test]
    fn test_from_values_rejects_bad_input() {
        assert_eq!(
            Frame::from_values(vec![OFF; 624]),
            Err(FormatError::ValueCount {
                expected: 625,
                actual: 624
            })
        );

        let mut values = vec![OFF; FRAME_LEN];
        values[10] = 255;
        assert_eq!(
            Frame::from_values(values),
            Err(FormatError::OutsideLegend {
                column: 10,
                value: 255
            })
        );
    }

    #[test]
    fn test_from_rows_shape() {
        let mut rows = vec![vec![OFF; MATRIX_WIDTH]; MATRIX_HEIGHT];
        assert!(Frame::from_rows(rows.clone()).is_ok());

        rows[4].pop();
        assert_eq!(
            Frame::from_rows(rows),
            Err(FormatError::RowWidth {
                row: 4,
                expected: 25,
                actual: 24
            })
        );

        assert!(matches!(
            Frame::from_rows(vec![vec![OFF; MATRIX_WIDTH]; 3]),
            Err(FormatError::RowCount { actual: 3, .. })
        ));
    }

    #[test]
    fn test_rows_are_row_major() {
        let frame = single_lit(1, 2);
        let rows: Vec<&[u16]> = frame.rows().collect();
        assert_eq!(rows.len(), MATRIX_HEIGHT);
        assert_eq!(rows[2][1], ON);
        assert_eq!(rows[1][2], OFF);
    }

    #[test]
    fn test_preview() {
        let preview = single_lit(0, 0).preview();
        let first = preview.lines().next().unwrap();
        assert_eq!(first, format!("O{}", ".".repeat(24)));
        assert!(preview.ends_with('\n'));
    }

    #[test]
    fn test_serde_as_nested_rows() {
        let frame = single_lit(24, 0);
        let json = serde_json::to_value(&frame).unwrap();
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 25);
        assert_eq!(rows[0][24], 2040);
        assert_eq!(rows[0][23], 0);

        let back: Frame = serde_json::from_value(json).unwrap();
        assert_eq!(back, frame);

        let short = serde_json::json!([[0, 0, 0]]);
        assert!(serde_json::from_value::<Frame>(short).is_err());
    }
}
