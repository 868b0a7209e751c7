//! # glyph-eyes
//!
//! Frame generation and timeline conversion for a 25×25 LED-matrix "eyes"
//! animation.
//!
//! This crate provides:
//! - A rasterizer that paints eye ellipses and pupil circles onto the grid
//! - A CSV codec for frame sequences (one row of 625 integers per frame)
//! - A builder for `GlyphEyesFramesV1` JSON playback timelines
//! - A caller-driven playback cursor over those timelines
//!
//! ## Example
//!
//! ```rust
//! use glyph_eyes::{build_timeline, look_around, render_sequence, EyePreset, TimelineOptions};
//!
//! // Render the right → center → left → center loop
//! let frames = render_sequence(&EyePreset::Corrected.geometry(), &look_around());
//!
//! // Two entries per frame, 400ms each
//! let options = TimelineOptions { repeat: 2, looping: true, ..Default::default() };
//! let doc = build_timeline(&frames, &options).unwrap();
//!
//! assert_eq!(doc.timeline.len(), 8);
//! assert_eq!(doc.total_duration_ms, 3200);
//! let json = doc.to_json_pretty().unwrap();
//! assert!(json.contains("\"GlyphEyesFramesV1\""));
//! ```

mod config;
pub mod csv;
mod data;
mod error;
pub mod files;
mod playback;
mod raster;
mod timeline;

pub use config::ConvertSettings;
pub use csv::{parse_frames, write_frames};
pub use data::{Frame, Legend, FRAME_LEN, MATRIX_HEIGHT, MATRIX_WIDTH, OFF, ON};
pub use error::{DocumentError, Error, FormatError, Result};
pub use playback::{Playback, PlaybackState};
pub use raster::{look_around, render, render_sequence, EyeGeometry, EyePreset, PupilOffset, UnknownPreset};
pub use timeline::{
    build_timeline, MatrixSize, TimelineDocument, TimelineEntry, TimelineOptions, DEFAULT_DURATION_MS,
    DEFAULT_EASING, FORMAT_TAG,
};
