//! Path-level operations.
//!
//! Inputs are parsed completely before anything is written, and outputs go
//! through a uniquely named temp file in the destination directory that is
//! persisted over the destination, so a failed conversion never leaves a
//! partial destination file.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::csv::{parse_frames, repeat_rows, write_frames};
use crate::error::{Error, Result};
use crate::{build_timeline, Frame, TimelineDocument, TimelineOptions};

/// Read a CSV frame file.
pub fn read_frames_csv(path: &Path) -> Result<Vec<Frame>> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let frames = parse_frames(&text)?;
    debug!(path = %path.display(), frames = frames.len(), "read frames");
    Ok(frames)
}

/// Write frames as CSV.
pub fn write_frames_csv(path: &Path, frames: &[Frame]) -> Result<()> {
    write_atomic(path, write_frames(frames).as_bytes())?;
    info!(path = %path.display(), frames = frames.len(), "wrote frames");
    Ok(())
}

/// Write a timeline document as pretty JSON.
pub fn write_timeline_json(path: &Path, document: &TimelineDocument) -> Result<()> {
    let json = document.to_json_pretty()?;
    write_atomic(path, json.as_bytes())?;
    info!(
        path = %path.display(),
        entries = document.len(),
        total_ms = document.total_duration_ms,
        "wrote timeline"
    );
    Ok(())
}

/// Read a timeline document.
pub fn read_timeline_json(path: &Path) -> Result<TimelineDocument> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    TimelineDocument::from_json_str(&text)
}

/// Convert a CSV frame file into a timeline JSON file.
pub fn convert_csv_to_json(src: &Path, dst: &Path, options: &TimelineOptions) -> Result<TimelineDocument> {
    let frames = read_frames_csv(src)?;
    let document = build_timeline(&frames, options)?;
    write_timeline_json(dst, &document)?;
    Ok(document)
}

/// Repeat every row of a CSV frame file. Returns (source frames, written frames).
pub fn slow_down_csv(src: &Path, dst: &Path, repeat: usize) -> Result<(usize, usize)> {
    let frames = read_frames_csv(src)?;
    let slowed = repeat_rows(&frames, repeat);
    write_frames_csv(dst, &slowed)?;
    Ok((frames.len(), slowed.len()))
}

// The temp file is deleted on drop unless persisted.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(contents).map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::format_row;
    use crate::error::FormatError;
    use crate::{look_around, render_sequence, EyePreset};

    fn eyes() -> Vec<Frame> {
        render_sequence(&EyePreset::Corrected.geometry(), &look_around())
    }

    #[test]
    fn test_csv_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.csv");

        write_frames_csv(&path, &eyes()).unwrap();
        assert_eq!(read_frames_csv(&path).unwrap(), eyes());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_convert_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("frames.csv");
        let dst = dir.path().join("frames.json");
        write_frames_csv(&src, &eyes()).unwrap();

        let options = TimelineOptions {
            looping: true,
            repeat: 2,
            ..Default::default()
        };
        let doc = convert_csv_to_json(&src, &dst, &options).unwrap();

        assert_eq!(doc.len(), 8);
        assert_eq!(doc.total_duration_ms, 3200);
        assert_eq!(read_timeline_json(&dst).unwrap(), doc);
    }

    #[test]
    fn test_short_row_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("bad.csv");
        let dst = dir.path().join("bad.json");

        let short = vec!["0"; 624].join(",");
        let text = format!("{}\n{}\n", format_row(&eyes()[0]), short);
        fs::write(&src, text).unwrap();

        let err = convert_csv_to_json(&src, &dst, &TimelineOptions::default()).unwrap_err();
        match err {
            Error::Format(e) => {
                assert_eq!(e.line(), Some(2));
                assert!(matches!(e.root(), FormatError::ValueCount { actual: 624, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!dst.exists());
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("bad.csv")]);
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_frames_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_slow_down() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("frames.csv");
        let dst = dir.path().join("slow.csv");
        write_frames_csv(&src, &eyes()).unwrap();

        assert_eq!(slow_down_csv(&src, &dst, 2).unwrap(), (4, 8));
        let slowed = read_frames_csv(&dst).unwrap();
        assert_eq!(slowed[0], slowed[1]);
        assert_eq!(slowed[6], eyes()[3]);
    }

    #[test]
    fn test_existing_tmp_sibling_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("frames.csv");
        let dst = dir.path().join("out.json");
        let bystander = dir.path().join("out.json.tmp");
        fs::write(&bystander, "keep me").unwrap();
        write_frames_csv(&src, &eyes()).unwrap();

        convert_csv_to_json(&src, &dst, &TimelineOptions::default()).unwrap();

        assert_eq!(fs::read_to_string(&bystander).unwrap(), "keep me");
        assert_eq!(read_timeline_json(&dst).unwrap().len(), 4);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn test_overwrites_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.csv");
        fs::write(&path, "stale").unwrap();

        write_frames_csv(&path, &eyes()[..1]).unwrap();
        assert_eq!(read_frames_csv(&path).unwrap(), eyes()[..1].to_vec());
    }
}
