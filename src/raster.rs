//! Rasterization of eye and pupil shapes onto the 25×25 grid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Frame;

/// Named geometry preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyePreset {
    /// Wide eyes joined by a bridge, inclusive ellipse boundary
    Loose,
    /// Tighter ellipses, smaller pupils, no bridge
    #[default]
    Corrected,
}

impl EyePreset {
    /// All presets, in declaration order.
    pub const ALL: [EyePreset; 2] = [EyePreset::Loose, EyePreset::Corrected];

    /// Lowercase preset name.
    pub fn name(&self) -> &'static str {
        match self {
            EyePreset::Loose => "loose",
            EyePreset::Corrected => "corrected",
        }
    }

    /// Geometry parameters for this preset.
    pub fn geometry(&self) -> EyeGeometry {
        match self {
            EyePreset::Loose => EyeGeometry {
                radius_x: 4.0,
                radius_y: 6.0,
                pupil_radius: 2.0,
                threshold: 1.0,
                bridge: true,
                ..EyeGeometry::BASE
            },
            EyePreset::Corrected => EyeGeometry {
                radius_x: 3.5,
                radius_y: 5.5,
                pupil_radius: 1.8,
                threshold: 0.95,
                bridge: false,
                ..EyeGeometry::BASE
            },
        }
    }
}

impl fmt::Display for EyePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a preset name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown eye preset {0:?} (expected \"loose\" or \"corrected\")")]
pub struct UnknownPreset(pub String);

impl FromStr for EyePreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "loose" => Ok(EyePreset::Loose),
            "corrected" => Ok(EyePreset::Corrected),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

/// Shape parameters for a pair of eyes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeGeometry {
    /// Left eye center as (x, y)
    pub left_center: (i32, i32),
    /// Right eye center as (x, y)
    pub right_center: (i32, i32),
    /// Horizontal ellipse radius
    pub radius_x: f64,
    /// Vertical ellipse radius
    pub radius_y: f64,
    /// Pupil circle radius
    pub pupil_radius: f64,
    /// Upper bound of the normalized ellipse equation
    pub threshold: f64,
    /// Fill the band between the eyes
    pub bridge: bool,
}

impl EyeGeometry {
    const BASE: EyeGeometry = EyeGeometry {
        left_center: (8, 12),
        right_center: (17, 12),
        radius_x: 4.0,
        radius_y: 6.0,
        pupil_radius: 2.0,
        threshold: 1.0,
        bridge: false,
    };

    // Grid math runs in i64: an i32 center plus an i32 offset cannot overflow it.
    #[inline]
    fn in_ellipse(&self, x: i64, y: i64, center: (i64, i64)) -> bool {
        let nx = (x - center.0) as f64 / self.radius_x;
        let ny = (y - center.1) as f64 / self.radius_y;
        nx * nx + ny * ny <= self.threshold
    }

    #[inline]
    fn in_pupil(&self, x: i64, y: i64, center: (i64, i64)) -> bool {
        let dx = (x - center.0) as f64;
        let dy = (y - center.1) as f64;
        dx * dx + dy * dy <= self.pupil_radius * self.pupil_radius
    }

    fn in_bridge(&self, x: i64, y: i64) -> bool {
        let from = f64::from(self.left_center.0) + self.radius_x;
        let to = f64::from(self.right_center.0) - self.radius_x;
        let half_height = (self.radius_y / 2.0).floor();
        (from..=to).contains(&(x as f64))
            && (y - i64::from(self.left_center.1)).abs() as f64 <= half_height
    }
}

impl Default for EyeGeometry {
    fn default() -> Self {
        EyePreset::default().geometry()
    }
}

impl From<EyePreset> for EyeGeometry {
    fn from(preset: EyePreset) -> Self {
        preset.geometry()
    }
}

/// Pupil displacement from its eye center, in grid units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PupilOffset {
    pub dx: i32,
    pub dy: i32,
}

impl PupilOffset {
    pub const CENTER: PupilOffset = PupilOffset { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    #[inline]
    fn apply(self, center: (i64, i64)) -> (i64, i64) {
        (center.0 + i64::from(self.dx), center.1 + i64::from(self.dy))
    }
}

impl From<(i32, i32)> for PupilOffset {
    fn from((dx, dy): (i32, i32)) -> Self {
        Self { dx, dy }
    }
}

/// Render one eyes frame.
///
/// Each cell is tested against the left eye, then the right eye, then the
/// bridge. A pupil only clears pixels of its own eye.
///
/// ## Example
///
/// ```rust
/// use glyph_eyes::{render, EyePreset, PupilOffset};
///
/// let geometry = EyePreset::Loose.geometry();
/// let right = PupilOffset::new(2, 0);
/// let frame = render(&geometry, right, right);
///
/// assert!(!frame.is_on(10, 12)); // new pupil center
/// assert!(frame.is_on(5, 12)); // eye white
/// ```
pub fn render(geometry: &EyeGeometry, left: PupilOffset, right: PupilOffset) -> Frame {
    let widen = |(x, y): (i32, i32)| (i64::from(x), i64::from(y));
    let (left_center, right_center) = (widen(geometry.left_center), widen(geometry.right_center));
    let left_pupil = left.apply(left_center);
    let right_pupil = right.apply(right_center);

    Frame::from_fn(|x, y| {
        let (x, y) = (x as i64, y as i64);
        if geometry.in_ellipse(x, y, left_center) {
            !geometry.in_pupil(x, y, left_pupil)
        } else if geometry.in_ellipse(x, y, right_center) {
            !geometry.in_pupil(x, y, right_pupil)
        } else {
            geometry.bridge && geometry.in_bridge(x, y)
        }
    })
}

/// Pupil offsets for the look-around loop: right, center, left, center.
///
/// Each pair is (left eye, right eye).
pub fn look_around() -> Vec<(PupilOffset, PupilOffset)> {
    [2, 0, -2, 0]
        .into_iter()
        .map(|dx| {
            let offset = PupilOffset::new(dx, 0);
            (offset, offset)
        })
        .collect()
}

/// Render one frame per offset pair, in order.
pub fn render_sequence(geometry: &EyeGeometry, offsets: &[(PupilOffset, PupilOffset)]) -> Vec<Frame> {
    offsets
        .iter()
        .map(|&(left, right)| render(geometry, left, right))
        .collect()
}
