//! Sensor types and presence masks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Capture file name as written by the viewer:
/// `<frameSeq>-<timestamp>_<sensorSuffix>`.
pub const CAPTURE_FILE_PATTERN: &str = r"^(\d+)-(\d+)_(\w+_\w+_\w+\.\w+)$";

/// Shape every sensor suffix must have to be reachable by
/// [`CAPTURE_FILE_PATTERN`].
pub const SENSOR_SUFFIX_PATTERN: &str = r"^\w+_\w+_\w+\.\w+$";

/// Sensor producing a capture file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    /// Grayscale guide image
    Rgb,
    /// Flood illumination depth point cloud
    Flood,
    /// Spot illumination depth point cloud
    Spot,
}

impl SensorType {
    /// All sensor types, in bit order.
    pub const ALL: [SensorType; 3] = [SensorType::Rgb, SensorType::Flood, SensorType::Spot];

    /// Bit position in a [`SensorMask`].
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            SensorType::Rgb => 0,
            SensorType::Flood => 1,
            SensorType::Spot => 2,
        }
    }

    /// Index into per-sensor arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self.bit() as usize
    }

    /// Lowercase name used in logs and the report header.
    pub const fn as_str(self) -> &'static str {
        match self {
            SensorType::Rgb => "rgb",
            SensorType::Flood => "flood",
            SensorType::Spot => "spot",
        }
    }

    /// File name suffix written by the capture viewer.
    pub const fn default_suffix(self) -> &'static str {
        match self {
            SensorType::Rgb => "rgb_gray_img.png",
            SensorType::Flood => "flood_depth_pc.exr",
            SensorType::Spot => "spot_depth_pc.exr",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presence bitmask: bit 0 = rgb, bit 1 = flood, bit 2 = spot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorMask(u8);

impl SensorMask {
    /// Mask with no sensors.
    pub const EMPTY: SensorMask = SensorMask(0);

    /// Mask with every sensor type.
    pub const FULL: SensorMask = SensorMask(0b111);

    /// Mask with exactly one sensor.
    #[inline]
    pub const fn of(sensor: SensorType) -> Self {
        Self(1 << sensor.bit())
    }

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, sensor: SensorType) -> bool {
        self.0 & (1 << sensor.bit()) != 0
    }

    #[inline]
    pub fn insert(&mut self, sensor: SensorType) {
        self.0 |= 1 << sensor.bit();
    }

    /// Sensors present, in bit order.
    pub fn iter(self) -> impl Iterator<Item = SensorType> {
        SensorType::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl BitOr for SensorMask {
    type Output = SensorMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        SensorMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for SensorMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<SensorType> for SensorMask {
    fn from_iter<I: IntoIterator<Item = SensorType>>(iter: I) -> Self {
        iter.into_iter()
            .fold(SensorMask::EMPTY, |mask, s| mask | SensorMask::of(s))
    }
}

impl fmt::Display for SensorMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

/// File name suffix per sensor type.
///
/// Suffixes are matched exactly against the tail of capture file names and
/// reused verbatim in output file names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorSuffixes {
    #[serde(default = "default_rgb_suffix")]
    pub rgb: String,

    #[serde(default = "default_flood_suffix")]
    pub flood: String,

    #[serde(default = "default_spot_suffix")]
    pub spot: String,
}

fn default_rgb_suffix() -> String {
    SensorType::Rgb.default_suffix().to_string()
}

fn default_flood_suffix() -> String {
    SensorType::Flood.default_suffix().to_string()
}

fn default_spot_suffix() -> String {
    SensorType::Spot.default_suffix().to_string()
}

impl Default for SensorSuffixes {
    fn default() -> Self {
        Self {
            rgb: default_rgb_suffix(),
            flood: default_flood_suffix(),
            spot: default_spot_suffix(),
        }
    }
}

impl SensorSuffixes {
    /// Suffix configured for `sensor`.
    pub fn get(&self, sensor: SensorType) -> &str {
        match sensor {
            SensorType::Rgb => &self.rgb,
            SensorType::Flood => &self.flood,
            SensorType::Spot => &self.spot,
        }
    }

    /// Sensor whose suffix equals `suffix` exactly.
    pub fn sensor_for(&self, suffix: &str) -> Option<SensorType> {
        SensorType::ALL
            .into_iter()
            .find(|s| self.get(*s) == suffix)
    }
}
