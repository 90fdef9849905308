use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use strum::{Display as DisplayMacro, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{Axis, InvalidDimensionError, UnknownPresetError};

static CATALOG: OnceCell<FrameDimensionCatalog> = OnceCell::new();

/// Standard video resolutions, in ascending order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    DisplayMacro,
)]
#[strum(ascii_case_insensitive)]
pub enum FrameDimension {
    #[strum(to_string = "240p", serialize = "P240")]
    #[serde(rename = "240p")]
    P240,
    #[strum(to_string = "360p", serialize = "P360")]
    #[serde(rename = "360p")]
    P360,
    #[strum(to_string = "480p", serialize = "P480")]
    #[serde(rename = "480p")]
    P480,
    #[strum(to_string = "720p", serialize = "P720")]
    #[serde(rename = "720p")]
    P720,
    #[strum(to_string = "1080p", serialize = "P1080")]
    #[serde(rename = "1080p")]
    P1080,
    #[strum(to_string = "1440p", serialize = "P1440")]
    #[serde(rename = "1440p")]
    P1440,
    #[strum(to_string = "2160p", serialize = "P2160")]
    #[serde(rename = "2160p")]
    P2160,
}

impl FrameDimension {
    // Literal (width, height) pairs. Validated when the catalog is built.
    const fn declared_size(self) -> (i32, i32) {
        match self {
            FrameDimension::P240 => (426, 240),
            FrameDimension::P360 => (640, 360),
            FrameDimension::P480 => (854, 480),
            FrameDimension::P720 => (1280, 720),
            FrameDimension::P1080 => (1920, 1080),
            FrameDimension::P1440 => (2560, 1440),
            FrameDimension::P2160 => (3840, 2160),
        }
    }
}

/// A named width/height pair. Both sides are at least one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FrameDimensionPreset {
    name: FrameDimension,
    width: u32,
    height: u32,
}

impl FrameDimensionPreset {
    pub fn new(name: FrameDimension, width: i32, height: i32) -> Result<Self, InvalidDimensionError> {
        let width = u32::try_from(width)
            .ok()
            .filter(|w| *w >= 1)
            .ok_or(InvalidDimensionError {
                preset: name,
                axis: Axis::Width,
                value: width,
            })?;
        let height = u32::try_from(height)
            .ok()
            .filter(|h| *h >= 1)
            .ok_or(InvalidDimensionError {
                preset: name,
                axis: Axis::Height,
                value: height,
            })?;

        Ok(FrameDimensionPreset { name, width, height })
    }

    pub fn name(&self) -> FrameDimension {
        self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

// Rendered the way transcode options spell a scale target, e.g. "1280x720".
impl fmt::Display for FrameDimensionPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Read-only registry of every [`FrameDimension`] preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameDimensionCatalog {
    // Indexed by `FrameDimension as usize`, i.e. declaration order.
    presets: Vec<FrameDimensionPreset>,
}

impl FrameDimensionCatalog {
    /// Builds the standard catalog. Any invalid entry fails the whole build.
    pub fn standard() -> Result<Self, InvalidDimensionError> {
        let presets = FrameDimension::iter()
            .map(|name| {
                let (width, height) = name.declared_size();
                FrameDimensionPreset::new(name, width, height)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Built frame dimension catalog with {} presets", presets.len());
        Ok(FrameDimensionCatalog { presets })
    }

    /// The process-wide catalog, built on first use and kept for the
    /// lifetime of the process.
    pub fn global() -> Result<&'static Self, InvalidDimensionError> {
        CATALOG.get_or_try_init(|| {
            let catalog = Self::standard()?;
            info!(
                "Frame dimension catalog initialized: {}",
                catalog
                    .all()
                    .iter()
                    .map(|p| format!("{}={}", p.name(), p))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            Ok(catalog)
        })
    }

    pub fn get(&self, name: FrameDimension) -> FrameDimensionPreset {
        self.presets[name as usize]
    }

    /// Looks a preset up by its textual identifier ("720p", "P720", ...).
    pub fn lookup(&self, name: &str) -> Result<FrameDimensionPreset, UnknownPresetError> {
        FrameDimension::from_str(name.trim())
            .map(|dimension| self.get(dimension))
            .map_err(|_| UnknownPresetError(name.to_string()))
    }

    pub fn all(&self) -> &[FrameDimensionPreset] {
        &self.presets
    }
}
