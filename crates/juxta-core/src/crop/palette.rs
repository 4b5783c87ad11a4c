use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed close-view palette, in assignment order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropColor {
    Green,
    Red,
    Blue,
    Yellow,
    Magenta,
}

impl CropColor {
    pub const ALL: [Self; 5] = [
        Self::Green,
        Self::Red,
        Self::Blue,
        Self::Yellow,
        Self::Magenta,
    ];

    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::Green => [0, 255, 0],
            Self::Red => [255, 0, 0],
            Self::Blue => [0, 128, 255],
            Self::Yellow => [255, 255, 0],
            Self::Magenta => [255, 0, 255],
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            Self::Green => "#00ff00",
            Self::Red => "#ff0000",
            Self::Blue => "#0080ff",
            Self::Yellow => "#ffff00",
            Self::Magenta => "#ff00ff",
        }
    }

    /// First palette colour not contained in `used`; the first colour when
    /// the palette is exhausted.
    pub fn first_unused<'a>(used: impl IntoIterator<Item = &'a CropColor>) -> CropColor {
        let used: Vec<CropColor> = used.into_iter().copied().collect();
        Self::ALL
            .into_iter()
            .find(|c| !used.contains(c))
            .unwrap_or(Self::ALL[0])
    }
}

impl fmt::Display for CropColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Green => write!(f, "Green"),
            Self::Red => write!(f, "Red"),
            Self::Blue => write!(f, "Blue"),
            Self::Yellow => write!(f, "Yellow"),
            Self::Magenta => write!(f, "Magenta"),
        }
    }
}
