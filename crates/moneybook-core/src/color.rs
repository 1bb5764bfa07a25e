//! Chart colours for category aggregates.
//!
//! The first [`PALETTE_SIZE`] categories of a chart take the fixed brown
//! palette in rank order. Anything ranked below that asks a [`ColorSource`]
//! for a colour. Colours are display-only: two aggregates sharing a colour say
//! nothing about their categories.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CoreError;

pub const PALETTE_SIZE: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(value: &str) -> Result<Self, CoreError> {
        let cleaned = value.trim().trim_start_matches('#');
        if cleaned.len() != 6 || !cleaned.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidColor(value.to_string()));
        }
        let raw = u32::from_str_radix(cleaned, 16)
            .map_err(|_| CoreError::InvalidColor(value.to_string()))?;
        Ok(Self::new(
            ((raw >> 16) & 0xFF) as u8,
            ((raw >> 8) & 0xFF) as u8,
            (raw & 0xFF) as u8,
        ))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

pub const BROWN_PALETTE: [Rgb; PALETTE_SIZE] = [
    Rgb::new(95, 63, 22),
    Rgb::new(118, 86, 45),
    Rgb::new(141, 109, 69),
    Rgb::new(164, 132, 92),
    Rgb::new(186, 155, 115),
    Rgb::new(209, 178, 138),
    Rgb::new(232, 201, 162),
];

/// Fixed rank-ordered colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Builds a palette from hex strings, keeping at most [`PALETTE_SIZE`] colours.
    pub fn from_hex<S: AsRef<str>>(values: &[S]) -> Result<Self, CoreError> {
        let colors = values
            .iter()
            .take(PALETTE_SIZE)
            .map(|value| Rgb::from_hex(value.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { colors })
    }

    pub fn get(&self, slot: usize) -> Option<Rgb> {
        self.colors.get(slot).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: BROWN_PALETTE.to_vec(),
        }
    }
}

/// Where an aggregate's colour came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ColorSlot {
    Palette(usize),
    Generated(Rgb),
}

/// Supplies colours for categories ranked past the palette.
pub trait ColorSource {
    fn color_for(&self, title: &str, rank: usize) -> Rgb;
}

/// Derives a colour from the category title, so a category keeps its colour
/// between renders.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashedColors;

impl ColorSource for HashedColors {
    fn color_for(&self, title: &str, _rank: usize) -> Rgb {
        let hash = fnv1a(title.as_bytes());
        Rgb::new(
            (hash >> 16) as u8,
            (hash >> 8) as u8,
            hash as u8,
        )
    }
}

/// Resolves the colour for the aggregate at `rank` (0-based, by descending value).
pub fn assign_color(
    palette: &Palette,
    source: &dyn ColorSource,
    title: &str,
    rank: usize,
) -> (ColorSlot, Rgb) {
    match palette.get(rank) {
        Some(color) => (ColorSlot::Palette(rank), color),
        None => {
            let color = source.color_for(title, rank);
            (ColorSlot::Generated(color), color)
        }
    }
}

fn fnv1a(bytes: &[u8]) -> u32 {
    const OFFSET: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;
    bytes.iter().fold(OFFSET, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(PRIME)
    })
}
