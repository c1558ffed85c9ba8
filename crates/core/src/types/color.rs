//! Presentation-only brand color derived from a seller ID.

use serde::{Deserialize, Serialize};

/// Color scheme tag used by dashboards to tint a seller's cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandColor {
    Amber,
    Emerald,
    Sky,
    Rose,
    Violet,
    Slate,
}

impl BrandColor {
    /// Fixed palette, indexed by [`brand_color`]. Reordering it recolors every seller.
    pub const PALETTE: [Self; 6] = [
        Self::Amber,
        Self::Emerald,
        Self::Sky,
        Self::Rose,
        Self::Violet,
        Self::Slate,
    ];

    /// Returns the tag as a lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amber => "amber",
            Self::Emerald => "emerald",
            Self::Sky => "sky",
            Self::Rose => "rose",
            Self::Violet => "violet",
            Self::Slate => "slate",
        }
    }
}

impl std::fmt::Display for BrandColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the brand color for a seller ID.
///
/// The decimal digits of the ID are read in order as one number (`0` when
/// there are none, wrapping on overflow) and taken modulo the palette size,
/// so the same ID always maps to the same color.
///
/// ```
/// use roastery_core::{BrandColor, brand_color};
///
/// assert_eq!(brand_color("seller-001"), BrandColor::Emerald);
/// assert_eq!(brand_color("seller-006"), BrandColor::Amber);
/// assert_eq!(brand_color("no-digits"), BrandColor::Amber);
/// ```
#[must_use]
pub fn brand_color(id: &str) -> BrandColor {
    let number = id
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0_u64, |acc, digit| {
            acc.wrapping_mul(10).wrapping_add(u64::from(digit))
        });

    let len = BrandColor::PALETTE.len() as u64;
    #[allow(clippy::cast_possible_truncation)] // Always < palette length
    let index = (number % len) as usize;

    BrandColor::PALETTE
        .get(index)
        .copied()
        .unwrap_or(BrandColor::Amber)
}
