//! Theme catalog.
//!
//! Themes are identified by their index in [`THEMES`]. The default theme is owned by
//! every user; the others are bought with credits.

use serde::Serialize;

/// Index of the theme every user owns.
pub const DEFAULT_THEME_INDEX: usize = 0;

/// A purchasable chat theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Position in the catalog.
    pub index: usize,
    /// Display name.
    pub name: &'static str,
}

/// All themes, in catalog order.
pub const THEMES: &[Theme] = &[
    Theme {
        index: 0,
        name: "Classic Light",
    },
    Theme {
        index: 1,
        name: "Ocean Breeze",
    },
    Theme {
        index: 2,
        name: "Sunset Glow",
    },
    Theme {
        index: 3,
        name: "Forest Dream",
    },
    Theme {
        index: 4,
        name: "Purple Haze",
    },
    Theme {
        index: 5,
        name: "Aurora",
    },
];

/// Look up a theme by index.
#[must_use]
pub fn find_theme(index: usize) -> Option<&'static Theme> {
    THEMES.get(index)
}
