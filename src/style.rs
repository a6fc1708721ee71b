//! Heatmap tessellation styles.

use core::fmt;
use core::str::FromStr;

use crate::error::HeatmapError;

/// Cell shape and colour continuity mode of a heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Style {
    /// Upright and inverted triangles both coloured by blending the values
    /// at their corners, giving one continuous colour field.
    #[default]
    Triangular,
    /// Upright triangles carry the raw value of their anchor; inverted
    /// triangles carry the blend of their corners.
    DualTriangular,
    /// One hexagon per lattice point carrying its raw value.
    Hexagonal,
}

impl Style {
    /// Single letter code: `'t'`, `'d'` or `'h'`.
    pub fn code(&self) -> char {
        match self {
            Style::Triangular => 't',
            Style::DualTriangular => 'd',
            Style::Hexagonal => 'h',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Style::Triangular => "triangular",
            Style::DualTriangular => "dual-triangular",
            Style::Hexagonal => "hexagonal",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Style> for String {
    fn from(style: Style) -> String {
        style.name().to_string()
    }
}

/// Styles are matched on their lowercased first letter, so `"Hexagonal"`,
/// `"hex"` and `"H"` all select [`Style::Hexagonal`].
impl FromStr for Style {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('t') => Ok(Style::Triangular),
            Some('d') => Ok(Style::DualTriangular),
            Some('h') => Ok(Style::Hexagonal),
            _ => Err(HeatmapError::InvalidStyle(s.to_string())),
        }
    }
}
