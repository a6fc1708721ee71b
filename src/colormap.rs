//! Colormaps, the colormap registry and value → color mapping.
//!
//! A [`Colormap`] is a lookup table built from color stops at positions in
//! `[0, 1]`. Named colormaps are resolved through an explicit
//! [`ColormapRegistry`] handed to the renderer rather than a global table.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use crate::basics::uround;
use crate::color::{rgb8_packed, Rgba8};
use crate::error::{HeatmapError, Result};

/// Number of entries in a colormap lookup table.
pub const LUT_SIZE: usize = 256;

// ============================================================================
// Colormap
// ============================================================================

/// Color stop for colormap definition.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColorStop {
    offset: f64,
    color: Rgba8,
}

/// A colormap: `[0, 1]` → color, backed by a lookup table.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    stops: Vec<ColorStop>,
    lut: Vec<Rgba8>,
    bad: Rgba8,
}

impl Colormap {
    /// Build a colormap from `(offset, color)` stops.
    ///
    /// Offsets are clamped to `[0, 1]` and sorted; stops sharing an offset
    /// keep the first. A single stop gives a constant colormap; no stops
    /// gives a transparent one.
    pub fn from_stops<I>(name: impl Into<String>, stops: I) -> Self
    where
        I: IntoIterator<Item = (f64, Rgba8)>,
    {
        let mut stops: Vec<ColorStop> = stops
            .into_iter()
            .filter(|(offset, _)| !offset.is_nan())
            .map(|(offset, color)| ColorStop {
                offset: offset.clamp(0.0, 1.0),
                color,
            })
            .collect();
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        stops.dedup_by(|a, b| (a.offset - b.offset).abs() < 1e-10);

        let mut cmap = Self {
            name: name.into(),
            stops,
            lut: vec![Rgba8::no_color(); LUT_SIZE],
            bad: Rgba8::no_color(),
        };
        cmap.build_lut();
        cmap
    }

    /// Evenly spaced stops from a list of packed `0xRRGGBB` colors.
    pub fn from_packed(name: impl Into<String>, colors: &[u32]) -> Self {
        let n = colors.len();
        let denom = n.saturating_sub(1).max(1) as f64;
        Self::from_stops(
            name,
            colors
                .iter()
                .enumerate()
                .map(|(idx, &c)| (idx as f64 / denom, rgb8_packed(c))),
        )
    }

    fn build_lut(&mut self) {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return,
        };
        let mut seg = 0;
        for (idx, slot) in self.lut.iter_mut().enumerate() {
            let t = idx as f64 / (LUT_SIZE - 1) as f64;
            *slot = if t <= first.offset {
                first.color
            } else if t >= last.offset {
                last.color
            } else {
                while self.stops[seg + 1].offset < t {
                    seg += 1;
                }
                let a = self.stops[seg];
                let b = self.stops[seg + 1];
                a.color.gradient(&b.color, (t - a.offset) / (b.offset - a.offset))
            };
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color used for NaN inputs.
    pub fn bad_color(&self) -> Rgba8 {
        self.bad
    }

    pub fn set_bad_color(&mut self, c: Rgba8) {
        self.bad = c;
    }

    pub fn size(&self) -> usize {
        self.lut.len()
    }

    pub fn get(&self, index: usize) -> Rgba8 {
        self.lut[index.min(LUT_SIZE - 1)]
    }

    /// Color at normalized position `t`, clamped to `[0, 1]`.
    pub fn map(&self, t: f64) -> Rgba8 {
        if t.is_nan() {
            return self.bad;
        }
        let idx = uround(t.clamp(0.0, 1.0) * (LUT_SIZE - 1) as f64) as usize;
        self.lut[idx]
    }
}

// ============================================================================
// Named colormaps
// ============================================================================

/// Built-in colormaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColormapName {
    #[default]
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Hot,
    Jet,
    Greys,
    Coolwarm,
}

impl ColormapName {
    pub const ALL: [ColormapName; 8] = [
        ColormapName::Viridis,
        ColormapName::Plasma,
        ColormapName::Inferno,
        ColormapName::Magma,
        ColormapName::Hot,
        ColormapName::Jet,
        ColormapName::Greys,
        ColormapName::Coolwarm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColormapName::Viridis => "viridis",
            ColormapName::Plasma => "plasma",
            ColormapName::Inferno => "inferno",
            ColormapName::Magma => "magma",
            ColormapName::Hot => "hot",
            ColormapName::Jet => "jet",
            ColormapName::Greys => "greys",
            ColormapName::Coolwarm => "coolwarm",
        }
    }

    /// Build the lookup table for this colormap.
    pub fn build(&self) -> Colormap {
        let name = self.as_str();
        match self {
            ColormapName::Viridis => Colormap::from_packed(
                name,
                &[
                    0x440154, 0x472c7a, 0x3b528b, 0x2c728e, 0x21918c, 0x28ae80, 0x5ec962,
                    0xaddc30, 0xfde725,
                ],
            ),
            ColormapName::Plasma => Colormap::from_packed(
                name,
                &[
                    0x0d0887, 0x4c02a1, 0x7e03a8, 0xa92395, 0xcc4778, 0xe56b5d, 0xf89540,
                    0xfdc527, 0xf0f921,
                ],
            ),
            ColormapName::Inferno => Colormap::from_packed(
                name,
                &[
                    0x000004, 0x1f0c48, 0x550f6d, 0x88226a, 0xba3655, 0xe35933, 0xf98e09,
                    0xf9cb35, 0xfcffa4,
                ],
            ),
            ColormapName::Magma => Colormap::from_packed(
                name,
                &[
                    0x000004, 0x1c1044, 0x4f127b, 0x812581, 0xb5367a, 0xe55064, 0xfb8761,
                    0xfec287, 0xfcfdbf,
                ],
            ),
            ColormapName::Hot => Colormap::from_stops(
                name,
                [
                    (0.0, rgb8_packed(0x0b0000)),
                    (0.365, rgb8_packed(0xff0000)),
                    (0.746, rgb8_packed(0xffff00)),
                    (1.0, rgb8_packed(0xffffff)),
                ],
            ),
            ColormapName::Jet => Colormap::from_stops(
                name,
                [
                    (0.0, rgb8_packed(0x00007f)),
                    (0.125, rgb8_packed(0x0000ff)),
                    (0.375, rgb8_packed(0x00ffff)),
                    (0.625, rgb8_packed(0xffff00)),
                    (0.875, rgb8_packed(0xff0000)),
                    (1.0, rgb8_packed(0x7f0000)),
                ],
            ),
            ColormapName::Greys => Colormap::from_packed(name, &[0xffffff, 0x000000]),
            ColormapName::Coolwarm => {
                Colormap::from_packed(name, &[0x3b4cc0, 0xdddddd, 0xb40426])
            }
        }
    }
}

impl fmt::Display for ColormapName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ColormapName> for String {
    fn from(name: ColormapName) -> String {
        name.as_str().to_string()
    }
}

impl FromStr for ColormapName {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        ColormapName::ALL
            .into_iter()
            .find(|n| n.as_str() == lower)
            .ok_or_else(|| HeatmapError::UnknownColormap(s.to_string()))
    }
}

// ============================================================================
// ColormapRegistry
// ============================================================================

/// Name → colormap table consulted when rendering.
#[derive(Debug, Clone, Default)]
pub struct ColormapRegistry {
    maps: BTreeMap<String, Colormap>,
    default_name: String,
}

impl ColormapRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            maps: BTreeMap::new(),
            default_name: ColormapName::default().as_str().to_string(),
        }
    }

    /// A registry holding every [`ColormapName`], defaulting to viridis.
    pub fn with_defaults() -> Self {
        let mut reg = Self::new();
        for name in ColormapName::ALL {
            reg.register(name.build());
        }
        reg
    }

    /// Add or replace a colormap under its own name (lowercased).
    pub fn register(&mut self, cmap: Colormap) {
        self.maps.insert(cmap.name().to_ascii_lowercase(), cmap);
    }

    /// Change the colormap used when none is requested.
    pub fn set_default(&mut self, name: &str) -> Result<()> {
        let key = name.to_ascii_lowercase();
        if !self.maps.contains_key(&key) {
            return Err(HeatmapError::UnknownColormap(name.to_string()));
        }
        self.default_name = key;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Colormap> {
        self.maps.get(&name.to_ascii_lowercase())
    }

    /// Resolve a requested colormap name, falling back to the default.
    pub fn resolve(&self, name: Option<&str>) -> Result<&Colormap> {
        let name = name.unwrap_or(&self.default_name);
        self.get(name)
            .ok_or_else(|| HeatmapError::UnknownColormap(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }
}

// ============================================================================
// Value mapping
// ============================================================================

/// Position of `value` within `[vmin, vmax]`, clamped to `[0, 1]`.
/// A degenerate range maps everything to 0.
pub fn normalize_value(value: f64, vmin: f64, vmax: f64) -> f64 {
    let span = vmax - vmin;
    if span == 0.0 || !span.is_finite() {
        return 0.0;
    }
    ((value - vmin) / span).clamp(0.0, 1.0)
}

/// Map `value` to a color of `cmap` over the range `[vmin, vmax]`.
pub fn colormapper(value: f64, vmin: f64, vmax: f64, cmap: &Colormap) -> Rgba8 {
    if value.is_nan() {
        return cmap.bad_color();
    }
    cmap.map(normalize_value(value, vmin, vmax))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_stop_endpoints_exact() {
        let cmap = Colormap::from_packed("rb", &[0xff0000, 0x0000ff]);
        assert_eq!(cmap.size(), LUT_SIZE);
        assert_eq!(cmap.map(0.0), rgb8_packed(0xff0000));
        assert_eq!(cmap.map(1.0), rgb8_packed(0x0000ff));
        let mid = cmap.map(0.5);
        assert!(mid.r > 120 && mid.r < 135, "mid.r={}", mid.r);
        assert!(mid.b > 120 && mid.b < 135, "mid.b={}", mid.b);
    }

    #[test]
    fn test_map_clamps_and_handles_nan() {
        let cmap = ColormapName::Viridis.build();
        assert_eq!(cmap.map(-3.0), cmap.map(0.0));
        assert_eq!(cmap.map(7.0), cmap.map(1.0));
        assert!(cmap.map(f64::NAN).is_transparent());
    }

    #[test]
    fn test_viridis_endpoints() {
        let cmap = ColormapName::Viridis.build();
        assert_eq!(cmap.map(0.0).to_hex(), "#440154");
        assert_eq!(cmap.map(1.0).to_hex(), "#fde725");
        assert_eq!(cmap.get(128), cmap.map(128.0 / 255.0));
    }

    #[test]
    fn test_unsorted_stops() {
        let cmap = Colormap::from_stops(
            "x",
            [(1.0, Rgba8::WHITE), (0.0, Rgba8::BLACK), (0.6, rgb8_packed(0xff0000))],
        );
        assert_eq!(cmap.map(0.0), Rgba8::BLACK);
        assert_eq!(cmap.map(0.6), rgb8_packed(0xff0000));
        assert_eq!(cmap.map(1.0), Rgba8::WHITE);
    }

    #[test]
    fn test_single_stop_is_constant() {
        let cmap = Colormap::from_stops("flat", [(0.3, rgb8_packed(0x123456))]);
        assert_eq!(cmap.map(0.0), rgb8_packed(0x123456));
        assert_eq!(cmap.map(1.0), rgb8_packed(0x123456));
    }

    #[test]
    fn test_name_parsing() {
        assert_eq!("Viridis".parse::<ColormapName>().unwrap(), ColormapName::Viridis);
        assert_eq!("JET".parse::<ColormapName>().unwrap(), ColormapName::Jet);
        assert!("rainbow".parse::<ColormapName>().is_err());
    }

    #[test]
    fn test_registry_resolve() {
        let mut reg = ColormapRegistry::with_defaults();
        assert_eq!(reg.names().count(), ColormapName::ALL.len());
        assert_eq!(reg.resolve(None).unwrap().name(), "viridis");
        assert_eq!(reg.resolve(Some("Magma")).unwrap().name(), "magma");
        assert_eq!(
            reg.resolve(Some("nope")).unwrap_err(),
            HeatmapError::UnknownColormap("nope".into())
        );

        reg.register(Colormap::from_packed("Mine", &[0x000000, 0x00ff00]));
        assert!(reg.get("mine").is_some());
        reg.set_default("mine").unwrap();
        assert_eq!(reg.resolve(None).unwrap().name(), "Mine");
        assert!(reg.set_default("absent").is_err());
    }

    #[test]
    fn test_empty_registry() {
        let reg = ColormapRegistry::new();
        assert!(reg.resolve(None).is_err());
    }

    #[test]
    fn test_colormapper() {
        let cmap = ColormapName::Greys.build();
        assert_eq!(colormapper(1.0, 1.0, 3.0, &cmap), Rgba8::WHITE);
        assert_eq!(colormapper(3.0, 1.0, 3.0, &cmap), Rgba8::BLACK);
        assert_eq!(colormapper(10.0, 1.0, 3.0, &cmap), Rgba8::BLACK);
        // Degenerate range: everything maps to the low end.
        assert_eq!(colormapper(5.0, 2.0, 2.0, &cmap), Rgba8::WHITE);
        assert!(colormapper(f64::NAN, 0.0, 1.0, &cmap).is_transparent());
    }

    #[test]
    fn test_normalize_value() {
        assert_eq!(normalize_value(2.0, 1.0, 3.0), 0.5);
        assert_eq!(normalize_value(0.0, 1.0, 3.0), 0.0);
        assert_eq!(normalize_value(1.0, 1.0, 1.0), 0.0);
    }
}
