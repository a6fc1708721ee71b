//! # ternary-heatmap
//!
//! Heatmaps over the 2-simplex: the lattice of points `(i, j, k)` with
//! `i + j + k = scale`, tiled into triangles or hexagons and coloured by a
//! scalar value per lattice point.
//!
//! - Triangular tiling with vertex values blended into each cell
//! - Dual-triangular tiling: each lattice point's own value on an upright
//!   triangle, paired with an inverted triangle of its blended neighbours
//! - Hexagonal tiling centred on the lattice points, clipped at the boundary
//! - Stop-based colormaps and a named registry
//! - Output to any [`Surface`]: a recorder for other plotting backends, or
//!   an anti-aliased RGBA raster
//!
//! ## Architecture
//!
//! 1. **Geometry**: lattice enumeration, cell coordinates, projection
//! 2. **Values**: the sparse value mapping and cell blending
//! 3. **Polygons**: projected cells paired with their value
//! 4. **Colour**: range resolution and colormap lookup
//! 5. **Surface**: polygon fills and a colorbar legend
//!
//! ```
//! use ternary_heatmap::{heatmap, ColormapRegistry, HeatmapData, HeatmapOptions, RecordingSurface};
//!
//! let data = HeatmapData::from_pairs(1, [((0, 0), Some(1.0)), ((1, 0), Some(2.0)), ((0, 1), Some(3.0))]).unwrap();
//! let mut surface = RecordingSurface::new();
//! let opts = HeatmapOptions::new().style("hexagonal");
//! heatmap(&data, &opts, &ColormapRegistry::with_defaults(), &mut surface).unwrap();
//! assert_eq!(surface.polygons().count(), 3);
//! ```

// Geometry
pub mod basics;
pub mod cells;
pub mod simplex;

// Values
pub mod blend;
pub mod data;
pub mod polygon_iter;
pub mod style;

// Colour
pub mod color;
pub mod colorbar;
pub mod colormap;

// Rendering
pub mod pixfmt_rgba;
pub mod raster_surface;
pub mod rasterizer;
pub mod renderer;
pub mod scanline;
pub mod surface;
pub mod viewport;

// Driver
pub mod error;
pub mod heatmap;

pub use blend::{alt_blend_value, blend_value};
pub use cells::{alt_triangle_coordinates, hexagon_coordinates, triangle_coordinates, HexagonKind};
pub use color::Rgba8;
pub use colorbar::ColorbarSpec;
pub use colormap::{colormapper, Colormap, ColormapName, ColormapRegistry};
pub use data::HeatmapData;
pub use error::{HeatmapError, Result};
pub use heatmap::{heatmap, heatmap_raster, heatmapf, resolve_color_range, HeatmapOptions};
pub use polygon_iter::{polygon_iterator, CellPolygon, CellShape};
pub use raster_surface::{RasterSurface, RasterSurfaceConfig};
pub use simplex::{normalize, permute_point, project_point, simplex_iterator, LatticePoint, Permutation};
pub use style::Style;
pub use surface::{DrawCommand, RecordingSurface, Surface};
