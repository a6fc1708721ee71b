//! Anti-aliased polygon rasterizer.
//!
//! Polygon edges are decomposed into cells, one per pixel an edge passes
//! through. Each cell stores the signed height the edge covers inside the
//! pixel (`cover`) and that height weighted by the horizontal position of
//! the edge (`area`). Sweeping a row left to right, the running sum of
//! covers gives the winding coverage of every pixel right of the edges seen
//! so far, and `area` corrects the coverage of the pixels the edges cross.
//!
//! Coordinates are device pixels; pixel `(x, y)` spans `[x, x+1) × [y, y+1)`.

use crate::basics::{ifloor, uround, PointD};
use crate::scanline::Scanline;

// ============================================================================
// Cells
// ============================================================================

/// Coverage contribution of the edges crossing one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellAa {
    pub x: i32,
    pub y: i32,
    pub cover: f64,
    pub area: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Initial,
    MoveTo,
    LineTo,
}

// ============================================================================
// RasterizerScanlineAa
// ============================================================================

/// Polygon rasterizer with anti-aliased output.
///
/// Contours are combined with the non-zero winding rule. Define them with
/// `move_to_d()` / `line_to_d()` or `add_polygon()`, then call
/// `rewind_scanlines()` and repeatedly `sweep_scanline()`.
pub struct RasterizerScanlineAa {
    cells: Vec<CellAa>,
    sorted: bool,
    rows: Vec<(usize, usize)>,
    start: PointD,
    last: PointD,
    status: Status,
    min_y: i32,
    max_y: i32,
    scan_y: i32,
}

impl RasterizerScanlineAa {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            sorted: false,
            rows: Vec::new(),
            start: PointD::default(),
            last: PointD::default(),
            status: Status::Initial,
            min_y: i32::MAX,
            max_y: i32::MIN,
            scan_y: 0,
        }
    }

    /// Reset the rasterizer, discarding all polygon data.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.rows.clear();
        self.sorted = false;
        self.status = Status::Initial;
        self.min_y = i32::MAX;
        self.max_y = i32::MIN;
    }

    // ========================================================================
    // Path building
    // ========================================================================

    /// Start a new contour, closing the previous one.
    pub fn move_to_d(&mut self, x: f64, y: f64) {
        self.close_polygon();
        self.start = PointD::new(x, y);
        self.last = self.start;
        self.status = Status::MoveTo;
    }

    /// Add an edge from the current point to `(x, y)`.
    pub fn line_to_d(&mut self, x: f64, y: f64) {
        if self.status == Status::Initial {
            self.move_to_d(x, y);
            return;
        }
        let to = PointD::new(x, y);
        self.line(self.last, to);
        self.last = to;
        self.status = Status::LineTo;
    }

    /// Close the current contour back to its starting point.
    pub fn close_polygon(&mut self) {
        if self.status == Status::LineTo {
            self.line(self.last, self.start);
            self.last = self.start;
        }
        self.status = Status::Initial;
    }

    /// Add a closed polygon. Fewer than three vertices add nothing.
    pub fn add_polygon(&mut self, vertices: &[PointD]) {
        if vertices.len() < 3 {
            return;
        }
        self.move_to_d(vertices[0].x, vertices[0].y);
        for v in &vertices[1..] {
            self.line_to_d(v.x, v.y);
        }
        self.close_polygon();
    }

    // ========================================================================
    // Edge decomposition
    // ========================================================================

    fn add_cell(&mut self, x: i32, y: i32, cover: f64, area: f64) {
        if cover == 0.0 && area == 0.0 {
            return;
        }
        self.sorted = false;
        if let Some(last) = self.cells.last_mut() {
            if last.x == x && last.y == y {
                last.cover += cover;
                last.area += area;
                return;
            }
        }
        self.cells.push(CellAa { x, y, cover, area });
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    /// Walk a segment lying within pixel row `row` across pixel columns.
    fn render_hline(&mut self, row: i32, xs: f64, ys: f64, xe: f64, ye: f64) {
        let c_start = ifloor(xs);
        let c_end = ifloor(xe);
        if c_start == c_end {
            let fx = c_start as f64;
            let dy = ye - ys;
            self.add_cell(c_start, row, dy, dy * ((xs - fx) + (xe - fx)));
            return;
        }

        let step = if xe > xs { 1 } else { -1 };
        let slope = (ye - ys) / (xe - xs);
        let (mut c, mut x, mut y) = (c_start, xs, ys);
        loop {
            let last = c == c_end;
            let (nx, ny) = if last {
                (xe, ye)
            } else {
                let boundary = if step > 0 { c + 1 } else { c } as f64;
                (boundary, ys + (boundary - xs) * slope)
            };
            let fx = c as f64;
            let dy = ny - y;
            self.add_cell(c, row, dy, dy * ((x - fx) + (nx - fx)));
            if last {
                break;
            }
            x = nx;
            y = ny;
            c += step;
        }
    }

    /// Decompose the edge `p0 → p1` into cells.
    fn line(&mut self, p0: PointD, p1: PointD) {
        if p0.y == p1.y || !(p0.x.is_finite() && p0.y.is_finite() && p1.x.is_finite() && p1.y.is_finite()) {
            return;
        }
        let dxdy = (p1.x - p0.x) / (p1.y - p0.y);
        let x_at = |y: f64| p0.x + (y - p0.y) * dxdy;

        let r_first = ifloor(p0.y.min(p1.y));
        let r_last = ifloor(p0.y.max(p1.y));
        let rows: Box<dyn Iterator<Item = i32>> = if p1.y > p0.y {
            Box::new(r_first..=r_last)
        } else {
            Box::new((r_first..=r_last).rev())
        };
        for row in rows {
            let top = row as f64;
            let bottom = top + 1.0;
            let ys = p0.y.clamp(top, bottom);
            let ye = p1.y.clamp(top, bottom);
            if ys == ye {
                continue;
            }
            self.render_hline(row, x_at(ys), ys, x_at(ye), ye);
        }
    }

    // ========================================================================
    // Scanline sweeping
    // ========================================================================

    fn sort_cells(&mut self) {
        if self.sorted {
            return;
        }
        self.cells.sort_by(|a, b| (a.y, a.x).cmp(&(b.y, b.x)));
        self.rows.clear();
        if !self.cells.is_empty() {
            let height = (self.max_y - self.min_y + 1) as usize;
            self.rows.resize(height, (0, 0));
            let mut idx = 0;
            while idx < self.cells.len() {
                let y = self.cells[idx].y;
                let begin = idx;
                while idx < self.cells.len() && self.cells[idx].y == y {
                    idx += 1;
                }
                self.rows[(y - self.min_y) as usize] = (begin, idx);
            }
        }
        self.sorted = true;
    }

    /// Close any open contour, sort cells and prepare for sweeping.
    /// Returns `false` if there is nothing to render.
    pub fn rewind_scanlines(&mut self) -> bool {
        self.close_polygon();
        self.sort_cells();
        if self.cells.is_empty() {
            return false;
        }
        self.scan_y = self.min_y;
        true
    }

    /// Convert accumulated winding coverage into an alpha value (0..255).
    #[inline]
    pub fn calculate_alpha(&self, coverage: f64) -> u32 {
        uround(coverage.abs().min(1.0) * 255.0)
    }

    /// Extract the next non-empty scanline. Returns `false` when all
    /// scanlines have been consumed.
    pub fn sweep_scanline<SL: Scanline>(&mut self, sl: &mut SL) -> bool {
        loop {
            if self.scan_y > self.max_y {
                return false;
            }
            sl.reset_spans();

            let (begin, end) = self.rows[(self.scan_y - self.min_y) as usize];
            let mut idx = begin;
            let mut cover = 0.0;

            while idx < end {
                let x = self.cells[idx].x;
                let mut area = 0.0;
                while idx < end && self.cells[idx].x == x {
                    cover += self.cells[idx].cover;
                    area += self.cells[idx].area;
                    idx += 1;
                }

                let alpha = self.calculate_alpha(cover - area / 2.0);
                if alpha != 0 {
                    sl.add_cell(x, alpha);
                }

                if idx < end {
                    let next_x = self.cells[idx].x;
                    if next_x > x + 1 {
                        let alpha = self.calculate_alpha(cover);
                        if alpha != 0 {
                            sl.add_span(x + 1, (next_x - x - 1) as u32, alpha);
                        }
                    }
                }
            }

            if sl.num_spans() > 0 {
                break;
            }
            self.scan_y += 1;
        }

        sl.finalize(self.scan_y);
        self.scan_y += 1;
        true
    }
}

impl Default for RasterizerScanlineAa {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
