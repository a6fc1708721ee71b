//! Viewport transformation.
//!
//! Uniform-scale mapping from plot-plane coordinates (y up) to device pixels
//! (y down). The world rectangle is fitted entirely inside the device
//! rectangle and centred along the loose axis.

use crate::basics::{PointD, RectD};

// ============================================================================
// TransViewport
// ============================================================================

/// Fits a world rectangle inside a device rectangle with equal x and y
/// scales.
#[derive(Debug, Clone, PartialEq)]
pub struct TransViewport {
    world: RectD,
    device: RectD,
    // Computed values
    k: f64,
    dx: f64,
    dy: f64,
}

impl Default for TransViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl TransViewport {
    pub fn new() -> Self {
        Self {
            world: RectD::new(0.0, 0.0, 1.0, 1.0),
            device: RectD::new(0.0, 0.0, 1.0, 1.0),
            k: 1.0,
            dx: 0.0,
            dy: 0.0,
        }
    }

    /// Set the device (pixel) viewport rectangle.
    pub fn set_device_viewport(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.device = RectD::new(x1, y1, x2, y2);
        self.device.normalize();
        self.update();
    }

    /// Set the world (plot plane) viewport rectangle.
    pub fn set_world_viewport(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.world = RectD::new(x1, y1, x2, y2);
        self.world.normalize();
        self.update();
    }

    /// Transform world coordinates to device coordinates.
    pub fn transform(&self, p: PointD) -> PointD {
        PointD::new(
            self.device.x1 + self.dx + (p.x - self.world.x1) * self.k,
            self.device.y2 - self.dy - (p.y - self.world.y1) * self.k,
        )
    }

    fn update(&mut self) {
        const EPSILON: f64 = 1e-30;
        if self.world.width() < EPSILON
            || self.world.height() < EPSILON
            || self.device.width() < EPSILON
            || self.device.height() < EPSILON
        {
            self.k = 1.0;
            self.dx = 0.0;
            self.dy = 0.0;
            return;
        }

        let kx = self.device.width() / self.world.width();
        let ky = self.device.height() / self.world.height();
        self.k = kx.min(ky);
        self.dx = (self.device.width() - self.world.width() * self.k) * 0.5;
        self.dy = (self.device.height() - self.world.height() * self.k) * 0.5;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_square_maps_with_y_flipped() {
        let mut vp = TransViewport::new();
        vp.set_world_viewport(0.0, 0.0, 100.0, 100.0);
        vp.set_device_viewport(0.0, 0.0, 200.0, 200.0);

        let d = vp.transform(PointD::new(25.0, 0.0));
        assert_abs_diff_eq!(d.x, 50.0);
        assert_abs_diff_eq!(d.y, 200.0);
        let d = vp.transform(PointD::new(100.0, 100.0));
        assert_abs_diff_eq!(d.x, 200.0);
        assert_abs_diff_eq!(d.y, 0.0);
    }

    #[test]
    fn test_fit_centers_narrow_axis() {
        let mut vp = TransViewport::new();
        vp.set_world_viewport(0.0, 0.0, 100.0, 100.0);
        vp.set_device_viewport(0.0, 0.0, 200.0, 400.0);
        // 200 px of vertical slack, split evenly above and below.
        let bottom = vp.transform(PointD::new(0.0, 0.0));
        assert_abs_diff_eq!(bottom.y, 300.0);
        let top = vp.transform(PointD::new(100.0, 100.0));
        assert_abs_diff_eq!(top.x, 200.0);
        assert_abs_diff_eq!(top.y, 100.0);
        let centre = vp.transform(PointD::new(50.0, 50.0));
        assert_abs_diff_eq!(centre.x, 100.0);
        assert_abs_diff_eq!(centre.y, 200.0);
    }

    #[test]
    fn test_fit_centers_wide_device() {
        let mut vp = TransViewport::new();
        vp.set_world_viewport(0.0, 0.0, 1.0, 1.0);
        vp.set_device_viewport(10.0, 0.0, 50.0, 20.0);
        assert_abs_diff_eq!(vp.transform(PointD::new(0.0, 0.0)).x, 20.0);
        assert_abs_diff_eq!(vp.transform(PointD::new(1.0, 1.0)).x, 40.0);
    }

    #[test]
    fn test_zero_size_world_falls_back_to_unit_scale() {
        let mut vp = TransViewport::new();
        vp.set_device_viewport(0.0, 0.0, 10.0, 10.0);
        vp.set_world_viewport(5.0, 5.0, 5.0, 5.0);
        assert_eq!(vp.transform(PointD::new(5.0, 5.0)), PointD::new(0.0, 10.0));
    }
}
