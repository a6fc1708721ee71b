//! Colorbar legend description: value range, colormap and tick labels.

use crate::colormap::{normalize_value, Colormap};

/// Number of ticks a rendered colorbar carries.
pub const DEFAULT_TICKS: usize = 5;

/// What a surface needs to draw a colorbar legend.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorbarSpec {
    pub vmin: f64,
    pub vmax: f64,
    pub colormap: Colormap,
    pub scientific: bool,
}

impl ColorbarSpec {
    pub fn new(vmin: f64, vmax: f64, colormap: Colormap, scientific: bool) -> Self {
        Self {
            vmin,
            vmax,
            colormap,
            scientific,
        }
    }

    /// `n` evenly spaced values from `vmin` to `vmax` with their labels.
    pub fn ticks(&self, n: usize) -> Vec<(f64, String)> {
        let values: Vec<f64> = match n {
            0 => Vec::new(),
            1 => vec![self.vmin],
            _ => {
                let step = (self.vmax - self.vmin) / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        if i == n - 1 {
                            self.vmax
                        } else {
                            self.vmin + step * i as f64
                        }
                    })
                    .collect()
            }
        };
        values.into_iter().map(|v| (v, self.label(v))).collect()
    }

    /// Label text for `value`.
    pub fn label(&self, value: f64) -> String {
        if self.scientific {
            format!("{value:.3e}")
        } else {
            plain_label(value)
        }
    }

    /// Position of `value` along the bar, 0 at `vmin` and 1 at `vmax`.
    pub fn position(&self, value: f64) -> f64 {
        normalize_value(value, self.vmin, self.vmax)
    }
}

/// Fixed-point label with trailing zeros removed.
fn plain_label(value: f64) -> String {
    let s = format!("{value:.4}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::ColormapName;

    fn spec(vmin: f64, vmax: f64, scientific: bool) -> ColorbarSpec {
        ColorbarSpec::new(vmin, vmax, ColormapName::Viridis.build(), scientific)
    }

    #[test]
    fn test_plain_ticks() {
        let ticks = spec(1.0, 3.0, false).ticks(5);
        let labels: Vec<_> = ticks.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(labels, vec!["1", "1.5", "2", "2.5", "3"]);
        assert_eq!(ticks[4].0, 3.0);
    }

    #[test]
    fn test_scientific_labels() {
        let s = spec(0.0, 12500.0, true);
        assert_eq!(s.label(12500.0), "1.250e4");
        assert_eq!(s.label(0.0), "0.000e0");
    }

    #[test]
    fn test_plain_label_trimming() {
        assert_eq!(plain_label(-0.00001), "0");
        assert_eq!(plain_label(0.125), "0.125");
        assert_eq!(plain_label(-2.0), "-2");
        assert_eq!(plain_label(1.0 / 3.0), "0.3333");
    }

    #[test]
    fn test_tick_counts() {
        let s = spec(-1.0, 1.0, false);
        assert!(s.ticks(0).is_empty());
        assert_eq!(s.ticks(1), vec![(-1.0, "-1".to_string())]);
        assert_eq!(s.ticks(3)[1], (0.0, "0".to_string()));
    }

    #[test]
    fn test_position() {
        let s = spec(2.0, 4.0, false);
        assert_eq!(s.position(3.0), 0.5);
        assert_eq!(s.position(10.0), 1.0);
        assert_eq!(spec(2.0, 2.0, false).position(2.0), 0.0);
    }
}
