// Gauge quantization and color banding

use crate::config::ThresholdConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Normal,
    Warning,
    Critical,
}

/// Filled cells for `pct` on a bar of `width` cells: round(pct / 100 * width),
/// with `pct` clamped to [0, 100]. Non-finite input yields an empty bar.
pub fn gauge_fill(pct: f64, width: usize) -> usize {
    if !pct.is_finite() {
        return 0;
    }
    let filled = (pct.clamp(0.0, 100.0) / 100.0 * width as f64).round() as usize;
    filled.min(width)
}

/// Normal below `warn_pct`, critical above `critical_pct`, warning in between (inclusive).
pub fn band(pct: f64, thresholds: &ThresholdConfig) -> Band {
    if pct > thresholds.critical_pct {
        Band::Critical
    } else if pct >= thresholds.warn_pct {
        Band::Warning
    } else {
        Band::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_endpoints() {
        assert_eq!(gauge_fill(0.0, 20), 0);
        assert_eq!(gauge_fill(100.0, 20), 20);
        assert_eq!(gauge_fill(50.0, 20), 10);
    }

    #[test]
    fn fill_clamps_out_of_range_and_nan() {
        assert_eq!(gauge_fill(-5.0, 20), 0);
        assert_eq!(gauge_fill(140.0, 20), 20);
        assert_eq!(gauge_fill(f64::NAN, 20), 0);
        assert_eq!(gauge_fill(f64::INFINITY, 20), 0);
    }

    #[test]
    fn fill_is_monotonic() {
        for width in [1usize, 7, 20, 33] {
            let mut prev = 0;
            for step in 0..=1000 {
                let pct = step as f64 / 10.0;
                let filled = gauge_fill(pct, width);
                assert!(filled >= prev, "width {width}: {pct} gave {filled} < {prev}");
                assert!(filled <= width);
                prev = filled;
            }
        }
    }

    #[test]
    fn band_thresholds() {
        let t = ThresholdConfig::default();
        assert_eq!(band(0.0, &t), Band::Normal);
        assert_eq!(band(59.9, &t), Band::Normal);
        assert_eq!(band(60.0, &t), Band::Warning);
        assert_eq!(band(85.0, &t), Band::Warning);
        assert_eq!(band(85.1, &t), Band::Critical);
    }
}
