//! dBFS → meter position and loudness band.
//!
//! The meter spans a fixed `[-60, 0]` dBFS window.  Values outside the window
//! are clamped, not extrapolated.
//!
//! | Band    | Condition                          |
//! |---------|------------------------------------|
//! | `Above` | `dbfs >= target`                   |
//! | `Near`  | `target - 10 <= dbfs < target`     |
//! | `Below` | everything quieter                 |
//!
//! ```rust
//! use voice_level_coach::feedback::{map_meter, MeterBand};
//!
//! let reading = map_meter(-30.0, -25.0);
//! assert_eq!(reading.percent, 50);
//! assert_eq!(reading.band, MeterBand::Near);
//! ```

use serde::Serialize;

/// Quietest level shown on the meter.
pub const METER_FLOOR_DBFS: f32 = -60.0;

/// Width of the "near" band below the target, in dB.
pub const NEAR_MARGIN_DB: f32 = 10.0;

/// Where a level sits relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MeterBand {
    Below,
    Near,
    Above,
}

impl MeterBand {
    /// Short text label for the band.
    pub fn label(&self) -> &'static str {
        match self {
            MeterBand::Below => "Too quiet",
            MeterBand::Near => "Almost there",
            MeterBand::Above => "Loud enough",
        }
    }
}

/// Meter position for one level reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeterReading {
    /// Fill level in `[0, 100]`.
    pub percent: u8,
    pub band: MeterBand,
}

/// Map `dbfs` to a meter reading against `target_dbfs`.
pub fn map_meter(dbfs: f32, target_dbfs: f32) -> MeterReading {
    let band = if dbfs >= target_dbfs {
        MeterBand::Above
    } else if dbfs >= target_dbfs - NEAR_MARGIN_DB {
        MeterBand::Near
    } else {
        MeterBand::Below
    };

    MeterReading {
        percent: to_percent(dbfs),
        band,
    }
}

/// Meter position of the target marker itself.
pub fn target_percent(target_dbfs: f32) -> u8 {
    to_percent(target_dbfs)
}

fn to_percent(dbfs: f32) -> u8 {
    let span = -METER_FLOOR_DBFS;
    let offset = dbfs - METER_FLOOR_DBFS;
    if offset.is_nan() {
        return 0;
    }
    (offset.clamp(0.0, span) / span * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_maps_to_zero_below() {
        assert_eq!(
            map_meter(-60.0, -25.0),
            MeterReading {
                percent: 0,
                band: MeterBand::Below
            }
        );
    }

    #[test]
    fn full_scale_maps_to_hundred_above() {
        assert_eq!(
            map_meter(0.0, -25.0),
            MeterReading {
                percent: 100,
                band: MeterBand::Above
            }
        );
    }

    #[test]
    fn five_below_target_is_near() {
        assert_eq!(
            map_meter(-30.0, -25.0),
            MeterReading {
                percent: 50,
                band: MeterBand::Near
            }
        );
    }

    #[test]
    fn out_of_window_values_clamp() {
        assert_eq!(map_meter(-90.0, -25.0).percent, 0);
        assert_eq!(map_meter(f32::NEG_INFINITY, -25.0).percent, 0);
        assert_eq!(map_meter(6.0, -25.0).percent, 100);
    }

    #[test]
    fn silence_is_below() {
        assert_eq!(map_meter(f32::NEG_INFINITY, -60.0).band, MeterBand::Below);
    }

    #[test]
    fn near_band_edges() {
        assert_eq!(map_meter(-35.0, -25.0).band, MeterBand::Near);
        assert_eq!(map_meter(-35.01, -25.0).band, MeterBand::Below);
        assert_eq!(map_meter(-25.0, -25.0).band, MeterBand::Above);
    }

    #[test]
    fn percent_is_rounded() {
        // -44.5 dBFS → 15.5 / 60 → 25.83 % → 26
        assert_eq!(map_meter(-44.5, -25.0).percent, 26);
    }

    #[test]
    fn target_marker_position() {
        assert_eq!(target_percent(-30.0), 50);
        assert_eq!(target_percent(-60.0), 0);
    }

    #[test]
    fn band_labels() {
        assert_eq!(MeterBand::Above.label(), "Loud enough");
        assert_eq!(MeterBand::Near.label(), "Almost there");
        assert_eq!(MeterBand::Below.label(), "Too quiet");
    }
}
