//! Flavor and structure profile of a wine.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lower bound of every profile scalar.
pub const SCALE_MIN: f64 = 0.0;
/// Upper bound of every profile scalar.
pub const SCALE_MAX: f64 = 10.0;

const POWER_BODY_WEIGHT: f64 = 0.35;
const POWER_TANNIN_WEIGHT: f64 = 0.25;
const POWER_OAK_WEIGHT: f64 = 0.15;
const POWER_ALCOHOL_WEIGHT: f64 = 0.25;

/// Structured profile on a fixed 0–10 scale.
///
/// `power` is not a field: it is derived from body, tannin, oak and alcohol
/// every time it is asked for, so it can never drift from its inputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WineProfile {
    pub body: f64,
    pub tannin: f64,
    pub oak: f64,
    pub acidity: f64,
    pub sweetness: f64,
    /// Alcohol by volume mapped onto the 0–10 scale. Missing means
    /// unknown; it is filled from the wine's ABV when estimating.
    #[serde(default = "unknown_scalar", skip_serializing_if = "is_unknown")]
    pub alcohol: f64,
}

fn unknown_scalar() -> f64 {
    f64::NAN
}

fn is_unknown(value: &f64) -> bool {
    value.is_nan()
}

impl WineProfile {
    /// Builds a profile, clamping every scalar into range.
    ///
    /// Non-finite inputs collapse to the bottom of the scale.
    pub fn new(body: f64, tannin: f64, oak: f64, acidity: f64, sweetness: f64, alcohol: f64) -> Self {
        Self {
            body: clamp_scale(body),
            tannin: clamp_scale(tannin),
            oak: clamp_scale(oak),
            acidity: clamp_scale(acidity),
            sweetness: clamp_scale(sweetness),
            alcohol: clamp_scale(alcohol),
        }
    }

    /// Ordering scalar used to sequence a lineup from light to bold.
    pub fn power(&self) -> f64 {
        POWER_BODY_WEIGHT * self.body
            + POWER_TANNIN_WEIGHT * self.tannin
            + POWER_OAK_WEIGHT * self.oak
            + POWER_ALCOHOL_WEIGHT * self.alcohol
    }

    /// Whether every scalar is finite and within [0, 10].
    pub fn is_consistent(&self) -> bool {
        [
            self.body,
            self.tannin,
            self.oak,
            self.acidity,
            self.sweetness,
            self.alcohol,
        ]
        .iter()
        .all(|v| v.is_finite() && (SCALE_MIN..=SCALE_MAX).contains(v))
    }

    /// Tannic and oaky enough to count as a heavy pour.
    pub fn is_heavy(&self, tannin_threshold: f64, oak_threshold: f64) -> bool {
        self.tannin >= tannin_threshold && self.oak >= oak_threshold
    }
}

/// Maps an alcohol-by-volume percentage onto the 0–10 scale.
///
/// 8 % and below is 0, 16 % and above is 10.
pub fn alcohol_scale(abv: f64) -> f64 {
    clamp_scale((abv - 8.0) * 10.0 / 8.0)
}

pub(crate) fn clamp_scale(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(SCALE_MIN, SCALE_MAX)
    } else {
        SCALE_MIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_out_of_range_values() {
        let profile = WineProfile::new(12.0, -3.0, f64::NAN, 5.0, 10.0, 4.0);
        assert_eq!(profile.body, 10.0);
        assert_eq!(profile.tannin, 0.0);
        assert_eq!(profile.oak, 0.0);
        assert!(profile.is_consistent());
    }

    #[test]
    fn test_power_is_monotonic_in_inputs() {
        let base = WineProfile::new(5.0, 5.0, 5.0, 5.0, 1.0, 5.0);
        let fuller = WineProfile { body: 6.0, ..base };
        let grippier = WineProfile { tannin: 6.0, ..base };
        let oakier = WineProfile { oak: 6.0, ..base };
        let hotter = WineProfile { alcohol: 6.0, ..base };

        assert!(fuller.power() > base.power());
        assert!(grippier.power() > base.power());
        assert!(oakier.power() > base.power());
        assert!(hotter.power() > base.power());
        // Acidity and sweetness do not affect ordering
        let sharper = WineProfile { acidity: 9.0, ..base };
        assert_eq!(sharper.power(), base.power());
    }

    #[test]
    fn test_power_stays_on_scale() {
        let max = WineProfile::new(10.0, 10.0, 10.0, 10.0, 10.0, 10.0);
        let min = WineProfile::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert!((max.power() - 10.0).abs() < 1e-9);
        assert_eq!(min.power(), 0.0);
    }

    #[test]
    fn test_inconsistent_profile_detected() {
        let profile = WineProfile {
            body: 11.0,
            tannin: 1.0,
            oak: 1.0,
            acidity: 1.0,
            sweetness: 1.0,
            alcohol: 1.0,
        };
        assert!(!profile.is_consistent());
    }

    #[test]
    fn test_alcohol_scale_bounds() {
        assert_eq!(alcohol_scale(5.5), 0.0);
        assert_eq!(alcohol_scale(12.0), 5.0);
        assert_eq!(alcohol_scale(17.0), 10.0);
    }

    #[test]
    fn test_heavy_requires_both_tannin_and_oak() {
        let profile = WineProfile::new(7.0, 6.0, 3.0, 5.0, 1.0, 7.0);
        assert!(!profile.is_heavy(4.0, 4.0));
        let oaked = WineProfile { oak: 4.0, ..profile };
        assert!(oaked.is_heavy(4.0, 4.0));
    }
}
