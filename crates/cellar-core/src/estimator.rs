//! Wine profile estimation.
//!
//! A stored profile is trusted when it is internally consistent; otherwise a
//! profile is estimated from color, alcohol, region and style. Estimation is
//! a pure function of the wine and never fails.

use crate::models::{
    profile::{alcohol_scale, clamp_scale},
    Wine, WineColor, WineProfile,
};

/// Alcohol level the color bands are calibrated against.
const REFERENCE_ABV: f64 = 13.0;

/// Additive adjustment to the estimated scalars.
#[derive(Debug, Clone, Copy, Default)]
struct Nudge {
    body: f64,
    tannin: f64,
    oak: f64,
    acidity: f64,
    sweetness: f64,
}

const fn nudge(body: f64, tannin: f64, oak: f64, acidity: f64, sweetness: f64) -> Nudge {
    Nudge {
        body,
        tannin,
        oak,
        acidity,
        sweetness,
    }
}

// Matched case-insensitively as substrings of the region
const REGION_NUDGES: &[(&str, Nudge)] = &[
    ("napa", nudge(1.0, 0.5, 1.5, -0.5, 0.0)),
    ("barossa", nudge(1.5, 0.5, 1.0, -0.5, 0.0)),
    ("mendoza", nudge(1.0, 0.5, 0.5, 0.0, 0.0)),
    ("rioja", nudge(0.0, 0.0, 1.5, 0.0, 0.0)),
    ("bordeaux", nudge(0.5, 1.0, 1.0, 0.0, 0.0)),
    ("barolo", nudge(0.5, 2.0, 0.5, 1.0, 0.0)),
    ("piedmont", nudge(0.0, 1.5, 0.0, 1.0, 0.0)),
    ("burgundy", nudge(-0.5, -0.5, 0.5, 1.0, 0.0)),
    ("loire", nudge(-0.5, 0.0, -1.0, 1.5, 0.0)),
    ("mosel", nudge(-1.0, 0.0, -1.0, 1.5, 1.5)),
    ("champagne", nudge(0.0, 0.0, 0.0, 1.0, 0.0)),
    ("marlborough", nudge(-0.5, 0.0, -1.0, 1.5, 0.0)),
];

// Matched case-insensitively as substrings of the style
const STYLE_NUDGES: &[(&str, Nudge)] = &[
    ("dessert", nudge(1.0, 0.0, 0.0, 0.0, 5.0)),
    ("late harvest", nudge(1.0, 0.0, 0.0, 0.0, 4.0)),
    ("sauternes", nudge(1.0, 0.0, 0.5, 0.0, 5.0)),
    ("port", nudge(2.0, 1.0, 0.0, 0.0, 4.0)),
    ("off-dry", nudge(0.0, 0.0, 0.0, 0.0, 2.0)),
    ("oaked", nudge(0.5, 0.0, 2.0, 0.0, 0.0)),
    ("barrel", nudge(0.5, 0.0, 2.0, 0.0, 0.0)),
    ("unoaked", nudge(0.0, 0.0, -3.0, 0.5, 0.0)),
    ("light", nudge(-1.5, -1.0, 0.0, 0.0, 0.0)),
    ("full", nudge(1.5, 0.5, 0.0, 0.0, 0.0)),
];

/// Profile for a wine: the stored one when consistent, an estimate otherwise.
pub fn estimate_profile(wine: &Wine) -> WineProfile {
    match wine.profile {
        Some(stored) if stored.is_consistent() => stored,
        Some(stored) if stored.alcohol.is_nan() => {
            let filled = WineProfile {
                alcohol: alcohol_for(wine),
                ..stored
            };
            if filled.is_consistent() {
                filled
            } else {
                heuristic_profile(wine)
            }
        }
        _ => heuristic_profile(wine),
    }
}

/// Profile estimated purely from the wine's known attributes.
pub fn heuristic_profile(wine: &Wine) -> WineProfile {
    let mut est = color_band(wine.color);

    let abv = wine.abv.filter(|abv| abv.is_finite() && *abv > 0.0);
    if let Some(abv) = abv {
        let delta = abv - REFERENCE_ABV;
        est.body += delta * 0.8;
        match wine.color {
            WineColor::Red => est.tannin += delta * 0.6,
            // Low alcohol in whites usually means residual sugar
            WineColor::White | WineColor::Rose if abv < 11.0 => {
                est.sweetness += (11.0 - abv) * 1.2
            }
            _ => {}
        }
    }

    for nudge in matching_nudges(wine.region.as_deref(), REGION_NUDGES)
        .chain(matching_nudges(wine.style.as_deref(), STYLE_NUDGES))
    {
        est.body += nudge.body;
        est.tannin += nudge.tannin;
        est.oak += nudge.oak;
        est.acidity += nudge.acidity;
        est.sweetness += nudge.sweetness;
    }

    let alcohol = alcohol_for(wine);

    WineProfile::new(
        clamp_scale(est.body),
        clamp_scale(est.tannin),
        clamp_scale(est.oak),
        clamp_scale(est.acidity),
        clamp_scale(est.sweetness),
        alcohol,
    )
}

fn alcohol_for(wine: &Wine) -> f64 {
    let abv = wine.abv.filter(|abv| abv.is_finite() && *abv > 0.0);
    alcohol_scale(abv.unwrap_or_else(|| default_abv(wine.color)))
}

fn color_band(color: WineColor) -> Nudge {
    match color {
        WineColor::Red => nudge(6.0, 6.0, 4.0, 5.0, 1.0),
        WineColor::White => nudge(4.0, 1.0, 2.0, 7.0, 2.0),
        WineColor::Rose => nudge(3.0, 1.5, 0.5, 7.0, 2.0),
        WineColor::Sparkling => nudge(2.5, 0.5, 1.0, 8.5, 2.0),
    }
}

fn default_abv(color: WineColor) -> f64 {
    match color {
        WineColor::Red => 13.5,
        WineColor::White | WineColor::Rose => 12.5,
        WineColor::Sparkling => 12.0,
    }
}

fn matching_nudges<'a>(
    text: Option<&str>,
    table: &'a [(&'static str, Nudge)],
) -> impl Iterator<Item = Nudge> + 'a {
    let text = text.map(str::to_lowercase).unwrap_or_default();
    table
        .iter()
        .filter(move |(keyword, _)| !text.is_empty() && text.contains(*keyword))
        .map(|(_, nudge)| *nudge)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::Readiness;

    fn wine(color: WineColor, abv: Option<f64>) -> Wine {
        Wine {
            id: 1,
            owner: "alice".to_string(),
            name: "Test".to_string(),
            color,
            vintage: Some(2018),
            region: None,
            style: None,
            abv,
            quantity: 2,
            readiness: Readiness::Ready,
            rating: None,
            profile: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_stored_profile_returned_verbatim() {
        let stored = WineProfile::new(3.0, 2.0, 1.0, 8.0, 0.5, 4.0);
        let mut w = wine(WineColor::Red, Some(15.0));
        w.profile = Some(stored);
        assert_eq!(estimate_profile(&w), stored);
    }

    #[test]
    fn test_stored_profile_without_alcohol_uses_abv() {
        let stored: WineProfile = serde_json::from_str(
            r#"{"body":5,"tannin":5,"oak":5,"acidity":5,"sweetness":5}"#,
        )
        .unwrap();
        let mut w = wine(WineColor::Red, Some(14.0));
        w.profile = Some(stored);

        let profile = estimate_profile(&w);
        assert!(profile.is_consistent());
        assert_eq!(profile.body, 5.0);
        assert_eq!(profile.alcohol, alcohol_scale(14.0));
    }

    #[test]
    fn test_inconsistent_stored_profile_falls_back() {
        let mut w = wine(WineColor::Red, Some(14.0));
        w.profile = Some(WineProfile {
            body: 42.0,
            tannin: 1.0,
            oak: 1.0,
            acidity: 1.0,
            sweetness: 1.0,
            alcohol: 1.0,
        });
        let profile = estimate_profile(&w);
        assert_eq!(profile, heuristic_profile(&w));
        assert!(profile.is_consistent());
    }

    #[test]
    fn test_high_abv_red_is_bigger() {
        let big = heuristic_profile(&wine(WineColor::Red, Some(15.5)));
        let modest = heuristic_profile(&wine(WineColor::Red, Some(12.0)));
        assert!(big.body > modest.body);
        assert!(big.tannin > modest.tannin);
        assert!(big.power() > modest.power());
    }

    #[test]
    fn test_whites_are_fresher_than_reds() {
        let white = heuristic_profile(&wine(WineColor::White, Some(13.0)));
        let rose = heuristic_profile(&wine(WineColor::Rose, Some(13.0)));
        let red = heuristic_profile(&wine(WineColor::Red, Some(13.0)));
        assert!(white.tannin < red.tannin);
        assert!(rose.tannin < red.tannin);
        assert!(white.acidity > red.acidity);
    }

    #[test]
    fn test_low_abv_white_is_sweeter() {
        let kabinett = heuristic_profile(&wine(WineColor::White, Some(8.5)));
        let dry = heuristic_profile(&wine(WineColor::White, Some(13.0)));
        assert!(kabinett.sweetness > dry.sweetness);
    }

    #[test]
    fn test_region_and_style_nudges() {
        let mut napa = wine(WineColor::Red, Some(14.5));
        napa.region = Some("Napa Valley".to_string());
        let mut plain = wine(WineColor::Red, Some(14.5));
        plain.region = Some("Somewhere".to_string());
        assert!(heuristic_profile(&napa).oak > heuristic_profile(&plain).oak);

        let mut dessert = wine(WineColor::White, Some(13.0));
        dessert.style = Some("Late Harvest".to_string());
        assert!(
            heuristic_profile(&dessert).sweetness
                > heuristic_profile(&wine(WineColor::White, Some(13.0))).sweetness
        );
    }

    #[test]
    fn test_missing_attributes_still_complete() {
        let profile = estimate_profile(&wine(WineColor::Sparkling, None));
        assert!(profile.is_consistent());
        assert!(profile.alcohol > 0.0);
    }

    #[test]
    fn test_extreme_inputs_stay_in_range() {
        let mut w = wine(WineColor::Red, Some(40.0));
        w.region = Some("Barossa Napa Barolo".to_string());
        w.style = Some("full oaked barrel port".to_string());
        let profile = estimate_profile(&w);
        assert!(profile.is_consistent());
        assert_eq!(profile.body, 10.0);

        let nan = estimate_profile(&wine(WineColor::White, Some(f64::NAN)));
        assert!(nan.is_consistent());
    }

    #[test]
    fn test_estimation_is_idempotent() {
        let mut w = wine(WineColor::Red, Some(14.2));
        w.region = Some("Rioja".to_string());
        w.style = Some("oaked".to_string());
        assert_eq!(estimate_profile(&w), estimate_profile(&w));
    }
}
