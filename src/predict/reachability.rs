use crate::astro::{hour_angle_to_horizontal, AstroObject};
use crate::predict::types::QuickCheck;
use crate::site::{SiteConfig, MIN_OBSERVABLE_ALTITUDE_DEG};

const DEGENERATE_DENOMINATOR: f64 = 1e-12;

/// Highest altitude the target reaches from `latitude_deg`, at meridian transit.
pub fn culmination_altitude(dec_deg: f64, latitude_deg: f64) -> f64 {
    hour_angle_to_horizontal(0.0, dec_deg, latitude_deg).altitude_deg
}

/// True when the target never climbs to the observable floor from this latitude.
pub fn object_never_visible(object: &AstroObject, config: &SiteConfig) -> bool {
    let max_altitude = culmination_altitude(object.coordinate.dec_deg(), config.position.latitude);
    log::debug!("{}: culminates at {:.2}°", object.name, max_altitude);
    max_altitude < MIN_OBSERVABLE_ALTITUDE_DEG
}

/// Cheap filter: can the part of the target's diurnal arc above the observable
/// floor overlap the configured azimuth window at all?
///
/// Compares the window against the arc between the azimuths where the target
/// crosses the floor. A target that never crosses the floor has no such arc
/// and is rejected, including one that stays above it all night.
pub fn object_ever_in_azimuth_window(object: &AstroObject, config: &SiteConfig) -> bool {
    if object_never_visible(object, config) {
        return false;
    }

    let lat = config.position.lat_rad();
    let dec = object.coordinate.dec_deg().to_radians();
    let min_alt = MIN_OBSERVABLE_ALTITUDE_DEG.to_radians();

    let denominator = lat.cos() * dec.cos();
    if denominator.abs() < DEGENERATE_DENOMINATOR {
        // cosH is unbounded here.
        return false;
    }
    let cos_h = (min_alt.sin() - lat.sin() * dec.sin()) / denominator;
    if !(-1.0..=1.0).contains(&cos_h) {
        log::debug!("{}: never crosses the observable floor", object.name);
        return false;
    }

    let cos_a = ((dec.sin() - lat.sin() * min_alt.sin()) / (lat.cos() * min_alt.cos()))
        .clamp(-1.0, 1.0);
    let rise = cos_a.acos().to_degrees();
    let set = 360.0 - rise;
    let (low, high) = if rise <= set { (rise, set) } else { (set, rise) };

    let left = config.left_azimuth_limit;
    let right = config.right_azimuth_limit;
    if left < right {
        !(high < left || low > right)
    } else {
        !(high < left && low > right)
    }
}

/// Both go/no-go queries for one target, without a time range.
pub fn quick_check(object: &AstroObject, config: &SiteConfig) -> QuickCheck {
    QuickCheck {
        name: object.name.clone(),
        never_visible: object_never_visible(object, config),
        ever_in_azimuth_window: object_ever_in_azimuth_window(object, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::{Declination, EquatorialCoordinate, RightAscension};
    use crate::site::types::tests::balcony;

    fn object(dec_deg: f64) -> AstroObject {
        AstroObject {
            name: "test".into(),
            coordinate: EquatorialCoordinate {
                ra: RightAscension::default(),
                dec: Declination {
                    degree: dec_deg,
                    ..Default::default()
                },
            },
            kind: None,
        }
    }

    #[test]
    fn culmination_at_zenith_when_dec_equals_latitude() {
        assert!((culmination_altitude(37.38, 37.38) - 90.0).abs() < 1e-6);
    }

    #[test]
    fn culmination_matches_closed_form() {
        for (dec, lat) in [(-20.0_f64, 37.38_f64), (60.0, 37.38), (10.0, -33.9)] {
            let expected = 90.0 - (lat - dec).abs();
            assert!((culmination_altitude(dec, lat) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn never_visible_follows_culmination_floor() {
        let config = balcony();
        // 37.38 - 90 + 20 = -32.62
        assert!(object_never_visible(&object(-40.0), &config));
        assert!(!object_never_visible(&object(-32.0), &config));
        assert!(!object_never_visible(&object(31.7), &config));
    }

    #[test]
    fn everything_visible_from_somewhere_reaches_the_window() {
        let config = balcony();
        assert!(object_ever_in_azimuth_window(&object(31.7), &config));
    }

    #[test]
    fn unreachable_target_is_never_in_window() {
        assert!(!object_ever_in_azimuth_window(&object(-60.0), &balcony()));
    }

    #[test]
    fn quick_check_combines_both_queries() {
        let check = quick_check(&object(-60.0), &balcony());
        assert_eq!(check.name, "test");
        assert!(check.never_visible);
        assert!(!check.ever_in_azimuth_window);
    }

    #[test]
    fn southern_window_overlap() {
        let mut config = balcony();
        config.left_azimuth_limit = 150.0;
        config.right_azimuth_limit = 210.0;
        let target = object(70.0);
        assert!(!object_never_visible(&target, &config));
        assert!(object_ever_in_azimuth_window(&target, &config));

        let low = object(-25.0);
        assert!(object_ever_in_azimuth_window(&low, &config));
    }

    #[test]
    fn wrapping_window_overlap() {
        let mut config = balcony();
        config.left_azimuth_limit = 300.0;
        config.right_azimuth_limit = 40.0;
        assert!(object_ever_in_azimuth_window(&object(45.0), &config));
    }

    #[test]
    fn target_always_above_floor_is_rejected() {
        let mut config = balcony();
        config.position.latitude = 60.0;
        config.direct_azimuth = 0.0;
        config.left_azimuth_limit = 300.0;
        config.right_azimuth_limit = 60.0;
        let target = object(80.0);
        assert!(!object_never_visible(&target, &config));
        assert!(!object_ever_in_azimuth_window(&target, &config));
    }

    #[test]
    fn pole_observer_is_rejected() {
        let mut config = balcony();
        config.position.latitude = 90.0;
        assert!(!object_ever_in_azimuth_window(&object(30.0), &config));
    }
}
