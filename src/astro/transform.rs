use chrono::{DateTime, Utc};
use serde::Serialize;

use super::angles::normalize_degrees;
use super::coordinates::{EquatorialCoordinate, Position};
use super::time::{greenwich_sidereal_time, julian_date};

/// Azimuth reported when it is undefined: observer at a pole, or target at zenith/nadir.
pub const DEGENERATE_AZIMUTH_DEG: f64 = 0.0;

// cos(alt) or cos(lat) below this counts as zenith/nadir or pole. asin
// rounding leaves cos(alt) near 1e-8 for a target exactly overhead.
const DEGENERATE_COS: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizontalCoordinate {
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
}

/// Convert a fixed RA/Dec target to altitude/azimuth for an observer at `instant`.
///
/// Geometric only: no refraction, no parallax.
pub fn equatorial_to_horizontal(
    coordinate: &EquatorialCoordinate,
    position: &Position,
    instant: DateTime<Utc>,
) -> HorizontalCoordinate {
    let gst = greenwich_sidereal_time(julian_date(instant));
    let lst = normalize_degrees(gst + position.longitude);

    let mut hour_angle = normalize_degrees(lst - coordinate.ra_deg());
    if hour_angle > 180.0 {
        hour_angle -= 360.0;
    }

    hour_angle_to_horizontal(hour_angle, coordinate.dec_deg(), position.latitude)
}

/// Altitude/azimuth for a given hour angle, declination and latitude, all in degrees.
pub fn hour_angle_to_horizontal(
    hour_angle_deg: f64,
    dec_deg: f64,
    lat_deg: f64,
) -> HorizontalCoordinate {
    let ha = hour_angle_deg.to_radians();
    let dec = dec_deg.to_radians();
    let lat = lat_deg.to_radians();

    let sin_alt = (dec.sin() * lat.sin() + dec.cos() * lat.cos() * ha.cos()).clamp(-1.0, 1.0);
    let alt = sin_alt.asin();

    let azimuth_deg = if alt.cos() < DEGENERATE_COS || lat.cos() < DEGENERATE_COS {
        DEGENERATE_AZIMUTH_DEG
    } else {
        let cos_az =
            ((dec.sin() - alt.sin() * lat.sin()) / (alt.cos() * lat.cos())).clamp(-1.0, 1.0);
        let mut az = cos_az.acos();
        // acos only covers the eastern half; west of the meridian mirror it.
        if ha.sin() > 0.0 {
            az = 2.0 * std::f64::consts::PI - az;
        }
        normalize_degrees(az.to_degrees())
    };

    HorizontalCoordinate {
        altitude_deg: alt.to_degrees(),
        azimuth_deg,
    }
}
