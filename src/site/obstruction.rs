use super::types::SiteConfig;
use crate::astro::{normalize_degrees, HorizontalCoordinate};

/// Below this the view is too close to the horizon to be useful.
pub const MIN_OBSERVABLE_ALTITUDE_DEG: f64 = 20.0;
/// Above this the mount cannot point.
pub const MAX_OBSERVABLE_ALTITUDE_DEG: f64 = 80.0;

// Stand-in for a fence or opening top at or below the telescope.
const HEIGHT_EPSILON: f64 = 1e-7;

/// Altitude band, in degrees, visible through the opening at one azimuth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudeBounds {
    pub min_deg: f64,
    pub max_deg: f64,
}

impl AltitudeBounds {
    pub fn contains(&self, altitude_deg: f64) -> bool {
        altitude_deg >= self.min_deg && altitude_deg <= self.max_deg
    }
}

/// True when `to` lies strictly clockwise of `from` by less than half a turn.
pub fn is_clockwise(from_deg: f64, to_deg: f64) -> bool {
    let diff = normalize_degrees(to_deg - from_deg);
    diff > 0.0 && diff < 180.0
}

impl SiteConfig {
    /// Lowest and highest altitude seen past the fence top and below the
    /// opening top, looking towards `target_azimuth_deg`.
    ///
    /// Symmetric about `direct_azimuth`. Off-axis the fence is effectively
    /// further away, which flattens both edges.
    pub fn telescope_altitude_bounds(&self, target_azimuth_deg: f64) -> AltitudeBounds {
        let mut diff = normalize_degrees(target_azimuth_deg - self.direct_azimuth);
        if diff > 180.0 {
            diff = 360.0 - diff;
        }
        let angle = diff.to_radians();

        let fence_top = self.fence_height - self.telescope_height;
        let opening_top = self.window_height + self.fence_height - self.telescope_height;

        AltitudeBounds {
            min_deg: altitude_at_height(fence_top, self.distance_to_fence, angle),
            max_deg: altitude_at_height(opening_top, self.distance_to_fence, angle),
        }
    }

    /// Whether `azimuth_deg` is inside the clockwise arc from the left limit
    /// to the right limit. The limits themselves are outside.
    pub fn is_azimuth_within(&self, azimuth_deg: f64) -> bool {
        is_clockwise(self.left_azimuth_limit, azimuth_deg)
            && is_clockwise(azimuth_deg, self.right_azimuth_limit)
    }

    /// Azimuth window, absolute altitude band and the opening must all agree.
    pub fn is_visible(&self, horizontal: HorizontalCoordinate) -> bool {
        let HorizontalCoordinate {
            altitude_deg: alt,
            azimuth_deg: az,
        } = horizontal;

        if !self.is_azimuth_within(az) {
            log::trace!(
                "azimuth {:.2}° outside [{:.2}°, {:.2}°]",
                az,
                self.left_azimuth_limit,
                self.right_azimuth_limit
            );
            return false;
        }
        if !(MIN_OBSERVABLE_ALTITUDE_DEG..=MAX_OBSERVABLE_ALTITUDE_DEG).contains(&alt) {
            log::trace!(
                "altitude {:.2}° outside observable band [{:.0}°, {:.0}°]",
                alt,
                MIN_OBSERVABLE_ALTITUDE_DEG,
                MAX_OBSERVABLE_ALTITUDE_DEG
            );
            return false;
        }
        let bounds = self.telescope_altitude_bounds(az);
        if !bounds.contains(alt) {
            log::trace!(
                "altitude {:.2}° outside opening [{:.2}°, {:.2}°] at azimuth {:.2}°",
                alt,
                bounds.min_deg,
                bounds.max_deg,
                az
            );
            return false;
        }
        true
    }
}

fn altitude_at_height(effective_height: f64, distance: f64, angle_rad: f64) -> f64 {
    let height = if effective_height <= 0.0 {
        HEIGHT_EPSILON
    } else {
        effective_height
    };
    (height * angle_rad.cos() / distance).atan().to_degrees()
}
