use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::SiteError;
use super::obstruction::is_clockwise;
use crate::astro::{normalize_degrees, Position};

/// One physical telescope setup behind a fence with an opening above it.
///
/// Heights and distance share one length unit. Azimuths are compass bearings
/// in degrees; the visible arc runs clockwise from `left_azimuth_limit` to
/// `right_azimuth_limit` and must be narrower than 180 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub fence_height: f64,
    pub window_height: f64,
    pub distance_to_fence: f64,
    pub telescope_height: f64,
    pub direct_azimuth: f64,
    pub position: Position,
    pub left_azimuth_limit: f64,
    pub right_azimuth_limit: f64,
}

impl SiteConfig {
    /// Clockwise width of the visible azimuth arc, in `[0, 360)`.
    pub fn azimuth_span(&self) -> f64 {
        normalize_degrees(self.right_azimuth_limit - self.left_azimuth_limit)
    }

    pub fn validate(&self) -> Result<(), SiteError> {
        let fields = [
            ("fenceHeight", self.fence_height),
            ("windowHeight", self.window_height),
            ("distanceToFence", self.distance_to_fence),
            ("telescopeHeight", self.telescope_height),
            ("directAzimuth", self.direct_azimuth),
            ("position.latitude", self.position.latitude),
            ("position.longitude", self.position.longitude),
            ("leftAzimuthLimit", self.left_azimuth_limit),
            ("rightAzimuthLimit", self.right_azimuth_limit),
        ];
        if let Some(&(name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SiteError::NotFinite(name));
        }

        if !(-90.0..=90.0).contains(&self.position.latitude) {
            return Err(SiteError::LatitudeOutOfRange(self.position.latitude));
        }
        if self.distance_to_fence <= 0.0 {
            return Err(SiteError::NonPositiveDistance(self.distance_to_fence));
        }
        if self.window_height < 0.0 {
            return Err(SiteError::NegativeWindowHeight(self.window_height));
        }
        if !is_clockwise(self.left_azimuth_limit, self.right_azimuth_limit) {
            return Err(SiteError::AzimuthSpan {
                left: self.left_azimuth_limit,
                right: self.right_azimuth_limit,
                span: self.azimuth_span(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn balcony() -> SiteConfig {
        SiteConfig {
            fence_height: 43.25,
            window_height: 62.0,
            distance_to_fence: 35.0,
            telescope_height: 18.0,
            direct_azimuth: 80.0,
            position: Position {
                latitude: 37.38,
                longitude: -121.89,
            },
            left_azimuth_limit: 10.0,
            right_azimuth_limit: 170.0,
        }
    }

    #[test]
    fn balcony_is_valid() {
        assert_eq!(balcony().validate(), Ok(()));
    }

    #[test]
    fn parses_camel_case_json() {
        let json = r#"{
            "fenceHeight": 43.25, "windowHeight": 62.0, "distanceToFence": 35,
            "telescopeHeight": 18.0, "directAzimuth": 80,
            "position": {"latitude": 37.38, "longitude": -121.89},
            "leftAzimuthLimit": 10, "rightAzimuthLimit": 170
        }"#;
        let config: SiteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, balcony());
    }

    #[test]
    fn rejects_bad_latitude() {
        let mut config = balcony();
        config.position.latitude = 91.0;
        assert_eq!(config.validate(), Err(SiteError::LatitudeOutOfRange(91.0)));
    }

    #[test]
    fn rejects_nan() {
        let mut config = balcony();
        config.fence_height = f64::NAN;
        assert_eq!(config.validate(), Err(SiteError::NotFinite("fenceHeight")));
    }

    #[test]
    fn rejects_zero_distance() {
        let mut config = balcony();
        config.distance_to_fence = 0.0;
        assert_eq!(config.validate(), Err(SiteError::NonPositiveDistance(0.0)));
    }

    #[test]
    fn azimuth_window_must_be_narrower_than_half_turn() {
        let mut config = balcony();
        config.left_azimuth_limit = 90.0;
        config.right_azimuth_limit = 270.0;
        assert!(matches!(
            config.validate(),
            Err(SiteError::AzimuthSpan { span, .. }) if span == 180.0
        ));

        config.right_azimuth_limit = 90.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn wrapping_azimuth_window_is_valid() {
        let mut config = balcony();
        config.left_azimuth_limit = 300.0;
        config.right_azimuth_limit = 40.0;
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.azimuth_span(), 100.0);
    }
}
