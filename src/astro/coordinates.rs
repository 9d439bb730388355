use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Observer location in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn lat_rad(&self) -> f64 {
        self.latitude.to_radians()
    }
}

/// Right ascension as hours, minutes and seconds of time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct RightAscension {
    pub hour: f64,
    pub min: f64,
    pub sec: f64,
}

impl RightAscension {
    pub fn to_degrees(&self) -> f64 {
        self.hour * 15.0 + self.min / 4.0 + self.sec / 240.0
    }
}

/// Declination as degrees, arcminutes and arcseconds.
///
/// The sign is carried by `degree`. `negative` is only needed for southern
/// targets within one degree of the equator, where `degree` is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct Declination {
    pub degree: f64,
    pub min: f64,
    pub sec: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub negative: bool,
}

impl Declination {
    pub fn is_southern(&self) -> bool {
        self.negative || self.degree.is_sign_negative()
    }

    pub fn to_degrees(&self) -> f64 {
        let sign = if self.is_southern() { -1.0 } else { 1.0 };
        sign * (self.degree.abs() + self.min.abs() / 60.0 + self.sec.abs() / 3600.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct EquatorialCoordinate {
    pub ra: RightAscension,
    pub dec: Declination,
}

impl EquatorialCoordinate {
    pub fn ra_deg(&self) -> f64 {
        self.ra.to_degrees()
    }

    pub fn dec_deg(&self) -> f64 {
        self.dec.to_degrees()
    }
}

/// A fixed celestial target, identified by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AstroObject {
    pub name: String,
    #[serde(flatten)]
    pub coordinate: EquatorialCoordinate,
    /// Catalog classification, e.g. `G` or `PN`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_ascension_degrees() {
        let ra = RightAscension {
            hour: 20.0,
            min: 58.0,
            sec: 18.0,
        };
        assert!((ra.to_degrees() - 314.575).abs() < 1e-9);
    }

    #[test]
    fn declination_sign_applies_to_all_parts() {
        let dec = Declination {
            degree: -12.0,
            min: 30.0,
            sec: 36.0,
            negative: false,
        };
        assert!((dec.to_degrees() + 12.51).abs() < 1e-9);
    }

    #[test]
    fn declination_just_south_of_equator() {
        let dec = Declination {
            degree: 0.0,
            min: 30.0,
            sec: 0.0,
            negative: true,
        };
        assert!((dec.to_degrees() + 0.5).abs() < 1e-12);
    }

    #[test]
    fn object_json_shape() {
        let json = r#"{"name":"NGC 6960","ra":{"hour":20,"min":45,"sec":38},"dec":{"degree":30,"min":42,"sec":30}}"#;
        let object: AstroObject = serde_json::from_str(json).unwrap();
        assert_eq!(object.name, "NGC 6960");
        assert_eq!(object.kind, None);
        assert!((object.coordinate.dec_deg() - 30.708_333).abs() < 1e-6);

        let back = serde_json::to_value(&object).unwrap();
        assert!(back.get("negative").is_none());
        assert!(back["dec"].get("negative").is_none());
        assert!(back.get("type").is_none());
    }
}
