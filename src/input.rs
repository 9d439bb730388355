//! Boundary parsing: everything that can reject malformed input happens here,
//! before the engine sees it.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::astro::AstroObject;
use crate::catalog::CatalogError;
use crate::predict::PredictError;
use crate::site::{SiteConfig, SiteError};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("no {0} provided")]
    Missing(&'static str),
    #[error("{0} must come from exactly one source")]
    Conflicting(&'static str),
    #[error("error reading {what} file {path}: {source}")]
    FileRead {
        what: &'static str,
        path: String,
        source: std::io::Error,
    },
    #[error("invalid {what} json: {source}")]
    Json {
        what: &'static str,
        source: serde_json::Error,
    },
    #[error("invalid time {value:?}, expected RFC 3339 with offset: {source}")]
    Time {
        value: String,
        source: chrono::ParseError,
    },
    #[error("invalid step {value:?}: {message}")]
    Step { value: String, message: String },
    #[error("invalid site config #{index}: {source}")]
    Site { index: usize, source: SiteError },
    #[error(transparent)]
    Predict(#[from] PredictError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Pick the input text from either a file or a literal string, never both.
pub fn read_input(
    file: Option<&Path>,
    literal: Option<&str>,
    what: &'static str,
) -> Result<String, InputError> {
    match (file, literal) {
        (None, None) => Err(InputError::Missing(what)),
        (Some(_), Some(_)) => Err(InputError::Conflicting(what)),
        (None, Some(s)) => Ok(s.to_string()),
        (Some(path), None) => fs::read_to_string(path).map_err(|source| InputError::FileRead {
            what,
            path: path.display().to_string(),
            source,
        }),
    }
}

pub fn parse_objects(json: &str) -> Result<Vec<AstroObject>, InputError> {
    parse_one_or_many(json, "objects", "object")
}

/// Parse and validate site configs. At least one is required.
pub fn parse_site_configs(json: &str) -> Result<Vec<SiteConfig>, InputError> {
    let configs: Vec<SiteConfig> = parse_one_or_many(json, "configs", "site config")?;
    if configs.is_empty() {
        return Err(InputError::Missing("site config"));
    }
    validate_site_configs(&configs)?;
    Ok(configs)
}

pub fn validate_site_configs(configs: &[SiteConfig]) -> Result<(), InputError> {
    configs
        .iter()
        .enumerate()
        .try_for_each(|(index, config)| {
            config
                .validate()
                .map_err(|source| InputError::Site { index, source })
        })
}

/// Accepts a bare array, `{"<key>": [...]}`, or a single item.
fn parse_one_or_many<T: DeserializeOwned>(
    json: &str,
    key: &str,
    what: &'static str,
) -> Result<Vec<T>, InputError> {
    let wrap = |source| InputError::Json { what, source };
    let value: serde_json::Value = serde_json::from_str(json).map_err(wrap)?;

    let items = match value {
        serde_json::Value::Object(mut map) if map.contains_key(key) => {
            map.remove(key).unwrap_or_default()
        }
        array @ serde_json::Value::Array(_) => array,
        single => {
            return serde_json::from_value(single)
                .map(|item| vec![item])
                .map_err(wrap)
        }
    };
    serde_json::from_value(items).map_err(wrap)
}

pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, InputError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| InputError::Time {
            value: value.to_string(),
            source,
        })
}

/// Step as a humantime duration (`5m`, `1h 30m`) or a bare number of minutes.
pub fn parse_step_minutes(value: &str) -> Result<i64, InputError> {
    let err = |message: String| InputError::Step {
        value: value.to_string(),
        message,
    };
    let trimmed = value.trim();

    if let Ok(minutes) = trimmed.parse::<i64>() {
        return if minutes > 0 {
            Ok(minutes)
        } else {
            Err(err("must be positive".into()))
        };
    }

    let duration = humantime::parse_duration(trimmed).map_err(|e| err(e.to_string()))?;
    if duration.subsec_nanos() != 0 || duration.as_secs() % 60 != 0 {
        return Err(err("must be a whole number of minutes".into()));
    }
    match i64::try_from(duration.as_secs() / 60) {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(err("must be positive".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const CONFIG: &str = r#"{
        "fenceHeight": 43.25, "windowHeight": 62.0, "distanceToFence": 35,
        "telescopeHeight": 18.0, "directAzimuth": 80,
        "position": {"latitude": 37.38, "longitude": -121.89},
        "leftAzimuthLimit": 10, "rightAzimuthLimit": 170
    }"#;

    const OBJECT: &str =
        r#"{"name":"M31","ra":{"hour":0,"min":42,"sec":44.3},"dec":{"degree":41,"min":16,"sec":9}}"#;

    #[test]
    fn read_input_requires_exactly_one_source() {
        assert!(matches!(
            read_input(None, None, "config"),
            Err(InputError::Missing("config"))
        ));
        assert!(matches!(
            read_input(Some(Path::new("a.json")), Some("{}"), "config"),
            Err(InputError::Conflicting("config"))
        ));
        assert_eq!(read_input(None, Some("{}"), "config").unwrap(), "{}");
    }

    #[test]
    fn read_input_reports_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/site.json")), None, "config").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/site.json"));
    }

    #[test]
    fn objects_accept_single_array_and_wrapper() {
        assert_eq!(parse_objects(OBJECT).unwrap().len(), 1);
        assert_eq!(parse_objects(&format!("[{OBJECT},{OBJECT}]")).unwrap().len(), 2);
        let wrapped = parse_objects(&format!(r#"{{"objects":[{OBJECT}]}}"#)).unwrap();
        assert_eq!(wrapped[0].name, "M31");
    }

    #[test]
    fn malformed_object_is_rejected() {
        let err = parse_objects(r#"{"name":"M31","ra":"00:42:44"}"#).unwrap_err();
        assert!(matches!(err, InputError::Json { what: "object", .. }));
    }

    #[test]
    fn site_configs_are_validated() {
        assert_eq!(parse_site_configs(CONFIG).unwrap().len(), 1);

        let wide = CONFIG.replace("\"rightAzimuthLimit\": 170", "\"rightAzimuthLimit\": 200");
        assert!(matches!(
            parse_site_configs(&format!(r#"{{"configs":[{CONFIG},{wide}]}}"#)),
            Err(InputError::Site { index: 1, .. })
        ));
        assert!(matches!(
            parse_site_configs("[]"),
            Err(InputError::Missing("site config"))
        ));
    }

    #[test]
    fn instants_are_converted_to_utc() {
        let t = parse_instant("2024-06-30T22:30:00-07:00").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 7, 1, 5, 30, 0).unwrap());
        assert!(parse_instant("2024-06-30 22:30").is_err());
    }

    #[test]
    fn step_parsing() {
        assert_eq!(parse_step_minutes("5m").unwrap(), 5);
        assert_eq!(parse_step_minutes("1h 30m").unwrap(), 90);
        assert_eq!(parse_step_minutes("10").unwrap(), 10);
        assert!(parse_step_minutes("0").is_err());
        assert!(parse_step_minutes("90s").is_err());
        assert!(parse_step_minutes("often").is_err());
    }
}
