use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SiteError {
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("distance to fence must be positive, got {0}")]
    NonPositiveDistance(f64),
    #[error("window height must not be negative, got {0}")]
    NegativeWindowHeight(f64),
    #[error("azimuth window {left}..{right} spans {span} degrees, must be more than 0 and less than 180")]
    AzimuthSpan { left: f64, right: f64, span: f64 },
}
