use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::astro::AstroObject;
use crate::predict::error::PredictError;

/// Validated scan range: `end >= start`, step of at least one minute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: Duration,
}

impl TimeRange {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step_minutes: i64,
    ) -> Result<Self, PredictError> {
        if end < start {
            return Err(PredictError::InvalidTimeRange { start, end });
        }
        if step_minutes <= 0 {
            return Err(PredictError::InvalidStep(format!("{step_minutes} minutes")));
        }
        Ok(Self {
            start,
            end,
            step: Duration::minutes(step_minutes),
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn step_minutes(&self) -> i64 {
        self.step.num_minutes()
    }

    /// Sample instants from `start` up to and including `end`.
    pub fn instants(&self) -> impl Iterator<Item = DateTime<Utc>> {
        let (step, end) = (self.step, self.end);
        std::iter::successors(Some(self.start), move |t| Some(*t + step))
            .take_while(move |t| *t <= end)
    }
}

/// A stretch of time during which the target stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityWindow {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub start_alt: f64,
    pub end_alt: f64,
}

impl VisibilityWindow {
    pub fn opened_at(time: DateTime<Utc>, altitude_deg: f64) -> Self {
        Self {
            start_time: time,
            end_time: time,
            start_alt: altitude_deg,
            end_alt: altitude_deg,
        }
    }

    pub fn extend_to(&mut self, time: DateTime<Utc>, altitude_deg: f64) {
        self.end_time = time;
        self.end_alt = altitude_deg;
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

/// All merged windows of one target over one range.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityInfo {
    pub object: AstroObject,
    pub visibility_windows: Vec<VisibilityWindow>,
}

/// Result of the two constant-time go/no-go queries for one target and site.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuickCheck {
    pub name: String,
    pub never_visible: bool,
    pub ever_in_azimuth_window: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, h, m, 0).unwrap()
    }

    #[test]
    fn rejects_reversed_range() {
        let err = TimeRange::new(at(5, 0), at(4, 0), 5).unwrap_err();
        assert!(matches!(err, PredictError::InvalidTimeRange { .. }));
    }

    #[test]
    fn rejects_non_positive_step() {
        assert!(matches!(
            TimeRange::new(at(4, 0), at(5, 0), 0),
            Err(PredictError::InvalidStep(_))
        ));
    }

    #[test]
    fn instants_include_end() {
        let range = TimeRange::new(at(4, 0), at(4, 20), 5).unwrap();
        let instants: Vec<_> = range.instants().collect();
        assert_eq!(instants.len(), 5);
        assert_eq!(instants.last(), Some(&at(4, 20)));
    }

    #[test]
    fn instants_stop_before_overshoot() {
        let range = TimeRange::new(at(4, 0), at(4, 12), 5).unwrap();
        let instants: Vec<_> = range.instants().collect();
        assert_eq!(instants, vec![at(4, 0), at(4, 5), at(4, 10)]);
    }

    #[test]
    fn empty_range_samples_once() {
        let range = TimeRange::new(at(4, 0), at(4, 0), 5).unwrap();
        assert_eq!(range.instants().count(), 1);
    }

    #[test]
    fn window_serializes_camel_case() {
        let window = VisibilityWindow::opened_at(at(6, 0), 35.9);
        let json = serde_json::to_value(window).unwrap();
        assert_eq!(json["startTime"], "2024-07-01T06:00:00Z");
        assert_eq!(json["endAlt"], 35.9);
    }
}
