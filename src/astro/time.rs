use chrono::{DateTime, Utc};

use super::angles::normalize_degrees;

const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const J2000_JD: f64 = 2_451_545.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Date of a UTC instant, counted from the Unix epoch.
pub fn julian_date(instant: DateTime<Utc>) -> f64 {
    let seconds =
        instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) / 1e9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// Greenwich mean sidereal time in degrees (IAU 1982), in `[0, 360)`.
pub fn greenwich_sidereal_time(jd: f64) -> f64 {
    let days = jd - J2000_JD;
    let t = days / DAYS_PER_CENTURY;
    let gst = 280.460_618_37 + 360.985_647_366_29 * days + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees(gst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    // Meeus calendar formula, kept here to cross-check the epoch offset form.
    fn calendar_julian_date(instant: DateTime<Utc>) -> f64 {
        let (mut year, mut month) = (instant.year(), instant.month() as i32);
        if month <= 2 {
            year -= 1;
            month += 12;
        }
        let a = year / 100;
        let b = 2 - a + a / 4;
        let hours = f64::from(instant.hour())
            + f64::from(instant.minute()) / 60.0
            + f64::from(instant.second()) / 3600.0;
        (365.25 * f64::from(year + 4716)).floor()
            + (30.6001 * f64::from(month + 1)).floor()
            + f64::from(instant.day())
            + f64::from(b)
            - 1524.5
            + hours / 24.0
    }

    #[test]
    fn j2000_epoch() {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(julian_date(t), 2_451_545.0);
    }

    #[test]
    fn unix_epoch() {
        let t = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(julian_date(t), 2_440_587.5);
    }

    #[test]
    fn agrees_with_calendar_formula() {
        let instants = [
            Utc.with_ymd_and_hms(1987, 4, 10, 19, 21, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 29, 3, 15, 42).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 30, 22, 30, 0).unwrap(),
        ];
        let one_second = 1.0 / SECONDS_PER_DAY;
        for t in instants {
            let diff = (julian_date(t) - calendar_julian_date(t)).abs();
            assert!(diff < one_second, "{t}: {diff}");
        }
    }

    #[test]
    fn sidereal_time_at_j2000() {
        assert!((greenwich_sidereal_time(J2000_JD) - 280.460_618_37).abs() < 1e-9);
    }

    #[test]
    fn sidereal_time_reference_date() {
        // Meeus example 12.a: 1987-04-10 0h UT, GMST 13h10m46.3668s.
        let t = Utc.with_ymd_and_hms(1987, 4, 10, 0, 0, 0).unwrap();
        let expected = (13.0 + 10.0 / 60.0 + 46.3668 / 3600.0) * 15.0;
        assert!((greenwich_sidereal_time(julian_date(t)) - expected).abs() < 1e-4);
    }
}
