//! Excel serial date conversion
//!
//! Spreadsheet files store dates as fractional day counts relative to one of
//! two epochs: the 1900 system (serial 0 = 1899-12-30, carrying the historical
//! Lotus leap-year quirk) or the 1904 system used by classic Mac Excel, which
//! sits exactly 1462 days later. The shift must be reproduced bit-exactly for
//! compatibility with files produced by either system.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Days separating the 1900-system epoch from the 1904-system epoch
const EPOCH_1904_SHIFT_DAYS: f64 = 1462.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Which date epoch a workbook uses for serial date cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateMode {
    /// Serial day 0 = 1899-12-30 (Windows Excel default)
    #[default]
    Epoch1900,
    /// Epoch shifted forward by 1462 days (classic Mac Excel)
    Epoch1904,
}

/// Convert an Excel serial date to a calendar value under the given epoch.
///
/// The fractional part of `serial` carries the time of day. Returns `None`
/// for serials that fall outside chrono's representable range.
pub fn serial_to_datetime(serial: f64, mode: DateMode) -> Option<NaiveDateTime> {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let shifted = match mode {
        DateMode::Epoch1900 => serial,
        DateMode::Epoch1904 => serial + EPOCH_1904_SHIFT_DAYS,
    };
    if !shifted.is_finite() {
        return None;
    }
    let millis = (shifted * MILLIS_PER_DAY).round() as i64;
    base.checked_add_signed(TimeDelta::milliseconds(millis))
}

/// Render a resolved date cell as text.
///
/// Midnight values print as a bare date, anything else as date and time.
pub fn format_datetime(value: NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_day_zero() {
        let dt = serial_to_datetime(0.0, DateMode::Epoch1900).unwrap();
        assert_eq!(format_datetime(dt), "1899-12-30");
    }

    #[test]
    fn test_known_serial() {
        // 2024-01-15 in the 1900 system
        let dt = serial_to_datetime(45306.0, DateMode::Epoch1900).unwrap();
        assert_eq!(format_datetime(dt), "2024-01-15");
    }

    #[test]
    fn test_1904_mode_shifts_by_1462_days() {
        let a = serial_to_datetime(100.0, DateMode::Epoch1900).unwrap();
        let b = serial_to_datetime(100.0, DateMode::Epoch1904).unwrap();
        assert_eq!(b - a, TimeDelta::days(1462));

        // Serial 0 in the 1904 system is 1904-01-01
        let epoch = serial_to_datetime(0.0, DateMode::Epoch1904).unwrap();
        assert_eq!(format_datetime(epoch), "1904-01-01");
    }

    #[test]
    fn test_fractional_time_of_day() {
        let dt = serial_to_datetime(45306.5, DateMode::Epoch1900).unwrap();
        assert_eq!(format_datetime(dt), "2024-01-15 12:00:00");

        let dt = serial_to_datetime(45306.75, DateMode::Epoch1900).unwrap();
        assert_eq!(format_datetime(dt), "2024-01-15 18:00:00");
    }

    #[test]
    fn test_out_of_range_serial() {
        assert!(serial_to_datetime(f64::NAN, DateMode::Epoch1900).is_none());
        assert!(serial_to_datetime(1.0e15, DateMode::Epoch1900).is_none());
    }
}
