//! Calendar arithmetic helpers.
//!
//! chrono has no month- or year-aware relative shifts, so they are built
//! here: adding months or years clamps to the last valid day of the target
//! month (Jan 31 + 1 month = Feb 28/29), and weekday seeking finds the
//! first occurrence of a weekday on or after a date.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(28, |last| last.day())
}

/// Add `months` calendar months, clamping the day to the end of the
/// target month when necessary.
///
/// Returns `None` if the result falls outside chrono's date range.
pub fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + months;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    // rem_euclid(12) is always 0..=11
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;

    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Add `years` calendar years with the same end-of-month clamp
/// (Feb 29 + 1 year = Feb 28).
pub fn shift_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year().checked_add(years)?;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day)
}

/// First occurrence of `weekday` on or after `date` (may be `date` itself).
pub fn weekday_on_or_after(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let days_ahead = (i64::from(weekday.num_days_from_sunday())
        - i64::from(date.weekday().num_days_from_sunday())
        + 7)
        % 7;
    let days_ahead = u64::try_from(days_ahead).ok()?;
    date.checked_add_days(Days::new(days_ahead))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2014, 1), 31);
        assert_eq!(days_in_month(2014, 2), 28);
        assert_eq!(days_in_month(2016, 2), 29);
        assert_eq!(days_in_month(2014, 12), 31);
    }

    #[test]
    fn test_shift_months_simple() {
        assert_eq!(shift_months(date(2014, 1, 15), 1), Some(date(2014, 2, 15)));
        assert_eq!(shift_months(date(2014, 11, 5), 3), Some(date(2015, 2, 5)));
    }

    #[test]
    fn test_shift_months_clamps_to_month_end() {
        assert_eq!(shift_months(date(2014, 1, 31), 1), Some(date(2014, 2, 28)));
        assert_eq!(shift_months(date(2014, 7, 31), 2), Some(date(2014, 9, 30)));
        assert_eq!(shift_months(date(2016, 1, 31), 1), Some(date(2016, 2, 29)));
    }

    #[test]
    fn test_shift_months_across_year_boundary() {
        assert_eq!(shift_months(date(2014, 12, 31), 2), Some(date(2015, 2, 28)));
    }

    #[test]
    fn test_shift_years_clamps_leap_day() {
        assert_eq!(shift_years(date(2012, 2, 29), 3), Some(date(2015, 2, 28)));
        assert_eq!(shift_years(date(2012, 2, 29), 4), Some(date(2016, 2, 29)));
    }

    #[test]
    fn test_weekday_on_or_after() {
        // 2014-07-17 was a Thursday
        let thu = date(2014, 7, 17);
        assert_eq!(
            weekday_on_or_after(thu, Weekday::Mon),
            Some(date(2014, 7, 21))
        );
        assert_eq!(weekday_on_or_after(thu, Weekday::Thu), Some(thu));
        assert_eq!(
            weekday_on_or_after(thu, Weekday::Fri),
            Some(date(2014, 7, 18))
        );
    }
}
