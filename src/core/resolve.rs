//! Relative-date token resolution.
//!
//! A token is a short expression describing a date relative to a reference
//! point, optionally followed by `#` and a time-of-day override:
//!
//! - `today`, `tom`, `mon` .. `sun` (weekday abbreviations down to 2 letters)
//! - `3d`, `2w`, `6m`, `1y` (offsets in days, weeks, months, years)
//! - `25` (day of the current month, rolling to next month when passed)
//! - `04-25`, `jan14`, `december-25`, `2015-12-31`
//! - `tom#1000`, `mo#10` (time fragment after the separator)
//!
//! Tokens are matched against an ordered table of (pattern, transform)
//! rules; the first matching rule wins, so the table order is part of the
//! contract (a bare `25` is always a day of month, never a month number).

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::core::calendar;
use crate::error::Mail2OrgError;

/// The anchor point a token is resolved against.
///
/// Always naive: tokens describe wall-clock dates, not instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// A calendar date.
    Date(NaiveDate),
    /// A date with a time of day.
    DateTime(NaiveDateTime),
}

impl Reference {
    /// The calendar date of the reference point.
    ///
    /// Date rules only ever look at the date; a resolved result carries a
    /// time of day only when the token's time fragment supplies one.
    #[must_use]
    pub fn date(self) -> NaiveDate {
        match self {
            Self::Date(d) => d,
            Self::DateTime(dt) => dt.date(),
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<NaiveDate> for Reference {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<NaiveDateTime> for Reference {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

/// A resolved date, with a time of day when the token carried one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolved {
    /// The resolved date.
    pub date: NaiveDate,
    /// Time of day from the token's time fragment, if any.
    pub time: Option<NaiveTime>,
}

impl Resolved {
    /// A date-only result.
    #[must_use]
    pub const fn date_only(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    /// A result with a time of day.
    #[must_use]
    pub const fn with_time(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time: Some(time),
        }
    }

    /// Whether a time of day was resolved.
    #[must_use]
    pub const fn has_time(&self) -> bool {
        self.time.is_some()
    }

    /// ISO 8601 date string.
    #[must_use]
    pub fn to_iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl std::fmt::Display for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.time {
            Some(time) => write!(
                f,
                "{} {}",
                self.date.format("%Y-%m-%d"),
                time.format("%H:%M:%S")
            ),
            None => write!(f, "{}", self.date.format("%Y-%m-%d")),
        }
    }
}

type DateTransform = fn(NaiveDate, &Captures<'_>) -> Result<NaiveDate, Mail2OrgError>;
type TimeTransform = fn(&Captures<'_>) -> Result<NaiveTime, Mail2OrgError>;

fn pattern(re: &str) -> Regex {
    Regex::new(re).unwrap_or_else(|e| panic!("Invalid token pattern {re:?}: {e}"))
}

/// Ordered date rules. Patterns are anchored at the start of the date
/// fragment; several overlap, so order decides.
static DATE_RULES: Lazy<Vec<(Regex, DateTransform)>> = Lazy::new(|| {
    vec![
        // "today" and its per-letter abbreviations, whole fragment
        (pattern(r"^to?d?a?y?$"), |d, _| Ok(d)),
        // "tomorrow", at least "tom"
        (pattern(r"^tomo?r?r?o?w?"), |d, _| add_days(d, 1)),
        // weekdays, 2 letters and up; always the occurrence strictly
        // after the reference
        (pattern(r"^mon?d?a?y?"), |d, _| next_weekday(d, Weekday::Mon)),
        (pattern(r"^tue?s?d?a?y?"), |d, _| next_weekday(d, Weekday::Tue)),
        (pattern(r"^wed?n?e?s?d?a?y?"), |d, _| {
            next_weekday(d, Weekday::Wed)
        }),
        (pattern(r"^thu?r?s?d?a?y?"), |d, _| {
            next_weekday(d, Weekday::Thu)
        }),
        (pattern(r"^fri?d?a?y?"), |d, _| next_weekday(d, Weekday::Fri)),
        (pattern(r"^sat?u?r?d?a?y?"), |d, _| {
            next_weekday(d, Weekday::Sat)
        }),
        (pattern(r"^sun?d?a?y?"), |d, _| next_sunday(d)),
        // numeric offsets
        (pattern(r"^([0-9]+)d"), |d, c| {
            add_days(d, u64::from(capture_num(c, 1)?))
        }),
        (pattern(r"^([0-9]+)w"), |d, c| {
            add_days(d, u64::from(capture_num(c, 1)?) * 7)
        }),
        (pattern(r"^([0-9]+)m"), |d, c| {
            calendar::shift_months(d, i64::from(capture_num(c, 1)?))
                .ok_or_else(|| out_of_range(d))
        }),
        (pattern(r"^([0-9]+)y"), |d, c| {
            let years = i32::try_from(capture_num(c, 1)?)
                .map_err(|_| out_of_range(d))?;
            calendar::shift_years(d, years).ok_or_else(|| out_of_range(d))
        }),
        // bare day of month, whole fragment; must come before the
        // month-and-day forms below
        (pattern(r"^([0-9]{1,2})$"), day_of_month_rule),
        // MM-DD in the reference's year, whole fragment
        (pattern(r"^([0-9]{1,2})-([0-9]{1,2})$"), |d, c| {
            ymd(d.year(), capture_num(c, 1)?, capture_num(c, 2)?)
        }),
        // month names, 3 letters and up, optional dash before the day
        (pattern(r"^janu?a?r?y?-?([0-9]{0,2})"), |d, c| {
            month_day_rule(d, c, 1)
        }),
        (pattern(r"^febr?u?a?r?y?-?([0-9]{0,2})"), |d, c| {
            month_day_rule(d, c, 2)
        }),
        (pattern(r"^marc?h?-?([0-9]{0,2})"), |d, c| month_day_rule(d, c, 3)),
        (pattern(r"^apri?l?-?([0-9]{0,2})"), |d, c| month_day_rule(d, c, 4)),
        (pattern(r"^may-?([0-9]{0,2})"), |d, c| month_day_rule(d, c, 5)),
        (pattern(r"^june?-?([0-9]{0,2})"), |d, c| month_day_rule(d, c, 6)),
        (pattern(r"^july?-?([0-9]{0,2})"), |d, c| month_day_rule(d, c, 7)),
        (pattern(r"^augu?s?t?-?([0-9]{0,2})"), |d, c| {
            month_day_rule(d, c, 8)
        }),
        (pattern(r"^sept?e?m?b?e?r?-?([0-9]{0,2})"), |d, c| {
            month_day_rule(d, c, 9)
        }),
        (pattern(r"^octo?b?e?r?-?([0-9]{0,2})"), |d, c| {
            month_day_rule(d, c, 10)
        }),
        (pattern(r"^nove?m?b?e?r?-?([0-9]{0,2})"), |d, c| {
            month_day_rule(d, c, 11)
        }),
        (pattern(r"^dece?m?b?e?r?-?([0-9]{0,2})"), |d, c| {
            month_day_rule(d, c, 12)
        }),
        // full date, year first
        (pattern(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})"), |_, c| {
            let year = i32::try_from(capture_num(c, 1)?).unwrap_or(0);
            ymd(year, capture_num(c, 2)?, capture_num(c, 3)?)
        }),
    ]
});

/// Ordered time rules: exactly 2 digits is an hour, exactly 4 is HHMM.
static TIME_RULES: Lazy<Vec<(Regex, TimeTransform)>> = Lazy::new(|| {
    vec![
        (pattern(r"^([0-9]{2})$"), |c| hm(capture_num(c, 1)?, 0)),
        (pattern(r"^([0-9]{2})([0-9]{2})$"), |c| {
            hm(capture_num(c, 1)?, capture_num(c, 2)?)
        }),
    ]
});

/// Resolve a relative-date token against a reference point.
///
/// Returns `Ok(None)` when the token's date fragment matches no rule.
/// A time fragment that matches no time rule leaves the date-only result
/// untouched. Matched rules whose captured values fall outside the
/// calendar (day 32, month 13, hour 99) return a
/// [`Mail2OrgError::Date`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use mail2org::{resolve, Reference};
///
/// let reference = Reference::from(NaiveDate::from_ymd_opt(2014, 1, 15).unwrap());
/// let resolved = resolve(reference, "1w").unwrap().unwrap();
/// assert_eq!(resolved.to_iso_date(), "2014-01-22");
///
/// assert!(resolve(reference, "zzz").unwrap().is_none());
/// ```
///
/// # Errors
///
/// Returns [`Mail2OrgError::Date`] when a matched rule captures values
/// that form no valid date or time.
pub fn resolve(reference: Reference, token: &str) -> Result<Option<Resolved>, Mail2OrgError> {
    let (date_fragment, time_fragment) = match token.split_once('#') {
        Some((date, time)) => (date, Some(time)),
        None => (token, None),
    };

    let base = reference.date();

    let mut resolved_date = None;
    for (re, transform) in DATE_RULES.iter() {
        if let Some(caps) = re.captures(date_fragment) {
            resolved_date = Some(transform(base, &caps)?);
            break;
        }
    }
    let Some(date) = resolved_date else {
        return Ok(None);
    };

    if let Some(fragment) = time_fragment {
        for (re, transform) in TIME_RULES.iter() {
            if let Some(caps) = re.captures(fragment) {
                return Ok(Some(Resolved::with_time(date, transform(&caps)?)));
            }
        }
    }

    Ok(Some(Resolved::date_only(date)))
}

fn capture_num(caps: &Captures<'_>, idx: usize) -> Result<u32, Mail2OrgError> {
    let text = caps.get(idx).map_or("", |m| m.as_str());
    text.parse()
        .map_err(|_| Mail2OrgError::Date(format!("invalid number {text:?} in token")))
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, Mail2OrgError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        Mail2OrgError::Date(format!("no such date: {year:04}-{month:02}-{day:02}"))
    })
}

fn hm(hour: u32, minute: u32) -> Result<NaiveTime, Mail2OrgError> {
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| Mail2OrgError::Date(format!("no such time: {hour:02}:{minute:02}")))
}

fn out_of_range(d: NaiveDate) -> Mail2OrgError {
    Mail2OrgError::Date(format!("offset from {d} leaves the supported date range"))
}

fn add_days(d: NaiveDate, days: u64) -> Result<NaiveDate, Mail2OrgError> {
    d.checked_add_days(Days::new(days))
        .ok_or_else(|| out_of_range(d))
}

/// The occurrence of `weekday` strictly after `d`.
fn next_weekday(d: NaiveDate, weekday: Weekday) -> Result<NaiveDate, Mail2OrgError> {
    let first = calendar::weekday_on_or_after(d, weekday).ok_or_else(|| out_of_range(d))?;
    if first > d {
        Ok(first)
    } else {
        add_days(first, 7)
    }
}

/// Quirk: when the reference is itself a Sunday, the result is the
/// Saturday of the following week, not the next Sunday. Preserved
/// deliberately; see DESIGN.md.
fn next_sunday(d: NaiveDate) -> Result<NaiveDate, Mail2OrgError> {
    let first = calendar::weekday_on_or_after(d, Weekday::Sun).ok_or_else(|| out_of_range(d))?;
    if first > d {
        Ok(first)
    } else {
        let sat = calendar::weekday_on_or_after(d, Weekday::Sat).ok_or_else(|| out_of_range(d))?;
        add_days(sat, 7)
    }
}

/// Bare 1-2 digit day: that day in the reference's month, or in the next
/// month when it is not strictly after the reference.
fn day_of_month_rule(d: NaiveDate, caps: &Captures<'_>) -> Result<NaiveDate, Mail2OrgError> {
    let day = capture_num(caps, 1)?;
    let this_month = ymd(d.year(), d.month(), day)?;
    if this_month > d {
        Ok(this_month)
    } else {
        let (year, month) = if d.month() == 12 {
            (d.year() + 1, 1)
        } else {
            (d.year(), d.month() + 1)
        };
        ymd(year, month, day)
    }
}

/// Month name with a day: that date in the reference's year, rolled
/// forward a year when it is not strictly after the reference.
fn month_day_rule(d: NaiveDate, caps: &Captures<'_>, month: u32) -> Result<NaiveDate, Mail2OrgError> {
    let day = capture_num(caps, 1)?;
    let this_year = ymd(d.year(), month, day)?;
    if this_year > d {
        Ok(this_year)
    } else {
        ymd(d.year() + 1, month, day)
    }
}
