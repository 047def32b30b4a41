use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};

use crate::{CoreError, CoreResult};

pub const WEEKDAYS: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn service_offset(minutes: i32) -> CoreResult<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| CoreError::Validation(format!("Invalid UTC offset: {} minutes", minutes)))
}

const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// A calendar day in the service time zone.
///
/// Bookings are matched against the closed window
/// `[00:00:00.000, 23:59:59.999]` of that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelDay {
    date: NaiveDate,
    offset: FixedOffset,
}

impl TravelDay {
    pub fn new(date: NaiveDate, offset: FixedOffset) -> Self {
        Self { date, offset }
    }

    /// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, which is folded
    /// into the service day it falls on.
    /// Years outside `1..=9999` are rejected so the day window is always
    /// representable.
    pub fn parse(input: &str, offset: FixedOffset) -> CoreResult<Self> {
        let input = input.trim();
        let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(input)
                    .ok()
                    .map(|instant| instant.with_timezone(&offset).date_naive())
            })
            .filter(|date| SUPPORTED_YEARS.contains(&date.year()))
            .ok_or_else(|| CoreError::Validation(format!("Invalid date: {}", input)))?;
        Ok(Self::new(date, offset))
    }

    pub fn today(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self::new(now.with_timezone(&offset).date_naive(), offset)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn weekday(&self) -> &'static str {
        weekday_name(self.date)
    }

    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.to_utc(self.date.and_time(NaiveTime::MIN));
        let end = start + Duration::days(1) - Duration::milliseconds(1);
        (start, end)
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let (start, end) = self.bounds();
        start <= instant && instant <= end
    }

    /// The instant `time` on this day, local to the service offset.
    pub fn at(&self, time: NaiveTime) -> DateTime<Utc> {
        self.to_utc(self.date.and_time(time))
    }

    fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        let shifted = local - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        Utc.from_utc_datetime(&shifted)
    }
}
