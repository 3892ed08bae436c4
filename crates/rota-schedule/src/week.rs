//! Week numbering.
//!
//! Weeks are Monday-anchored: week 1 of a year starts on the first Monday on or
//! after January 1. Days before that Monday belong to the last week of the
//! previous year.
//!
//! ```text
//!        January 2025
//!  Mo Tu We Th Fr Sa Su
//!         1  2  3  4  5   < 2024 week 53
//!   6  7  8  9 10 11 12   < 2025 week 1
//!  13 14 15 16 17 18 19   < 2025 week 2
//! ```
//!
//! The current date is always passed in; nothing here reads the clock.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rota_core::config::MAX_WEEK_NUMBER;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codec::day_index;
use crate::error::{Result, ScheduleError};

/// A (year, week) pair, validated to week 1..=53.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeekRef {
    pub year: i32,
    pub week: u32,
}

impl WeekRef {
    pub fn new(year: i32, week: u32) -> Result<Self> {
        if !(1..=MAX_WEEK_NUMBER).contains(&week) {
            return Err(ScheduleError::InvalidWeek { year, week });
        }
        Ok(Self { year, week })
    }

    /// Monday of this week.
    pub fn start(&self) -> Result<NaiveDate> {
        start_of_week(self.year, self.week)
    }

    /// Sunday of this week.
    pub fn end(&self) -> Result<NaiveDate> {
        end_of_week(self.year, self.week)
    }

    pub fn range(&self) -> Result<WeekRange> {
        Ok(WeekRange {
            start: self.start()?,
            end: self.end()?,
        })
    }

    /// Calendar date of `day` within this week.
    pub fn date_of(&self, day: Weekday) -> Result<NaiveDate> {
        add_days(self.start()?, day_index(day) as i64)
    }

    /// The week `weeks` weeks later (or earlier), crossing year boundaries.
    pub fn offset(&self, weeks: i64) -> Result<WeekRef> {
        week_of(add_days(self.start()?, weeks * 7)?)
    }
}

impl fmt::Display for WeekRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// Monday..Sunday dates of one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    /// Header form, e.g. `"Dec 30 - Jan 5"`.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%b %-d"),
            self.end.format("%b %-d")
        )
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
        .ok_or_else(|| ScheduleError::InvalidDate(format!("{date} + {days} days")))
}

/// First Monday on or after January 1 of `year`.
fn first_monday(year: i32) -> Result<NaiveDate> {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| ScheduleError::InvalidDate(format!("January 1, {year}")))?;
    let to_monday = (7 - jan1.weekday().num_days_from_monday()) % 7;
    add_days(jan1, to_monday as i64)
}

/// The week containing `date`.
pub fn week_of(date: NaiveDate) -> Result<WeekRef> {
    let mut year = date.year();
    let mut anchor = first_monday(year)?;
    if date < anchor {
        year -= 1;
        anchor = first_monday(year)?;
    }
    let week = (date - anchor).num_days() / 7 + 1;
    WeekRef::new(year, week as u32)
}

/// Week number of `today` plus `offset_weeks`, without normalising across years.
///
/// `current_week(today, 2)` in the last week of a year may therefore exceed 53;
/// use [`week_with_offset`] when a valid `(year, week)` pair is needed.
pub fn current_week(today: NaiveDate, offset_weeks: i64) -> Result<i64> {
    Ok(week_of(today)?.week as i64 + offset_weeks)
}

/// The `(year, week)` that is `offset_weeks` away from the week containing `today`.
pub fn week_with_offset(today: NaiveDate, offset_weeks: i64) -> Result<WeekRef> {
    week_of(today)?.offset(offset_weeks)
}

/// Monday of `(year, week)`.
pub fn start_of_week(year: i32, week: u32) -> Result<NaiveDate> {
    let week = WeekRef::new(year, week)?;
    add_days(first_monday(week.year)?, (week.week as i64 - 1) * 7)
}

/// Sunday of `(year, week)`.
pub fn end_of_week(year: i32, week: u32) -> Result<NaiveDate> {
    add_days(start_of_week(year, week)?, 6)
}

/// Whether new applications are still accepted on `today`.
///
/// The window is open from Monday through `deadline` inclusive.
pub fn application_window_open(today: NaiveDate, deadline: Weekday) -> bool {
    today.weekday().num_days_from_monday() <= deadline.num_days_from_monday()
}
