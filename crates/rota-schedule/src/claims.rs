//! Vacation and sickness claims, and reserve call-in selection.
//!
//! A claim covers a closed date range. [`plan_weeks`] splits it into one day
//! mask per affected week; the `with_*` methods on [`RosterAggregate`] apply a
//! mask to a single week and return the updated roster. Persisting the result
//! is left to the caller.

use chrono::{Datelike, NaiveDate, Weekday};
use rota_core::UserId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::{DayFlags, ShiftSlot, Slot};
use crate::error::{Result, ScheduleError};
use crate::roster::RosterAggregate;
use crate::week::{week_of, WeekRef};

/// The days of one week touched by a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekMask {
    pub week: WeekRef,
    pub days: DayFlags,
}

/// Split the inclusive range `start..=end` into per-week day masks, in order.
pub fn plan_weeks(start: NaiveDate, end: NaiveDate) -> Result<Vec<WeekMask>> {
    if end < start {
        return Err(ScheduleError::InvalidDate(format!(
            "range ends before it starts: {start} .. {end}"
        )));
    }

    let mut masks: Vec<WeekMask> = Vec::new();
    let mut date = start;
    loop {
        let week = week_of(date)?;
        let weekday = date.weekday();
        match masks.last_mut() {
            Some(last) if last.week == week => last.days = last.days.with(weekday, true),
            _ => masks.push(WeekMask {
                week,
                days: DayFlags::empty().with(weekday, true),
            }),
        }
        if date == end {
            break;
        }
        date = date
            .succ_opt()
            .ok_or_else(|| ScheduleError::InvalidDate(format!("no day after {date}")))?;
    }

    debug!(%start, %end, weeks = masks.len(), "planned claim");
    Ok(masks)
}

fn day_count(start: NaiveDate, end: NaiveDate) -> u32 {
    ((end - start).num_days() + 1).max(0) as u32
}

/// A request to take (or give back) vacation over a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationClaim {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// `true` to take the days, `false` to cancel them.
    pub claim: bool,
}

impl VacationClaim {
    pub fn new(start: NaiveDate, end: NaiveDate, claim: bool) -> Result<Self> {
        if end < start {
            return Err(ScheduleError::InvalidDate(format!(
                "vacation ends before it starts: {start} .. {end}"
            )));
        }
        Ok(Self { start, end, claim })
    }

    /// Calendar days covered, both ends included.
    pub fn days(&self) -> u32 {
        day_count(self.start, self.end)
    }

    pub fn plan(&self) -> Result<Vec<WeekMask>> {
        plan_weeks(self.start, self.end)
    }

    /// Confirmation shown after the claim is stored.
    pub fn message(&self) -> String {
        format!(
            "You have {} vacation from {} to {}",
            if self.claim { "applied" } else { "canceled" },
            self.start.format("%d %b"),
            self.end.format("%d %b")
        )
    }
}

/// A sick leave over a date range. Sickness is only ever claimed, never cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SicknessClaim {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SicknessClaim {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(ScheduleError::InvalidDate(format!(
                "sickness ends before it starts: {start} .. {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn days(&self) -> u32 {
        day_count(self.start, self.end)
    }

    pub fn plan(&self) -> Result<Vec<WeekMask>> {
        plan_weeks(self.start, self.end)
    }

    pub fn message(&self) -> String {
        format!(
            "You have applied sickness from {} to {}",
            self.start.format("%d %b"),
            self.end.format("%d %b")
        )
    }
}

/// Vacation days already flagged in `year` across `rosters`.
pub fn claimed_vacation_days(rosters: &[RosterAggregate], year: i32) -> u32 {
    rosters
        .iter()
        .filter(|r| r.week.year == year)
        .map(|r| r.flags.vacation.count() as u32)
        .sum()
}

/// Fails when `requested` more days would push the year past `max_per_year`.
pub fn check_vacation_quota(claimed: u32, requested: u32, max_per_year: u32) -> Result<()> {
    if claimed.saturating_add(requested) > max_per_year {
        return Err(ScheduleError::VacationQuotaExceeded {
            requested,
            remaining: max_per_year.saturating_sub(claimed),
        });
    }
    Ok(())
}

/// User-facing text for a rejected vacation claim.
pub fn quota_warning(requested: u32, remaining: u32) -> String {
    format!("You can't take {requested} more vacation days, you have only {remaining} days left!")
}

impl RosterAggregate {
    /// Set or clear vacation on the masked days.
    ///
    /// Taking vacation also withdraws the application for those days.
    pub fn with_vacation(&self, days: &DayFlags, claim: bool) -> RosterAggregate {
        let mut next = self.clone();
        next.flags.vacation = self.flags.vacation.with_mask(days, claim);
        if claim {
            next.application = self.application.clear_days(days);
        }
        next
    }

    /// Mark the masked days as sick.
    ///
    /// Sickness replaces every other plan for those days: vacation, day off and
    /// reserve flags are cleared, as are the work days and both shift strings.
    pub fn with_sickness(&self, days: &DayFlags) -> RosterAggregate {
        let mut next = self.clone();
        let flags = &mut next.flags;
        flags.sickness = flags.sickness.with_mask(days, true);
        flags.vacation = flags.vacation.with_mask(days, false);
        flags.off_days = flags.off_days.with_mask(days, false);
        flags.reserve_days = flags.reserve_days.with_mask(days, false);
        flags.work_days = flags.work_days.with_mask(days, false);
        next.schedule = self.schedule.clear_days(days);
        next.application = self.application.clear_days(days);
        next
    }
}

/// Whether the owner of `current` worked the night shift right before `day`.
///
/// For Monday this looks at Sunday of `previous` (the owner's prior week), if known.
pub fn worked_night_before(
    previous: Option<&RosterAggregate>,
    current: &RosterAggregate,
    day: Weekday,
) -> bool {
    let (roster, night_of) = match day {
        Weekday::Mon => match previous {
            Some(prev) => (prev, Weekday::Sun),
            None => return false,
        },
        _ => (current, day.pred()),
    };
    roster.flags.work_days.is_set(night_of)
        && roster.schedule.is_active(ShiftSlot {
            day: night_of,
            slot: Slot::Night,
        })
}

/// A reserve user who could be called in for an uncovered shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveCandidate {
    pub owner: UserId,
    pub call_ins_this_year: u32,
    pub worked_previous_night: bool,
}

/// Owners eligible for a call-in to `slot`, in input order.
///
/// Only the candidates with the fewest call-ins this year qualify; for a
/// morning slot, anyone who worked the night before is dropped. The result may
/// be empty, in which case the caller falls back to a day-off call-in.
pub fn reserve_candidates(candidates: &[ReserveCandidate], slot: Slot) -> Vec<UserId> {
    let Some(fewest) = candidates.iter().map(|c| c.call_ins_this_year).min() else {
        return Vec::new();
    };
    candidates
        .iter()
        .filter(|c| c.call_ins_this_year == fewest)
        .filter(|c| !(slot == Slot::Morning && c.worked_previous_night))
        .map(|c| c.owner.clone())
        .collect()
}
