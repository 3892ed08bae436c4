//! Per-day display descriptors handed to presentation.

use chrono::{NaiveDate, Weekday};
use rota_core::{UserId, ViewMode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::codec::{Slot, WEEKDAYS};
use crate::differ::pending_slots;
use crate::error::Result;
use crate::resolver::{DayMarkers, DayStatus};
use crate::roster::{RawRoster, RosterAggregate};
use crate::week::WeekRange;

/// One slot entry of a `SHIFT` day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub slot_index: usize,
    pub start_hour: u8,
    pub end_hour: u8,
    /// Set in the string being displayed.
    pub active: bool,
    /// Differs from the other string (see [`pending_slots`]).
    pub is_pending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayView {
    pub day: usize,
    pub weekday: Weekday,
    pub date: NaiveDate,
    pub status: DayStatus,
    pub markers: DayMarkers,
    pub is_today: bool,
    /// Empty unless `status` is `Shift`.
    pub slots: Vec<SlotView>,
}

impl DayView {
    pub fn active_slots(&self) -> impl Iterator<Item = &SlotView> {
        self.slots.iter().filter(|s| s.active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekView {
    pub owner: UserId,
    pub year: i32,
    pub week: u32,
    pub mode: ViewMode,
    pub published: bool,
    pub range: WeekRange,
    /// e.g. `"Schedule for Jan 1 - Jan 7"`.
    pub title: String,
    pub days: Vec<DayView>,
}

/// Build the seven-day view of `roster` in `mode`.
///
/// `today`, when given, marks the matching day; it is never read from the clock.
pub fn render_week(roster: &RosterAggregate, mode: ViewMode, today: Option<NaiveDate>) -> Result<WeekView> {
    let range = roster.week.range()?;
    let shown = roster.displayed(mode);

    let mut days = Vec::with_capacity(WEEKDAYS.len());
    for (index, weekday) in WEEKDAYS.iter().copied().enumerate() {
        let date = roster.week.date_of(weekday)?;
        let status = roster.status(weekday, mode);

        let slots = if status == DayStatus::Shift {
            let shown_day = shown.day(weekday);
            let pending = pending_slots(
                mode,
                roster.schedule.day(weekday),
                roster.application.day(weekday),
            );
            Slot::ALL
                .iter()
                .filter(|slot| shown_day[slot.index()] || pending[slot.index()])
                .map(|slot| {
                    let (start_hour, end_hour) = slot.hours();
                    SlotView {
                        slot_index: slot.index(),
                        start_hour,
                        end_hour,
                        active: shown_day[slot.index()],
                        is_pending: pending[slot.index()],
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        days.push(DayView {
            day: index,
            weekday,
            date,
            status,
            markers: roster.markers(weekday),
            is_today: today == Some(date),
            slots,
        });
    }

    debug!(owner = %roster.owner, week = %roster.week, %mode, "rendered week view");

    Ok(WeekView {
        owner: roster.owner.clone(),
        year: roster.week.year,
        week: roster.week.week,
        mode,
        published: roster.published,
        range,
        title: format!("{} for {}", mode.label(), range.label()),
        days,
    })
}

/// One row of the supervisor table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TeamRow {
    Rendered(WeekView),
    /// The record failed validation; the rest of the table still renders.
    Invalid {
        owner: Option<UserId>,
        code: String,
        message: String,
    },
}

/// Render every roster of a week for the supervisor table, one row per record.
pub fn render_team(rosters: &[RawRoster], mode: ViewMode, today: Option<NaiveDate>) -> Vec<TeamRow> {
    rosters
        .iter()
        .map(|raw| {
            let rendered = RosterAggregate::try_from(raw.clone())
                .and_then(|roster| render_week(&roster, mode, today));
            match rendered {
                Ok(view) => TeamRow::Rendered(view),
                Err(e) => {
                    let owner = raw.owner_id();
                    warn!(owner = ?owner, code = e.code(), "roster rejected: {e}");
                    TeamRow::Invalid {
                        owner,
                        code: e.code().to_string(),
                        message: e.to_string(),
                    }
                }
            }
        })
        .collect()
}
