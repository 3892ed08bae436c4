use chrono::Weekday;
use rota_core::{UserId, ViewMode};
use serde::{Deserialize, Serialize};

use crate::codec::{DayFlags, ShiftString};
use crate::error::{Result, ScheduleError};
use crate::resolver::{CategoryFlags, DayMarkers, DayStatus};
use crate::week::WeekRef;

/// Owner reference as stored: a numeric primary key or an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OwnerRef {
    Id(u64),
    Name(String),
}

impl From<OwnerRef> for UserId {
    fn from(owner: OwnerRef) -> Self {
        match owner {
            OwnerRef::Id(n) => UserId::from(n),
            OwnerRef::Name(s) => UserId::from(s),
        }
    }
}

/// A roster row exactly as the storage layer serializes it.
///
/// Every field is optional here so that an absent field can be reported by
/// name instead of failing deserialization wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRoster {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub year: Option<i32>,
    #[serde(alias = "week")]
    pub week_number: Option<u32>,
    #[serde(alias = "actual_shift")]
    pub schedule: Option<String>,
    #[serde(alias = "applied_shift")]
    pub application: Option<String>,
    pub work_days: Option<String>,
    pub off_days: Option<String>,
    pub reserve_days: Option<String>,
    pub vacation: Option<String>,
    pub sickness: Option<String>,
    pub reserve_call_in_days: Option<String>,
    pub day_off_call_in_days: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve_call_in: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_off_call_in: Option<bool>,
    pub owner: Option<OwnerRef>,
}

impl RawRoster {
    /// Best-effort owner id for diagnostics on rows that fail validation.
    pub fn owner_id(&self) -> Option<UserId> {
        self.owner.clone().map(UserId::from)
    }
}

fn require_flags(field: &str, value: Option<&String>) -> Result<DayFlags> {
    let value = value.ok_or_else(|| ScheduleError::MissingCategoryFlags {
        field: field.to_string(),
    })?;
    DayFlags::parse(field, value)
}

fn require_shifts(field: &str, value: Option<&String>) -> Result<ShiftString> {
    let value = value.ok_or_else(|| ScheduleError::encoding(field, "field is missing"))?;
    ShiftString::parse(field, value)
}

/// One employee's validated week: published schedule, application and flags.
///
/// Deserializes through [`RawRoster`], so every wire record is validated
/// before any resolver sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRoster", into = "RawRoster")]
pub struct RosterAggregate {
    pub id: Option<u64>,
    pub owner: UserId,
    pub week: WeekRef,
    pub schedule: ShiftString,
    pub application: ShiftString,
    pub flags: CategoryFlags,
    pub published: bool,
}

impl TryFrom<RawRoster> for RosterAggregate {
    type Error = ScheduleError;

    fn try_from(raw: RawRoster) -> Result<Self> {
        let year = raw
            .year
            .ok_or_else(|| ScheduleError::encoding("year", "field is missing"))?;
        let week = WeekRef::new(year, raw.week_number.unwrap_or(0))?;
        let owner = raw
            .owner
            .clone()
            .map(UserId::from)
            .ok_or_else(|| ScheduleError::encoding("owner", "field is missing"))?;

        let flags = CategoryFlags {
            work_days: require_flags("work_days", raw.work_days.as_ref())?,
            off_days: require_flags("off_days", raw.off_days.as_ref())?,
            reserve_days: require_flags("reserve_days", raw.reserve_days.as_ref())?,
            vacation: require_flags("vacation", raw.vacation.as_ref())?,
            sickness: require_flags("sickness", raw.sickness.as_ref())?,
            reserve_call_in: require_flags(
                "reserve_call_in_days",
                raw.reserve_call_in_days.as_ref(),
            )?,
            day_off_call_in: require_flags(
                "day_off_call_in_days",
                raw.day_off_call_in_days.as_ref(),
            )?,
        };

        Ok(Self {
            id: raw.id,
            owner,
            week,
            schedule: require_shifts("schedule", raw.schedule.as_ref())?,
            application: require_shifts("application", raw.application.as_ref())?,
            flags,
            published: raw.published,
        })
    }
}

impl From<RosterAggregate> for RawRoster {
    fn from(roster: RosterAggregate) -> Self {
        let flags = roster.flags;
        RawRoster {
            id: roster.id,
            year: Some(roster.week.year),
            week_number: Some(roster.week.week),
            schedule: Some(roster.schedule.to_string()),
            application: Some(roster.application.to_string()),
            work_days: Some(flags.work_days.to_string()),
            off_days: Some(flags.off_days.to_string()),
            reserve_days: Some(flags.reserve_days.to_string()),
            vacation: Some(flags.vacation.to_string()),
            sickness: Some(flags.sickness.to_string()),
            reserve_call_in_days: Some(flags.reserve_call_in.to_string()),
            day_off_call_in_days: Some(flags.day_off_call_in.to_string()),
            published: roster.published,
            reserve_call_in: Some(!flags.reserve_call_in.is_empty()),
            day_off_call_in: Some(!flags.day_off_call_in.is_empty()),
            owner: Some(OwnerRef::Name(roster.owner.0)),
        }
    }
}

impl RosterAggregate {
    /// A roster with no shifts and no flags, useful as a starting point.
    pub fn blank(owner: UserId, week: WeekRef) -> Self {
        Self {
            id: None,
            owner,
            week,
            schedule: ShiftString::empty(),
            application: ShiftString::empty(),
            flags: CategoryFlags::default(),
            published: false,
        }
    }

    /// The string shown in `mode`: the published schedule or the application.
    pub fn displayed(&self, mode: ViewMode) -> &ShiftString {
        match mode {
            ViewMode::Published => &self.schedule,
            ViewMode::Application => &self.application,
        }
    }

    pub fn status(&self, day: Weekday, mode: ViewMode) -> DayStatus {
        self.flags.status(day, mode)
    }

    pub fn markers(&self, day: Weekday) -> DayMarkers {
        self.flags.markers(day)
    }

    /// Whether any reserve call-in happened this week.
    pub fn has_reserve_call_in(&self) -> bool {
        !self.flags.reserve_call_in.is_empty()
    }
}
