use chrono::Weekday;
use rota_core::ViewMode;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codec::{weekday_from_index, DayFlags};
use crate::error::Result;

/// The single category a day renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayStatus {
    Shift,
    Sickness,
    Vacation,
    DayOff,
    Reserve,
    None,
}

impl DayStatus {
    pub const ALL: [DayStatus; 6] = [
        DayStatus::Shift,
        DayStatus::Sickness,
        DayStatus::Vacation,
        DayStatus::DayOff,
        DayStatus::Reserve,
        DayStatus::None,
    ];

    /// Text shown in place of slots for non-shift days.
    pub fn label(&self) -> &'static str {
        match self {
            DayStatus::Shift => "Shift",
            DayStatus::Sickness => "Sickness",
            DayStatus::Vacation => "Vacation",
            DayStatus::DayOff => "Day off",
            DayStatus::Reserve => "Reserve",
            DayStatus::None => "No schedule to display",
        }
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DayStatus::Shift => "SHIFT",
            DayStatus::Sickness => "SICKNESS",
            DayStatus::Vacation => "VACATION",
            DayStatus::DayOff => "DAY_OFF",
            DayStatus::Reserve => "RESERVE",
            DayStatus::None => "NONE",
        };
        write!(f, "{s}")
    }
}

/// Every day-category field of a roster week, already validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryFlags {
    pub work_days: DayFlags,
    pub off_days: DayFlags,
    pub reserve_days: DayFlags,
    pub vacation: DayFlags,
    pub sickness: DayFlags,
    pub reserve_call_in: DayFlags,
    pub day_off_call_in: DayFlags,
}

/// Styling hints that sit beside the status and never change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayMarkers {
    pub reserve_call_in: bool,
    pub day_off_call_in: bool,
}

impl DayMarkers {
    pub fn any(&self) -> bool {
        self.reserve_call_in || self.day_off_call_in
    }
}

impl CategoryFlags {
    /// Resolve the status of `day` for the given view. First match wins:
    ///
    /// 1. workish = work day, reserve call-in, or application view
    /// 2. workish and neither vacation nor sickness → `Shift`
    /// 3. sickness → `Sickness`
    /// 4. vacation → `Vacation`
    /// 5. off day → `DayOff`
    /// 6. reserve day → `Reserve`
    /// 7. otherwise `None`
    pub fn status(&self, day: Weekday, mode: ViewMode) -> DayStatus {
        let workish = self.work_days.is_set(day)
            || self.reserve_call_in.is_set(day)
            || mode.is_application();
        let vacation = self.vacation.is_set(day);
        let sickness = self.sickness.is_set(day);

        if workish && !vacation && !sickness {
            DayStatus::Shift
        } else if sickness {
            DayStatus::Sickness
        } else if vacation {
            DayStatus::Vacation
        } else if self.off_days.is_set(day) {
            DayStatus::DayOff
        } else if self.reserve_days.is_set(day) {
            DayStatus::Reserve
        } else {
            DayStatus::None
        }
    }

    pub fn markers(&self, day: Weekday) -> DayMarkers {
        DayMarkers {
            reserve_call_in: self.reserve_call_in.is_set(day),
            day_off_call_in: self.day_off_call_in.is_set(day),
        }
    }
}

/// Resolve the display status of a 0-based day index (0 = Monday).
pub fn resolve(day: usize, flags: &CategoryFlags, mode: ViewMode) -> Result<DayStatus> {
    let weekday = weekday_from_index(day)?;
    Ok(flags.status(weekday, mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(work: &str, off: &str, reserve: &str, vac: &str, sick: &str, call_in: &str) -> CategoryFlags {
        CategoryFlags {
            work_days: work.parse().unwrap(),
            off_days: off.parse().unwrap(),
            reserve_days: reserve.parse().unwrap(),
            vacation: vac.parse().unwrap(),
            sickness: sick.parse().unwrap(),
            reserve_call_in: call_in.parse().unwrap(),
            day_off_call_in: DayFlags::empty(),
        }
    }

    const Z: &str = "0000000";
    const MON: &str = "1000000";

    #[test]
    fn work_day_resolves_to_shift() {
        let f = flags(MON, Z, Z, Z, Z, Z);
        assert_eq!(resolve(0, &f, ViewMode::Published).unwrap(), DayStatus::Shift);
        assert_eq!(resolve(1, &f, ViewMode::Published).unwrap(), DayStatus::None);
    }

    #[test]
    fn reserve_call_in_counts_as_work() {
        let f = flags(Z, Z, MON, Z, Z, MON);
        assert_eq!(resolve(0, &f, ViewMode::Published).unwrap(), DayStatus::Shift);
    }

    #[test]
    fn sickness_dominates_vacation_off_day() {
        let f = flags(Z, MON, MON, MON, MON, Z);
        assert_eq!(resolve(0, &f, ViewMode::Published).unwrap(), DayStatus::Sickness);
    }

    #[test]
    fn vacation_blocks_work_day() {
        let f = flags(MON, Z, Z, MON, Z, Z);
        assert_eq!(resolve(0, &f, ViewMode::Published).unwrap(), DayStatus::Vacation);
    }

    #[test]
    fn off_day_beats_reserve() {
        let f = flags(Z, MON, MON, Z, Z, Z);
        assert_eq!(resolve(0, &f, ViewMode::Published).unwrap(), DayStatus::DayOff);
        let f = flags(Z, Z, MON, Z, Z, Z);
        assert_eq!(resolve(0, &f, ViewMode::Published).unwrap(), DayStatus::Reserve);
    }

    #[test]
    fn application_view_shows_slots_on_off_days() {
        let f = flags(Z, MON, Z, Z, Z, Z);
        assert_eq!(resolve(0, &f, ViewMode::Application).unwrap(), DayStatus::Shift);
    }

    #[test]
    fn application_view_still_blocked_by_sickness() {
        let f = flags(Z, Z, Z, Z, MON, Z);
        assert_eq!(resolve(0, &f, ViewMode::Application).unwrap(), DayStatus::Sickness);
    }

    #[test]
    fn day_off_call_in_only_marks() {
        let mut f = flags(Z, MON, Z, Z, Z, Z);
        f.day_off_call_in = MON.parse().unwrap();
        assert_eq!(f.status(Weekday::Mon, ViewMode::Published), DayStatus::DayOff);
        let markers = f.markers(Weekday::Mon);
        assert!(markers.day_off_call_in);
        assert!(!markers.reserve_call_in);
        assert!(markers.any());
    }

    #[test]
    fn out_of_range_day_is_rejected() {
        let err = resolve(7, &CategoryFlags::default(), ViewMode::Published).unwrap_err();
        assert_eq!(err.code(), "INVALID_DAY");
    }

    #[test]
    fn status_serializes_screaming_snake() {
        assert_eq!(serde_json::to_string(&DayStatus::DayOff).unwrap(), r#""DAY_OFF""#);
        assert_eq!(DayStatus::DayOff.to_string(), "DAY_OFF");
    }
}
