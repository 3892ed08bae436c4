//! Pending modifications to an application.
//!
//! A patch uses the shift-string layout with a third character: `'x'` leaves
//! the slot untouched, `'0'` cancels it and `'1'` applies for it.

use chrono::Weekday;
use rota_core::config::{NUMBER_OF_SHIFTS, SLOTS_PER_DAY};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codec::{day_index, ShiftString, CHAR_ONE, CHAR_ZERO, WEEKDAYS};
use crate::error::{Result, ScheduleError};

pub const CHAR_KEEP: char = 'x';

/// Per-slot change: `Some(true)` apply, `Some(false)` cancel, `None` keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShiftPatch([Option<bool>; NUMBER_OF_SHIFTS]);

impl Default for ShiftPatch {
    fn default() -> Self {
        Self([None; NUMBER_OF_SHIFTS])
    }
}

impl ShiftPatch {
    pub fn parse(field: &str, s: &str) -> Result<Self> {
        let len = s.chars().count();
        if len != NUMBER_OF_SHIFTS {
            return Err(ScheduleError::encoding(
                field,
                format!("expected {NUMBER_OF_SHIFTS} characters, got {len}"),
            ));
        }
        let mut slots = [None; NUMBER_OF_SHIFTS];
        for (i, c) in s.chars().enumerate() {
            slots[i] = match c {
                CHAR_ZERO => Some(false),
                CHAR_ONE => Some(true),
                CHAR_KEEP => None,
                other => {
                    return Err(ScheduleError::encoding(
                        field,
                        format!("unexpected character {other:?} at position {i}"),
                    ))
                }
            };
        }
        Ok(Self(slots))
    }

    /// The smallest patch turning `before` into `after`.
    pub fn between(before: &ShiftString, after: &ShiftString) -> Self {
        let mut slots = [None; NUMBER_OF_SHIFTS];
        for (i, slot) in slots.iter_mut().enumerate() {
            if before.bits()[i] != after.bits()[i] {
                *slot = Some(after.bits()[i]);
            }
        }
        Self(slots)
    }

    pub fn slots(&self) -> &[Option<bool>; NUMBER_OF_SHIFTS] {
        &self.0
    }

    pub fn day(&self, day: Weekday) -> [Option<bool>; SLOTS_PER_DAY] {
        let start = day_index(day) * SLOTS_PER_DAY;
        let mut out = [None; SLOTS_PER_DAY];
        out.copy_from_slice(&self.0[start..start + SLOTS_PER_DAY]);
        out
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// Overwrite `base` wherever this patch holds a value.
    pub fn apply(&self, base: &ShiftString) -> ShiftString {
        let mut bits = *base.bits();
        for (bit, change) in bits.iter_mut().zip(self.0.iter()) {
            if let Some(value) = change {
                *bit = *value;
            }
        }
        ShiftString::from_bits(bits)
    }

    /// Combine with a later modification; the later one wins per slot.
    pub fn then(&self, later: &ShiftPatch) -> ShiftPatch {
        let mut slots = self.0;
        for (slot, change) in slots.iter_mut().zip(later.0.iter()) {
            if change.is_some() {
                *slot = *change;
            }
        }
        Self(slots)
    }
}

impl fmt::Display for ShiftPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self
            .0
            .iter()
            .map(|slot| match slot {
                Some(true) => CHAR_ONE,
                Some(false) => CHAR_ZERO,
                None => CHAR_KEEP,
            })
            .collect();
        f.write_str(&s)
    }
}

impl std::str::FromStr for ShiftPatch {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse("patch", s)
    }
}

impl TryFrom<String> for ShiftPatch {
    type Error = ScheduleError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ShiftPatch> for String {
    fn from(p: ShiftPatch) -> Self {
        p.to_string()
    }
}

/// One day of the named-slot JSON form; `null` means "no change" in a patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayJson {
    #[serde(default)]
    pub morning: Option<bool>,
    #[serde(default)]
    pub afternoon: Option<bool>,
    #[serde(default)]
    pub night: Option<bool>,
}

impl DayJson {
    fn from_slots(slots: [Option<bool>; SLOTS_PER_DAY]) -> Self {
        Self {
            morning: slots[0],
            afternoon: slots[1],
            night: slots[2],
        }
    }

    pub fn slots(&self) -> [Option<bool>; SLOTS_PER_DAY] {
        [self.morning, self.afternoon, self.night]
    }
}

/// Monday-first week; absent days deserialize as all-`null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekJson {
    #[serde(default)]
    pub monday: DayJson,
    #[serde(default)]
    pub tuesday: DayJson,
    #[serde(default)]
    pub wednesday: DayJson,
    #[serde(default)]
    pub thursday: DayJson,
    #[serde(default)]
    pub friday: DayJson,
    #[serde(default)]
    pub saturday: DayJson,
    #[serde(default)]
    pub sunday: DayJson,
}

impl WeekJson {
    pub fn day(&self, day: Weekday) -> &DayJson {
        match day {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    fn day_mut(&mut self, day: Weekday) -> &mut DayJson {
        match day {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }
}

/// The named-slot form of a week: `{"roster": {"monday": {"morning": true, …}, …}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterJson {
    #[serde(default)]
    pub roster: WeekJson,
}

impl RosterJson {
    /// Collapse to a shift string; `null` slots become `'0'`.
    pub fn to_shift_string(&self) -> ShiftString {
        ShiftPatch::from(self).apply(&ShiftString::empty())
    }
}

impl From<&ShiftPatch> for RosterJson {
    fn from(patch: &ShiftPatch) -> Self {
        let mut week = WeekJson::default();
        for day in WEEKDAYS {
            *week.day_mut(day) = DayJson::from_slots(patch.day(day));
        }
        Self { roster: week }
    }
}

impl From<&ShiftString> for RosterJson {
    fn from(shifts: &ShiftString) -> Self {
        let patch = ShiftPatch::between(&ShiftString::empty(), shifts);
        let mut json = RosterJson::from(&patch);
        for day in WEEKDAYS {
            let d = json.roster.day_mut(day);
            d.morning = Some(d.morning.unwrap_or(false));
            d.afternoon = Some(d.afternoon.unwrap_or(false));
            d.night = Some(d.night.unwrap_or(false));
        }
        json
    }
}

impl From<&RosterJson> for ShiftPatch {
    fn from(json: &RosterJson) -> Self {
        let mut slots = [None; NUMBER_OF_SHIFTS];
        for day in WEEKDAYS {
            let start = day_index(day) * SLOTS_PER_DAY;
            slots[start..start + SLOTS_PER_DAY].copy_from_slice(&json.roster.day(day).slots());
        }
        Self(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_keep_marker() {
        let patch: ShiftPatch = "1x0xxxxxxxxxxxxxxxxxx".parse().unwrap();
        assert_eq!(patch.day(Weekday::Mon), [Some(true), None, Some(false)]);
        assert!(!patch.is_empty());
        assert!(ShiftPatch::default().is_empty());
        assert!("1x0".parse::<ShiftPatch>().is_err());
        assert!("1y0xxxxxxxxxxxxxxxxxx".parse::<ShiftPatch>().is_err());
    }

    #[test]
    fn apply_overwrites_only_set_slots() {
        let base: ShiftString = "111000000000000000000".parse().unwrap();
        let patch: ShiftPatch = "x0x1xxxxxxxxxxxxxxxxx".parse().unwrap();
        assert_eq!(patch.apply(&base).to_string(), "101100000000000000000");
    }

    #[test]
    fn later_patch_wins() {
        let first: ShiftPatch = "1xxxxxxxxxxxxxxxxxxx0".parse().unwrap();
        let second: ShiftPatch = "0x1xxxxxxxxxxxxxxxxxx".parse().unwrap();
        assert_eq!(first.then(&second).to_string(), "0x1xxxxxxxxxxxxxxxxx0");
    }

    #[test]
    fn between_then_apply_reaches_target() {
        let before: ShiftString = "100100100000000000000".parse().unwrap();
        let after: ShiftString = "010100000000000000001".parse().unwrap();
        let patch = ShiftPatch::between(&before, &after);
        assert_eq!(patch.to_string(), "01xxxx0xxxxxxxxxxxxx1");
        assert_eq!(patch.apply(&before), after);
    }

    #[test]
    fn json_complements_missing_days_and_slots() {
        let json: RosterJson =
            serde_json::from_str(r#"{"roster": {"tuesday": {"night": true}, "monday": {"morning": false}}}"#)
                .unwrap();
        let patch = ShiftPatch::from(&json);
        assert_eq!(patch.to_string(), "0xxxx1xxxxxxxxxxxxxxx");
        assert_eq!(json.to_shift_string().to_string(), "000001000000000000000");
    }

    #[test]
    fn json_from_shift_string_has_no_nulls() {
        let shifts: ShiftString = "100000000000000000001".parse().unwrap();
        let json = RosterJson::from(&shifts);
        assert_eq!(json.roster.monday.morning, Some(true));
        assert_eq!(json.roster.monday.afternoon, Some(false));
        assert_eq!(json.roster.sunday.night, Some(true));
        let text = serde_json::to_string(&json).unwrap();
        assert!(!text.contains("null"));
    }
}
