//! Fixed-width roster encodings.
//!
//! A week is stored as a 21-character string of `'0'`/`'1'`: seven consecutive
//! three-character day blocks (Monday first), each block holding the morning,
//! afternoon and night slot. Day-category flags are 7-character strings of the
//! same alphabet, one character per weekday.
//!
//! ```text
//!  Mon Tue Wed Thu Fri Sat Sun
//!  100 000 011 000 000 000 000
//!  ^ morning
//!   ^ afternoon
//!    ^ night
//! ```

use chrono::Weekday;
use rota_core::config::{DAYS_IN_WEEK, NUMBER_OF_SHIFTS, SLOTS_PER_DAY};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ScheduleError};

pub const CHAR_ZERO: char = '0';
pub const CHAR_ONE: char = '1';

/// Clock hours `(start, end)` of each slot, indexed by slot.
pub const SLOT_HOURS: [(u8, u8); SLOTS_PER_DAY] = [(6, 14), (10, 18), (14, 22)];

/// One day's three slot bits.
pub type DayBits = [bool; SLOTS_PER_DAY];

/// Seven days of slot bits, Monday first.
pub type WeekGrid = [DayBits; DAYS_IN_WEEK];

/// Monday-first weekday order used by every roster string.
pub const WEEKDAYS: [Weekday; DAYS_IN_WEEK] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Map a 0-based day index (0 = Monday) to a weekday.
pub fn weekday_from_index(index: usize) -> Result<Weekday> {
    WEEKDAYS
        .get(index)
        .copied()
        .ok_or(ScheduleError::InvalidDay { index })
}

pub(crate) fn day_index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

/// One of the three fixed daily shift windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Morning,
    Afternoon,
    Night,
}

impl Slot {
    pub const ALL: [Slot; SLOTS_PER_DAY] = [Slot::Morning, Slot::Afternoon, Slot::Night];

    pub fn from_index(index: usize) -> Result<Self> {
        Slot::ALL
            .get(index)
            .copied()
            .ok_or(ScheduleError::InvalidSlotIndex { index })
    }

    pub fn index(&self) -> usize {
        match self {
            Slot::Morning => 0,
            Slot::Afternoon => 1,
            Slot::Night => 2,
        }
    }

    pub fn hours(&self) -> (u8, u8) {
        SLOT_HOURS[self.index()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Slot::Morning => "morning",
            Slot::Afternoon => "afternoon",
            Slot::Night => "night",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (from, to) = self.hours();
        write!(f, "{from:02}:00 - {to:02}:00")
    }
}

/// Pure lookup of a slot's clock range; fails outside 0..=2.
pub fn slot_hours(slot_index: usize) -> Result<(u8, u8)> {
    Slot::from_index(slot_index).map(|slot| slot.hours())
}

/// A concrete (day, slot) pair with its clock range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftSlot {
    pub day: Weekday,
    pub slot: Slot,
}

impl ShiftSlot {
    pub fn new(day_index: usize, slot_index: usize) -> Result<Self> {
        Ok(Self {
            day: weekday_from_index(day_index)?,
            slot: Slot::from_index(slot_index)?,
        })
    }

    /// Position of this slot inside a 21-char shift string.
    pub fn position(&self) -> usize {
        day_index(self.day) * SLOTS_PER_DAY + self.slot.index()
    }

    pub fn hours(&self) -> (u8, u8) {
        self.slot.hours()
    }
}

fn parse_bits<const N: usize>(field: &str, s: &str) -> Result<[bool; N]> {
    let len = s.chars().count();
    if len != N {
        return Err(ScheduleError::encoding(
            field,
            format!("expected {N} characters, got {len}"),
        ));
    }

    let mut bits = [false; N];
    for (i, c) in s.chars().enumerate() {
        bits[i] = match c {
            CHAR_ZERO => false,
            CHAR_ONE => true,
            other => {
                return Err(ScheduleError::encoding(
                    field,
                    format!("unexpected character {other:?} at position {i}"),
                ))
            }
        };
    }
    Ok(bits)
}

pub(crate) fn bits_to_string(bits: &[bool]) -> String {
    bits.iter()
        .map(|b| if *b { CHAR_ONE } else { CHAR_ZERO })
        .collect()
}

/// Decode a 21-char shift string into the 7×3 day/slot grid.
pub fn decode(s: &str) -> Result<WeekGrid> {
    ShiftString::parse("shift string", s).map(|shifts| shifts.grid())
}

/// Inverse of [`decode`].
pub fn encode(grid: &WeekGrid) -> String {
    ShiftString::from_grid(grid).to_string()
}

/// A validated 21-slot week, serialized as its `'0'`/`'1'` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShiftString([bool; NUMBER_OF_SHIFTS]);

impl ShiftString {
    /// Parse `s`, naming `field` in the error on failure.
    pub fn parse(field: &str, s: &str) -> Result<Self> {
        parse_bits::<NUMBER_OF_SHIFTS>(field, s).map(Self)
    }

    pub fn empty() -> Self {
        Self([false; NUMBER_OF_SHIFTS])
    }

    pub fn from_bits(bits: [bool; NUMBER_OF_SHIFTS]) -> Self {
        Self(bits)
    }

    pub fn from_grid(grid: &WeekGrid) -> Self {
        let mut bits = [false; NUMBER_OF_SHIFTS];
        for (day, day_bits) in grid.iter().enumerate() {
            bits[day * SLOTS_PER_DAY..(day + 1) * SLOTS_PER_DAY].copy_from_slice(day_bits);
        }
        Self(bits)
    }

    pub fn bits(&self) -> &[bool; NUMBER_OF_SHIFTS] {
        &self.0
    }

    pub fn grid(&self) -> WeekGrid {
        let mut grid = [[false; SLOTS_PER_DAY]; DAYS_IN_WEEK];
        for (day, day_bits) in grid.iter_mut().enumerate() {
            day_bits.copy_from_slice(&self.0[day * SLOTS_PER_DAY..(day + 1) * SLOTS_PER_DAY]);
        }
        grid
    }

    /// The three slot bits of `day`.
    pub fn day(&self, day: Weekday) -> DayBits {
        self.grid()[day_index(day)]
    }

    pub fn is_active(&self, slot: ShiftSlot) -> bool {
        self.0[slot.position()]
    }

    /// Copy of `self` with `day`'s block replaced.
    pub fn with_day(&self, day: Weekday, bits: DayBits) -> Self {
        let mut grid = self.grid();
        grid[day_index(day)] = bits;
        Self::from_grid(&grid)
    }

    /// Copy of `self` with every slot of the masked days cleared.
    pub fn clear_days(&self, days: &DayFlags) -> Self {
        let mut grid = self.grid();
        for (i, day_bits) in grid.iter_mut().enumerate() {
            if days.0[i] {
                *day_bits = [false; SLOTS_PER_DAY];
            }
        }
        Self::from_grid(&grid)
    }

    pub fn count_active(&self) -> usize {
        self.0.iter().filter(|b| **b).count()
    }

    /// Slot-wise OR of several weeks; an empty input yields an empty week.
    pub fn union<'a>(weeks: impl IntoIterator<Item = &'a ShiftString>) -> Self {
        let mut bits = [false; NUMBER_OF_SHIFTS];
        for week in weeks {
            for (acc, bit) in bits.iter_mut().zip(week.0.iter()) {
                *acc |= *bit;
            }
        }
        Self(bits)
    }

    /// Active slots in Monday-first, morning-first order.
    pub fn active_slots(&self) -> impl Iterator<Item = ShiftSlot> + '_ {
        self.0.iter().enumerate().filter(|(_, b)| **b).map(|(i, _)| ShiftSlot {
            day: WEEKDAYS[i / SLOTS_PER_DAY],
            slot: Slot::ALL[i % SLOTS_PER_DAY],
        })
    }
}

impl fmt::Display for ShiftString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bits_to_string(&self.0))
    }
}

impl std::str::FromStr for ShiftString {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse("shift string", s)
    }
}

impl TryFrom<String> for ShiftString {
    type Error = ScheduleError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ShiftString> for String {
    fn from(s: ShiftString) -> Self {
        s.to_string()
    }
}

/// A validated 7-day flag field (work days, vacation, sickness, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayFlags([bool; DAYS_IN_WEEK]);

impl DayFlags {
    pub fn parse(field: &str, s: &str) -> Result<Self> {
        parse_bits::<DAYS_IN_WEEK>(field, s).map(Self)
    }

    pub fn empty() -> Self {
        Self([false; DAYS_IN_WEEK])
    }

    pub fn from_bits(bits: [bool; DAYS_IN_WEEK]) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> &[bool; DAYS_IN_WEEK] {
        &self.0
    }

    pub fn is_set(&self, day: Weekday) -> bool {
        self.0[day_index(day)]
    }

    /// Copy of `self` with `day` set to `value`.
    pub fn with(&self, day: Weekday, value: bool) -> Self {
        let mut bits = self.0;
        bits[day_index(day)] = value;
        Self(bits)
    }

    /// Copy of `self` with every day in `mask` set to `value`; other days untouched.
    pub fn with_mask(&self, mask: &DayFlags, value: bool) -> Self {
        let mut bits = self.0;
        for (bit, masked) in bits.iter_mut().zip(mask.0.iter()) {
            if *masked {
                *bit = value;
            }
        }
        Self(bits)
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|b| **b).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Longest run of consecutive days whose flag equals `value`.
    pub fn longest_run(&self, value: bool) -> usize {
        let mut best = 0;
        let mut current = 0;
        for bit in self.0 {
            if bit == value {
                current += 1;
                best = best.max(current);
            } else {
                current = 0;
            }
        }
        best
    }

    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEKDAYS
            .iter()
            .zip(self.0.iter())
            .filter(|(_, set)| **set)
            .map(|(day, _)| *day)
    }
}

impl fmt::Display for DayFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bits_to_string(&self.0))
    }
}

impl std::str::FromStr for DayFlags {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse("day flags", s)
    }
}

impl TryFrom<String> for DayFlags {
    type Error = ScheduleError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<DayFlags> for String {
    fn from(f: DayFlags) -> Self {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_then_encode_reproduces_input() {
        for s in [
            "000000000000000000000",
            "111111111111111111111",
            "100000000000000000000",
            "101010010001110000101",
        ] {
            assert_eq!(encode(&decode(s).unwrap()), s);
        }
    }

    #[test]
    fn decode_splits_days_into_blocks() {
        let grid = decode("100010001000000000111").unwrap();
        assert_eq!(grid[0], [true, false, false]);
        assert_eq!(grid[1], [false, true, false]);
        assert_eq!(grid[2], [false, false, true]);
        assert_eq!(grid[6], [true, true, true]);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let err = decode("10101").unwrap_err();
        assert_eq!(err.code(), "INVALID_ENCODING");
        assert!(decode(&"0".repeat(22)).is_err());
        assert!(decode("").is_err());
    }

    #[test]
    fn decode_rejects_foreign_characters() {
        let err = decode("00000000000000000000x").unwrap_err();
        match err {
            ScheduleError::InvalidEncoding { reason, .. } => assert!(reason.contains("20")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn slot_hours_table() {
        assert_eq!(slot_hours(0).unwrap(), (6, 14));
        assert_eq!(slot_hours(1).unwrap(), (10, 18));
        assert_eq!(slot_hours(2).unwrap(), (14, 22));
        assert_eq!(
            slot_hours(3).unwrap_err(),
            ScheduleError::InvalidSlotIndex { index: 3 }
        );
    }

    #[test]
    fn slot_display_uses_clock_range() {
        assert_eq!(Slot::Afternoon.to_string(), "10:00 - 18:00");
    }

    #[test]
    fn shift_slot_position_and_lookup() {
        let slot = ShiftSlot::new(6, 2).unwrap();
        assert_eq!(slot.position(), 20);
        let week: ShiftString = "000000000000000000001".parse().unwrap();
        assert!(week.is_active(slot));
        assert!(ShiftSlot::new(7, 0).is_err());
    }

    #[test]
    fn day_flags_parse_and_query() {
        let flags: DayFlags = "1111100".parse().unwrap();
        assert!(flags.is_set(Weekday::Mon));
        assert!(!flags.is_set(Weekday::Sun));
        assert_eq!(flags.count(), 5);
        assert!(DayFlags::parse("work_days", "11111").is_err());
        assert!(DayFlags::parse("work_days", "111112 ").is_err());
    }

    #[test]
    fn longest_run_counts_consecutive_days() {
        let flags: DayFlags = "1101110".parse().unwrap();
        assert_eq!(flags.longest_run(true), 3);
        assert_eq!(flags.longest_run(false), 1);
        assert_eq!(DayFlags::empty().longest_run(true), 0);
    }

    #[test]
    fn union_merges_rosters() {
        let a: ShiftString = "100000000000000000000".parse().unwrap();
        let b: ShiftString = "010000000000000000000".parse().unwrap();
        let c: ShiftString = "000000000000000000001".parse().unwrap();
        let merged = ShiftString::union([&a, &b, &c]);
        assert_eq!(merged.to_string(), "110000000000000000001");
        assert_eq!(merged.count_active(), 3);
    }

    #[test]
    fn clear_days_blanks_masked_blocks() {
        let week: ShiftString = "111111111111111111111".parse().unwrap();
        let mask: DayFlags = "0100001".parse().unwrap();
        assert_eq!(week.clear_days(&mask).to_string(), "111000111111111111000");
    }

    #[test]
    fn serde_uses_string_form() {
        let week: ShiftString = serde_json::from_str(r#""100000000000000000000""#).unwrap();
        assert_eq!(serde_json::to_string(&week).unwrap(), r#""100000000000000000000""#);
        assert!(serde_json::from_str::<DayFlags>(r#""10""#).is_err());
    }
}
