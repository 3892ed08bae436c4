// Exhaustive checks of the day-status precedence rules.

use rota_core::ViewMode;
use rota_schedule::{resolve, slots_differ, start_of_week, CategoryFlags, DayFlags, DayStatus};

const MODES: [ViewMode; 2] = [ViewMode::Published, ViewMode::Application];

fn day_flags(set: bool) -> DayFlags {
    if set {
        "1000000".parse().unwrap()
    } else {
        DayFlags::empty()
    }
}

/// Flags for day 0 built from the low six bits of `combo`.
fn flags_for(combo: u8) -> CategoryFlags {
    CategoryFlags {
        work_days: day_flags(combo & 0b000001 != 0),
        off_days: day_flags(combo & 0b000010 != 0),
        reserve_days: day_flags(combo & 0b000100 != 0),
        vacation: day_flags(combo & 0b001000 != 0),
        sickness: day_flags(combo & 0b010000 != 0),
        reserve_call_in: day_flags(combo & 0b100000 != 0),
        day_off_call_in: DayFlags::empty(),
    }
}

#[test]
fn every_combination_resolves() {
    for combo in 0u8..64 {
        for mode in MODES {
            let status = resolve(0, &flags_for(combo), mode).unwrap();
            assert!(DayStatus::ALL.contains(&status), "{combo:06b} {mode}");
        }
    }
}

#[test]
fn published_view_without_work_is_never_shift() {
    for combo in 0u8..64 {
        let flags = flags_for(combo);
        if flags.work_days.is_empty() && flags.reserve_call_in.is_empty() {
            let status = resolve(0, &flags, ViewMode::Published).unwrap();
            assert_ne!(status, DayStatus::Shift, "{combo:06b}");
        }
    }
}

#[test]
fn sickness_dominates_vacation_when_not_working() {
    for combo in 0u8..64 {
        let flags = flags_for(combo);
        let workish = !flags.work_days.is_empty() || !flags.reserve_call_in.is_empty();
        if !workish && !flags.sickness.is_empty() {
            assert_eq!(
                resolve(0, &flags, ViewMode::Published).unwrap(),
                DayStatus::Sickness,
                "{combo:06b}"
            );
        }
    }
}

#[test]
fn application_view_with_sickness_is_sickness() {
    for combo in 0u8..64 {
        let flags = flags_for(combo);
        if !flags.sickness.is_empty() {
            assert_eq!(
                resolve(0, &flags, ViewMode::Application).unwrap(),
                DayStatus::Sickness,
                "{combo:06b}"
            );
        }
    }
}

#[test]
fn application_view_without_leave_is_shift() {
    for combo in 0u8..64 {
        let flags = flags_for(combo);
        if flags.sickness.is_empty() && flags.vacation.is_empty() {
            assert_eq!(
                resolve(0, &flags, ViewMode::Application).unwrap(),
                DayStatus::Shift
            );
        }
    }
}

#[test]
fn day_index_out_of_range() {
    let err = resolve(7, &CategoryFlags::default(), ViewMode::Published).unwrap_err();
    assert_eq!(err.code(), "INVALID_DAY");
}

#[test]
fn differ_example() {
    assert_eq!(
        slots_differ([true, false, true], [true, false, false]),
        [false, false, true]
    );
}

#[test]
fn first_week_of_2024() {
    assert_eq!(
        start_of_week(2024, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    );
}
