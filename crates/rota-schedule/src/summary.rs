//! Plain-English summaries of applications and pending modifications.

use chrono::Weekday;

use crate::codec::{ShiftString, Slot, WEEKDAYS};
use crate::patch::ShiftPatch;

const FOLLOW_UP: &str = "Would you like to modify it any further, or save them?";

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// `"Monday morning"`, `"Monday morning and night"` or
/// `"Monday morning, afternoon, and night"`; `None` when no slot is listed.
fn format_day(day: Weekday, slots: &[Slot]) -> Option<String> {
    let name = day_name(day);
    match slots {
        [] => None,
        [only] => Some(format!("{name} {}", only.name())),
        [first, second] => Some(format!("{name} {} and {}", first.name(), second.name())),
        _ => Some(format!("{name} morning, afternoon, and night")),
    }
}

/// Phrases for every day where the patch sets a slot to `wanted`.
fn patch_phrases(patch: &ShiftPatch, wanted: bool) -> Vec<String> {
    WEEKDAYS
        .iter()
        .filter_map(|day| {
            let slots: Vec<Slot> = Slot::ALL
                .iter()
                .copied()
                .filter(|slot| patch.day(*day)[slot.index()] == Some(wanted))
                .collect();
            format_day(*day, &slots)
        })
        .collect()
}

/// Describe the shifts requested in an application.
pub fn summarize_application(application: &ShiftString) -> String {
    let phrases: Vec<String> = WEEKDAYS
        .iter()
        .filter_map(|day| {
            let bits = application.day(*day);
            let slots: Vec<Slot> = Slot::ALL
                .iter()
                .copied()
                .filter(|slot| bits[slot.index()])
                .collect();
            format_day(*day, &slots)
        })
        .collect();

    if phrases.is_empty() {
        return "Your application doesn't include any shifts yet. Would you like to modify it?"
            .to_string();
    }

    format!(
        "Your application includes shifts on the following days and times: {}. Would you like to modify it?",
        phrases.join(", ")
    )
}

/// Describe the latest modification (`current`) against everything pending (`full`).
pub fn summarize_modifications(current: Option<&ShiftPatch>, full: &ShiftPatch) -> String {
    let full_applied = patch_phrases(full, true).join(", ");
    let full_cancelled = patch_phrases(full, false).join(", ");

    if let Some(current) = current.filter(|c| !c.is_empty()) {
        let applied = patch_phrases(current, true).join(", ");
        let cancelled = patch_phrases(current, false).join(", ");

        if !applied.is_empty() && !cancelled.is_empty() {
            return format!(
                "You have applied for: {applied}; and cancelled: {cancelled}. With that, your ongoing applications are {full_applied}; and cancellations are {full_cancelled}. {FOLLOW_UP}"
            );
        }

        if !applied.is_empty() {
            let mut msg = format!(
                "You have applied for: {applied}. With that, your ongoing applications are: {full_applied}"
            );
            if !full_cancelled.is_empty() {
                msg.push_str(&format!("; and cancellations are: {full_cancelled}"));
            }
            msg.push_str(&format!(". {FOLLOW_UP}"));
            return msg;
        }

        let mut msg = format!("You have canceled for: {cancelled}. With that, your ongoing ");
        if !full_applied.is_empty() {
            msg.push_str(&format!("applications are: {full_applied}; and "));
        }
        msg.push_str(&format!("cancellations are: {full_cancelled}. {FOLLOW_UP}"));
        return msg;
    }

    match (full_applied.is_empty(), full_cancelled.is_empty()) {
        (false, false) => format!(
            "Your ongoing applications are: {full_applied}; and cancellations are: {full_cancelled}. {FOLLOW_UP}"
        ),
        (false, true) => format!("Your ongoing applications are: {full_applied}. {FOLLOW_UP}"),
        (true, false) => format!("Your ongoing cancellations are: {full_cancelled}. {FOLLOW_UP}"),
        (true, true) => "You don't have any ongoing modifications. If you'd like to change anything, please let me know!"
            .to_string(),
    }
}
