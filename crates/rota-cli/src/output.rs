//! Plain-text rendering for the terminal.

use rota_schedule::{DayStatus, DayView, TeamRow, WeekView};

fn day_lines(day: &DayView) -> Vec<String> {
    let today = if day.is_today { ">" } else { " " };
    let head = format!("{today} {} {}", day.weekday, day.date.format("%b %d"));

    let mut body: Vec<String> = if day.status == DayStatus::Shift {
        day.slots
            .iter()
            .map(|s| {
                let mark = match (s.active, s.is_pending) {
                    (true, true) => " *",
                    (false, true) => " (pending)",
                    _ => "",
                };
                format!("{:02}:00 - {:02}:00{mark}", s.start_hour, s.end_hour)
            })
            .collect()
    } else {
        vec![day.status.label().to_string()]
    };
    if body.is_empty() {
        body.push("-".to_string());
    }

    if day.markers.reserve_call_in {
        body[0].push_str("  [reserve call-in]");
    }
    if day.markers.day_off_call_in {
        body[0].push_str("  [day-off call-in]");
    }

    let pad = " ".repeat(head.len());
    body.iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{head}  {line}")
            } else {
                format!("{pad}  {line}")
            }
        })
        .collect()
}

/// One week as a header line plus one block per day.
pub fn week_text(week: &WeekView) -> String {
    let mut lines = vec![format!(
        "{} ({}, {}-W{:02}{})",
        week.title,
        week.owner,
        week.year,
        week.week,
        if week.published { "" } else { ", draft" }
    )];
    for day in &week.days {
        lines.extend(day_lines(day));
    }
    lines.join("\n")
}

/// The supervisor table: rendered weeks separated by blank lines, failures on one line.
pub fn team_text(rows: &[TeamRow]) -> String {
    rows.iter()
        .map(|row| match row {
            TeamRow::Rendered(week) => week_text(week),
            TeamRow::Invalid {
                owner,
                code,
                message,
            } => {
                let owner = owner
                    .as_ref()
                    .map(|o| o.to_string())
                    .unwrap_or_else(|| "unknown owner".to_string());
                format!("{owner}: {code} {message}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
