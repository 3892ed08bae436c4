// Stored roster records and rendered views must keep their JSON shape.

use rota_core::ViewMode;
use rota_schedule::{render_team, render_week, DayStatus, RawRoster, RosterAggregate, TeamRow};

fn record() -> serde_json::Value {
    serde_json::json!({
        "id": 41,
        "year": 2024,
        "week_number": 1,
        "schedule": format!("100{}", "0".repeat(18)),
        "application": "0".repeat(21),
        "work_days": "1111100",
        "off_days": "0000000",
        "reserve_days": "0000000",
        "vacation": "0000000",
        "sickness": "0000000",
        "reserve_call_in_days": "0000000",
        "day_off_call_in_days": "0000000",
        "published": true,
        "owner": 3
    })
}

#[test]
fn published_week_end_to_end() {
    let roster: RosterAggregate = serde_json::from_value(record()).unwrap();
    let view = render_week(&roster, ViewMode::Published, None).unwrap();

    assert_eq!(view.days.len(), 7);
    let monday = &view.days[0];
    assert_eq!(monday.status, DayStatus::Shift);
    let active: Vec<_> = monday.active_slots().collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].slot_index, 0);
    assert_eq!((active[0].start_hour, active[0].end_hour), (6, 14));

    assert_eq!(view.days[5].status, DayStatus::None);
    assert_eq!(view.days[6].status, DayStatus::None);
    assert_eq!(view.title, "Schedule for Jan 1 - Jan 7");
}

#[test]
fn legacy_field_names_are_accepted() {
    let mut json = record();
    let obj = json.as_object_mut().unwrap();
    let schedule = obj.remove("schedule").unwrap();
    let application = obj.remove("application").unwrap();
    let week = obj.remove("week_number").unwrap();
    obj.insert("actual_shift".into(), schedule);
    obj.insert("applied_shift".into(), application);
    obj.insert("week".into(), week);

    let roster: RosterAggregate = serde_json::from_value(json).unwrap();
    assert_eq!(roster.week.week, 1);
    assert_eq!(roster.schedule.count_active(), 1);
}

#[test]
fn missing_flag_field_fails_deserialization() {
    let mut json = record();
    json.as_object_mut().unwrap().remove("reserve_days");
    let err = serde_json::from_value::<RosterAggregate>(json).unwrap_err();
    assert!(err.to_string().contains("reserve_days"));
}

#[test]
fn bad_alphabet_is_rejected() {
    let mut json = record();
    json["work_days"] = serde_json::json!("11111x0");
    assert!(serde_json::from_value::<RosterAggregate>(json).is_err());
}

#[test]
fn aggregate_serializes_back_to_storage_shape() {
    let roster: RosterAggregate = serde_json::from_value(record()).unwrap();
    let out = serde_json::to_value(&roster).unwrap();
    assert_eq!(out["schedule"], record()["schedule"]);
    assert_eq!(out["week_number"], 1);
    assert_eq!(out["reserve_call_in"], false);
    assert_eq!(out["owner"], "3");
}

#[test]
fn status_serializes_screaming_snake() {
    let json = serde_json::to_string(&DayStatus::DayOff).unwrap();
    assert_eq!(json, r#""DAY_OFF""#);
}

#[test]
fn team_rows_are_tagged() {
    let good: RawRoster = serde_json::from_value(record()).unwrap();
    let mut bad = good.clone();
    bad.schedule = Some("10".into());

    let rows = render_team(&[good, bad], ViewMode::Published, None);
    let json = serde_json::to_value(&rows).unwrap();
    assert_eq!(json[0]["kind"], "rendered");
    assert_eq!(json[0]["days"][0]["status"], "SHIFT");
    assert_eq!(json[1]["kind"], "invalid");
    assert_eq!(json[1]["code"], "INVALID_ENCODING");
    assert!(matches!(rows[1], TeamRow::Invalid { .. }));
}
