//! `rota-schedule`: weekly roster encoding and day-status resolution.
//!
//! # Overview
//!
//! A roster week is stored as one 21-char shift string per view (the published
//! schedule and the employee's application) plus seven 7-char day-flag fields.
//! [`roster::RosterAggregate`] validates a stored record once; everything after
//! that works on typed values and never reads the clock.
//!
//! # Day status precedence
//!
//! | Order | Condition                                           | Status      |
//! |-------|-----------------------------------------------------|-------------|
//! | 1     | workish and neither vacation nor sickness           | `Shift`     |
//! | 2     | sickness                                            | `Sickness`  |
//! | 3     | vacation                                            | `Vacation`  |
//! | 4     | off day                                             | `DayOff`    |
//! | 5     | reserve day                                         | `Reserve`   |
//! | 6     | otherwise                                           | `None`      |
//!
//! "Workish" means a work day, a reserve call-in day, or the application view.

pub mod claims;
pub mod codec;
pub mod differ;
pub mod error;
pub mod patch;
pub mod resolver;
pub mod roster;
pub mod summary;
pub mod view;
pub mod week;

pub use claims::{
    check_vacation_quota, claimed_vacation_days, plan_weeks, reserve_candidates, ReserveCandidate,
    SicknessClaim, VacationClaim, WeekMask,
};
pub use codec::{decode, encode, slot_hours, DayFlags, ShiftSlot, ShiftString, Slot};
pub use differ::{pending_slots, slots_differ};
pub use error::{Result, ScheduleError};
pub use patch::{RosterJson, ShiftPatch};
pub use resolver::{resolve, CategoryFlags, DayMarkers, DayStatus};
pub use roster::{RawRoster, RosterAggregate};
pub use summary::{summarize_application, summarize_modifications};
pub use view::{render_team, render_week, DayView, SlotView, TeamRow, WeekView};
pub use week::{current_week, end_of_week, start_of_week, week_of, week_with_offset, WeekRef};
