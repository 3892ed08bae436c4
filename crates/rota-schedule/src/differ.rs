//! Published-vs-requested slot comparison.

use rota_core::ViewMode;

use crate::codec::DayBits;

/// Slot-wise inequality between the published and the requested day.
pub fn slots_differ(schedule_day: DayBits, application_day: DayBits) -> DayBits {
    let mut out = [false; 3];
    for (i, bit) in out.iter_mut().enumerate() {
        *bit = schedule_day[i] != application_day[i];
    }
    out
}

/// Slots to highlight as pending for the given view.
///
/// The published view flags every slot where the request disagrees with the
/// roster. The application view only flags slots that were requested but are
/// not (yet) on the published roster.
pub fn pending_slots(mode: ViewMode, schedule_day: DayBits, application_day: DayBits) -> DayBits {
    let differ = slots_differ(schedule_day, application_day);
    match mode {
        ViewMode::Published => differ,
        ViewMode::Application => {
            let mut out = [false; 3];
            for (i, bit) in out.iter_mut().enumerate() {
                *bit = differ[i] && application_day[i];
            }
            out
        }
    }
}
