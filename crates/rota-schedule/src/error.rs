use thiserror::Error;

/// Errors raised while decoding or resolving a weekly roster.
///
/// All of these are local, synchronous validation failures: nothing is retried
/// and none is silently turned into a default status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A 21-char shift string or 7-char day-flag field has the wrong length or alphabet.
    #[error("Invalid encoding in `{field}`: {reason}")]
    InvalidEncoding { field: String, reason: String },

    /// Shift slot index outside 0..=2.
    #[error("Invalid slot index: {index}")]
    InvalidSlotIndex { index: usize },

    /// Day index outside 0..=6 (Monday..Sunday).
    #[error("Invalid day index: {index}")]
    InvalidDay { index: usize },

    /// Week number outside 1..=53.
    #[error("Invalid week: {year}/{week}")]
    InvalidWeek { year: i32, week: u32 },

    /// A required day-flags field was absent from the roster record.
    #[error("Missing category flags: `{field}`")]
    MissingCategoryFlags { field: String },

    /// A date could not be represented or a range is inverted.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The vacation claim would exceed the yearly allowance.
    #[error("Vacation quota exceeded: requested {requested}, remaining {remaining}")]
    VacationQuotaExceeded { requested: u32, remaining: u32 },
}

impl ScheduleError {
    pub(crate) fn encoding(field: &str, reason: impl Into<String>) -> Self {
        ScheduleError::InvalidEncoding {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Short error code string handed to presentation.
    pub fn code(&self) -> &'static str {
        match self {
            ScheduleError::InvalidEncoding { .. } => "INVALID_ENCODING",
            ScheduleError::InvalidSlotIndex { .. } => "INVALID_SLOT_INDEX",
            ScheduleError::InvalidDay { .. } => "INVALID_DAY",
            ScheduleError::InvalidWeek { .. } => "INVALID_WEEK",
            ScheduleError::MissingCategoryFlags { .. } => "MISSING_CATEGORY_FLAGS",
            ScheduleError::InvalidDate(_) => "INVALID_DATE",
            ScheduleError::VacationQuotaExceeded { .. } => "VACATION_QUOTA_EXCEEDED",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
