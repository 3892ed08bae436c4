use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the employee that owns a roster row.
///
/// Storage hands out numeric primary keys, so the canonical form is the decimal
/// string; any opaque string id is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for UserId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// Which of the two weekly strings is being displayed.
///
/// `Published` is the accepted roster and defers to the day-category flags;
/// `Application` is the employee's pending request and always shows raw slots
/// unless the day is blocked by vacation or sickness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Published,
    Application,
}

impl ViewMode {
    pub fn is_application(&self) -> bool {
        matches!(self, ViewMode::Application)
    }

    /// Header text used in front of the week's date range.
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Published => "Schedule",
            ViewMode::Application => "Applied schedule",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Published => write!(f, "published"),
            ViewMode::Application => write!(f, "application"),
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "published" | "schedule" => Ok(ViewMode::Published),
            "application" | "applied" => Ok(ViewMode::Application),
            other => Err(format!("unknown view mode: {}", other)),
        }
    }
}
