use chrono::Weekday;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::types::ViewMode;

// Roster layout constants, fixed by the storage format
pub const DAYS_IN_WEEK: usize = 7;
pub const SLOTS_PER_DAY: usize = 3;
pub const NUMBER_OF_SHIFTS: usize = DAYS_IN_WEEK * SLOTS_PER_DAY; // 21-char schedule strings
pub const MAX_WEEK_NUMBER: u32 = 53;

pub const DEFAULT_PUBLISHED_OFFSET: i64 = 1; // next week's published roster
pub const DEFAULT_APPLICATION_OFFSET: i64 = 2; // week currently open for applications
pub const DEFAULT_MAX_VACATION_DAYS: u32 = 20;

/// Top-level config (rota.toml + ROTA_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RotaConfig {
    #[serde(default)]
    pub weeks: WeeksConfig,
    #[serde(default)]
    pub vacation: VacationConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Which weeks the "next published" and "open application" shortcuts point at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeksConfig {
    /// Offset from the current week of the next published roster.
    #[serde(default = "default_published_offset")]
    pub published_offset: i64,
    /// Offset from the current week of the application window.
    #[serde(default = "default_application_offset")]
    pub application_offset: i64,
    /// Last weekday on which new applications are accepted.
    /// Override with env var: ROTA_WEEKS__APPLICATION_DEADLINE=thursday
    #[serde(default = "default_application_deadline")]
    pub application_deadline: Weekday,
}

impl Default for WeeksConfig {
    fn default() -> Self {
        Self {
            published_offset: DEFAULT_PUBLISHED_OFFSET,
            application_offset: DEFAULT_APPLICATION_OFFSET,
            application_deadline: default_application_deadline(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationConfig {
    /// Vacation days an employee may claim per calendar year.
    #[serde(default = "default_max_vacation_days")]
    pub max_days_per_year: u32,
}

impl Default for VacationConfig {
    fn default() -> Self {
        Self {
            max_days_per_year: DEFAULT_MAX_VACATION_DAYS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub default_view: ViewMode,
}

fn default_published_offset() -> i64 {
    DEFAULT_PUBLISHED_OFFSET
}
fn default_application_offset() -> i64 {
    DEFAULT_APPLICATION_OFFSET
}
fn default_application_deadline() -> Weekday {
    Weekday::Fri
}
fn default_max_vacation_days() -> u32 {
    DEFAULT_MAX_VACATION_DAYS
}

impl RotaConfig {
    /// Load config from a TOML file with ROTA_* env var overrides.
    ///
    /// Nested keys use a double underscore: `ROTA_VACATION__MAX_DAYS_PER_YEAR=25`.
    /// A missing file is not an error; every section has defaults.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        tracing::debug!(%path, "loading rota config");

        let config: RotaConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("ROTA_").split("__"))
            .extract()
            .map_err(|e| crate::error::RotaError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.rota/rota.toml", home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_roster_policy() {
        let config = RotaConfig::default();
        assert_eq!(config.weeks.published_offset, 1);
        assert_eq!(config.weeks.application_offset, 2);
        assert_eq!(config.weeks.application_deadline, Weekday::Fri);
        assert_eq!(config.vacation.max_days_per_year, 20);
        assert_eq!(config.render.default_view, ViewMode::Published);
        assert_eq!(NUMBER_OF_SHIFTS, 21);
    }

    #[test]
    fn load_reads_partial_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[weeks]\napplication_deadline = \"thursday\"\n\n[vacation]\nmax_days_per_year = 25\n"
        )
        .unwrap();

        let config = RotaConfig::load(file.path().to_str()).unwrap();
        assert_eq!(config.weeks.application_deadline, Weekday::Thu);
        assert_eq!(config.weeks.application_offset, 2);
        assert_eq!(config.vacation.max_days_per_year, 25);
    }

    #[test]
    fn load_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = RotaConfig::load(path.to_str()).unwrap();
        assert_eq!(config.weeks.published_offset, DEFAULT_PUBLISHED_OFFSET);
    }

    #[test]
    fn load_rejects_wrong_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[vacation]\nmax_days_per_year = \"many\"").unwrap();

        let err = RotaConfig::load(file.path().to_str()).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }
}
