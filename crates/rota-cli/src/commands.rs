use anyhow::{bail, Context};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use rota_core::{RotaConfig, RotaError, ViewMode};
use rota_schedule::claims::{check_vacation_quota, claimed_vacation_days, quota_warning};
use rota_schedule::week::application_window_open;
use rota_schedule::{
    render_team, render_week, summarize_application, summarize_modifications, week_with_offset,
    RawRoster, RosterAggregate, ScheduleError, ShiftPatch, SicknessClaim, VacationClaim, WeekMask,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::output;

#[derive(Parser, Debug)]
#[command(name = "rota")]
#[command(about = "Render and inspect weekly shift rosters", long_about = None)]
pub struct Cli {
    /// Config file (defaults to $ROTA_CONFIG, then ~/.rota/rota.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one stored roster record as a week view
    Render {
        /// Roster JSON file, or `-` for stdin
        #[arg(short, long)]
        input: PathBuf,
        /// published | application (defaults to [render].default_view)
        #[arg(long)]
        view: Option<ViewMode>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Render a JSON array of roster records as the supervisor table
    Team {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long)]
        view: Option<ViewMode>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Show which week an offset from today points at
    Week {
        /// Weeks after the current one; ignored with --published/--application
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,
        /// Use the configured offset of the next published roster
        #[arg(long, conflicts_with = "application")]
        published: bool,
        /// Use the configured offset of the open application week
        #[arg(long)]
        application: bool,
    },
    /// Describe an application, or pending modifications to it, in plain English
    Summary {
        #[arg(short, long)]
        input: PathBuf,
        /// All pending modifications as a 21-char patch ('1' apply, '0' cancel, 'x' keep)
        #[arg(long)]
        pending: Option<ShiftPatch>,
        /// The latest modification only
        #[arg(long, requires = "pending")]
        current: Option<ShiftPatch>,
    },
    /// Claim vacation or sickness over a date range
    Claim {
        /// JSON array of the owner's roster records for the affected year
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = LeaveKind::Vacation)]
        kind: LeaveKind,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// Give vacation days back instead of taking them
        #[arg(long)]
        cancel: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeaveKind {
    Vacation,
    Sickness,
}

/// Result of a claim: the message for the user and the rosters to store.
#[derive(Debug, Serialize)]
struct ClaimOutcome {
    message: String,
    rosters: Vec<RosterAggregate>,
}

/// Execute `command` and return what should be printed on stdout.
pub fn run(command: &Command, config: &RotaConfig, today: NaiveDate) -> anyhow::Result<String> {
    match command {
        Command::Render {
            input,
            view,
            format,
        } => {
            let mode = view.unwrap_or(config.render.default_view);
            let roster: RosterAggregate = load(input)
                .with_context(|| format!("invalid roster record in {}", input.display()))?;
            let week = render_week(&roster, mode, Some(today))?;
            match format {
                Format::Json => Ok(serde_json::to_string_pretty(&week)?),
                Format::Text => Ok(output::week_text(&week)),
            }
        }
        Command::Team {
            input,
            view,
            format,
        } => {
            let mode = view.unwrap_or(config.render.default_view);
            let rosters: Vec<RawRoster> = load(input)
                .with_context(|| format!("expected a JSON array of rosters in {}", input.display()))?;
            let rows = render_team(&rosters, mode, Some(today));
            info!(rows = rows.len(), %mode, "team table rendered");
            match format {
                Format::Json => Ok(serde_json::to_string_pretty(&rows)?),
                Format::Text => Ok(output::team_text(&rows)),
            }
        }
        Command::Week {
            offset,
            published,
            application,
        } => {
            let offset = if *published {
                config.weeks.published_offset
            } else if *application {
                config.weeks.application_offset
            } else {
                *offset
            };
            let week = week_with_offset(today, offset)?;
            let mut out = format!("{week}  {}", week.range()?.label());
            if *application {
                let deadline = config.weeks.application_deadline;
                if application_window_open(today, deadline) {
                    out.push_str(&format!("\napplications open until {deadline}"));
                } else {
                    out.push_str("\napplications closed for this week");
                }
            }
            Ok(out)
        }
        Command::Summary {
            input,
            pending,
            current,
        } => {
            let roster: RosterAggregate = load(input)
                .with_context(|| format!("invalid roster record in {}", input.display()))?;
            Ok(match pending {
                Some(full) => summarize_modifications(current.as_ref(), full),
                None => summarize_application(&roster.application),
            })
        }
        Command::Claim {
            input,
            kind,
            start,
            end,
            cancel,
        } => {
            let rosters: Vec<RosterAggregate> = load(input)
                .with_context(|| format!("expected a JSON array of rosters in {}", input.display()))?;
            let outcome = match kind {
                LeaveKind::Vacation => claim_vacation(&rosters, *start, *end, !*cancel, config)?,
                LeaveKind::Sickness => {
                    if *cancel {
                        bail!("sickness claims cannot be cancelled");
                    }
                    claim_sickness(&rosters, *start, *end)?
                }
            };
            Ok(serde_json::to_string_pretty(&outcome)?)
        }
    }
}

fn claim_vacation(
    rosters: &[RosterAggregate],
    start: NaiveDate,
    end: NaiveDate,
    take: bool,
    config: &RotaConfig,
) -> anyhow::Result<ClaimOutcome> {
    let claim = VacationClaim::new(start, end, take)?;

    if take {
        let claimed = claimed_vacation_days(rosters, start.year());
        match check_vacation_quota(claimed, claim.days(), config.vacation.max_days_per_year) {
            Ok(()) => {}
            Err(ScheduleError::VacationQuotaExceeded {
                requested,
                remaining,
            }) => {
                warn!(requested, remaining, "vacation claim over quota");
                return Ok(ClaimOutcome {
                    message: quota_warning(requested, remaining),
                    rosters: Vec::new(),
                });
            }
            Err(e) => return Err(e.into()),
        }
    }

    let updated = apply_masks(rosters, &claim.plan()?, |r, m| r.with_vacation(&m.days, take))?;
    Ok(ClaimOutcome {
        message: claim.message(),
        rosters: updated,
    })
}

fn claim_sickness(
    rosters: &[RosterAggregate],
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<ClaimOutcome> {
    let claim = SicknessClaim::new(start, end)?;
    let updated = apply_masks(rosters, &claim.plan()?, |r, m| r.with_sickness(&m.days))?;
    Ok(ClaimOutcome {
        message: claim.message(),
        rosters: updated,
    })
}

/// Apply `f` to the roster of every planned week; a week without a roster is an error.
fn apply_masks(
    rosters: &[RosterAggregate],
    masks: &[WeekMask],
    f: impl Fn(&RosterAggregate, &WeekMask) -> RosterAggregate,
) -> anyhow::Result<Vec<RosterAggregate>> {
    masks
        .iter()
        .map(|mask| {
            rosters
                .iter()
                .find(|r| r.week == mask.week)
                .map(|r| f(r, mask))
                .with_context(|| format!("no roster for week {}", mask.week))
        })
        .collect()
}

/// Parse a JSON document from `path`.
fn load<T: DeserializeOwned>(path: &Path) -> rota_core::Result<T> {
    Ok(serde_json::from_str(&read_input(path)?)?)
}

/// Read a whole file, or stdin when `path` is `-`.
fn read_input(path: &Path) -> rota_core::Result<String> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    if text.trim().is_empty() {
        return Err(RotaError::InvalidInput(format!(
            "{} is empty",
            path.display()
        )));
    }
    Ok(text)
}
