use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use upnext_core::{CoreConfig, Priority, ReminderScope, TimeOfDay, WeekdaySet};

/// Upcoming alarms and reminders, merged into one ordered list.
#[derive(Parser, Debug)]
#[command(name = "upnext", version, about = "Upcoming alarms and reminders")]
pub struct CliArgs {
    /// Directory holding the alarm and reminder databases
    #[arg(long, env = "UPNEXT_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "UPNEXT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files (file logging is off when unset)
    #[arg(long, env = "UPNEXT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Which reminders enter the view: pending or all
    #[arg(long, default_value = "pending", value_parser = parse_scope)]
    pub scope: ReminderScope,

    /// Print the resulting view as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliArgs {
    pub fn core_config(&self) -> CoreConfig {
        let mut config =
            CoreConfig::new(self.data_dir.clone()).with_reminder_scope(self.scope);
        if let Some(level) = &self.log_level {
            config = config.with_log_level(level.clone());
        }
        if let Some(dir) = &self.log_dir {
            config = config.with_log_dir(dir.clone());
        }
        config
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the merged upcoming view
    List,
    /// Manage alarms
    #[command(subcommand)]
    Alarm(AlarmCommand),
    /// Manage reminders
    #[command(subcommand)]
    Reminder(ReminderCommand),
}

#[derive(Subcommand, Debug)]
pub enum AlarmCommand {
    /// Create an alarm
    Add(AlarmAddArgs),
    /// Flip an alarm between on and off
    Toggle { id: i64 },
    /// Delete an alarm
    Delete { id: i64 },
}

#[derive(Args, Debug)]
pub struct AlarmAddArgs {
    /// 24-hour time, e.g. 07:30
    #[arg(long, value_parser = parse_time)]
    pub time: TimeOfDay,

    #[arg(long, default_value = "")]
    pub name: String,

    /// Repeat days: everyday, weekdays, weekends, or indices 0-6 (0 = Sunday) like 1,3,5
    #[arg(long, value_parser = parse_days, conflicts_with = "date")]
    pub days: Option<WeekdaySet>,

    /// Single date as YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum ReminderCommand {
    /// Create a reminder due in the future
    Add(ReminderAddArgs),
    /// Mark a reminder completed
    Done {
        id: i64,
        /// Mark it pending again instead
        #[arg(long)]
        undo: bool,
    },
    /// Delete a reminder
    Delete { id: i64 },
    /// Delete every completed reminder
    ClearCompleted,
}

#[derive(Args, Debug)]
pub struct ReminderAddArgs {
    #[arg(long)]
    pub title: String,

    /// Due time as "YYYY-MM-DD HH:MM"
    #[arg(long, value_parser = parse_due)]
    pub due: NaiveDateTime,

    #[arg(long, default_value = "")]
    pub description: String,

    /// High, Medium or Low
    #[arg(long, default_value = "Medium", value_parser = parse_priority)]
    pub priority: Priority,

    #[arg(long, default_value = "")]
    pub category: String,
}

fn parse_time(value: &str) -> Result<TimeOfDay, String> {
    TimeOfDay::parse(value).ok_or_else(|| format!("expected HH:MM, got `{value}`"))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD, got `{value}`: {err}"))
}

fn parse_due(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%d %H:%M")
        .map_err(|err| format!("expected \"YYYY-MM-DD HH:MM\", got `{value}`: {err}"))
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    Priority::parse(value).ok_or_else(|| format!("expected High, Medium or Low, got `{value}`"))
}

fn parse_scope(value: &str) -> Result<ReminderScope, String> {
    ReminderScope::parse(value).ok_or_else(|| format!("expected pending or all, got `{value}`"))
}

fn parse_days(value: &str) -> Result<WeekdaySet, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "everyday" | "daily" => return Ok(WeekdaySet::EVERYDAY),
        "weekdays" => return Ok(WeekdaySet::WEEKDAYS),
        "weekends" => return Ok(WeekdaySet::WEEKENDS),
        _ => {}
    }

    let indices = value
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<u8>()
                .map_err(|_| format!("invalid day `{}`", token.trim()))
        })
        .collect::<Result<Vec<u8>, String>>()?;
    WeekdaySet::from_days(indices).map_err(|day| format!("day {day} is outside 0-6"))
}
