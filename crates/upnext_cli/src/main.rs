//! Command-line consumer of the upcoming view.
//!
//! # Responsibility
//! - Open both stores under the configured data directory.
//! - Apply at most one mutation, then print the recombined view.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::sync::Arc;
use upnext_core::{
    open_alarm_db, open_reminder_db, Alarm, AlarmStore, Reminder, ReminderStore, SharedClock,
    SqliteAlarmRepository, SqliteReminderRepository, SystemClock, UpcomingAggregator,
    UpcomingItem,
};

use crate::cli::{AlarmCommand, CliArgs, Command, ReminderCommand};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = args.core_config();

    upnext_core::init_from_config(&config)
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;
    config
        .ensure_data_dir()
        .with_context(|| format!("failed to create {}", config.data_dir.display()))?;

    let clock: SharedClock = Arc::new(SystemClock);
    let alarm_conn = open_alarm_db(config.alarm_db_path())
        .with_context(|| format!("failed to open {}", config.alarm_db_path().display()))?;
    let reminder_conn = open_reminder_db(config.reminder_db_path())
        .with_context(|| format!("failed to open {}", config.reminder_db_path().display()))?;

    let alarms = AlarmStore::open(SqliteAlarmRepository::new(&alarm_conn))
        .context("failed to load alarms")?;
    let reminders = ReminderStore::open(
        SqliteReminderRepository::new(&reminder_conn),
        Arc::clone(&clock),
        config.reminder_scope,
    )
    .context("failed to load reminders")?;
    let mut aggregator = UpcomingAggregator::attach(&alarms, &reminders, clock);

    apply(&args.command, &alarms, &reminders)?;
    aggregator.sync();

    let view = aggregator.current();
    info!(
        "event=cli_view module=cli status=ok items={} active={}",
        view.len(),
        aggregator.active_count()
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(view.as_slice())?);
    } else {
        print_view(&view);
    }
    Ok(())
}

fn apply(
    command: &Command,
    alarms: &AlarmStore<SqliteAlarmRepository<'_>>,
    reminders: &ReminderStore<SqliteReminderRepository<'_>>,
) -> Result<()> {
    match command {
        Command::List => {}
        Command::Alarm(AlarmCommand::Add(add)) => {
            let mut alarm = Alarm::new(add.time).with_name(add.name.as_str());
            if let Some(date) = add.date {
                alarm = alarm.on_date(date);
            } else if let Some(days) = add.days {
                alarm = alarm.repeating(days);
            }
            let id = alarms.insert(&alarm).context("failed to add alarm")?;
            eprintln!("added alarm #{id}");
        }
        Command::Alarm(AlarmCommand::Toggle { id }) => {
            let alarm = alarms
                .get(*id)?
                .with_context(|| format!("alarm #{id} does not exist"))?;
            alarms
                .set_enabled(*id, !alarm.is_enabled)
                .context("failed to toggle alarm")?;
        }
        Command::Alarm(AlarmCommand::Delete { id }) => {
            alarms.delete(*id).context("failed to delete alarm")?;
        }
        Command::Reminder(ReminderCommand::Add(add)) => {
            let reminder = Reminder::new(add.title.as_str(), add.due, add.due)
                .with_description(add.description.as_str())
                .with_priority(add.priority)
                .with_category(add.category.as_str());
            let id = reminders
                .insert(&reminder)
                .context("failed to add reminder")?;
            eprintln!("added reminder #{id}");
        }
        Command::Reminder(ReminderCommand::Done { id, undo }) => {
            reminders
                .set_completed(*id, !undo)
                .context("failed to update reminder")?;
        }
        Command::Reminder(ReminderCommand::Delete { id }) => {
            reminders.delete(*id).context("failed to delete reminder")?;
        }
        Command::Reminder(ReminderCommand::ClearCompleted) => {
            let removed = reminders
                .delete_completed()
                .context("failed to clear completed reminders")?;
            eprintln!("removed {removed} completed reminder(s)");
        }
    }
    Ok(())
}

fn print_view(items: &[UpcomingItem]) {
    if items.is_empty() {
        println!("Nothing upcoming.");
        return;
    }

    for item in items {
        let state = if item.is_enabled() { "on " } else { "off" };
        match item {
            UpcomingItem::Alarm(alarm) => println!(
                "[{state}] alarm    #{:<4} {:>8}  {:<14} {}",
                alarm.id, alarm.display_time, alarm.day_label, alarm.title
            ),
            UpcomingItem::Reminder(reminder) => println!(
                "[{state}] reminder #{:<4} {:>8}  {:<14} {} ({})",
                reminder.id,
                reminder.display_time,
                reminder.category,
                reminder.title,
                reminder.priority
            ),
        }
    }
}
