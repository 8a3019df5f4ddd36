// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wd trigger`: preview a scheduled fire time

use crate::output::{self, OutputFormat};
use chrono::{NaiveDateTime, NaiveTime};
use clap::Args;
use serde::Serialize;
use std::fmt;
use std::process::ExitCode;
use wd_core::manifest::parse_time;
use wd_core::trigger::delay_until;
use wd_core::{compute_trigger, Clock, SystemClock};

const NOW_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Args)]
pub struct TriggerArgs {
    /// Time of day, HH:MM or HH:MM:SS
    pub time: String,

    /// Reference time (YYYY-MM-DD HH:MM[:SS]) instead of the local clock
    #[arg(long)]
    pub now: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct TriggerReport {
    time: NaiveTime,
    now: NaiveDateTime,
    fire_at: NaiveDateTime,
    wait_s: u64,
}

impl fmt::Display for TriggerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wait = std::time::Duration::from_secs(self.wait_s);
        write!(
            f,
            "{} (in {})",
            self.fire_at.format("%Y-%m-%d %H:%M:%S"),
            humantime::format_duration(wait)
        )
    }
}

pub fn handle(args: TriggerArgs) -> anyhow::Result<ExitCode> {
    let Some(time) = parse_time(&args.time) else {
        anyhow::bail!("invalid time `{}`: expected HH:MM or HH:MM:SS", args.time);
    };
    let now = match &args.now {
        Some(raw) => parse_now(raw)?,
        None => SystemClock.now(),
    };

    let fire_at = compute_trigger(now, time);
    let report = TriggerReport {
        time,
        now,
        fire_at,
        wait_s: delay_until(now, fire_at).as_secs(),
    };
    output::print(&report, args.format);
    Ok(ExitCode::SUCCESS)
}

fn parse_now(raw: &str) -> anyhow::Result<NaiveDateTime> {
    NOW_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
        .ok_or_else(|| anyhow::anyhow!("invalid --now `{}`: expected YYYY-MM-DD HH:MM[:SS]", raw))
}
