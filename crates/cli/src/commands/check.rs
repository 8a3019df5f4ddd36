// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wd check`: validate a manifest

use crate::output::{self, OutputFormat};
use anyhow::Context;
use clap::Args;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;
use wd_core::{parse_manifest, ManifestSpec, Payload};

#[derive(Args)]
pub struct CheckArgs {
    /// Manifest file to validate
    pub manifest: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct CheckReport {
    path: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spec: Option<ManifestSpec>,
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(spec) = &self.spec else {
            write!(f, "invalid: {}", self.path)?;
            if let Some(error) = &self.error {
                write!(f, "\n  {}", error)?;
            }
            return Ok(());
        };

        writeln!(f, "ok: {}", self.path)?;
        writeln!(f, "  name:        {}", spec.name)?;
        writeln!(f, "  subject:     {}", spec.subject_id)?;
        writeln!(f, "  platform:    {}", spec.platform)?;
        writeln!(f, "  acquired:    {}", spec.acquisition_datetime)?;
        match spec.schedule_time {
            Some(time) => writeln!(f, "  schedule:    {}", time)?,
            None => writeln!(f, "  schedule:    immediately")?,
        }
        writeln!(f, "  staged into: {}", spec.job_dir())?;
        match &spec.payload {
            Payload::Transfer {
                modalities,
                schemas,
            } => write!(
                f,
                "  transfer:    {} modalities [{}], {} schema files",
                modalities.len(),
                modalities.names().collect::<Vec<_>>().join(", "),
                schemas.len()
            ),
            Payload::Script { commands } => write!(
                f,
                "  script:      {} commands [{}]",
                commands.len(),
                commands.names().collect::<Vec<_>>().join(", ")
            ),
        }
    }
}

pub fn handle(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let path = args.manifest.display().to_string();
    let bytes = std::fs::read(&args.manifest).with_context(|| format!("could not read {}", path))?;

    let report = match parse_manifest(&bytes) {
        Ok(spec) => CheckReport {
            path,
            valid: true,
            field: None,
            error: None,
            spec: Some(spec),
        },
        Err(e) => CheckReport {
            path,
            valid: false,
            field: e.field(),
            error: Some(e.to_string()),
            spec: None,
        },
    };

    output::print(&report, args.format);
    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
