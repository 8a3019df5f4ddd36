// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wd submit`: re-notify the transfer service

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;
use wd_adapters::{HttpSubmitClient, SubmitClient, TracedSubmitClient};
use wd_core::SubmitJobRequest;

#[derive(Args)]
pub struct SubmitArgs {
    /// Manifest of a job whose data is already staged
    pub manifest: PathBuf,

    /// Post here instead of the manifest's transfer_endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Print the request body without sending it
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn handle(args: SubmitArgs) -> anyhow::Result<ExitCode> {
    let spec = super::load_manifest(&args.manifest)?;
    let request = SubmitJobRequest::from_spec(&spec);
    let endpoint = args.endpoint.unwrap_or_else(|| spec.transfer_endpoint.clone());

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(ExitCode::SUCCESS);
    }

    let client = TracedSubmitClient::new(HttpSubmitClient::default());
    client
        .submit(&endpoint, &request)
        .await
        .with_context(|| format!("could not submit {} to {}", spec.name, endpoint))?;

    println!("submitted {} to {}", spec.name, endpoint);
    Ok(ExitCode::SUCCESS)
}
