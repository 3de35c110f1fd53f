// ABOUTME: Command-line entry point running one Oura to Splunk HEC sync pass
// ABOUTME: Loads configuration from the environment, applies CLI overrides and maps failures to exit codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 oura-splunk-sync contributors

//! # Oura Splunk Sync Binary
//!
//! Runs a single sync pass. Scheduling is left to cron or a systemd timer.

use anyhow::Result;
use clap::Parser;
use oura_splunk_sync::{
    config::SyncConfig, errors::SyncError, logging, models::ResourceKind, sync,
};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "oura-splunk-sync")]
#[command(about = "Forward Oura Ring health records to a Splunk HTTP Event Collector")]
struct Args {
    /// Days to fetch, overrides `DAYS_TO_FETCH`
    #[arg(long)]
    days: Option<u32>,

    /// Resource kind to sync (repeatable), overrides `OURA_RESOURCES`
    #[arg(long = "resource", value_name = "KIND")]
    resources: Vec<ResourceKind>,

    /// Validate configuration and exit without contacting any API
    #[arg(long)]
    check_config: bool,
}

fn exit_code_for(error: &SyncError) -> ExitCode {
    u8::try_from(error.code().exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = match SyncConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return Ok(exit_code_for(&e));
        }
    };

    if let Some(days) = args.days {
        config.days_to_fetch = days;
    }
    if !args.resources.is_empty() {
        config.resources = args.resources;
    }

    if let Err(e) = config.validate() {
        error!("{e}");
        error!("Please ensure OURA_API_TOKEN, SPLUNK_HEC_URL, and SPLUNK_HEC_TOKEN are set");
        return Ok(exit_code_for(&e));
    }

    info!("{}", config.summary());

    if args.check_config {
        info!("Configuration is valid");
        return Ok(ExitCode::SUCCESS);
    }

    match sync::run_guarded(&config).await {
        Ok(report) => {
            info!(
                "Sync finished: {} records fetched, {} events delivered",
                report.total_fetched(),
                report.total_delivery()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(error.code = ?e.code(), "Sync failed: {e}");
            Ok(exit_code_for(&e))
        }
    }
}
