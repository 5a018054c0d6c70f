//! Command handlers. Each returns the process exit code.

use super::commands::{AddArgs, UpdateArgs};
use super::prompt::Prompter;
use crate::config::RegistryConfig;
use crate::github::GitHubClient;
use crate::registry::{sync_registry_file, NewPlugin, Registrar, SyncOptions, SyncReport};
use crate::resolver::ReleaseResolver;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};

const STATE_QUESTION: &str =
    "Enter a custom plugin state (e.g., In Development) or press Enter to fetch the latest release date";

pub fn handle_add(args: &AddArgs, config: &RegistryConfig) -> i32 {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stderr());

    match run_add(args, config, &mut prompter) {
        Ok(()) => 0,
        Err(e) => {
            error!("Failed to add plugin: {:#}", e);
            1
        }
    }
}

pub fn handle_update(args: &UpdateArgs, config: &RegistryConfig) -> i32 {
    info!("Beginning the update process for all plugins");

    match run_update(args, config) {
        Ok(report) => {
            print_report(&report);
            0
        }
        Err(e) => {
            error!("Failed to update release dates: {:#}", e);
            1
        }
    }
}

fn release_resolver(config: &RegistryConfig) -> Result<ReleaseResolver<GitHubClient>> {
    if !config.has_token() {
        warn!("No GitHub token configured; requests are unauthenticated and heavily rate limited");
    }
    let client = GitHubClient::from_config(config).context("Failed to create GitHub client")?;
    Ok(ReleaseResolver::new(client, config.web_url.clone()))
}

fn run_add<R: BufRead, W: Write>(
    args: &AddArgs,
    config: &RegistryConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let url = prompter
        .value_or_ask(args.repo_url.as_deref(), "Enter the GitHub repository URL")
        .context("Failed to read the repository URL")?;
    let description = prompter
        .value_or_ask(args.description.as_deref(), "Enter the plugin description")
        .context("Failed to read the description")?;
    let custom_state = if args.fetch {
        None
    } else {
        Some(
            prompter
                .value_or_ask(args.state.as_deref(), STATE_QUESTION)
                .context("Failed to read the plugin state")?,
        )
    };

    let resolver = release_resolver(config)?;
    let outcome = Registrar::new(config, &resolver).add(NewPlugin {
        url,
        description,
        custom_state,
    })?;

    info!(
        "Added '{}' at index {} with release date '{}'",
        outcome.plugin.name, outcome.index, outcome.plugin.release_date
    );
    Ok(())
}

fn run_update(args: &UpdateArgs, config: &RegistryConfig) -> Result<SyncReport> {
    let resolver = release_resolver(config)?;
    let options = SyncOptions {
        include_manual: args.include_manual,
        dry_run: args.dry_run,
    };
    Ok(sync_registry_file(&config.registry_path, &resolver, options)?)
}

fn print_report(report: &SyncReport) {
    if !report.skipped_manual.is_empty() {
        info!(
            "Left {} plugin(s) with a hand-set state alone: {}",
            report.skipped_manual.len(),
            report.skipped_manual.join(", ")
        );
    }

    if !report.has_changes() {
        info!("No plugins required updating");
        return;
    }

    info!("The following plugins have been updated:");
    for change in &report.updated {
        info!("- {}: {} -> {}", change.name, change.previous, change.current);
        println!("{}", change.name);
    }
}
