//! Quotes table management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;
mod seed;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use config::DEFAULT_TABLE_NAME;
use dialoguer::Confirm;
use novamuse_core::quote::generate_sample_quotes;

#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Create, update or destroy the quotes table.
    Deploy(DeployCommand),

    /// Load the sample quotes into the table.
    Seed(SeedCommand),
}

#[derive(Debug, clap::Parser)]
#[command(long_about = "Create, update or destroy the quotes table.

By default, this command creates the quotes table with its primary key
and the genre and author Global Secondary Indexes, or adds whichever
index is missing from an existing table.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the table instead of creating/updating.
    #[arg(long)]
    pub destroy: bool,

    #[arg(long, env = "QUOTES_TABLE", default_value = DEFAULT_TABLE_NAME)]
    pub table_name: String,
}

#[derive(Debug, clap::Parser)]
#[command(long_about = "Insert the sample quote collection into the quotes table.

Each quote is written with a conditional put, so quotes that already
exist are left untouched and counted as skipped. Creation times start
at the current time and advance by one millisecond per quote.")]
pub struct SeedCommand {
    #[arg(long, env = "QUOTES_TABLE", default_value = DEFAULT_TABLE_NAME)]
    pub table_name: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
        DynamodbAction::Seed(seed_cmd) => run_seed(seed_cmd, &global).await,
    }
}

fn confirm(prompt: &str, default: bool) -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?;

    if confirmed {
        Ok(())
    } else {
        Err(DynamodbError::UserCancelled)
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();
    let silent = global.is_silent();

    if !silent {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await;
    let current_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;

    if cmd.destroy {
        let plan = planning::calculate_destroy_plan(current_state.as_ref(), &cmd.table_name);

        if !silent {
            aprintln!("{}", p_y("Destroy Plan:"));
            for line in planning::format_destroy_plan(&plan) {
                aprintln!("  {}", p_plan(&line));
            }
            aprintln!();
        }

        if matches!(plan, planning::DestroyPlan::AlreadyGone { .. }) {
            if !silent {
                aprintln!("{}", p_g("Nothing to destroy."));
            }
            return Ok(());
        }

        if !cmd.force {
            confirm(
                "Are you sure you want to delete this table? ALL QUOTES WILL BE LOST",
                false,
            )?;
        }

        deploy::execute_destroy_plan(&dynamo_client, &plan).await?;

        if !silent {
            aprintln!("{}", p_g("Table destroyed successfully."));
        }
        return Ok(());
    }

    let table_config = config::quotes_table_config().with_table_name(&cmd.table_name);
    let plan = planning::calculate_deploy_plan(current_state.as_ref(), &table_config);

    if !silent {
        aprintln!("{}", p_c("Deploy Plan:"));
        for line in planning::format_deploy_plan(&plan) {
            aprintln!("  {}", p_plan(&line));
        }
        aprintln!();
    }

    if matches!(plan, planning::DeployPlan::NoChanges { .. }) {
        if !silent {
            aprintln!("{}", p_g("Infrastructure is up to date."));
        }
        return Ok(());
    }

    if !cmd.force {
        confirm("Apply these changes?", true)?;
    }

    if !silent {
        aprintln!("{}", p_b("Applying changes..."));
    }

    deploy::execute_deploy_plan(&dynamo_client, &plan).await?;

    if !silent {
        aprintln!("{}", p_g("Infrastructure deployed successfully."));
    }

    Ok(())
}

async fn run_seed(cmd: SeedCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();
    let silent = global.is_silent();
    let quotes = generate_sample_quotes(chrono::Utc::now());

    if !silent {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!("{} {}", p_b("Table:"), cmd.table_name);
        aprintln!("{} {}", p_b("Quote count:"), quotes.len());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await;

    let current_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;
    if current_state.is_none() {
        return Err(DynamodbError::TableNotFound {
            table_name: cmd.table_name,
        });
    }

    if !silent {
        aprintln!("{}", p_c("Quotes to insert:"));
        for quote in quotes.iter().take(5) {
            aprintln!("  {} - {} ({})", quote.quote_id, quote.author, quote.genre);
        }
        if quotes.len() > 5 {
            aprintln!("  ... and {} more", quotes.len() - 5);
        }
        aprintln!();
    }

    if !cmd.force {
        confirm(&format!("Insert {} quotes?", quotes.len()), true)?;
    }

    let summary = seed::seed_quotes(&dynamo_client, &cmd.table_name, &quotes).await?;

    if !silent {
        aprintln!(
            "{} {} quotes inserted, {} already present.",
            p_g("Success:"),
            summary.inserted,
            summary.skipped
        );
    }

    Ok(())
}
