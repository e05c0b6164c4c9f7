//! CLI administration tool for click-tracker.
//!
//! Provides commands for managing the identity blocklist, inspecting
//! campaigns and click totals, and checking the database without going
//! through the HTTP service.
//!
//! # Usage
//!
//! ```bash
//! # Block a user id, GAID or IDFA
//! cargo run --bin admin -- blocklist add 38400000-8cf0-11bd-b23e-10b96e40000d --reason "chargeback"
//!
//! # List blocked identities
//! cargo run --bin admin -- blocklist list
//!
//! # Unblock an identity
//! cargo run --bin admin -- blocklist remove 38400000-8cf0-11bd-b23e-10b96e40000d
//!
//! # List campaigns
//! cargo run --bin admin -- campaigns
//!
//! # View click totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use click_tracker::infrastructure::persistence::PgBlocklistRepository;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// CLI tool for managing click-tracker.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage blocked identities (user ids, GAIDs, IDFAs)
    Blocklist {
        #[command(subcommand)]
        action: BlocklistAction,
    },

    /// List campaigns with status and window
    Campaigns,

    /// Show click totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Blocklist management subcommands.
#[derive(Subcommand)]
enum BlocklistAction {
    /// Block an identity
    Add {
        /// Identity value to block
        value: String,

        /// Why the identity is blocked
        #[arg(short, long)]
        reason: Option<String>,
    },

    /// Unblock an identity
    Remove {
        /// Identity value to unblock
        value: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List blocked identities
    List,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[derive(sqlx::FromRow)]
struct CampaignSummary {
    campaign_id: Uuid,
    link_id: Uuid,
    name: String,
    status: String,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Blocklist { action } => handle_blocklist_action(action, &pool).await?,
        Commands::Campaigns => list_campaigns(&pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches blocklist management commands.
async fn handle_blocklist_action(action: BlocklistAction, pool: &PgPool) -> Result<()> {
    let repo = PgBlocklistRepository::new(Arc::new(pool.clone()));

    match action {
        BlocklistAction::Add { value, reason } => add_entry(&repo, &value, reason).await?,
        BlocklistAction::Remove { value, yes } => remove_entry(&repo, &value, yes).await?,
        BlocklistAction::List => list_entries(&repo).await?,
    }

    Ok(())
}

async fn add_entry(
    repo: &PgBlocklistRepository,
    value: &str,
    reason: Option<String>,
) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        anyhow::bail!("Value must not be empty");
    }

    let added = repo
        .add(value, reason.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to add blocklist entry: {}", e))?;

    if added {
        println!("{} {}", "✅ Blocked".green().bold(), value.cyan());
    } else {
        println!("{} {}", "⚠️  Already blocked:".yellow(), value.cyan());
    }

    Ok(())
}

/// Removes an entry, asking for confirmation unless `--yes` is given.
async fn remove_entry(repo: &PgBlocklistRepository, value: &str, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Unblock '{}'?", value))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let removed = repo
        .remove(value)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to remove blocklist entry: {}", e))?;

    if removed {
        println!("{} {}", "✅ Unblocked".green().bold(), value.cyan());
    } else {
        println!("{} {}", "⚠️  Not in blocklist:".yellow(), value.cyan());
    }

    Ok(())
}

/// Lists blocked identities, newest first.
///
/// # Output Format
///
/// ```text
/// 🚫 Blocklist
///
///   Value                                    Added             Reason
///   ──────────────────────────────────────────────────────────────────────────
///   38400000-8cf0-11bd-b23e-10b96e40000d     2025-01-15 10:30  chargeback
/// ```
async fn list_entries(repo: &PgBlocklistRepository) -> Result<()> {
    println!("{}", "🚫 Blocklist".bright_blue().bold());
    println!();

    let entries = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list blocklist: {}", e))?;

    if entries.is_empty() {
        println!("{}", "  Blocklist is empty".yellow());
        return Ok(());
    }

    println!(
        "  {:<40} {:<17} {}",
        "Value".bright_white().bold(),
        "Added".bright_white().bold(),
        "Reason".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for entry in &entries {
        println!(
            "  {:<40} {:<17} {}",
            entry.value.cyan(),
            entry
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            entry.reason.as_deref().unwrap_or("-")
        );
    }

    println!();
    println!(
        "  Total: {}",
        entries.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Lists campaigns with their tracking link, status and window.
async fn list_campaigns(pool: &PgPool) -> Result<()> {
    println!("{}", "📣 Campaigns".bright_blue().bold());
    println!();

    let campaigns = sqlx::query_as::<_, CampaignSummary>(
        r#"
        SELECT campaign_id, link_id, name, status::text AS status, start_date, end_date
        FROM campaigns
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    if campaigns.is_empty() {
        println!("{}", "  No campaigns found".yellow());
        return Ok(());
    }

    for campaign in &campaigns {
        let status = match campaign.status.as_str() {
            "active" => campaign.status.to_uppercase().green(),
            "paused" => campaign.status.to_uppercase().yellow(),
            _ => campaign.status.to_uppercase().bright_black(),
        };

        println!("  {} {}", campaign.name.cyan().bold(), status);
        println!(
            "    Campaign: {}",
            campaign.campaign_id.to_string().bright_black()
        );
        println!("    Link:     /track/{}", campaign.link_id);
        println!(
            "    Window:   {} → {}",
            format_date(campaign.start_date),
            format_date(campaign.end_date)
        );
        println!();
    }

    println!(
        "  Total: {}",
        campaigns.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unset".to_string())
}

/// Displays click totals by classification.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let campaigns_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM campaigns")
        .fetch_one(pool)
        .await?;

    let allowed_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM clicks WHERE status = 'allowed'")
            .fetch_one(pool)
            .await?;

    let fraud_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks WHERE status = 'fraud'")
        .fetch_one(pool)
        .await?;

    let blocked_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blocklist")
        .fetch_one(pool)
        .await?;

    println!(
        "  Campaigns:        {}",
        campaigns_count.to_string().bright_green().bold()
    );
    println!(
        "  Allowed clicks:   {}",
        allowed_count.to_string().bright_green().bold()
    );
    println!(
        "  Fraud clicks:     {}",
        fraud_count.to_string().bright_red().bold()
    );
    println!(
        "  Blocked entries:  {}",
        blocked_count.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
