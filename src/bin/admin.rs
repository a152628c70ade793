//! CLI administration tool for url-alias.
//!
//! Lists and adds short links, shows counts and runs database checks
//! without going through the web form.
//!
//! # Usage
//!
//! ```bash
//! # List stored links
//! cargo run --bin admin -- links list
//!
//! # Shorten a URL
//! cargo run --bin admin -- links add https://example.com/some/page
//!
//! # Show counts
//! cargo run --bin admin -- stats
//!
//! # Apply migrations
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` components), `BASE_URL`,
//! `SHORT_CODE_LENGTH`.

use url_alias::application::services::SubmitOutcome;
use url_alias::config::{Config, load_from_env};
use url_alias::server;
use url_alias::state::LinkService;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-alias.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinksAction {
    /// List all links
    List,

    /// Shorten a URL
    Add {
        /// URL to shorten (prompted for if omitted)
        url: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_from_env()?;
    let pool = server::connect_pool(&config).await?;

    match cli.command {
        Commands::Links { action } => handle_links_action(action, pool, &config).await?,
        Commands::Stats => handle_stats(pool, &config).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_links_action(action: LinksAction, pool: PgPool, config: &Config) -> Result<()> {
    let service = server::build_link_service(Arc::new(pool), config);

    match action {
        LinksAction::List => list_links(&service, config).await?,
        LinksAction::Add { url, yes } => add_link(&service, config, url, yes).await?,
    }

    Ok(())
}

/// Prints every stored link in insertion order.
///
/// # Output Format
///
/// ```text
/// Short Links
///
///   ID    Code      Original URL
///   ────────────────────────────────────────────
///   1     aB3xY     https://example.com/page
/// ```
async fn list_links(service: &LinkService, config: &Config) -> Result<()> {
    println!("{}", "Short Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Add one with: {} admin links add <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<9} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<5} {:<9} {}",
            link.id.to_string().bright_black(),
            link.short_code.cyan(),
            link.original_url
        );
    }

    println!();
    println!(
        "  Total: {}  (served under {})",
        links.len().to_string().bright_white().bold(),
        config.base_url.bright_black()
    );
    println!();

    Ok(())
}

/// Shortens a URL through the same workflow as the web form.
async fn add_link(
    service: &LinkService,
    config: &Config,
    url: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Shorten URL".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("URL").interact_text()?,
    };

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Shorten {}?", url.trim()))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let outcome = service
        .submit(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    match outcome {
        SubmitOutcome::Created(link) => {
            println!();
            println!("{}", "Link created".green().bold());
            println!("  Code:      {}", link.short_code.bright_yellow().bold());
            println!("  Short URL: {}", link.short_url(&config.base_url).cyan());
        }
        SubmitOutcome::Declined(decline) => {
            println!();
            println!("{}", decline.message().yellow());
        }
    }
    println!();

    Ok(())
}

async fn handle_stats(pool: PgPool, config: &Config) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let service = server::build_link_service(Arc::new(pool), config);
    let links_count = service
        .count_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    println!(
        "  Links:       {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Code length: {}",
        service.code_length().to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "Applying migrations...".bright_blue());

            server::migrate(pool).await?;

            println!("{}", "Migrations applied".green().bold());
        }
    }

    Ok(())
}
