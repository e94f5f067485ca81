mod query;
mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use outletdb_core::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "outletdb-cli")]
#[command(about = "Scrape and query McDonald's Malaysia outlet data")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Load the locator page, extract outlets and store them
    Scrape {
        /// Read a saved, rendered locator page instead of fetching over HTTP
        #[arg(long)]
        html_file: Option<PathBuf>,

        /// Print what would be stored without touching the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Print every stored outlet
    List,
    /// Ask a plain-language question about outlet features
    Ask {
        /// e.g. "Which outlets have WiFi in KL?"
        question: String,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("outletdb-cli: run with --help to list commands");
        return Ok(());
    };

    let config = outletdb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Db { command } => {
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    outletdb_db::health_check(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = outletdb_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        Commands::Scrape { html_file, dry_run } => {
            scrape::run_scrape(&config, html_file.as_deref(), dry_run).await?;
        }
        Commands::List => {
            let pool = connect(&config).await?;
            query::run_list(&pool).await?;
        }
        Commands::Ask { question } => {
            let pool = connect(&config).await?;
            query::run_ask(&config, &pool, &question).await?;
        }
    }

    Ok(())
}

/// Connect and bring the schema up to date.
pub(crate) async fn connect(config: &AppConfig) -> anyhow::Result<sqlx::SqlitePool> {
    let pool_config = outletdb_db::PoolConfig::from_app_config(config);
    let pool = outletdb_db::connect_pool(&config.database_url, pool_config).await?;
    outletdb_db::run_migrations(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests;
