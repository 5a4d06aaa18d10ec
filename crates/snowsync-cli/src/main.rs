mod pipeline;

use clap::{Parser, Subcommand};
use snowsync_core::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "snowsync-cli")]
#[command(about = "Ski resort snow report pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl all configured resort pages and refresh stored reports
    Run {
        /// Restrict the run to a single configured resort (by name)
        #[arg(long)]
        resort: Option<String>,

        /// Print what would be processed without fetching or writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the configured resort target list
    Targets,
    /// Print stored reports
    Report {
        /// Show a single resort instead of the full table
        #[arg(long)]
        resort: Option<String>,
    },
    /// Database administration
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check store connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // dotenv is already loaded, so skip the double-load in load_app_config.
    let config = snowsync_core::load_app_config_from_env()?;
    init_tracing(&config);

    match cli.command {
        Commands::Run { resort, dry_run } => {
            pipeline::run_command(&config, resort.as_deref(), dry_run).await
        }
        Commands::Targets => run_targets(&config),
        Commands::Report { resort } => run_report(&config, resort.as_deref()).await,
        Commands::Db { command } => match command {
            DbCommands::Ping => run_db_ping(&config).await,
            DbCommands::Migrate => run_db_migrate(&config).await,
        },
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_targets(config: &AppConfig) -> anyhow::Result<()> {
    let file = snowsync_core::load_resorts(&config.resorts_path)?;
    println!("{} configured resorts:", file.resorts.len());
    for target in &file.resorts {
        println!("  {} — {}", target.name, target.url);
    }
    Ok(())
}

async fn run_report(config: &AppConfig, resort: Option<&str>) -> anyhow::Result<()> {
    let pool = connect(config).await?;

    match resort {
        Some(name) => match snowsync_db::get_report(&pool, name).await? {
            Some(row) => print_report_row(&row.into()),
            None => println!("no stored report for '{name}'"),
        },
        None => {
            let rows = snowsync_db::list_reports(&pool).await?;
            if rows.is_empty() {
                println!("no stored reports; run `snowsync-cli run` first");
            }
            for row in rows {
                print_report_row(&row.into());
            }
        }
    }
    Ok(())
}

fn print_report_row(record: &snowsync_core::ResortRecord) {
    println!(
        "{}: past {} | forecast {} | depth {} | lifts {} | runs {}",
        record.name,
        format_days(&record.snowfall_past),
        format_days(&record.snowfall_forecast),
        record
            .mid_mountain_snow
            .map_or_else(|| "-".to_string(), |d| format!("{d}\"")),
        record.lifts_open.as_deref().unwrap_or("-"),
        record.runs_open.as_deref().unwrap_or("-"),
    );
}

/// Renders a six-day snowfall window as `0/2/-/11/4/0`.
fn format_days(days: &[Option<i32>; 6]) -> String {
    days.iter()
        .map(|d| d.map_or_else(|| "-".to_string(), |v| v.to_string()))
        .collect::<Vec<_>>()
        .join("/")
}

async fn run_db_ping(config: &AppConfig) -> anyhow::Result<()> {
    let pool = connect(config).await?;
    sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await?;
    println!("store reachable");
    Ok(())
}

async fn run_db_migrate(config: &AppConfig) -> anyhow::Result<()> {
    let pool = connect(config).await?;
    snowsync_db::run_migrations(&pool).await?;
    println!("migrations applied");
    Ok(())
}

async fn connect(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool = snowsync_db::connect_pool(
        &config.database_url,
        snowsync_db::PoolConfig::from_app_config(config),
    )
    .await?;
    Ok(pool)
}
