// src/main.rs
use anyhow::{anyhow, Result};
use clap::Parser;
use db_json_extractor::config::Config;
use db_json_extractor::db::gateway::{DbGateway, MySqlGateway, PostgresGateway, SqliteGateway};
use db_json_extractor::export::exporter::TableExporter;
use db_json_extractor::format::FormatMode;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file holding server address, database name and credentials
    #[arg(long, default_value = "config.json")]
    config: String,
    /// Database backend: postgres, mysql or sqlite
    #[arg(long, default_value = "postgres")]
    db_type: String,
    /// Directory the per-table JSON files are written into
    #[arg(long, default_value = "output")]
    output_dir: String,
    /// Write straight into the output directory instead of a per-run
    /// timestamped subfolder
    #[arg(long, default_value_t = false)]
    no_timestamp: bool,
    /// Keep the raw value when declared-type coercion fails instead of
    /// failing that table
    #[arg(long, default_value_t = false)]
    lenient: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_timer(ChronoLocal::new("[%Y-%m-%d %H:%M:%S]:".to_string()))
        .with_target(false)
        .with_level(false)
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config)?;

    let gateway: Box<dyn DbGateway> = match args.db_type.to_lowercase().as_str() {
        "postgres" | "postgresql" => Box::new(PostgresGateway::new(&config)?),
        "mysql" | "mariadb" => Box::new(MySqlGateway::new(&config)?),
        "sqlite" => Box::new(SqliteGateway::new(&config)?),
        other => {
            return Err(anyhow!(
                "Unsupported database type: '{other}'. Supported types: postgres, mysql, sqlite"
            ))
        }
    };

    let mode = if args.lenient {
        FormatMode::Lenient
    } else {
        FormatMode::Strict
    };
    let exporter = TableExporter::new(gateway, mode, &args.output_dir, !args.no_timestamp);
    exporter.run().await?;
    Ok(())
}
