//! fleet-console: command-line front end for the fleet add-ins
//!
//! - `zones`: the yard-move zone classifier (list, search, move, export)
//! - `assets`: the read-only Ruckit asset-mapping viewer

mod commands;
mod config;
mod logger;

use clap::{Parser, Subcommand, ValueEnum};
use config::{ConnectionArgs, LogArgs};
use fleet_client::GeotabClient;
use std::path::PathBuf;
use std::process::ExitCode;
use yard_zones::{ExportFormat, ZoneList};

#[derive(Parser)]
#[command(name = "fleet-console")]
#[command(about = "Yard-move zone classifier and asset-mapping viewer")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    log: LogArgs,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Regular and yard-move zones
    Zones {
        #[command(subcommand)]
        command: ZonesCommand,
    },
    /// Ruckit asset mappings
    Assets {
        #[command(subcommand)]
        command: AssetsCommand,
    },
}

#[derive(Subcommand)]
enum ZonesCommand {
    /// Show both lists
    List {
        /// Filter for the regular list
        #[arg(long, default_value = "")]
        regular_search: String,
        /// Filter for the yard-move list
        #[arg(long, default_value = "")]
        yard_move_search: String,
    },
    /// Type search terms line by line; the list is redrawn once typing settles
    Search {
        #[arg(long, default_value = "regular")]
        list: ZoneList,
    },
    /// Move one zone into a list (`regular` or `yard-move`)
    Move { zone_id: String, to: ZoneList },
    /// Write both lists to `yard-move-zones-YYYY-MM-DD.{csv,json}`
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormatCli::Csv)]
        format: ExportFormatCli,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Print the platform link for creating a new zone
    CreateUrl,
}

#[derive(Subcommand)]
enum AssetsCommand {
    List,
    /// Write `ruckit-assets-YYYY-MM-DD.csv`
    Export {
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExportFormatCli {
    Csv,
    Json,
}

impl From<ExportFormatCli> for ExportFormat {
    fn from(value: ExportFormatCli) -> Self {
        match value {
            ExportFormatCli::Csv => Self::Csv,
            ExportFormatCli::Json => Self::Json,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = logger::init_logger(
        &cli.log.log_level,
        cli.log.log_json,
        cli.log.log_dir.as_deref(),
    ) {
        eprintln!("failed to initialize logging: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = GeotabClient::connect(&cli.connection.client_config()).await?;
    tracing::info!(
        database = %client.session().database(),
        user = %client.session().user_name(),
        "Connected"
    );

    match cli.command {
        Command::Zones { command } => match command {
            ZonesCommand::List {
                regular_search,
                yard_move_search,
            } => commands::zones_list(client, &regular_search, &yard_move_search, cli.json).await,
            ZonesCommand::Search { list } => commands::zones_search(client, list, cli.json).await,
            ZonesCommand::Move { zone_id, to } => commands::zones_move(client, &zone_id, to).await,
            ZonesCommand::Export { format, out } => {
                commands::zones_export(client, format.into(), &out).await
            }
            ZonesCommand::CreateUrl => {
                println!("{}", client.session().create_zone_url());
                Ok(())
            }
        },
        Command::Assets { command } => match command {
            AssetsCommand::List => commands::assets_list(client, cli.json).await,
            AssetsCommand::Export { out } => commands::assets_export(client, &out).await,
        },
    }
}
