//! Scrape one club's squad page into the local database
//!
//! Usage: squad_scrape <CLUB_ID> [--config PATH] [--csv-dir DIR]
//!
//! Prints the summary and error list as JSON on stdout. Exits 1 when the
//! scrape fails at operation level (unknown club, missing URL, fetch failure).

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use squad_scraper::application::{ScrapeClubUseCase, SquadScraper};
use squad_scraper::infrastructure::export::write_outcome_csv;
use squad_scraper::infrastructure::logging::{init_logging_with_config, log_system_info};
use squad_scraper::infrastructure::{
    AppConfig, DatabaseConnection, HttpClient, HttpClientConfig, RosterTableReader,
    SqliteAthleteRepository,
};

#[derive(Parser, Debug)]
#[command(name = "squad_scrape")]
#[command(about = "Scrape one club's squad page into the local database", long_about = None)]
struct Cli {
    /// Id of the club to scrape
    club_id: i64,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Also write goalkeepers.csv and field_players.csv into this directory
    #[arg(long)]
    csv_dir: Option<PathBuf>,
}

async fn run(args: Cli, config: AppConfig) -> Result<bool> {
    let db = DatabaseConnection::from_config(&config.database).await?;
    db.migrate().await?;
    let repository = Arc::new(SqliteAthleteRepository::new(db.pool().clone()));

    let http_client = HttpClient::new(HttpClientConfig::from_scraper_config(&config.scraper))?;
    let scraper = SquadScraper::new(Arc::new(http_client), repository.clone())?
        .with_table_reader(RosterTableReader::with_table_selector(&config.scraper.table_selector)?);
    let use_case = ScrapeClubUseCase::new(repository, scraper)
        .with_run_timeout(config.scraper.run_timeout_seconds.map(Duration::from_secs));

    // Ctrl-C cancels the run; the partial outcome is still reported
    let cancellation_token = CancellationToken::new();
    let signal_token = cancellation_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("🛑 Interrupt received, cancelling scrape");
            signal_token.cancel();
        }
    });

    match use_case.execute(args.club_id, &cancellation_token).await {
        Ok(outcome) => {
            if let Some(dir) = &args.csv_dir {
                write_outcome_csv(dir, &outcome)?;
            }
            let report = json!({
                "clubId": args.club_id,
                "persisted": outcome.persisted,
                "summary": outcome.summary(),
                "errors": outcome.errors,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(true)
        }
        Err(e) => {
            error!("❌ Scrape failed: {}", e);
            let report = json!({ "clubId": args.club_id, "error": e.to_string() });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(false)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors exit with code 2, --help with 0
    let args = Cli::parse();

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging_with_config(config.logging.clone()) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }
    log_system_info();
    info!("Scraping club {}", args.club_id);

    match run(args, config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_club_id_and_options() {
        let cli = Cli::try_parse_from([
            "squad_scrape",
            "7",
            "--config=scraper.toml",
            "--csv-dir",
            "out",
        ])
        .unwrap();
        assert_eq!(cli.club_id, 7);
        assert_eq!(cli.config.as_deref(), Some("scraper.toml"));
        assert_eq!(cli.csv_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_help_is_not_mistaken_for_a_club_id() {
        let err = Cli::try_parse_from(["squad_scrape", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_usage_errors_exit_with_two() {
        for args in [vec!["squad_scrape"], vec!["squad_scrape", "abc"]] {
            let err = Cli::try_parse_from(args).unwrap_err();
            assert_eq!(err.exit_code(), 2);
        }
    }
}
