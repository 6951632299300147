//! `talenthub` command line entry point.
//!
//! # Responsibility
//! - Load configuration, start logging and open the store.
//! - Expose read-mostly views over the core services as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use talenthub_core::model::{CompetitionId, TalentId};
use talenthub_core::{
    AppConfig, CompetitionService, EventService, FetchReportsOptions, ReportService,
    SettingsService, SqliteStore, TalentService, TimeFrame,
};

#[derive(Parser, Debug)]
#[command(name = "talenthub", version, about = "Youth talent management toolkit")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check core linkage and print the core version
    Ping,
    /// Talent records
    Talents {
        #[command(subcommand)]
        command: TalentCommands,
    },
    /// Events
    Events {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Competitions
    Competitions {
        #[command(subcommand)]
        command: CompetitionCommands,
    },
    /// Reports
    Reports {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Session user settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand, Debug)]
enum TalentCommands {
    /// List all talents by name
    List,
    /// Case-insensitive search over name, email and bio
    Search { text: String },
    /// One talent with achievements, stories and competitions
    Show { id: TalentId },
}

#[derive(Subcommand, Debug)]
enum EventCommands {
    /// Events starting now or later
    Upcoming,
}

#[derive(Subcommand, Debug)]
enum CompetitionCommands {
    /// Competitions dated now or later
    Upcoming,
    /// One competition with its participant ids
    Show { id: CompetitionId },
}

#[derive(Subcommand, Debug)]
enum ReportCommands {
    /// One page of reports, newest first
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
        /// Substring of the report type
        #[arg(long = "type")]
        report_type: Option<String>,
        #[arg(long)]
        discipline: Option<String>,
        /// Substring of title or author
        #[arg(long)]
        search: Option<String>,
        /// all, recent, financial or performance
        #[arg(long, default_value = "all")]
        time_frame: TimeFrame,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommands {
    /// Stored settings, or defaults when none were saved
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    config
        .init_logging()
        .context("failed to initialize logging")?;

    if let Commands::Ping = cli.command {
        println!("talenthub_core ping={}", talenthub_core::ping());
        println!("talenthub_core version={}", talenthub_core::core_version());
        return Ok(());
    }

    let store = config.open_store().context("failed to open store")?;
    info!("event=cli_command module=cli status=start command={:?}", cli.command);
    run(&store, cli.command)
}

fn run(store: &SqliteStore, command: Commands) -> Result<()> {
    match command {
        Commands::Ping => Ok(()),
        Commands::Talents { command } => {
            let talents = TalentService::new(store);
            match command {
                TalentCommands::List => print_json(&talents.get_all()?),
                TalentCommands::Search { text } => print_json(&talents.search(&text)?),
                TalentCommands::Show { id } => {
                    print_json(&talents.get_talent_with_all_details(id)?)
                }
            }
        }
        Commands::Events {
            command: EventCommands::Upcoming,
        } => print_json(&EventService::new(store).get_upcoming_events()?),
        Commands::Competitions { command } => {
            let competitions = CompetitionService::new(store);
            match command {
                CompetitionCommands::Upcoming => {
                    print_json(&competitions.get_upcoming_competitions()?)
                }
                CompetitionCommands::Show { id } => {
                    print_json(&competitions.get_competition_with_participants(id)?)
                }
            }
        }
        Commands::Reports {
            command:
                ReportCommands::List {
                    page,
                    page_size,
                    report_type,
                    discipline,
                    search,
                    time_frame,
                },
        } => {
            let options = FetchReportsOptions {
                page,
                page_size,
                report_type,
                discipline,
                search,
                time_frame,
            };
            print_json(&ReportService::new(store).fetch_reports(&options)?)
        }
        Commands::Settings {
            command: SettingsCommands::Show,
        } => print_json(&SettingsService::new(store).get_user_settings()?),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{out}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, ReportCommands, TalentCommands};
    use clap::Parser;
    use talenthub_core::TimeFrame;

    #[test]
    fn parses_nested_talent_search() {
        let cli = Cli::parse_from(["talenthub", "talents", "search", "ana"]);
        assert!(matches!(
            cli.command,
            Commands::Talents {
                command: TalentCommands::Search { text }
            } if text == "ana"
        ));
    }

    #[test]
    fn report_options_have_defaults() {
        let cli = Cli::parse_from(["talenthub", "reports", "list", "--time-frame", "recent"]);
        match cli.command {
            Commands::Reports {
                command:
                    ReportCommands::List {
                        page,
                        page_size,
                        time_frame,
                        ..
                    },
            } => {
                assert_eq!(page, 1);
                assert_eq!(page_size, 10);
                assert_eq!(time_frame, TimeFrame::Recent);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_talent_id() {
        assert!(Cli::try_parse_from(["talenthub", "talents", "show", "not-a-uuid"]).is_err());
    }
}
