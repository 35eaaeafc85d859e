//! vscout CLI
//!
//! Inspect saved scouting sessions: list saves, print box scores and player
//! rankings, export the event log to CSV, and check snapshot files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use vscout_core::analysis::{Highlight, StatFilter, StatSummary};
use vscout_core::config::{LabelSet, ScoutConfig};
use vscout_core::save::{DirectoryRepository, MatchSnapshot, SnapshotRepository};
use vscout_core::{ExportOptions, MatchSession, TeamSide};

#[derive(Parser)]
#[command(name = "vscout")]
#[command(about = "Inspect, rank and export saved volleyball matches", long_about = None)]
struct Cli {
    /// Config file (overrides VSCOUT_CONFIG_PATH)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Save directory (overrides the config)
    #[arg(long, global = true)]
    save_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved matches, newest first
    List,

    /// Print a box score for a saved match
    Stats {
        /// Save key
        key: String,

        /// Restrict to one side
        #[arg(long, value_enum)]
        side: Option<SideArg>,

        /// Restrict to one jersey number (requires --side)
        #[arg(long, requires = "side")]
        player: Option<String>,

        /// Print JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Rank one side's players by points scored
    Ranking {
        /// Save key
        key: String,

        #[arg(long, value_enum, default_value = "home")]
        side: SideArg,
    },

    /// Export the full event log as CSV
    Export {
        /// Save key
        key: String,

        /// Output CSV file path
        #[arg(long)]
        out: PathBuf,

        /// Label language (defaults to the config)
        #[arg(long, value_enum)]
        labels: Option<LabelArg>,
    },

    /// Check a snapshot file without loading it into a save directory
    Validate {
        /// Snapshot JSON file
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Home,
    Away,
}

impl From<SideArg> for TeamSide {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Home => TeamSide::Home,
            SideArg::Away => TeamSide::Away,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LabelArg {
    En,
    ZhTw,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let save_dir = cli.save_dir.clone().unwrap_or_else(|| config.storage.save_dir.clone());
    let repo = DirectoryRepository::new(save_dir);

    match cli.command {
        Commands::List => {
            let saves = repo
                .list()
                .with_context(|| format!("Failed to list saves in {}", repo.dir().display()))?;
            if saves.is_empty() {
                println!("No saves in {}", repo.dir().display());
            }
            for info in saves {
                println!("{:<32} {:<24} {}", info.key, info.label, info.format_timestamp());
            }
        }

        Commands::Stats { key, side, player, json } => {
            let session = open(&repo, &key)?;
            let filter = StatFilter { side: side.map(TeamSide::from), player };

            if json {
                let report = serde_json::json!({
                    "filtered": session.stats(&filter),
                    "comparison": session.compare_teams(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_header(&session);
                print_summary(&session.stats(&filter));
            }
        }

        Commands::Ranking { key, side } => {
            let session = open(&repo, &key)?;
            let side = TeamSide::from(side);
            print_header(&session);
            println!("{} players:", session.config().side_name(side));
            for entry in session.ranking(side) {
                let mark = match entry.highlight {
                    Some(Highlight::Top1) => "**",
                    Some(Highlight::Top2) => "*",
                    None => "",
                };
                println!(
                    "  #{:<4} {:>3} pts  atk {}/{} ({}%)  blk {}  ace {}{}",
                    entry.number,
                    entry.points,
                    entry.summary.attack_kills,
                    entry.summary.attack_total,
                    entry.summary.attack_success_percent(),
                    entry.summary.blocks,
                    entry.summary.serve_aces,
                    if mark.is_empty() { String::new() } else { format!("  {}", mark) }
                );
            }
        }

        Commands::Export { key, out, labels } => {
            let session = open(&repo, &key)?;
            let mut options = ExportOptions::from_config(&config);
            match labels {
                Some(LabelArg::En) => options.labels = LabelSet::english(),
                Some(LabelArg::ZhTw) => options.labels = LabelSet::traditional_chinese(),
                None => {}
            }

            let bytes = session.export_csv(&options).context("Failed to build CSV")?;
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            std::fs::write(&out, &bytes)
                .with_context(|| format!("Failed to write CSV: {}", out.display()))?;
            println!("Exported {} bytes to {}", bytes.len(), out.display());
        }

        Commands::Validate { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read snapshot: {}", file.display()))?;
            let snapshot = MatchSnapshot::from_json(&text)
                .with_context(|| format!("Invalid snapshot: {}", file.display()))?;
            let state = &snapshot.state;
            println!(
                "OK: {} vs {}, set {}, {}-{} ({} events)",
                snapshot.config.home_name,
                snapshot.config.away_name,
                state.set_number,
                state.home_score,
                state.away_score,
                state.event_count()
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ScoutConfig> {
    match path {
        Some(path) => ScoutConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => ScoutConfig::from_env().context("Failed to load config from environment"),
    }
}

fn open(repo: &DirectoryRepository, key: &str) -> Result<MatchSession> {
    let snapshot = repo.load(key).with_context(|| format!("Failed to load save '{}'", key))?;
    log::debug!("Opened '{}' from {}", key, repo.dir().display());
    Ok(MatchSession::from_snapshot(snapshot)?)
}

fn print_header(session: &MatchSession) {
    let state = session.current();
    let config = session.config();
    println!(
        "{} {} - {} {}  (sets {}-{}, set {} in play)",
        config.home_name,
        state.home_score,
        state.away_score,
        config.away_name,
        state.home_set_wins,
        state.away_set_wins,
        state.set_number
    );
}

fn print_summary(s: &StatSummary) {
    println!(
        "  Attack:  {}/{} ({}%)",
        s.attack_kills,
        s.attack_total,
        s.attack_success_percent()
    );
    println!("  Blocks:  {}", s.blocks);
    println!("  Aces:    {}  (serve errors {})", s.serve_aces, s.serve_errors);
    println!("  Digs:    {}", s.digs);
    println!("  Points:  {}", s.total_points());
}
