//! # Takeoff CLI
//!
//! Reporting front end over a snapshot storage directory: per-category
//! volume/cost totals and door/window schedules, as text or JSON.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use takeoff_core::calculations::format_quantity;
use takeoff_core::project::CategoryTotals;
use takeoff_core::rollup::schedule_total_cost;
use takeoff_core::{save_project, FileSnapshotStore, OpeningKind, Project, ScheduleRow, TakeoffResult};
use tracing_subscriber::EnvFilter;

use config::{ConfigFile, Settings};

#[derive(Debug, Parser)]
#[command(name = "takeoff", version, about = "Building quantity takeoff reports")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot storage directory
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Log filter, e.g. "takeoff_core=debug" (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Volume and cost totals for every category
    Totals {
        #[arg(long)]
        json: bool,
    },
    /// Door or window schedule across wall categories
    Schedule {
        /// "door" or "window"
        kind: OpeningKind,
        #[arg(long)]
        json: bool,
    },
    /// Write every category into a single project file
    Export {
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let file = match cli.config.as_deref().map(ConfigFile::load).transpose() {
        Ok(file) => file.unwrap_or_default(),
        Err(e) => {
            report_error(&e);
            return ExitCode::FAILURE;
        }
    };
    let settings = Settings::resolve(file, cli.store.clone(), cli.log.clone());
    init_tracing(&settings.log_filter);

    match run(&cli.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: &Command, settings: &Settings) -> TakeoffResult<()> {
    let store = FileSnapshotStore::open_read_only(&settings.storage_dir)?;
    let project = Project::load_from(&store)?;
    tracing::info!(dir = %settings.storage_dir.display(), "project loaded");

    match command {
        Command::Totals { json } => {
            let totals = project.all_totals();
            if *json {
                println!("{}", serde_json::to_string_pretty(&totals)?);
            } else {
                print_totals(&totals);
            }
        }
        Command::Schedule { kind, json } => {
            let rows = project.schedule(*kind);
            if *json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print_schedule(*kind, &rows);
            }
        }
        Command::Export { out } => {
            save_project(&project, out)?;
            println!("Exported to {}", out.display());
        }
    }
    Ok(())
}

fn print_totals(totals: &[CategoryTotals]) {
    println!("{:<16} {:>8} {:>14} {:>14}", "Category", "Records", "Volume (cu ft)", "Cost");
    println!("{}", "─".repeat(55));
    for line in totals {
        println!(
            "{:<16} {:>8} {:>14} {:>14}",
            line.category.display_name(),
            line.records,
            format_quantity(line.volume),
            format_quantity(line.cost)
        );
    }
    println!("{}", "─".repeat(55));
    let volume: f64 = totals.iter().map(|t| t.volume).sum();
    let cost: f64 = totals.iter().map(|t| t.cost).sum();
    println!("{:<16} {:>8} {:>14} {:>14}", "Total", "", format_quantity(volume), format_quantity(cost));
}

fn print_schedule(kind: OpeningKind, rows: &[ScheduleRow]) {
    println!("{} SCHEDULE", kind.display_name().to_uppercase());
    println!(
        "{:>4}  {:<14} {:<12} {:>10} {:>12} {:>12}",
        "Sr", "Wall", "Type", "Area", "Cost/Unit", "Total"
    );
    println!("{}", "─".repeat(70));
    for row in rows {
        println!(
            "{:>4}  {:<14} {:<12} {:>10} {:>12} {:>12}",
            row.sr_no,
            row.wall_origin,
            row.opening_type,
            cell(row.area),
            cell(row.cost_per_unit),
            cell(row.total_cost)
        );
    }
    println!("{}", "─".repeat(70));
    println!("{:>4}  {:<14} {:>50}", rows.len(), "rows", format_quantity(schedule_total_cost(rows)));
}

/// Absent values print blank, not zero
fn cell(value: Option<f64>) -> String {
    value.map(format_quantity).unwrap_or_default()
}

fn report_error(e: &takeoff_core::TakeoffError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}
