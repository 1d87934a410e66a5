use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shared_config::ConfigArgs;

/// Produces an optimal monthly duty roster for occupational physicians.
#[derive(Debug, Parser)]
#[command(name = "planner", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read input tables, solve the assignment problem, and write the schedule.
    Plan(PlanArgs),
}

/// Either the CSV table set (`--doctors`/`--locations`/`--sessions` required,
/// the rest optional) or a single `--xlsx` workbook with the tabs `Doctors,
/// Locations, Rooms, Sessions, Preferences, TravelTimes, DoctorWorkdays,
/// DoctorWeekRules` is required; `run_plan` rejects the case where neither or
/// both are given.
#[derive(Debug, Args)]
pub struct PlanArgs {
    #[arg(long)]
    pub doctors: Option<PathBuf>,
    #[arg(long)]
    pub locations: Option<PathBuf>,
    #[arg(long)]
    pub sessions: Option<PathBuf>,
    #[arg(long)]
    pub rooms: Option<PathBuf>,
    #[arg(long)]
    pub preferences: Option<PathBuf>,
    #[arg(long)]
    pub travel_times: Option<PathBuf>,
    #[arg(long)]
    pub doctor_workdays: Option<PathBuf>,
    #[arg(long)]
    pub doctor_week_rules: Option<PathBuf>,
    #[arg(long)]
    pub xlsx: Option<PathBuf>,

    #[arg(long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,
}
