use std::time::Duration;

use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use clap::Parser;
use cli::{Cli, Command, PlanArgs};
use eligibility_cell::compute_eligibility;
use shared_config::{InfeasibleSessionPolicy, PlannerConfig};
use shared_io::write_schedule_csv;
use shared_models::PlannerError;
use solver_cell::{materialize, solve, SolveOutcome};

fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let Command::Plan(args) = cli.command;

    let exit_code = match run_plan(args) {
        Ok(()) => 0,
        Err(err) => err.exit_code(),
    };
    std::process::exit(exit_code);
}

fn run_plan(args: PlanArgs) -> Result<(), PlannerError> {
    let config = PlannerConfig::from_env().apply_overrides(&args.config);

    info!("loading input tables");
    let tables = load_tables(&args)?;
    let input = input_cell::normalize(tables, config.default_preference_score)?;
    info!(
        physicians = input.physicians.len(),
        locations = input.locations.len(),
        sessions = input.sessions.len(),
        "input normalized"
    );

    let eligibility = compute_eligibility(&input);
    if !eligibility.diagnostics.is_empty() {
        warn!(
            count = eligibility.diagnostics.len(),
            "sessions with no eligible physician after preprocessing"
        );
        if config.infeasible_session_policy == InfeasibleSessionPolicy::Fail {
            return Err(PlannerError::ModelInfeasible {
                witness: shared_models::SaturationWitness {
                    scope: eligibility.diagnostics[0].session_id.clone(),
                    required: 1,
                    available: 0,
                },
            });
        }
    }

    let outcome = solve(
        &input,
        &eligibility,
        Duration::from_secs(config.time_budget_seconds as u64),
        config.random_seed,
        config.worker_count,
    );

    match outcome {
        SolveOutcome::Infeasible { witness } => {
            return Err(PlannerError::ModelInfeasible { witness });
        }
        SolveOutcome::Unknown { message } => {
            return Err(PlannerError::SolverTimeout { message });
        }
        ref optimal_or_feasible => {
            let schedule = materialize(&input, optimal_or_feasible, &eligibility.diagnostics)?;
            info!(total_score = schedule.total_score, "schedule materialized");
            write_schedule_csv(&schedule, &args.output)
                .map_err(|e| PlannerError::Internal(e.to_string()))?;
        }
    }

    Ok(())
}

/// Dispatches to the workbook reader or the CSV-table reader depending on
/// which the caller supplied — the CSV and Excel input variants are mutually
/// exclusive, not combinable within a single run.
fn load_tables(args: &PlanArgs) -> Result<input_cell::RawTables, PlannerError> {
    match &args.xlsx {
        Some(workbook) => {
            if args.doctors.is_some() || args.locations.is_some() || args.sessions.is_some() {
                return Err(PlannerError::InputMalformed {
                    source: "cli".to_string(),
                    row: 0,
                    column: "--xlsx".to_string(),
                    reason: "--xlsx cannot be combined with --doctors/--locations/--sessions"
                        .to_string(),
                });
            }
            input_cell::load_xlsx_tables(workbook)
        }
        None => {
            let (doctors, locations, sessions) =
                match (&args.doctors, &args.locations, &args.sessions) {
                    (Some(d), Some(l), Some(s)) => (d, l, s),
                    _ => {
                        return Err(PlannerError::InputMalformed {
                            source: "cli".to_string(),
                            row: 0,
                            column: "--doctors/--locations/--sessions".to_string(),
                            reason: "required unless --xlsx is given".to_string(),
                        });
                    }
                };
            let paths = input_cell::InputPaths {
                doctors,
                locations,
                sessions,
                rooms: args.rooms.as_deref(),
                preferences: args.preferences.as_deref(),
                travel_times: args.travel_times.as_deref(),
                doctor_workdays: args.doctor_workdays.as_deref(),
                doctor_week_rules: args.doctor_week_rules.as_deref(),
            };
            input_cell::load_csv_tables(&paths)
        }
    }
}
