use std::env;

use tracing::warn;

/// What to do when a session's eligible set is empty: `Skip` carries it
/// through to the output unassigned (the default); `Fail` turns it into a
/// hard run failure instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfeasibleSessionPolicy {
    Skip,
    Fail,
}

impl InfeasibleSessionPolicy {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "skip" => Some(Self::Skip),
            "fail" => Some(Self::Fail),
            _ => None,
        }
    }
}

/// Centralized planning configuration, built from CLI flags first, then
/// environment variables, then these defaults — an env-with-fallback pattern
/// layered under an explicit CLI surface.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub time_budget_seconds: u32,
    pub worker_count: u32,
    pub random_seed: i64,
    pub default_preference_score: i64,
    pub infeasible_session_policy: InfeasibleSessionPolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            time_budget_seconds: 30,
            worker_count: 1,
            random_seed: 20260727,
            default_preference_score: 0,
            infeasible_session_policy: InfeasibleSessionPolicy::Skip,
        }
    }
}

impl PlannerConfig {
    /// Reads overrides from the environment on top of the built-in defaults.
    /// CLI flags (parsed in `apps/planner`) are applied on top of the result of
    /// this call, so CLI > env > default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let time_budget_seconds = env_parsed_or("PLANNER_TIME_BUDGET_SECONDS", defaults.time_budget_seconds);
        let worker_count = env_parsed_or("PLANNER_WORKER_COUNT", defaults.worker_count);
        let random_seed = env_parsed_or("PLANNER_RANDOM_SEED", defaults.random_seed);
        let default_preference_score =
            env_parsed_or("PLANNER_DEFAULT_PREFERENCE_SCORE", defaults.default_preference_score);
        let infeasible_session_policy = env::var("PLANNER_INFEASIBLE_SESSION_POLICY")
            .ok()
            .and_then(|v| InfeasibleSessionPolicy::from_str(&v))
            .unwrap_or(defaults.infeasible_session_policy);

        Self {
            time_budget_seconds,
            worker_count,
            random_seed,
            default_preference_score,
            infeasible_session_policy,
        }
    }
}

/// CLI-level overrides, merged on top of `PlannerConfig::from_env()` so that
/// precedence is CLI flags > environment variables > built-in defaults.
#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(long)]
    pub time_budget_seconds: Option<u32>,
    #[arg(long)]
    pub workers: Option<u32>,
    #[arg(long)]
    pub seed: Option<i64>,
    #[arg(long)]
    pub infeasible_session_policy: Option<String>,
}

impl PlannerConfig {
    pub fn apply_overrides(mut self, args: &ConfigArgs) -> Self {
        if let Some(v) = args.time_budget_seconds {
            self.time_budget_seconds = v;
        }
        if let Some(v) = args.workers {
            self.worker_count = v;
        }
        if let Some(v) = args.seed {
            self.random_seed = v;
        }
        if let Some(ref policy) = args.infeasible_session_policy {
            if let Some(parsed) = InfeasibleSessionPolicy::from_str(policy) {
                self.infeasible_session_policy = parsed;
            } else {
                warn!("unrecognized --infeasible-session-policy value '{policy}', keeping {:?}", self.infeasible_session_policy);
            }
        }
        self
    }
}

fn env_parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{key} is set but not parseable, using default");
            default
        }),
        Err(_) => default,
    }
}
