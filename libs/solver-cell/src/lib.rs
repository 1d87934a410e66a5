pub mod driver;
pub mod materializer;
pub mod model;

pub use driver::{solve, SolveOutcome};
pub use materializer::materialize;
pub use model::{CpSatModel, SolveStatus, SolvedModel, VarId};
