mod engine;
mod solver;
mod types;

pub use engine::run_projection;
pub use solver::{GoalSolveConfig, GoalSolveIteration, GoalSolveResult, solve_required_contribution};
pub use types::{ProjectionInput, YearResult};
