use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct ProjectionInput {
    pub initial_amount: f64,
    pub annual_contribution: f64,
    /// Annual growth rate as a decimal fraction, e.g. 0.08 for 8%.
    pub expected_return: f64,
    pub duration: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearResult {
    pub year: u32,
    pub total_amount: f64,
    pub total_contributions: f64,
    pub total_interest_earned: f64,
}
