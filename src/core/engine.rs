use super::types::{ProjectionInput, YearResult};

/// Runs the year-by-year projection, returning either one `YearResult` per
/// year of the duration or a validation error message. Validation
/// short-circuits on the first failing check; `annual_contribution` is never
/// validated, so negative values model withdrawals.
pub fn run_projection(input: &ProjectionInput) -> Result<Vec<YearResult>, String> {
    if input.initial_amount < 0.0 {
        return Err("Initial investment amount must be at least zero.".to_string());
    }

    if input.duration <= 0 {
        return Err("No valid amount of years provided.".to_string());
    }

    if input.expected_return < 0.0 {
        return Err("Expected return must be at least zero.".to_string());
    }

    let mut total = input.initial_amount;
    let mut total_contributions = 0.0;
    let mut results = Vec::with_capacity(input.duration as usize);

    for year in 1..=input.duration as u32 {
        total *= 1.0 + input.expected_return;
        // Interest-to-date is measured before this year's contribution is
        // counted; the contribution lands in the balance afterwards and earns
        // nothing until next year. The ordering is load-bearing.
        let total_interest_earned = total - total_contributions - input.initial_amount;
        total_contributions += input.annual_contribution;
        total += input.annual_contribution;

        results.push(YearResult {
            year,
            total_amount: total,
            total_contributions,
            total_interest_earned,
        });
    }

    Ok(results)
}
