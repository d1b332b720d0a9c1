use std::io::{self, Write};

use clap::Parser;

use crate::core::{ProjectionInput, YearResult, run_projection};

#[derive(Parser, Debug)]
#[command(
    name = "nestegg",
    about = "Year-by-year investment growth projector (run `nestegg serve` for the web form)"
)]
struct Cli {
    #[arg(long, default_value_t = 5000.0, help = "Starting balance")]
    initial_amount: f64,
    #[arg(
        long,
        default_value_t = 500.0,
        allow_negative_numbers = true,
        help = "Amount added once per year; negative values model withdrawals"
    )]
    annual_contribution: f64,
    #[arg(
        long,
        default_value_t = 0.08,
        help = "Annual growth rate as a decimal fraction, e.g. 0.08 for 8%"
    )]
    expected_return: f64,
    #[arg(long, default_value_t = 10, help = "Number of years to project")]
    duration: i32,
}

impl From<Cli> for ProjectionInput {
    fn from(cli: Cli) -> Self {
        ProjectionInput {
            initial_amount: cli.initial_amount,
            annual_contribution: cli.annual_contribution,
            expected_return: cli.expected_return,
            duration: cli.duration,
        }
    }
}

/// Console entry point. Validation failures are printed like any other
/// output; the process still exits 0.
pub fn run_console_report() {
    let input = Cli::parse().into();
    let outcome = run_projection(&input);
    let mut stdout = io::stdout().lock();
    if let Err(e) = print_projection(&outcome, &mut stdout) {
        eprintln!("Report error: {e}");
    }
}

/// Writes a projection outcome as plain text. The original reporter printed
/// the interest figure under a "Total Contributions" label; the label is
/// corrected here, the figures are unchanged.
pub fn print_projection(
    outcome: &Result<Vec<YearResult>, String>,
    out: &mut impl Write,
) -> io::Result<()> {
    let years = match outcome {
        Ok(years) => years,
        Err(msg) => return writeln!(out, "{msg}"),
    };

    for year in years {
        writeln!(out, "Year: {}", year.year)?;
        writeln!(out, "Total: {:.0}", year.total_amount)?;
        writeln!(out, "Interest earned: {:.0}", year.total_interest_earned)?;
        writeln!(out, "--------------------")?;
    }
    Ok(())
}
