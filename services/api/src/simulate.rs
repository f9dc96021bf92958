use clap::Args;
use loan_broker::config::AppConfig;
use loan_broker::error::AppError;
use loan_broker::workflows::leads::notification::format_euros;
use loan_broker::workflows::simulation::{LoanSimulator, SimulationView};

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Amount to borrow
    #[arg(long)]
    pub(crate) amount: f64,
    /// Loan term in months
    #[arg(long)]
    pub(crate) months: u32,
    /// Annual rate in percent (defaults to the configured rate)
    #[arg(long)]
    pub(crate) rate: Option<f64>,
    /// Monthly income used for the eligibility rating
    #[arg(long)]
    pub(crate) income: Option<f64>,
    /// Print the quote as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_simulation(args: SimulateArgs) -> Result<(), AppError> {
    let SimulateArgs {
        amount,
        months,
        rate,
        income,
        json,
    } = args;

    let mut config = AppConfig::load()?.simulation;
    if let Some(rate) = rate {
        config.annual_rate_percent = rate;
    }

    let view = LoanSimulator::new(config)
        .quote(amount, months, income)?
        .view();

    if json {
        println!("{}", render_json(&view)?);
    } else {
        print!("{}", render_quote(&view));
    }

    Ok(())
}

pub(crate) fn render_json(view: &SimulationView) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(view)?)
}

pub(crate) fn render_quote(view: &SimulationView) -> String {
    let mut lines = vec![
        "Loan simulation".to_string(),
        format!(
            "- Amount {} over {} months at {:.2}%",
            format_euros(view.principal),
            view.term_months,
            view.annual_rate_percent
        ),
        format!(
            "- Monthly payment {}",
            format_euros(view.amortization.monthly_payment)
        ),
        format!(
            "- Total interest {}",
            format_euros(view.amortization.total_interest)
        ),
        format!("- Total cost {}", format_euros(view.amortization.total_cost)),
    ];

    if let Some(eligibility) = view.eligibility {
        lines.push(format!(
            "- Debt-to-income {:.2}% -> eligibility {}",
            eligibility.debt_to_income_ratio_percent,
            eligibility.tier.label()
        ));
    }

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_broker::workflows::simulation::SimulationConfig;

    #[test]
    fn renders_quote_with_eligibility() {
        let view = LoanSimulator::new(SimulationConfig::default())
            .quote(15_000.0, 48, Some(2_000.0))
            .expect("valid quote")
            .view();

        let rendered = render_quote(&view);
        assert!(rendered.contains("Amount 15 000,00 € over 48 months at 3.50%"));
        assert!(rendered.contains("Monthly payment 335,34 €"));
        assert!(rendered.contains("Total cost 16 096,32 €"));
        assert!(rendered.contains("eligibility high"));
    }

    #[test]
    fn renders_quote_as_json() {
        let view = LoanSimulator::new(SimulationConfig::default())
            .quote(15_000.0, 48, Some(2_000.0))
            .expect("valid quote")
            .view();

        let rendered = render_json(&view).expect("quote serializes");
        let payload: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(payload["monthly_payment"], 335.34);
        assert_eq!(payload["eligibility"]["tier"], "high");
    }

    #[test]
    fn omits_eligibility_without_income() {
        let view = LoanSimulator::new(SimulationConfig::default())
            .quote(15_000.0, 48, None)
            .expect("valid quote")
            .view();

        assert!(!render_quote(&view).contains("eligibility"));
    }
}
