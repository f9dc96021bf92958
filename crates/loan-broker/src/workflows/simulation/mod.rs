//! Loan pricing: annuity amortization and debt-to-income eligibility.

mod amortization;
mod eligibility;
mod simulator;

pub use amortization::{
    compute_amortization, round_currency, AmortizationResult, LoanParameters, SimulationError,
    MAX_TERM_MONTHS,
};
pub use eligibility::{
    classify_eligibility, EligibilityAssessment, EligibilityThresholds, EligibilityTier,
};
pub use simulator::{LoanSimulator, SimulationConfig, SimulationQuote, SimulationView};
