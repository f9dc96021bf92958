use serde::{Deserialize, Serialize};

use super::amortization::{round_currency, AmortizationResult, LoanParameters, SimulationError};
use super::eligibility::{classify_eligibility, EligibilityAssessment, EligibilityThresholds};

/// Canonical pricing inputs shared by every simulation entry point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub annual_rate_percent: f64,
    pub thresholds: EligibilityThresholds,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            annual_rate_percent: 3.5,
            thresholds: EligibilityThresholds::default(),
        }
    }
}

/// Stateless simulator applying the configured rate and thresholds.
#[derive(Debug, Clone)]
pub struct LoanSimulator {
    config: SimulationConfig,
}

impl LoanSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Price a loan at the configured rate, rating affordability when an income is supplied.
    pub fn quote(
        &self,
        principal: f64,
        term_months: u32,
        monthly_income: Option<f64>,
    ) -> Result<SimulationQuote, SimulationError> {
        let parameters =
            LoanParameters::new(principal, term_months, self.config.annual_rate_percent)?;
        let amortization = parameters.amortize()?;

        let eligibility = match monthly_income {
            Some(income) if !income.is_finite() || income < 0.0 => {
                return Err(SimulationError::InvalidInput {
                    field: "monthly_income",
                    reason: "must be zero or positive",
                });
            }
            Some(income) => Some(classify_eligibility(
                amortization.monthly_payment,
                income,
                &self.config.thresholds,
            )),
            None => None,
        };

        Ok(SimulationQuote {
            parameters,
            amortization,
            eligibility,
        })
    }
}

/// Full-precision simulation output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationQuote {
    pub parameters: LoanParameters,
    pub amortization: AmortizationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<EligibilityAssessment>,
}

impl SimulationQuote {
    /// Display copy with currency and ratio rounded to two decimals.
    pub fn view(&self) -> SimulationView {
        SimulationView {
            principal: round_currency(self.parameters.principal),
            term_months: self.parameters.term_months,
            annual_rate_percent: self.parameters.annual_rate_percent,
            amortization: self.amortization.rounded(),
            eligibility: self.eligibility.map(|assessment| EligibilityAssessment {
                debt_to_income_ratio_percent: round_currency(
                    assessment.debt_to_income_ratio_percent,
                ),
                tier: assessment.tier,
            }),
        }
    }
}

/// Rounded quote exposed over HTTP and in notifications.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationView {
    pub principal: f64,
    pub term_months: u32,
    pub annual_rate_percent: f64,
    #[serde(flatten)]
    pub amortization: AmortizationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<EligibilityAssessment>,
}
