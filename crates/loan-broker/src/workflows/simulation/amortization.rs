use serde::{Deserialize, Serialize};

/// Longest term accepted by the simulator (one hundred years).
pub const MAX_TERM_MONTHS: u32 = 1_200;

/// Input to a single amortization run. Validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: f64,
    pub term_months: u32,
    pub annual_rate_percent: f64,
}

impl LoanParameters {
    pub fn new(
        principal: f64,
        term_months: u32,
        annual_rate_percent: f64,
    ) -> Result<Self, SimulationError> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(SimulationError::InvalidInput {
                field: "principal",
                reason: "must be a positive amount",
            });
        }
        if term_months == 0 {
            return Err(SimulationError::InvalidInput {
                field: "term_months",
                reason: "must be at least one month",
            });
        }
        if term_months > MAX_TERM_MONTHS {
            return Err(SimulationError::InvalidInput {
                field: "term_months",
                reason: "must not exceed 1200 months",
            });
        }
        if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
            return Err(SimulationError::InvalidInput {
                field: "annual_rate_percent",
                reason: "must be zero or positive",
            });
        }

        Ok(Self {
            principal,
            term_months,
            annual_rate_percent,
        })
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    /// Level payment schedule totals at full precision.
    ///
    /// Fields are public, so the term is re-checked here for parameters built without `new`.
    pub fn amortize(&self) -> Result<AmortizationResult, SimulationError> {
        let exponent = match i32::try_from(self.term_months) {
            Ok(exponent) if (1..=MAX_TERM_MONTHS as i32).contains(&exponent) => exponent,
            _ => {
                return Err(SimulationError::InvalidInput {
                    field: "term_months",
                    reason: "must not exceed 1200 months",
                })
            }
        };
        let periods = f64::from(self.term_months);
        let rate = self.monthly_rate();

        let result = if rate == 0.0 {
            AmortizationResult {
                monthly_payment: self.principal / periods,
                total_interest: 0.0,
                total_cost: self.principal,
            }
        } else {
            // P·i / (1 − (1+i)^−n), equal to P·i·(1+i)^n / ((1+i)^n − 1) without overflowing (1+i)^n.
            let discount = (1.0 + rate).powi(-exponent);
            let monthly_payment = self.principal * rate / (1.0 - discount);
            let total_cost = monthly_payment * periods;
            AmortizationResult {
                monthly_payment,
                total_interest: total_cost - self.principal,
                total_cost,
            }
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(SimulationError::NonFiniteResult)
        }
    }
}

/// Totals for a fixed-payment loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_cost: f64,
}

impl AmortizationResult {
    pub fn is_finite(&self) -> bool {
        self.monthly_payment.is_finite()
            && self.total_interest.is_finite()
            && self.total_cost.is_finite()
    }

    /// Copy rounded to cents for display. Never feed the result back into a calculation.
    pub fn rounded(&self) -> Self {
        Self {
            monthly_payment: round_currency(self.monthly_payment),
            total_interest: round_currency(self.total_interest),
            total_cost: round_currency(self.total_cost),
        }
    }
}

/// Computes the annuity payment, total cost and total interest of a loan.
///
/// A zero annual rate spreads the principal evenly over the term. A zero term,
/// a term beyond [`MAX_TERM_MONTHS`], a non-positive principal or a negative rate is
/// rejected before any arithmetic runs.
pub fn compute_amortization(
    principal: f64,
    term_months: u32,
    annual_rate_percent: f64,
) -> Result<AmortizationResult, SimulationError> {
    LoanParameters::new(principal, term_months, annual_rate_percent)?.amortize()
}

pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rejected simulation input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },
    #[error("loan totals are out of range")]
    NonFiniteResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
        (actual - expected).abs() <= tolerance
    }

    #[test]
    fn reference_loan_matches_annuity_formula() {
        let result = compute_amortization(15_000.0, 48, 3.5).expect("valid loan");

        assert!(close(result.monthly_payment, 335.34, 0.005), "{result:?}");
        assert!(close(result.total_interest, 1096.32, 0.01), "{result:?}");
        assert!(close(result.total_cost, 16096.32, 0.01), "{result:?}");
    }

    #[test]
    fn totals_are_consistent_with_payment() {
        for (principal, term, rate) in [
            (1_000.0, 12, 3.5),
            (15_000.0, 48, 3.9),
            (100_000.0, 120, 7.25),
            (2_500.0, 1, 12.0),
        ] {
            let result = compute_amortization(principal, term, rate).expect("valid loan");
            assert!(close(
                result.monthly_payment * f64::from(term),
                result.total_cost,
                1e-6
            ));
            assert!(close(
                result.total_cost - principal,
                result.total_interest,
                1e-6
            ));
            assert!(result.total_interest > 0.0);
        }
    }

    #[test]
    fn zero_rate_splits_principal_evenly() {
        let result = compute_amortization(12_000.0, 48, 0.0).expect("valid loan");

        assert_eq!(result.monthly_payment, 12_000.0 / 48.0);
        assert_eq!(result.total_interest, 0.0);
        assert_eq!(result.total_cost, 12_000.0);
    }

    #[test]
    fn longer_terms_lower_payment_and_raise_interest() {
        let mut previous = compute_amortization(15_000.0, 12, 3.5).expect("valid loan");
        for term in 13..=120 {
            let current = compute_amortization(15_000.0, term, 3.5).expect("valid loan");
            assert!(current.monthly_payment < previous.monthly_payment, "term {term}");
            assert!(current.total_interest > previous.total_interest, "term {term}");
            previous = current;
        }
    }

    #[test]
    fn single_month_term_repays_with_one_period_of_interest() {
        let result = compute_amortization(1_200.0, 1, 12.0).expect("valid loan");
        assert!(close(result.monthly_payment, 1_212.0, 1e-9));
    }

    #[test]
    fn rejects_zero_term() {
        let err = compute_amortization(15_000.0, 0, 3.5).expect_err("zero term rejected");
        assert_eq!(
            err,
            SimulationError::InvalidInput {
                field: "term_months",
                reason: "must be at least one month",
            }
        );
    }

    #[test]
    fn rejects_terms_beyond_one_hundred_years() {
        for term in [MAX_TERM_MONTHS + 1, 1_000_000, 3_000_000_000, u32::MAX] {
            let err = compute_amortization(15_000.0, term, 3.5).expect_err("term rejected");
            assert_eq!(
                err,
                SimulationError::InvalidInput {
                    field: "term_months",
                    reason: "must not exceed 1200 months",
                },
                "term {term}"
            );
        }
    }

    #[test]
    fn longest_term_stays_finite_and_positive() {
        let result = compute_amortization(15_000.0, MAX_TERM_MONTHS, 3.5).expect("valid loan");
        assert!(result.is_finite(), "{result:?}");
        assert!(result.monthly_payment > 15_000.0 * 0.035 / 12.0);
        assert!(result.total_interest > 0.0);
    }

    #[test]
    fn steep_rate_over_long_term_approaches_interest_only_payment() {
        let result = compute_amortization(10_000.0, MAX_TERM_MONTHS, 1_000.0).expect("valid loan");
        let interest_only = 10_000.0 * 1_000.0 / 100.0 / 12.0;
        assert!(close(result.monthly_payment, interest_only, 1e-6), "{result:?}");
    }

    #[test]
    fn hand_built_parameters_are_checked_again() {
        let parameters = LoanParameters {
            principal: 15_000.0,
            term_months: u32::MAX,
            annual_rate_percent: 3.5,
        };
        assert!(parameters.amortize().is_err());

        let parameters = LoanParameters {
            principal: f64::MAX,
            term_months: 12,
            annual_rate_percent: 3.5,
        };
        assert_eq!(parameters.amortize(), Err(SimulationError::NonFiniteResult));
    }

    #[test]
    fn rejects_non_positive_principal() {
        for principal in [0.0, -500.0, f64::NAN, f64::INFINITY] {
            let err = compute_amortization(principal, 48, 3.5).expect_err("principal rejected");
            assert!(matches!(
                err,
                SimulationError::InvalidInput {
                    field: "principal",
                    ..
                }
            ));
        }
    }

    #[test]
    fn rejects_negative_rate() {
        let err = compute_amortization(15_000.0, 48, -0.1).expect_err("rate rejected");
        assert_eq!(err.to_string(), "invalid annual_rate_percent: must be zero or positive");
    }

    #[test]
    fn rounding_is_presentation_only() {
        let result = compute_amortization(15_000.0, 48, 3.5).expect("valid loan");
        let rounded = result.rounded();

        assert_eq!(rounded.monthly_payment, 335.34);
        assert_eq!(rounded.total_cost, 16096.32);
        assert_ne!(result.monthly_payment, rounded.monthly_payment);
    }
}
