use serde::{Deserialize, Serialize};

/// Affordability cut-offs applied by [`classify_eligibility`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EligibilityThresholds {
    /// Highest debt-to-income percentage still rated `High`.
    pub high_max_ratio_percent: f64,
    /// Debt-to-income percentage above which the tier drops to `Low`.
    pub low_min_ratio_percent: f64,
    pub high_min_income: f64,
    /// Incomes strictly below this are always `Low`.
    pub low_max_income: f64,
}

impl Default for EligibilityThresholds {
    fn default() -> Self {
        Self {
            high_max_ratio_percent: 30.0,
            low_min_ratio_percent: 50.0,
            high_min_income: 1500.0,
            low_max_income: 1000.0,
        }
    }
}

/// Coarse approval likelihood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityTier {
    High,
    Medium,
    Low,
}

impl EligibilityTier {
    pub const fn label(self) -> &'static str {
        match self {
            EligibilityTier::High => "high",
            EligibilityTier::Medium => "medium",
            EligibilityTier::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EligibilityAssessment {
    pub debt_to_income_ratio_percent: f64,
    pub tier: EligibilityTier,
}

/// Rates a monthly payment against the borrower's monthly income.
///
/// A zero income yields a ratio of zero, which the income floor then classifies as `Low`.
/// The `High` rule is checked before the `Low` rule.
pub fn classify_eligibility(
    monthly_payment: f64,
    monthly_income: f64,
    thresholds: &EligibilityThresholds,
) -> EligibilityAssessment {
    let ratio = if monthly_income > 0.0 {
        monthly_payment / monthly_income * 100.0
    } else {
        0.0
    };

    let tier = if ratio <= thresholds.high_max_ratio_percent
        && monthly_income >= thresholds.high_min_income
    {
        EligibilityTier::High
    } else if ratio > thresholds.low_min_ratio_percent || monthly_income < thresholds.low_max_income
    {
        EligibilityTier::Low
    } else {
        EligibilityTier::Medium
    };

    EligibilityAssessment {
        debt_to_income_ratio_percent: ratio,
        tier,
    }
}
