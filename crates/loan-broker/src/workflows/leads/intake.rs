use chrono::Utc;

use super::domain::{
    Applicant, ContactMessage, ContactMessageSubmission, LoanApplication,
    LoanApplicationSubmission, SubmissionId,
};

/// Validation errors raised by the intake guard.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid e-mail address")]
    InvalidEmail(String),
    #[error("loan amount must be between {min} and {max} (found {found})")]
    LoanAmountOutOfRange { min: f64, max: f64, found: f64 },
    #[error("loan duration of {found} months is not offered")]
    UnsupportedTerm { found: u32 },
    #[error("monthly income must be zero or positive")]
    InvalidIncome,
    #[error("message exceeds {max} characters")]
    MessageTooLong { max: usize },
}

const DEFAULT_MIN_LOAN_AMOUNT: f64 = 1_000.0;
const DEFAULT_MAX_LOAN_AMOUNT: f64 = 100_000.0;
const DEFAULT_LOAN_TERMS: [u32; 9] = [12, 24, 36, 48, 60, 72, 84, 96, 120];
const DEFAULT_MAX_MESSAGE_CHARS: usize = 5_000;

/// Product catalogue limits enforced on inbound forms.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakePolicy {
    min_loan_amount: f64,
    max_loan_amount: f64,
    loan_terms: Vec<u32>,
    max_message_chars: usize,
}

impl IntakePolicy {
    pub fn new(min_loan_amount: f64, max_loan_amount: f64, loan_terms: Vec<u32>) -> Self {
        let sane_bounds = min_loan_amount.is_finite()
            && max_loan_amount.is_finite()
            && min_loan_amount > 0.0
            && min_loan_amount <= max_loan_amount;
        let (min_loan_amount, max_loan_amount) = if sane_bounds {
            (min_loan_amount, max_loan_amount)
        } else {
            (DEFAULT_MIN_LOAN_AMOUNT, DEFAULT_MAX_LOAN_AMOUNT)
        };

        let mut loan_terms: Vec<u32> = loan_terms.into_iter().filter(|term| *term > 0).collect();
        loan_terms.sort_unstable();
        loan_terms.dedup();
        if loan_terms.is_empty() {
            loan_terms = DEFAULT_LOAN_TERMS.to_vec();
        }

        Self {
            min_loan_amount,
            max_loan_amount,
            loan_terms,
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
        }
    }

    pub fn loan_terms(&self) -> &[u32] {
        &self.loan_terms
    }

    pub fn amount_range(&self) -> (f64, f64) {
        (self.min_loan_amount, self.max_loan_amount)
    }
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MIN_LOAN_AMOUNT,
            DEFAULT_MAX_LOAN_AMOUNT,
            DEFAULT_LOAN_TERMS.to_vec(),
        )
    }
}

/// Guard turning raw form payloads into validated leads.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    policy: IntakePolicy,
}

impl IntakeGuard {
    pub fn with_policy(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    /// Validate a loan application. The returned record carries a placeholder id.
    pub fn application_from_submission(
        &self,
        submission: LoanApplicationSubmission,
    ) -> Result<LoanApplication, IntakeViolation> {
        let first_name = required(submission.first_name, "first_name")?;
        let last_name = required(submission.last_name, "last_name")?;
        let email = valid_email(submission.email)?;
        let phone = required(submission.phone.unwrap_or_default(), "phone")?;

        let amount = submission.loan_amount;
        if !amount.is_finite()
            || amount < self.policy.min_loan_amount
            || amount > self.policy.max_loan_amount
        {
            return Err(IntakeViolation::LoanAmountOutOfRange {
                min: self.policy.min_loan_amount,
                max: self.policy.max_loan_amount,
                found: amount,
            });
        }

        if !self.policy.loan_terms.contains(&submission.loan_duration) {
            return Err(IntakeViolation::UnsupportedTerm {
                found: submission.loan_duration,
            });
        }

        let monthly_income = submission
            .monthly_income
            .ok_or(IntakeViolation::MissingField("monthly_income"))?;
        if !monthly_income.is_finite() || monthly_income < 0.0 {
            return Err(IntakeViolation::InvalidIncome);
        }

        Ok(LoanApplication {
            id: SubmissionId("pending".to_string()),
            received_at: Utc::now(),
            applicant: Applicant {
                first_name,
                last_name,
                email,
                phone,
            },
            loan_amount: amount,
            loan_duration: submission.loan_duration,
            monthly_income,
            employment_status: submission.employment_status,
            loan_purpose: submission.loan_purpose,
        })
    }

    /// Validate a contact message. The returned record carries a placeholder id.
    pub fn contact_from_submission(
        &self,
        submission: ContactMessageSubmission,
    ) -> Result<ContactMessage, IntakeViolation> {
        let name = required(submission.name, "name")?;
        let email = valid_email(submission.email)?;
        let message = required(submission.message, "message")?;
        if message.chars().count() > self.policy.max_message_chars {
            return Err(IntakeViolation::MessageTooLong {
                max: self.policy.max_message_chars,
            });
        }

        Ok(ContactMessage {
            id: SubmissionId("pending".to_string()),
            received_at: Utc::now(),
            name,
            email,
            subject: submission.subject,
            message,
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, IntakeViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IntakeViolation::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn valid_email(raw: String) -> Result<String, IntakeViolation> {
    let email = required(raw, "email")?;

    let plausible = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if plausible {
        Ok(email)
    } else {
        Err(IntakeViolation::InvalidEmail(email))
    }
}
