use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

/// Loan application form payload as posted by the website.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplicationSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Required; kept optional here so intake can name the missing field.
    #[serde(default)]
    pub phone: Option<String>,
    pub loan_amount: f64,
    /// Term in months.
    pub loan_duration: u32,
    #[serde(default)]
    pub monthly_income: Option<f64>,
    pub employment_status: EmploymentStatus,
    pub loan_purpose: LoanPurpose,
}

/// Contact form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessageSubmission {
    pub name: String,
    pub email: String,
    pub subject: ContactSubject,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
    Retired,
    Student,
}

impl EmploymentStatus {
    /// Wording used in the brokerage mailbox.
    pub const fn display_name(self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "Salarié(e)",
            EmploymentStatus::SelfEmployed => "Indépendant(e)",
            EmploymentStatus::Unemployed => "Sans emploi",
            EmploymentStatus::Retired => "Retraité(e)",
            EmploymentStatus::Student => "Étudiant(e)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurpose {
    Personal,
    Auto,
    Home,
    Consolidation,
    Other,
}

impl LoanPurpose {
    pub const fn display_name(self) -> &'static str {
        match self {
            LoanPurpose::Personal => "Prêt personnel",
            LoanPurpose::Auto => "Achat véhicule",
            LoanPurpose::Home => "Travaux",
            LoanPurpose::Consolidation => "Rachat de crédit",
            LoanPurpose::Other => "Autre",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactSubject {
    LoanInfo,
    ApplicationStatus,
    Technical,
    Partnership,
    Other,
}

impl ContactSubject {
    pub const fn display_name(self) -> &'static str {
        match self {
            ContactSubject::LoanInfo => "Information sur un prêt",
            ContactSubject::ApplicationStatus => "Statut de ma demande",
            ContactSubject::Technical => "Problème technique",
            ContactSubject::Partnership => "Partenariat",
            ContactSubject::Other => "Autre",
        }
    }
}

/// Identity block of a loan applicant after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl Applicant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Validated loan application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub id: SubmissionId,
    pub received_at: DateTime<Utc>,
    pub applicant: Applicant,
    pub loan_amount: f64,
    pub loan_duration: u32,
    pub monthly_income: f64,
    pub employment_status: EmploymentStatus,
    pub loan_purpose: LoanPurpose,
}

/// Validated contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: SubmissionId,
    pub received_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub subject: ContactSubject,
    pub message: String,
}

/// Delivery state of a stored lead. Notifications are attempted exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    Received,
    NotificationQueued,
    NotificationFailed,
}

impl LeadStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LeadStatus::Received => "received",
            LeadStatus::NotificationQueued => "notification_queued",
            LeadStatus::NotificationFailed => "notification_failed",
        }
    }
}
