//! Website lead intake: loan applications and contact messages.
//!
//! Submissions are validated by [`intake::IntakeGuard`], loan applications are priced with the
//! configured simulator, and every stored lead is handed once to a [`NotificationPublisher`].

pub mod domain;
pub mod intake;
pub mod notification;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Applicant, ContactMessage, ContactMessageSubmission, ContactSubject, EmploymentStatus,
    LeadStatus, LoanApplication, LoanApplicationSubmission, LoanPurpose, SubmissionId,
};
pub use intake::{IntakeGuard, IntakePolicy, IntakeViolation};
pub use repository::{
    ContactMessageRecord, LeadKind, LeadNotification, LeadRepository, LeadStatusView,
    LoanApplicationRecord, NotificationError, NotificationPublisher, RepositoryError,
};
pub use router::{lead_router, SimulationRequest, SubmissionReceipt};
pub use service::{LeadService, LeadServiceError};
