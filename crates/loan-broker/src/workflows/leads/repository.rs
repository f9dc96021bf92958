use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ContactMessage, LeadStatus, LoanApplication, SubmissionId};
use crate::workflows::simulation::{SimulationQuote, SimulationView};

/// Stored loan application with the quote computed at intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplicationRecord {
    pub application: LoanApplication,
    pub simulation: SimulationQuote,
    pub status: LeadStatus,
}

impl LoanApplicationRecord {
    pub fn status_view(&self) -> LeadStatusView {
        LeadStatusView {
            submission_id: self.application.id.clone(),
            kind: LeadKind::LoanApplication,
            status: self.status.label(),
            received_at: self.application.received_at,
            simulation: Some(self.simulation.view()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessageRecord {
    pub message: ContactMessage,
    pub status: LeadStatus,
}

impl ContactMessageRecord {
    pub fn status_view(&self) -> LeadStatusView {
        LeadStatusView {
            submission_id: self.message.id.clone(),
            kind: LeadKind::ContactMessage,
            status: self.status.label(),
            received_at: self.message.received_at,
            simulation: None,
        }
    }
}

/// Storage abstraction standing in for the hosted lead tables.
pub trait LeadRepository: Send + Sync {
    fn insert_application(
        &self,
        record: LoanApplicationRecord,
    ) -> Result<LoanApplicationRecord, RepositoryError>;
    fn update_application(&self, record: LoanApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch_application(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<LoanApplicationRecord>, RepositoryError>;
    fn insert_contact(
        &self,
        record: ContactMessageRecord,
    ) -> Result<ContactMessageRecord, RepositoryError>;
    fn update_contact(&self, record: ContactMessageRecord) -> Result<(), RepositoryError>;
    fn fetch_contact(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<ContactMessageRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for lead e-mails (HTTP relay, local outbox).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: LeadNotification) -> Result<(), NotificationError>;
}

/// Mail payload handed to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadNotification {
    pub template: String,
    pub submission_id: SubmissionId,
    pub recipient: String,
    pub reply_to: String,
    pub subject: String,
    pub body: String,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadKind {
    LoanApplication,
    ContactMessage,
}

/// Public status of a lead; contains no personal data.
#[derive(Debug, Clone, Serialize)]
pub struct LeadStatusView {
    pub submission_id: SubmissionId,
    pub kind: LeadKind,
    pub status: &'static str,
    pub received_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationView>,
}
