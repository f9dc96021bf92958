use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{
    ContactMessageSubmission, LeadStatus, LoanApplicationSubmission, SubmissionId,
};
use super::intake::{IntakeGuard, IntakeViolation};
use super::notification::{contact_message_notification, loan_application_notification};
use super::repository::{
    ContactMessageRecord, LeadNotification, LeadRepository, LoanApplicationRecord,
    NotificationPublisher, RepositoryError,
};
use crate::workflows::simulation::{LoanSimulator, SimulationConfig, SimulationError};

/// Service composing intake validation, the simulator, storage and notification.
pub struct LeadService<R, N> {
    guard: Arc<IntakeGuard>,
    simulator: Arc<LoanSimulator>,
    repository: Arc<R>,
    notifier: Arc<N>,
    recipient: String,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static CONTACT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> SubmissionId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SubmissionId(format!("loan-{id:06}"))
}

fn next_contact_id() -> SubmissionId {
    let id = CONTACT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SubmissionId(format!("contact-{id:06}"))
}

impl<R, N> LeadService<R, N>
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(
        repository: Arc<R>,
        notifier: Arc<N>,
        config: SimulationConfig,
        recipient: impl Into<String>,
    ) -> Self {
        Self::with_guard(
            IntakeGuard::default(),
            repository,
            notifier,
            config,
            recipient,
        )
    }

    pub fn with_guard(
        guard: IntakeGuard,
        repository: Arc<R>,
        notifier: Arc<N>,
        config: SimulationConfig,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            guard: Arc::new(guard),
            simulator: Arc::new(LoanSimulator::new(config)),
            repository,
            notifier,
            recipient: recipient.into(),
        }
    }

    pub fn simulator(&self) -> &LoanSimulator {
        &self.simulator
    }

    /// Validate, price, store and relay a loan application.
    ///
    /// Once the lead is stored and relayed the call succeeds; a failed status update is only logged.
    pub fn submit_application(
        &self,
        submission: LoanApplicationSubmission,
    ) -> Result<LoanApplicationRecord, LeadServiceError> {
        let mut application = self.guard.application_from_submission(submission)?;
        let simulation = self.simulator.quote(
            application.loan_amount,
            application.loan_duration,
            Some(application.monthly_income),
        )?;
        application.id = next_application_id();

        let record = LoanApplicationRecord {
            application,
            simulation,
            status: LeadStatus::Received,
        };
        let mut stored = self.repository.insert_application(record)?;
        info!(
            submission_id = %stored.application.id.0,
            amount = stored.application.loan_amount,
            months = stored.application.loan_duration,
            "loan application received"
        );

        let notification = loan_application_notification(&stored, &self.recipient);
        stored.status = self.dispatch(notification);
        if let Err(err) = self.repository.update_application(stored.clone()) {
            warn!(
                submission_id = %stored.application.id.0,
                error = %err,
                "notification status not persisted"
            );
        }

        Ok(stored)
    }

    /// Validate, store and relay a contact message.
    pub fn submit_contact(
        &self,
        submission: ContactMessageSubmission,
    ) -> Result<ContactMessageRecord, LeadServiceError> {
        let mut message = self.guard.contact_from_submission(submission)?;
        message.id = next_contact_id();

        let record = ContactMessageRecord {
            message,
            status: LeadStatus::Received,
        };
        let mut stored = self.repository.insert_contact(record)?;
        info!(submission_id = %stored.message.id.0, "contact message received");

        let notification = contact_message_notification(&stored, &self.recipient);
        stored.status = self.dispatch(notification);
        if let Err(err) = self.repository.update_contact(stored.clone()) {
            warn!(
                submission_id = %stored.message.id.0,
                error = %err,
                "notification status not persisted"
            );
        }

        Ok(stored)
    }

    pub fn application(
        &self,
        id: &SubmissionId,
    ) -> Result<LoanApplicationRecord, LeadServiceError> {
        let record = self
            .repository
            .fetch_application(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn contact(&self, id: &SubmissionId) -> Result<ContactMessageRecord, LeadServiceError> {
        let record = self
            .repository
            .fetch_contact(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    // Single attempt; a failed relay is recorded on the lead, never retried.
    fn dispatch(&self, notification: LeadNotification) -> LeadStatus {
        let submission_id = notification.submission_id.0.clone();
        match self.notifier.publish(notification) {
            Ok(()) => LeadStatus::NotificationQueued,
            Err(err) => {
                warn!(%submission_id, error = %err, "lead notification failed");
                LeadStatus::NotificationFailed
            }
        }
    }
}

/// Error raised by the lead service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
