use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::leads::domain::{
    ContactMessageSubmission, ContactSubject, EmploymentStatus, LoanApplicationSubmission,
    LoanPurpose, SubmissionId,
};
use crate::workflows::leads::repository::{
    ContactMessageRecord, LeadNotification, LeadRepository, LoanApplicationRecord,
    NotificationError, NotificationPublisher, RepositoryError,
};
use crate::workflows::leads::{lead_router, LeadService};
use crate::workflows::simulation::{EligibilityThresholds, SimulationConfig};

pub(super) const RECIPIENT: &str = "leads@pretfacile.fr";

pub(super) fn simulation_config() -> SimulationConfig {
    SimulationConfig {
        annual_rate_percent: 3.9,
        thresholds: EligibilityThresholds::default(),
    }
}

pub(super) fn application_submission() -> LoanApplicationSubmission {
    LoanApplicationSubmission {
        first_name: " Camille ".to_string(),
        last_name: "Durand".to_string(),
        email: "camille.durand@example.fr".to_string(),
        phone: Some("+33 6 12 34 56 78".to_string()),
        loan_amount: 15_000.0,
        loan_duration: 48,
        monthly_income: Some(2_000.0),
        employment_status: EmploymentStatus::Employed,
        loan_purpose: LoanPurpose::Auto,
    }
}

pub(super) fn contact_submission() -> ContactMessageSubmission {
    ContactMessageSubmission {
        name: "Louis Martin".to_string(),
        email: "louis.martin@example.fr".to_string(),
        subject: ContactSubject::ApplicationStatus,
        message: "Bonjour, où en est ma demande ?".to_string(),
    }
}

pub(super) fn build_service() -> (
    LeadService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = LeadService::new(
        repository.clone(),
        notifier.clone(),
        simulation_config(),
        RECIPIENT,
    );
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) applications: Arc<Mutex<HashMap<SubmissionId, LoanApplicationRecord>>>,
    pub(super) contacts: Arc<Mutex<HashMap<SubmissionId, ContactMessageRecord>>>,
}

impl LeadRepository for MemoryRepository {
    fn insert_application(
        &self,
        record: LoanApplicationRecord,
    ) -> Result<LoanApplicationRecord, RepositoryError> {
        let mut guard = self.applications.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application.id.clone(), record.clone());
        Ok(record)
    }

    fn update_application(&self, record: LoanApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.applications.lock().expect("repository mutex poisoned");
        guard.insert(record.application.id.clone(), record);
        Ok(())
    }

    fn fetch_application(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<LoanApplicationRecord>, RepositoryError> {
        let guard = self.applications.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert_contact(
        &self,
        record: ContactMessageRecord,
    ) -> Result<ContactMessageRecord, RepositoryError> {
        let mut guard = self.contacts.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.message.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.message.id.clone(), record.clone());
        Ok(record)
    }

    fn update_contact(&self, record: ContactMessageRecord) -> Result<(), RepositoryError> {
        let mut guard = self.contacts.lock().expect("repository mutex poisoned");
        guard.insert(record.message.id.clone(), record);
        Ok(())
    }

    fn fetch_contact(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<ContactMessageRecord>, RepositoryError> {
        let guard = self.contacts.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<LeadNotification>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<LeadNotification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifier {
    fn publish(&self, notification: LeadNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct FailingNotifier {
    attempts: Arc<Mutex<usize>>,
}

impl FailingNotifier {
    pub(super) fn attempts(&self) -> usize {
        *self.attempts.lock().expect("notifier mutex poisoned")
    }
}

impl NotificationPublisher for FailingNotifier {
    fn publish(&self, _notification: LeadNotification) -> Result<(), NotificationError> {
        *self.attempts.lock().expect("notifier mutex poisoned") += 1;
        Err(NotificationError::Transport("relay offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl LeadRepository for ConflictRepository {
    fn insert_application(
        &self,
        _record: LoanApplicationRecord,
    ) -> Result<LoanApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update_application(&self, _record: LoanApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch_application(
        &self,
        _id: &SubmissionId,
    ) -> Result<Option<LoanApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn insert_contact(
        &self,
        _record: ContactMessageRecord,
    ) -> Result<ContactMessageRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update_contact(&self, _record: ContactMessageRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch_contact(
        &self,
        _id: &SubmissionId,
    ) -> Result<Option<ContactMessageRecord>, RepositoryError> {
        Ok(None)
    }
}

/// Accepts inserts but refuses every status update.
#[derive(Default)]
pub(super) struct FrozenStatusRepository {
    inner: MemoryRepository,
}

impl LeadRepository for FrozenStatusRepository {
    fn insert_application(
        &self,
        record: LoanApplicationRecord,
    ) -> Result<LoanApplicationRecord, RepositoryError> {
        self.inner.insert_application(record)
    }

    fn update_application(&self, _record: LoanApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("write timeout".to_string()))
    }

    fn fetch_application(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<LoanApplicationRecord>, RepositoryError> {
        self.inner.fetch_application(id)
    }

    fn insert_contact(
        &self,
        record: ContactMessageRecord,
    ) -> Result<ContactMessageRecord, RepositoryError> {
        self.inner.insert_contact(record)
    }

    fn update_contact(&self, _record: ContactMessageRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("write timeout".to_string()))
    }

    fn fetch_contact(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<ContactMessageRecord>, RepositoryError> {
        self.inner.fetch_contact(id)
    }
}

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn insert_application(
        &self,
        _record: LoanApplicationRecord,
    ) -> Result<LoanApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_application(&self, _record: LoanApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_application(
        &self,
        _id: &SubmissionId,
    ) -> Result<Option<LoanApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_contact(
        &self,
        _record: ContactMessageRecord,
    ) -> Result<ContactMessageRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_contact(&self, _record: ContactMessageRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_contact(
        &self,
        _id: &SubmissionId,
    ) -> Result<Option<ContactMessageRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: LeadService<MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    lead_router(Arc::new(service))
}
