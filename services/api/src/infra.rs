use loan_broker::workflows::leads::{
    ContactMessageRecord, LeadNotification, LeadRepository, LoanApplicationRecord,
    NotificationError, NotificationPublisher, RepositoryError, SubmissionId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    applications: Arc<Mutex<HashMap<SubmissionId, LoanApplicationRecord>>>,
    contacts: Arc<Mutex<HashMap<SubmissionId, ContactMessageRecord>>>,
}

impl LeadRepository for InMemoryLeadRepository {
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
        if guard.contains_key(&record.application.id) {
            guard.insert(record.application.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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
        if guard.contains_key(&record.message.id) {
            guard.insert(record.message.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch_contact(
        &self,
        id: &SubmissionId,
    ) -> Result<Option<ContactMessageRecord>, RepositoryError> {
        let guard = self.contacts.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Keeps notifications in memory when no mail relay is configured.
#[derive(Default, Clone)]
pub(crate) struct LocalOutbox {
    events: Arc<Mutex<Vec<LeadNotification>>>,
}

impl NotificationPublisher for LocalOutbox {
    fn publish(&self, notification: LeadNotification) -> Result<(), NotificationError> {
        info!(
            template = %notification.template,
            submission_id = %notification.submission_id.0,
            recipient = %notification.recipient,
            "mail relay not configured; notification kept in local outbox"
        );
        let mut guard = self.events.lock().expect("outbox mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

impl LocalOutbox {
    #[cfg(test)]
    pub(crate) fn events(&self) -> Vec<LeadNotification> {
        self.events.lock().expect("outbox mutex poisoned").clone()
    }
}
