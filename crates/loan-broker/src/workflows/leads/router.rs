use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::{ContactMessageSubmission, LoanApplicationSubmission, SubmissionId};
use super::repository::{LeadRepository, LeadStatusView, NotificationPublisher};
use super::service::LeadService;
use crate::error::AppError;
use crate::workflows::simulation::SimulationView;

/// Body of a simulation request; the rate always comes from configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationRequest {
    pub loan_amount: f64,
    pub loan_duration: u32,
    #[serde(default)]
    pub monthly_income: Option<f64>,
}

/// Acknowledgement returned for accepted submissions.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub success: bool,
    pub submission_id: SubmissionId,
    pub status: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationView>,
}

/// Router builder exposing the simulator and the lead intake endpoints.
pub fn lead_router<R, N>(service: Arc<LeadService<R, N>>) -> Router
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/simulations", post(simulate_handler::<R, N>))
        .route(
            "/api/v1/loan-applications",
            post(submit_application_handler::<R, N>),
        )
        // Path used by the existing website build.
        .route(
            "/api/sendLoanApplication",
            post(submit_application_handler::<R, N>),
        )
        .route(
            "/api/v1/loan-applications/:submission_id",
            get(application_status_handler::<R, N>),
        )
        .route(
            "/api/v1/contact-messages",
            post(submit_contact_handler::<R, N>),
        )
        .route(
            "/api/v1/contact-messages/:submission_id",
            get(contact_status_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn simulate_handler<R, N>(
    State(service): State<Arc<LeadService<R, N>>>,
    Json(request): Json<SimulationRequest>,
) -> Result<Json<SimulationView>, AppError>
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let quote = service.simulator().quote(
        request.loan_amount,
        request.loan_duration,
        request.monthly_income,
    )?;
    Ok(Json(quote.view()))
}

pub(crate) async fn submit_application_handler<R, N>(
    State(service): State<Arc<LeadService<R, N>>>,
    Json(submission): Json<LoanApplicationSubmission>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), AppError>
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let record = service.submit_application(submission)?;
    let receipt = SubmissionReceipt {
        success: true,
        submission_id: record.application.id.clone(),
        status: record.status.label(),
        message: "Demande de prêt envoyée avec succès !",
        simulation: Some(record.simulation.view()),
    };
    Ok((StatusCode::ACCEPTED, Json(receipt)))
}

pub(crate) async fn submit_contact_handler<R, N>(
    State(service): State<Arc<LeadService<R, N>>>,
    Json(submission): Json<ContactMessageSubmission>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), AppError>
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let record = service.submit_contact(submission)?;
    let receipt = SubmissionReceipt {
        success: true,
        submission_id: record.message.id.clone(),
        status: record.status.label(),
        message: "Message envoyé avec succès !",
        simulation: None,
    };
    Ok((StatusCode::ACCEPTED, Json(receipt)))
}

pub(crate) async fn application_status_handler<R, N>(
    State(service): State<Arc<LeadService<R, N>>>,
    Path(submission_id): Path<String>,
) -> Result<Json<LeadStatusView>, AppError>
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let record = service.application(&SubmissionId(submission_id))?;
    Ok(Json(record.status_view()))
}

pub(crate) async fn contact_status_handler<R, N>(
    State(service): State<Arc<LeadService<R, N>>>,
    Path(submission_id): Path<String>,
) -> Result<Json<LeadStatusView>, AppError>
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let record = service.contact(&SubmissionId(submission_id))?;
    Ok(Json(record.status_view()))
}
