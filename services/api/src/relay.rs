use loan_broker::workflows::leads::{LeadNotification, NotificationError, NotificationPublisher};
use tokio::sync::mpsc;
use tracing::{error, info};

/// Fire-and-forget HTTP mail relay. Each notification is POSTed once as JSON by a
/// background task; failed deliveries are logged and dropped.
pub(crate) struct HttpMailRelay {
    sender: mpsc::UnboundedSender<LeadNotification>,
}

impl HttpMailRelay {
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn(endpoint: String) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(deliver(reqwest::Client::new(), endpoint, receiver));
        Self { sender }
    }
}

impl NotificationPublisher for HttpMailRelay {
    fn publish(&self, notification: LeadNotification) -> Result<(), NotificationError> {
        self.sender
            .send(notification)
            .map_err(|_| NotificationError::Transport("mail relay worker stopped".to_string()))
    }
}

async fn deliver(
    client: reqwest::Client,
    endpoint: String,
    mut receiver: mpsc::UnboundedReceiver<LeadNotification>,
) {
    while let Some(notification) = receiver.recv().await {
        let submission_id = notification.submission_id.0.clone();
        let outcome = client
            .post(&endpoint)
            .json(&notification)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match outcome {
            Ok(response) => info!(
                %submission_id,
                status = response.status().as_u16(),
                "notification relayed"
            ),
            Err(err) => error!(%submission_id, error = %err, "notification relay failed"),
        }
    }
}
