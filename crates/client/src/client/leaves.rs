//! Leave request operations.

use async_trait::async_trait;
use serde::Deserialize;

use leavecal_core::calendar::{EventId, LeaveEvent};
use leavecal_core::ports::{CommitError, LeaveStore, RescheduleRequest};

use super::LeavecalClient;
use crate::error::Result;

/// The refreshed event, bare or wrapped in a `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EventBody {
    Wrapped { data: LeaveEvent },
    Bare(LeaveEvent),
}

impl EventBody {
    fn into_event(self) -> LeaveEvent {
        match self {
            EventBody::Wrapped { data } => data,
            EventBody::Bare(event) => event,
        }
    }
}

impl LeavecalClient {
    /// Reschedule the leave request `id`.
    pub async fn reschedule_leave(
        &self,
        id: &EventId,
        request: &RescheduleRequest,
    ) -> Result<LeaveEvent> {
        let response = self
            .client
            .put(self.url(&format!("/leave-requests/{id}"))?)
            .json(request)
            .send()
            .await?;
        let body: EventBody = self
            .handle_response(response, &format!("leave request {id}"))
            .await?;
        Ok(body.into_event())
    }
}

#[async_trait]
impl LeaveStore for LeavecalClient {
    async fn reschedule(
        &self,
        id: &EventId,
        request: &RescheduleRequest,
    ) -> std::result::Result<LeaveEvent, CommitError> {
        self.reschedule_leave(id, request).await.map_err(|err| {
            tracing::debug!(event_id = %id, error = %err, "Reschedule request failed");
            CommitError::from(err)
        })
    }
}
