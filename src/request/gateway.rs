//! Submission boundary for service requests.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::RequestError;
use crate::models::{Confirmation, ServiceRequest};

/// Delivers a service request to the practice.
#[async_trait]
pub trait RequestGateway: Send + Sync {
    async fn submit(&self, request: &ServiceRequest) -> Result<Confirmation, RequestError>;
}

/// Stand-in backend: waits a fixed latency, then accepts every request.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    latency: Duration,
}

impl SimulatedGateway {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl RequestGateway for SimulatedGateway {
    async fn submit(&self, request: &ServiceRequest) -> Result<Confirmation, RequestError> {
        tokio::time::sleep(self.latency).await;

        Ok(Confirmation {
            reference: Uuid::new_v4(),
            service_id: request.service_id,
            service_title: request.service_title.clone(),
            attachments: request.files.len(),
            submitted_at: Utc::now().to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_gateway_waits_then_confirms() {
        let gateway = SimulatedGateway::new(Duration::from_millis(20));
        let request = ServiceRequest {
            service_id: 9,
            service_title: "Mergers & Acquisitions".to_string(),
            files: vec!["term-sheet.pdf".to_string()],
        };

        let started = std::time::Instant::now();
        let confirmation = gateway.submit(&request).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(confirmation.service_id, 9);
        assert_eq!(confirmation.service_title, "Mergers & Acquisitions");
        assert_eq!(confirmation.attachments, 1);
    }
}
