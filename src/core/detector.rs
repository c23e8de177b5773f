use crate::core::{DetectRequest, Detection, Detector, Probe};
use crate::utils::error::QueryError;
use async_trait::async_trait;
use futures::stream::{FuturesOrdered, StreamExt};
use std::time::Duration;

/// Used when a request carries no timeout of its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs every registered probe at once and reports the first one, in
/// registration order, that succeeded. Lower-priority probes still in flight
/// are dropped as soon as that answer is known.
pub struct ProbeDetector {
    probes: Vec<Box<dyn Probe>>,
}

impl ProbeDetector {
    pub fn new() -> Self {
        Self { probes: Vec::new() }
    }

    pub fn with_probe<P: Probe + 'static>(mut self, probe: P) -> Self {
        self.probes.push(Box::new(probe));
        self
    }

    pub fn protocols(&self) -> Vec<&str> {
        self.probes.iter().map(|probe| probe.protocol()).collect()
    }
}

impl Default for ProbeDetector {
    fn default() -> Self {
        Self::new().with_probe(crate::adapters::TcpProbe)
    }
}

#[async_trait]
impl Detector for ProbeDetector {
    async fn detect(&self, request: &DetectRequest) -> Result<Detection, QueryError> {
        let limit = request.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let target = request.target();

        if self.probes.is_empty() {
            return Err(QueryError::Undetected {
                address: target,
                details: "no probes registered".to_string(),
            });
        }

        let mut attempts: FuturesOrdered<_> = self.probes.iter().map(|probe| async move {
            let result = tokio::time::timeout(limit, probe.probe(&request.address, request.port))
                .await
                .unwrap_or(Err(QueryError::Timeout { after: limit }));
            (probe.protocol(), result)
        })
        .collect();

        let mut failures = Vec::new();
        while let Some((protocol, result)) = attempts.next().await {
            match result {
                Ok(response) => {
                    tracing::debug!("✅ {} probe answered at {}", protocol, target);
                    return Ok(Detection {
                        protocol: protocol.to_string(),
                        response,
                    });
                }
                Err(e) => {
                    tracing::debug!("{} probe failed at {}: {}", protocol, target, e);
                    failures.push((protocol, e));
                }
            }
        }

        if failures.len() == 1 {
            let (_, e) = failures.remove(0);
            return Err(e);
        }

        let details = failures
            .iter()
            .map(|(protocol, e)| format!("{}: {}", protocol, e))
            .collect::<Vec<_>>()
            .join("; ");
        Err(QueryError::Undetected {
            address: target,
            details,
        })
    }
}
