use crate::core::{Probe, Response};
use crate::utils::error::QueryError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Instant;
use tokio::net::TcpStream;

/// Reports a host as online when a TCP connection to it succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProbe;

#[async_trait]
impl Probe for TcpProbe {
    fn protocol(&self) -> &str {
        "tcp"
    }

    async fn probe(&self, address: &str, port: u16) -> Result<Response, QueryError> {
        let started = Instant::now();
        let stream = TcpStream::connect((address, port))
            .await
            .map_err(|source| QueryError::Connect {
                address: format!("{}:{}", address, port),
                source,
            })?;
        let latency = started.elapsed();

        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| format!("{}:{}", address, port));
        tracing::debug!("Connected to {} in {:?}", peer, latency);

        let mut response = Response::new();
        response.insert("Online".to_string(), Value::Bool(true));
        response.insert("Address".to_string(), Value::String(peer));
        response.insert("Port".to_string(), Value::from(port));
        response.insert(
            "LatencyMs".to_string(),
            Value::from(u64::try_from(latency.as_millis()).unwrap_or(u64::MAX)),
        );
        Ok(response)
    }
}
