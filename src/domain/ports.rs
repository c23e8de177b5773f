use crate::domain::model::{DetectRequest, Detection, Response};
use crate::utils::error::QueryError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Read access to environment variables.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Works out which protocol a host speaks and returns its live status.
#[async_trait]
pub trait Detector: Send + Sync {
    async fn detect(&self, request: &DetectRequest) -> Result<Detection, QueryError>;
}

/// A single protocol check used by the probing detector.
#[async_trait]
pub trait Probe: Send + Sync {
    fn protocol(&self) -> &str;
    async fn probe(&self, address: &str, port: u16) -> Result<Response, QueryError>;
}
