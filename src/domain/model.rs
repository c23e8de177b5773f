use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Protocol-specific payload returned by a detector, in the detector's field order.
pub type Response = serde_json::Map<String, serde_json::Value>;

/// Parameters that fall back to the environment when no usable flag is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Ip,
    Port,
    Timeout,
}

impl Parameter {
    pub fn env_var(self) -> &'static str {
        match self {
            Parameter::Ip => "GQ_IP",
            Parameter::Port => "GQ_PORT",
            Parameter::Timeout => "GQ_TIMEOUT",
        }
    }

    pub fn article(self) -> &'static str {
        match self {
            Parameter::Ip => "an",
            Parameter::Port | Parameter::Timeout => "a",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Parameter::Ip => "IP",
            Parameter::Port => "Port",
            Parameter::Timeout => "Timeout",
        };
        f.write_str(label)
    }
}

/// Fully validated connection settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub address: String,
    pub port: u16,
    pub timeout_millis: u64,
    pub indent_output: bool,
}

impl ResolvedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectRequest {
    pub address: String,
    pub port: u16,
    /// `None` lets the engine pick its own default.
    pub timeout: Option<Duration>,
}

impl DetectRequest {
    pub fn target(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

impl From<&ResolvedConfig> for DetectRequest {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            address: config.address.clone(),
            port: config.port,
            timeout: Some(config.timeout()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub protocol: String,
    pub response: Response,
}

/// The document written to stdout: `Protocol` first, then the response fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryOutcome {
    #[serde(rename = "Protocol")]
    pub protocol: String,
    #[serde(flatten)]
    pub response: Response,
}

impl From<Detection> for QueryOutcome {
    fn from(detection: Detection) -> Self {
        Self {
            protocol: detection.protocol,
            response: detection.response,
        }
    }
}

// The outer `Protocol` field shadows a response field of the same name.
impl Serialize for QueryOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.response.iter().filter(|(key, _)| *key != "Protocol");
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("Protocol", &self.protocol)?;
        for (key, value) in fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
