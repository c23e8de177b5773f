pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use adapters::TcpProbe;
pub use config::{resolve, FlagValues};
pub use crate::core::{detector::ProbeDetector, dispatch::QueryDispatcher};
pub use domain::model::{DetectRequest, Detection, Parameter, QueryOutcome, ResolvedConfig, Response};
pub use domain::ports::{Detector, EnvSource, Probe, ProcessEnv};
pub use utils::error::{GqError, QueryError, Result};
