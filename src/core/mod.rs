pub mod detector;
pub mod dispatch;

pub use crate::domain::model::{DetectRequest, Detection, QueryOutcome, ResolvedConfig, Response};
pub use crate::domain::ports::{Detector, EnvSource, Probe};
pub use crate::utils::error::Result;
