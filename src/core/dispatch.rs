use crate::core::{DetectRequest, Detector, QueryOutcome, ResolvedConfig};
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;

const INDENT: &[u8] = b"   ";

/// Runs one detection for a resolved configuration and writes the result.
pub struct QueryDispatcher<D: Detector> {
    detector: D,
}

impl<D: Detector> QueryDispatcher<D> {
    pub fn new(detector: D) -> Self {
        Self { detector }
    }

    pub async fn query(&self, config: &ResolvedConfig) -> Result<QueryOutcome> {
        let request = DetectRequest::from(config);
        tracing::debug!(
            "Detecting protocol at {} (timeout {}ms)",
            request.target(),
            config.timeout_millis
        );

        let detection = self.detector.detect(&request).await?;
        tracing::debug!("Detected protocol: {}", detection.protocol);

        Ok(QueryOutcome::from(detection))
    }

    /// Queries, then writes the document followed by a blank line.
    pub async fn run<W: Write>(&self, config: &ResolvedConfig, out: &mut W) -> Result<()> {
        let outcome = self.query(config).await?;
        let bytes = render(&outcome, config.indent_output)?;

        out.write_all(&bytes)?;
        out.write_all(b"\n\n")?;
        out.flush()?;
        Ok(())
    }
}

/// Serializes compactly, or with three-space indentation.
pub fn render(outcome: &QueryOutcome, indent: bool) -> serde_json::Result<Vec<u8>> {
    if !indent {
        return serde_json::to_vec(outcome);
    }

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    outcome.serialize(&mut serializer)?;
    Ok(buf)
}
