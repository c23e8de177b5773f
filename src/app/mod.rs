use crate::config::{self, CliArgs};
use crate::core::dispatch::QueryDispatcher;
use crate::core::{Detector, EnvSource, ResolvedConfig};
use crate::utils::error::{GqError, Result};
use std::ffi::OsString;
use std::io::Write;

/// Performs one full invocation against the given streams and returns the
/// process exit status.
pub async fn run<I, T, E, D, O, R>(args: I, env: &E, detector: D, stdout: &mut O, stderr: &mut R) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    E: EnvSource + ?Sized,
    D: Detector,
    O: Write,
    R: Write,
{
    let config = match resolve_config(args, env) {
        Ok(config) => config,
        Err(e) => return report(&e, stderr),
    };
    tracing::debug!("Resolved config: {:?}", config);

    let dispatcher = QueryDispatcher::new(detector);
    match dispatcher.run(&config, stdout).await {
        Ok(()) => 0,
        Err(e) => report(&e, stderr),
    }
}

pub fn resolve_config<I, T, E>(args: I, env: &E) -> Result<ResolvedConfig>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    E: EnvSource + ?Sized,
{
    let flags = CliArgs::parse_flags(args)?;
    config::resolve(flags, env)
}

fn report<R: Write>(error: &GqError, stderr: &mut R) -> i32 {
    // Help only prints usage.
    if !matches!(error, GqError::HelpRequested) {
        tracing::debug!("❌ {} (exit {})", error, error.exit_code());
        let _ = writeln!(stderr, "{}\n", error);
    }

    if error.shows_usage() {
        let _ = write!(stderr, "{}", CliArgs::usage());
    }
    let _ = stderr.flush();

    error.exit_code()
}
