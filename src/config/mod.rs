#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::CliArgs;

use crate::domain::model::{Parameter, ResolvedConfig};
use crate::domain::ports::EnvSource;
use crate::utils::error::{GqError, Result};
use crate::utils::validation;

/// Raw flag values as parsed from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagValues {
    pub ip: Option<String>,
    pub port: Option<i64>,
    pub timeout: Option<i64>,
    pub indent: bool,
    pub help: bool,
}

impl Default for FlagValues {
    fn default() -> Self {
        Self {
            ip: None,
            port: None,
            timeout: Some(DEFAULT_TIMEOUT_MILLIS),
            indent: false,
            help: false,
        }
    }
}

pub const DEFAULT_TIMEOUT_MILLIS: i64 = 5;

/// Picks a value for one parameter: a usable flag, then a non-empty
/// environment variable, otherwise a missing-parameter error.
pub fn resolve_param<F, T>(
    parameter: Parameter,
    flag: Option<F>,
    env_value: Option<String>,
    accept: impl FnOnce(F) -> Option<T>,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T> {
    if let Some(value) = flag.and_then(accept) {
        tracing::debug!("{} taken from flag", parameter);
        return Ok(value);
    }

    match env_value {
        Some(raw) if !raw.is_empty() => {
            tracing::debug!("{} taken from {}", parameter, parameter.env_var());
            parse(&raw).ok_or(GqError::InvalidParameter {
                variable: parameter.env_var(),
                value: raw,
            })
        }
        _ => Err(GqError::MissingParameter(parameter)),
    }
}

/// Builds the configuration for one run. Parameters are checked in the order
/// address, port, timeout, help so the first failure is always the same one.
pub fn resolve<E: EnvSource + ?Sized>(flags: FlagValues, env: &E) -> Result<ResolvedConfig> {
    let address = resolve_param(
        Parameter::Ip,
        flags.ip,
        env.var(Parameter::Ip.env_var()),
        validation::non_empty_address,
        |raw| Some(raw.to_string()),
    )?;

    let port = resolve_param(
        Parameter::Port,
        flags.port,
        env.var(Parameter::Port.env_var()),
        validation::port_in_range,
        validation::parse_env_port,
    )?;

    let timeout_millis = resolve_param(
        Parameter::Timeout,
        flags.timeout,
        env.var(Parameter::Timeout.env_var()),
        validation::non_negative_timeout,
        validation::parse_env_timeout,
    )?;

    if flags.help {
        return Err(GqError::HelpRequested);
    }

    Ok(ResolvedConfig {
        address,
        port,
        timeout_millis,
        indent_output: flags.indent,
    })
}
