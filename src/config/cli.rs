use crate::config::{FlagValues, DEFAULT_TIMEOUT_MILLIS};
use crate::utils::error::{GqError, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, CommandFactory, Parser};
use std::ffi::OsString;

const LONG_FLAGS: [&str; 5] = ["ip", "port", "timeout", "indent", "help"];

#[derive(Debug, Clone, Parser)]
#[command(name = "gamequery")]
#[command(about = "Detect the game-server protocol behind an address and print the result as JSON")]
#[command(disable_help_flag = true, disable_version_flag = true, args_override_self = true)]
pub struct CliArgs {
    /// Required: IP address to query [env: GQ_IP]
    #[arg(long, value_name = "string")]
    pub ip: Option<String>,

    /// Required: Port number to test [env: GQ_PORT]
    #[arg(long, value_name = "int", allow_negative_numbers = true)]
    pub port: Option<i64>,

    /// Timeout value in milliseconds [env: GQ_TIMEOUT]
    #[arg(long, value_name = "int", default_value_t = DEFAULT_TIMEOUT_MILLIS, allow_negative_numbers = true)]
    pub timeout: i64,

    /// Should the output be indented
    #[arg(
        long,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub indent: bool,

    /// Displays this help message
    #[arg(
        short = 'h',
        long,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub help: bool,
}

impl CliArgs {
    /// Parses process arguments, accepting `-flag` as well as `--flag`.
    pub fn parse_flags<I, T>(args: I) -> Result<FlagValues>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = Self::try_parse_from(normalize_args(args)).map_err(|e| {
            let message = e.to_string();
            GqError::InvalidFlags {
                message: message
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .trim_start_matches("error: ")
                    .to_string(),
            }
        })?;
        Ok(args.into())
    }

    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }
}

impl From<CliArgs> for FlagValues {
    fn from(args: CliArgs) -> Self {
        Self {
            ip: args.ip,
            port: args.port,
            timeout: Some(args.timeout),
            indent: args.indent,
            help: args.help,
        }
    }
}

/// Rewrites single-dash long flags (`-ip`, `-port=1`) to the double-dash form.
/// Everything after a bare `--` is left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 || passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            let rewrite = matches!(
                text.strip_prefix('-'),
                Some(rest) if !rest.starts_with('-') && is_long_flag(rest)
            );
            if rewrite {
                OsString::from(format!("-{}", text))
            } else {
                arg
            }
        })
        .collect()
}

fn is_long_flag(rest: &str) -> bool {
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}
