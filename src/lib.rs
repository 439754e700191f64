use std::fmt;
use std::io::{self, Write};

use clap::builder::BoolishValueParser;
use clap::{Args, ValueEnum};
use log::{info, warn};
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::utils::Integer;

pub mod env_var;
pub mod job_args;
pub mod payload;
pub mod utils;

/// Key the workflow's choice state inspects
pub const DEFAULT_OUTPUT_KEY: &str = "triggerLambda";

/// Why an input source produced no usable `n`
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("no value for {0}")]
    Missing(String),
    #[error("payload is not valid JSON: {0}")]
    MalformedPayload(String),
    #[error("payload must be a JSON object, got {0}")]
    PayloadNotObject(String),
    #[error("payload value {0} is not an integer")]
    PayloadNotInteger(String),
    #[error("{0:?} is not an integer")]
    NotAnInteger(String),
    #[error("option {0} expects a value")]
    FlagWithoutValue(String),
}

/// What to do when no valid `n` could be read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    /// Report `false` and carry on
    #[default]
    Lenient,
    /// Fail the step
    Strict,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    #[clap(
        long = "key",
        env = "GLUE_TRIGGER_KEY",
        default_value = DEFAULT_OUTPUT_KEY,
        help = "Name of the boolean field in the JSON output"
    )]
    pub key: String,
    #[clap(
        long = "nest-under",
        env = "GLUE_TRIGGER_NEST_UNDER",
        help = "Wrap the result object under this key, e.g. glueResult"
    )]
    pub nest_under: Option<String>,
    #[clap(
        long = "policy",
        env = "GLUE_TRIGGER_POLICY",
        value_enum,
        default_value_t = Policy::Lenient
    )]
    pub policy: Policy,
    #[clap(
        long = "quiet",
        env = "GLUE_TRIGGER_QUIET",
        value_parser = BoolishValueParser::new(),
        help = "Only print the JSON line"
    )]
    pub quiet: bool,
}

impl Default for OutputArgs {
    fn default() -> Self {
        OutputArgs {
            key: DEFAULT_OUTPUT_KEY.to_string(),
            nest_under: None,
            policy: Policy::Lenient,
            quiet: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Even(Integer),
    Odd(Integer),
    NoValidN,
}

impl Decision {
    pub fn from_input(
        input: Result<Integer, InputError>,
        policy: Policy,
    ) -> Result<Self, InputError> {
        match input {
            Ok(n) if n.is_even() => Ok(Decision::Even(n)),
            Ok(n) => Ok(Decision::Odd(n)),
            Err(e) => match policy {
                Policy::Lenient => {
                    warn!("{}", e);
                    Ok(Decision::NoValidN)
                }
                Policy::Strict => Err(e),
            },
        }
    }

    pub fn trigger_lambda(&self) -> bool {
        matches!(self, Decision::Even(_))
    }

    pub fn status_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Even(n) => write!(f, "n={} is even. Triggering Lambda: true", n),
            Decision::Odd(n) => write!(f, "n={} is odd. Not triggering Lambda.", n),
            Decision::NoValidN => write!(f, "No valid 'n' provided. Not triggering Lambda."),
        }
    }
}

/// Writes `": "` after keys and `", "` between entries, the layout of
/// Python's `json.dumps`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}

/// Single-line JSON step output, `{"triggerLambda": true}` by default
pub fn render(decision: &Decision, args: &OutputArgs) -> io::Result<String> {
    let mut result = Map::new();
    result.insert(args.key.clone(), Value::Bool(decision.trigger_lambda()));

    let output = match &args.nest_under {
        Some(outer) => {
            let mut wrapper = Map::new();
            wrapper.insert(outer.clone(), Value::Object(result));
            Value::Object(wrapper)
        }
        None => Value::Object(result),
    };

    let mut buf = Vec::new();
    output.serialize(&mut Serializer::with_formatter(&mut buf, SpacedFormatter))?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Writes the status line and then the JSON line, which is always last so
/// the workflow can capture it as the step output.
pub fn run<W: Write>(decision: &Decision, args: &OutputArgs, out: &mut W) -> io::Result<()> {
    info!("trigger lambda: {}", decision.trigger_lambda());
    if !args.quiet {
        writeln!(out, "{}", decision.status_line())?;
    }
    writeln!(out, "{}", render(decision, args)?)?;
    out.flush()
}
