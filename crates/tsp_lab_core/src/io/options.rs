use std::{env, time::Duration};

use log::LevelFilter;

use crate::{algo::hybrid::SearchBudget, Error, Result};

/// Runtime options for the solver CLI.
#[derive(Clone, Debug)]
pub struct SolverOptions {
    /// Solver to run: `held-karp`, `mst`, or `hybrid`.
    pub algorithm: Algorithm,
    /// Wall-clock limit (seconds) for the hybrid solver's bounded search.
    pub search_time_limit: f64,
    /// Node budget for the hybrid solver's bounded search.
    pub search_max_nodes: usize,
    /// Structured logging level.
    pub log_level: LogLevel,
    /// Logging output format.
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    pub log_output: String,
    /// Input TSPLIB file path. Empty means stdin.
    pub input: String,
    /// Output file path for the tour. Empty means stdout.
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Algorithm {
    HeldKarp,
    MstApprox,
    Hybrid,
}

impl Algorithm {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "held-karp" | "exact" => Ok(Self::HeldKarp),
            "mst" | "mst-approx" => Ok(Self::MstApprox),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --algorithm: {value} (expected held-karp, mst, or hybrid)"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HeldKarp => "held-karp",
            Self::MstApprox => "mst",
            Self::Hybrid => "hybrid",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-level: {value}"
            ))),
        }
    }

    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-format: {value}"
            ))),
        }
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Hybrid,
            search_time_limit: 10.0,
            search_max_nodes: 50_000,
            log_level: LogLevel::Info,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };
            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = split_arg(raw_name, &mut args);

            match name.as_str() {
                "algorithm" => {
                    options.algorithm = Algorithm::parse(&required(&name, value)?)?;
                }
                "search-time-limit" => {
                    options.search_time_limit = parse_value::<f64>(&name, value)?;
                }
                "search-max-nodes" => {
                    options.search_max_nodes = parse_value::<usize>(&name, value)?;
                }
                "log-level" => {
                    options.log_level = LogLevel::parse(&required(&name, value)?)?;
                }
                "log-format" => {
                    options.log_format = LogFormat::parse(&required(&name, value)?)?;
                }
                "log-timestamp" => {
                    options.log_timestamp = match value {
                        Some(v) => parse_bool(&name, &v)?,
                        None => true,
                    };
                }
                "log-output" => {
                    options.log_output = required(&name, value)?;
                }
                "input" => {
                    options.input = required(&name, value)?;
                }
                "output" => {
                    options.output = required(&name, value)?;
                }
                _ => {
                    return Err(Error::invalid_input(format!(
                        "Unknown option: --{name}\n\n{}",
                        Self::usage()
                    )));
                }
            }
        }

        if options.search_time_limit <= 0.0 {
            return Err(Error::invalid_input("--search-time-limit must be > 0"));
        }

        Ok(options)
    }

    pub fn search_budget(&self) -> SearchBudget {
        SearchBudget {
            time_limit: Duration::from_secs_f64(self.search_time_limit),
            max_nodes: self.search_max_nodes,
        }
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  tsp-lab [options]\n\n",
            "Options:\n",
            "  --input <path>               TSPLIB file (stdin when omitted)\n",
            "  --output <path>              Tour output file (stdout when omitted)\n",
            "  --algorithm <name>           held-karp | mst | hybrid (default hybrid)\n",
            "  --search-time-limit <secs>   Bounded search wall-clock limit\n",
            "  --search-max-nodes <count>   Bounded search node budget\n",
            "  --log-level <level>          error | warn | info | debug | trace | off\n",
            "  --log-format <fmt>           compact | pretty\n",
            "  --log-timestamp[=<bool>]\n",
            "  --log-output <path>\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  tsp-lab --input a280.tsp --algorithm mst\n",
            "  tsp-lab --input test15.tsp --algorithm held-karp --log-level debug\n",
        )
    }
}

fn required(name: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::invalid_input(format!("Missing value for --{name}")))
}

fn parse_value<T>(name: &str, value: Option<String>) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = required(name, value)?;
    raw.parse::<T>()
        .map_err(|e| Error::invalid_input(format!("Invalid value for --{name}: {raw} ({e})")))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}

fn split_arg(
    raw_name: &str,
    args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
) -> (String, Option<String>) {
    if let Some((k, v)) = raw_name.split_once('=') {
        return (k.to_string(), Some(v.to_string()));
    }

    let value = match args.peek() {
        Some(next) if !next.starts_with("--") => args.next(),
        _ => None,
    };

    (raw_name.to_string(), value)
}
