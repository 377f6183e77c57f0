#![forbid(unsafe_code)]

//! Command-line argument parsing for the native demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `STYLELENS_DEMO_*` prefix.

use std::env;
use std::fmt;
use std::path::PathBuf;

use stylelens_core::{ConfigError, EmptyCategories, InspectorConfig, Viewport};

use crate::scenario::{DEMO_ELEMENTS, Scenario};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
stylelens demo: inspect the demo elements against a simulated browser

USAGE:
    stylelens-demo [OPTIONS]

OPTIONS:
    --element=N          Element to inspect, 1-indexed (default: 1)
    --viewport=WxH       Viewport size in CSS pixels (default: 1024x768)
    --scroll=X,Y         Page scroll offsets (default: 0,0)
    --hide-empty         Hide category headings with nothing to list
    --raw                Expand the raw property listing
    --diagnostics        Append the JSONL diagnostic log
    --config=FILE        Load inspector options from a JSON file
    --help, -h           Show this help message
    --version, -V        Show version

ELEMENTS:
    1  Button        inline-block button with padding and radius
    2  Flex card     column flex container with shadow and transform
    3  Grid          three-column grid gallery

ENVIRONMENT VARIABLES:
    STYLELENS_DEMO_ELEMENT    Override --element
    STYLELENS_DEMO_VIEWPORT   Override --viewport
    STYLELENS_DEMO_SCROLL     Override --scroll
    STYLELENS_DEMO_CONFIG     Override --config
    STYLELENS_DIAGNOSTICS, STYLELENS_HIDE_EMPTY_CATEGORIES, STYLELENS_RAW_OPEN
                              Inspector options (flags win)
    RUST_LOG                  Log filter for stderr output";

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    /// Element to inspect (1-indexed).
    pub element: usize,
    /// Viewport width and height.
    pub viewport: (f64, f64),
    /// Horizontal and vertical scroll offsets.
    pub scroll: (f64, f64),
    pub hide_empty: bool,
    pub raw: bool,
    pub diagnostics: bool,
    /// JSON file with [`InspectorConfig`] fields.
    pub config: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            element: 1,
            viewport: (1024.0, 768.0),
            scroll: (0.0, 0.0),
            hide_empty: false,
            raw: false,
            diagnostics: false,
            config: None,
        }
    }
}

/// Errors from argument parsing and configuration loading.
#[derive(Debug)]
pub enum CliError {
    UnknownArgument(String),
    InvalidValue { flag: &'static str, value: String },
    ReadConfig { path: PathBuf, source: std::io::Error },
    Config(ConfigError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownArgument(arg) => write!(f, "unknown argument: {arg}"),
            Self::InvalidValue { flag, value } => write!(f, "invalid {flag} value: {value}"),
            Self::ReadConfig { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadConfig { source, .. } => Some(source),
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl Opts {
    /// Parse the process arguments and environment.
    pub fn parse() -> Result<Command, CliError> {
        Self::parse_from(env::args().skip(1), |key| env::var(key).ok())
    }

    /// Parse `args` (without the program name) with `lookup` standing in for
    /// the environment.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags. Unparseable environment values are
    /// ignored; unparseable flags are errors.
    pub fn parse_from(
        args: impl IntoIterator<Item = String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Command, CliError> {
        let mut opts = Self::default();

        if let Some(n) = lookup("STYLELENS_DEMO_ELEMENT").and_then(|v| parse_element(&v)) {
            opts.element = n;
        }
        if let Some(size) = lookup("STYLELENS_DEMO_VIEWPORT").and_then(|v| parse_pair(&v, 'x')) {
            opts.viewport = size;
        }
        if let Some(scroll) = lookup("STYLELENS_DEMO_SCROLL").and_then(|v| parse_pair(&v, ',')) {
            opts.scroll = scroll;
        }
        if let Some(path) = lookup("STYLELENS_DEMO_CONFIG") {
            opts.config = Some(path.into());
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--hide-empty" => opts.hide_empty = true,
                "--raw" => opts.raw = true,
                "--diagnostics" => opts.diagnostics = true,
                other => {
                    if let Some(val) = other.strip_prefix("--element=") {
                        opts.element = parse_element(val).ok_or_else(|| invalid("--element", val))?;
                    } else if let Some(val) = other.strip_prefix("--viewport=") {
                        opts.viewport =
                            parse_pair(val, 'x').ok_or_else(|| invalid("--viewport", val))?;
                    } else if let Some(val) = other.strip_prefix("--scroll=") {
                        opts.scroll = parse_pair(val, ',').ok_or_else(|| invalid("--scroll", val))?;
                    } else if let Some(val) = other.strip_prefix("--config=") {
                        opts.config = Some(val.into());
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }

    /// Inspector configuration: the config file (or defaults), then
    /// `STYLELENS_*` overrides from `lookup`, then flags.
    pub fn inspector_config(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<InspectorConfig, CliError> {
        let base = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
                    path: path.clone(),
                    source,
                })?;
                InspectorConfig::from_json(&json)?
            }
            None => InspectorConfig::default(),
        };
        let mut config = base.with_env_overrides(lookup);
        if self.hide_empty {
            config = config.with_empty_categories(EmptyCategories::Hide);
        }
        if self.raw {
            config = config.with_raw_open(true);
        }
        if self.diagnostics {
            config = config.with_diagnostics(true);
        }
        Ok(config)
    }

    /// The scripted run these options describe.
    pub fn scenario(&self, config: InspectorConfig) -> Result<Scenario, CliError> {
        let element = self
            .element
            .checked_sub(1)
            .and_then(|index| DEMO_ELEMENTS.get(index))
            .ok_or_else(|| invalid("--element", &self.element.to_string()))?;
        let (width, height) = self.viewport;
        let (scroll_x, scroll_y) = self.scroll;
        Ok(Scenario {
            element,
            viewport: Viewport::new(width, height).with_scroll(scroll_x, scroll_y),
            config,
        })
    }
}

fn invalid(flag: &'static str, value: &str) -> CliError {
    CliError::InvalidValue {
        flag,
        value: value.to_string(),
    }
}

fn parse_element(value: &str) -> Option<usize> {
    value
        .trim()
        .parse()
        .ok()
        .filter(|n| (1..=DEMO_ELEMENTS.len()).contains(n))
}

fn parse_pair(value: &str, separator: char) -> Option<(f64, f64)> {
    let (a, b) = value.split_once(separator)?;
    let a: f64 = a.trim().parse().ok()?;
    let b: f64 = b.trim().parse().ok()?;
    (a.is_finite() && b.is_finite() && a >= 0.0 && b >= 0.0).then_some((a, b))
}
