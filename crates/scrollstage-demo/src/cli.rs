#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `SCROLLSTAGE_DEMO_*` prefix.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Scrollstage Demo: a pinned, scroll-driven card stack in the terminal

USAGE:
    scrollstage-demo [OPTIONS]

OPTIONS:
    --config=PATH        Timeline config (JSON); missing fields use defaults
    --catalog=PATH       Catalog items (JSON array) instead of the built-in five
    --scrub-ms=N         Card playhead lag in milliseconds (0 = exact tracking)
    --step=N             Scroll distance per wheel notch or arrow key (default: 120)
    --exit-after-ms=N    Auto-quit after N milliseconds (0 = never)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Wheel, Up/Down, j/k     Scroll by one step
    PageUp/PageDown, Space  Scroll by one screen
    Home/End                Jump to the top or bottom of the page
    1-9                     Jump to the item with that number
    q / Esc / Ctrl+C        Quit

ENVIRONMENT VARIABLES:
    SCROLLSTAGE_DEMO_CONFIG         Override --config
    SCROLLSTAGE_DEMO_CATALOG        Override --catalog
    SCROLLSTAGE_DEMO_SCRUB_MS       Override --scrub-ms
    SCROLLSTAGE_DEMO_STEP           Override --step
    SCROLLSTAGE_DEMO_EXIT_AFTER_MS  Override --exit-after-ms
    SCROLLSTAGE_DEMO_LOG            Write tracing output to this file (filter via RUST_LOG)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    /// Timeline config file.
    pub config: Option<PathBuf>,
    /// Catalog file.
    pub catalog: Option<PathBuf>,
    /// Scrub lag override; `Some(0)` disables scrub.
    pub scrub_ms: Option<u64>,
    /// Scroll distance per step.
    pub step: f32,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Log file.
    pub log: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            config: None,
            catalog: None,
            scrub_ms: None,
            step: 120.0,
            exit_after_ms: 0,
            log: None,
        }
    }
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse process arguments and environment, exiting on `--help`,
    /// `--version`, or a bad argument.
    pub fn parse() -> Self {
        let args = env::args().skip(1);
        match Self::from_sources(args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("scrollstage-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse from explicit sources.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags. Unparseable environment values are
    /// ignored; unparseable flags are errors.
    pub fn from_sources<I, E>(args: I, env: E) -> Result<Command, String>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = env("SCROLLSTAGE_DEMO_CONFIG") {
            opts.config = Some(val.into());
        }
        if let Some(val) = env("SCROLLSTAGE_DEMO_CATALOG") {
            opts.catalog = Some(val.into());
        }
        if let Some(val) = env("SCROLLSTAGE_DEMO_SCRUB_MS")
            && let Ok(n) = val.parse()
        {
            opts.scrub_ms = Some(n);
        }
        if let Some(val) = env("SCROLLSTAGE_DEMO_STEP")
            && let Ok(n) = val.parse::<f32>()
            && n > 0.0
        {
            opts.step = n;
        }
        if let Some(val) = env("SCROLLSTAGE_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }
        if let Some(val) = env("SCROLLSTAGE_DEMO_LOG") {
            opts.log = Some(val.into());
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                other => {
                    if let Some(val) = other.strip_prefix("--config=") {
                        opts.config = Some(val.into());
                    } else if let Some(val) = other.strip_prefix("--catalog=") {
                        opts.catalog = Some(val.into());
                    } else if let Some(val) = other.strip_prefix("--scrub-ms=") {
                        opts.scrub_ms = Some(
                            val.parse()
                                .map_err(|_| format!("Invalid --scrub-ms value: {val}"))?,
                        );
                    } else if let Some(val) = other.strip_prefix("--step=") {
                        opts.step = match val.parse::<f32>() {
                            Ok(n) if n > 0.0 && n.is_finite() => n,
                            _ => return Err(format!("Invalid --step value: {val}")),
                        };
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = val
                            .parse()
                            .map_err(|_| format!("Invalid --exit-after-ms value: {val}"))?;
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }
}
