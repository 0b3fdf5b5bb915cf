#![forbid(unsafe_code)]

//! Command-line argument parsing for the feature showcase.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `SHOWCASE_*` prefix.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Feature Showcase: a scroll-driven product feature carousel

USAGE:
    feature-showcase [OPTIONS]

OPTIONS:
    --catalog=PATH         Load feature records from a JSON file
    --section-screens=N    Height of the showcase section in screens (default: 5)
    --scroll-step=N        Rows per arrow key or wheel notch (default: 3)
    --no-mouse             Disable mouse event capture
    --log-file=PATH        Write tracing output to PATH
    --exit-after-ms=N      Auto-quit after N milliseconds (0 = never)
    --help, -h             Show this help message
    --version, -V          Show version

KEYBINDINGS:
    Up/Down, j/k           Scroll the page
    PgUp/PgDn, Space       Scroll one screen
    Home/End, g/G          Jump to top or bottom of the page
    Left/Right, h/l        Previous / next feature
    1-9                    Select feature N
    q / Esc / Ctrl+C       Quit

ENVIRONMENT VARIABLES:
    SHOWCASE_CATALOG           Override --catalog
    SHOWCASE_SECTION_SCREENS   Override --section-screens
    SHOWCASE_SCROLL_STEP       Override --scroll-step
    SHOWCASE_LOG_FILE          Override --log-file
    SHOWCASE_EXIT_AFTER_MS     Override --exit-after-ms
    SHOWCASE_LOG               Log filter (falls back to RUST_LOG, default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// JSON catalog to load instead of the built-in records.
    pub catalog: Option<PathBuf>,
    /// Section height as a multiple of the viewport height.
    pub section_screens: u16,
    /// Rows moved per arrow key or wheel notch.
    pub scroll_step: u16,
    /// Whether mouse events are enabled.
    pub mouse: bool,
    /// Tracing output file; logging is off when unset.
    pub log_file: Option<PathBuf>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            catalog: None,
            section_screens: 5,
            scroll_step: 3,
            mouse: true,
            log_file: None,
            exit_after_ms: 0,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse process arguments and environment, exiting on `--help`,
    /// `--version`, or invalid input.
    pub fn parse() -> Self {
        match parse_from(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("feature-showcase {VERSION}");
                process::exit(0);
            }
            Err(message) => {
                eprintln!("{message}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }
}

/// Parse `args` with environment lookups through `var`.
///
/// Environment variables take precedence over defaults but are overridden
/// by explicit command-line flags. Malformed environment values are
/// ignored; malformed flags are errors.
pub fn parse_from<I, S, F>(args: I, var: F) -> Result<Command, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> Option<String>,
{
    let mut opts = Opts::default();

    // Apply environment variable defaults first
    if let Some(val) = var("SHOWCASE_CATALOG")
        && !val.is_empty()
    {
        opts.catalog = Some(PathBuf::from(val));
    }
    if let Some(val) = var("SHOWCASE_SECTION_SCREENS")
        && let Ok(n) = val.parse()
    {
        opts.section_screens = n;
    }
    if let Some(val) = var("SHOWCASE_SCROLL_STEP")
        && let Ok(n) = val.parse()
    {
        opts.scroll_step = n;
    }
    if let Some(val) = var("SHOWCASE_LOG_FILE")
        && !val.is_empty()
    {
        opts.log_file = Some(PathBuf::from(val));
    }
    if let Some(val) = var("SHOWCASE_EXIT_AFTER_MS")
        && let Ok(n) = val.parse()
    {
        opts.exit_after_ms = n;
    }

    // Command-line args override env vars
    for arg in args {
        match arg.as_ref() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--no-mouse" => opts.mouse = false,
            other => {
                if let Some(val) = other.strip_prefix("--catalog=") {
                    opts.catalog = Some(PathBuf::from(val));
                } else if let Some(val) = other.strip_prefix("--section-screens=") {
                    opts.section_screens = match val.parse::<u16>() {
                        Ok(n) if n > 0 => n,
                        _ => return Err(format!("Invalid --section-screens value: {val}")),
                    };
                } else if let Some(val) = other.strip_prefix("--scroll-step=") {
                    opts.scroll_step = match val.parse::<u16>() {
                        Ok(n) if n > 0 => n,
                        _ => return Err(format!("Invalid --scroll-step value: {val}")),
                    };
                } else if let Some(val) = other.strip_prefix("--log-file=") {
                    opts.log_file = Some(PathBuf::from(val));
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Command, String> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        parse_from(args, |key| env.get(key).cloned())
    }

    fn run(args: &[&str], env: &[(&str, &str)]) -> Opts {
        match parse(args, env) {
            Ok(Command::Run(opts)) => opts,
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.catalog, None);
        assert_eq!(opts.section_screens, 5);
        assert_eq!(opts.scroll_step, 3);
        assert!(opts.mouse);
        assert_eq!(opts.log_file, None);
        assert_eq!(opts.exit_after_ms, 0);
    }

    #[test]
    fn no_args_gives_defaults() {
        assert_eq!(run(&[], &[]), Opts::default());
    }

    #[test]
    fn flags_are_parsed() {
        let opts = run(
            &[
                "--catalog=features.json",
                "--section-screens=8",
                "--scroll-step=2",
                "--no-mouse",
                "--log-file=/tmp/showcase.log",
                "--exit-after-ms=250",
            ],
            &[],
        );
        assert_eq!(opts.catalog, Some(PathBuf::from("features.json")));
        assert_eq!(opts.section_screens, 8);
        assert_eq!(opts.scroll_step, 2);
        assert!(!opts.mouse);
        assert_eq!(opts.log_file, Some(PathBuf::from("/tmp/showcase.log")));
        assert_eq!(opts.exit_after_ms, 250);
    }

    #[test]
    fn env_applies_and_flags_win() {
        let env = [
            ("SHOWCASE_SECTION_SCREENS", "7"),
            ("SHOWCASE_SCROLL_STEP", "4"),
            ("SHOWCASE_CATALOG", "env.json"),
        ];
        let opts = run(&[], &env);
        assert_eq!(opts.section_screens, 7);
        assert_eq!(opts.scroll_step, 4);
        assert_eq!(opts.catalog, Some(PathBuf::from("env.json")));

        let opts = run(&["--section-screens=3"], &env);
        assert_eq!(opts.section_screens, 3);
        assert_eq!(opts.scroll_step, 4);
    }

    #[test]
    fn malformed_env_is_ignored() {
        let opts = run(&[], &[("SHOWCASE_SCROLL_STEP", "lots")]);
        assert_eq!(opts.scroll_step, 3);
    }

    #[test]
    fn bad_flags_are_errors() {
        assert!(parse(&["--section-screens=0"], &[]).is_err());
        assert!(parse(&["--scroll-step=x"], &[]).is_err());
        assert!(parse(&["--exit-after-ms=-1"], &[]).is_err());
        let err = parse(&["--frobnicate"], &[]).unwrap_err();
        assert_eq!(err, "Unknown argument: --frobnicate");
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse(&["--help", "--bogus"], &[]), Ok(Command::Help));
        assert_eq!(parse(&["-V"], &[]), Ok(Command::Version));
    }

    #[test]
    fn help_text_lists_env_vars() {
        assert!(HELP_TEXT.contains("SHOWCASE_CATALOG"));
        assert!(HELP_TEXT.contains("SHOWCASE_EXIT_AFTER_MS"));
        assert!(HELP_TEXT.contains("SHOWCASE_LOG "));
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }
}
