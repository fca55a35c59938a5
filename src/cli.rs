//! Command-line argument parsing.
//!
//! The dashboard takes a handful of flags; anything else falls through to
//! running the TUI. Parsing is a plain match over the argument list.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information.
    Version,
    /// Show usage.
    Help,
    /// Run the TUI (default), optionally against a custom backend URL.
    RunTui { url: Option<String> },
}

/// Usage text for `--help`.
pub const USAGE: &str = "\
gramdeck - terminal console for an Instagram posting automation backend

USAGE:
    gramdeck [OPTIONS]

OPTIONS:
    --url <BASE_URL>    Backend base URL (default: http://127.0.0.1:8000/api,
                        env: GRAMDECK_API_URL)
    -V, --version       Print version
    -h, --help          Print this help
";

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut url = None;
    let mut args = args.skip(1); // Skip the program name
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--url" => url = args.next(),
            _ => {}
        }
    }
    CliCommand::RunTui { url }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&["gramdeck"]), CliCommand::RunTui { url: None });
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["gramdeck", "--version"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_version_short_flag() {
        assert_eq!(parse(&["gramdeck", "-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_help_flag() {
        assert_eq!(parse(&["gramdeck", "--help"]), CliCommand::Help);
        assert_eq!(parse(&["gramdeck", "-h"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_url_flag() {
        assert_eq!(
            parse(&["gramdeck", "--url", "http://box:8000/api"]),
            CliCommand::RunTui { url: Some("http://box:8000/api".to_string()) }
        );
    }

    #[test]
    fn test_parse_url_flag_without_value() {
        assert_eq!(parse(&["gramdeck", "--url"]), CliCommand::RunTui { url: None });
    }

    #[test]
    fn test_unknown_args_are_ignored() {
        assert_eq!(parse(&["gramdeck", "--wat"]), CliCommand::RunTui { url: None });
    }
}
