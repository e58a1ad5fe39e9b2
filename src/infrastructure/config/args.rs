use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::app_config::{LogLevel, StorageBackend};

#[derive(Debug, Parser)]
#[command(
    name = "datum",
    version,
    about = "Command-line client for the Datum field-sales backend",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Backend origin, e.g. `https://datum.example.com`.
    #[arg(long, env = "DATUM_API_BASE_URL", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// API version segment.
    #[arg(long, env = "DATUM_API_VERSION", value_name = "VERSION", global = true)]
    pub api_version: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Token storage backend.
    #[arg(long, value_enum, global = true)]
    pub storage: Option<StorageBackend>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the token pair.
    Login {
        #[arg(short, long)]
        username: String,

        /// Read from `DATUM_PASSWORD` when omitted.
        #[arg(short, long, env = "DATUM_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Discard the stored session.
    Logout,

    /// Show whether a session is active.
    Status,

    /// List a collection, e.g. `geo/countries`.
    List {
        resource: String,

        /// Filter as `key=value`; repeatable.
        #[arg(short, long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },

    /// Show one record.
    Get { resource: String, id: String },

    /// Create a record from a JSON object.
    Create {
        resource: String,

        #[arg(short, long, value_name = "JSON")]
        data: String,
    },

    /// Replace a record, or change some fields with `--partial`.
    Update {
        resource: String,
        id: String,

        #[arg(short, long, value_name = "JSON")]
        data: String,

        #[arg(long)]
        partial: bool,
    },

    /// Delete a record.
    Delete { resource: String, id: String },
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("status=planned", Some(("status", "planned")) ; "plain")]
    #[test_case("q=a=b", Some(("q", "a=b")) ; "value keeps later equals signs")]
    #[test_case("outlet=", Some(("outlet", "")) ; "empty value")]
    #[test_case("=3", None ; "empty key")]
    #[test_case("planned", None ; "missing separator")]
    fn test_parse_filter(raw: &str, expected: Option<(&str, &str)>) {
        let parsed = parse_filter(raw).ok();
        assert_eq!(
            parsed,
            expected.map(|(k, v)| (k.to_string(), v.to_string()))
        );
    }

    #[test]
    fn test_list_with_filters() {
        let args = CliArgs::parse_from([
            "datum", "list", "visits/visits", "-f", "status=planned", "--filter", "outlet=3",
        ]);

        let Command::List { resource, filters } = args.command else {
            panic!("expected list");
        };
        assert_eq!(resource, "visits/visits");
        assert_eq!(filters.len(), 2);
    }

    #[test]
    fn test_update_partial_flag() {
        let args = CliArgs::parse_from([
            "datum", "update", "geo/countries", "4", "--data", "{\"name\":\"X\"}", "--partial",
        ]);

        assert!(matches!(args.command, Command::Update { partial: true, .. }));
    }
}
