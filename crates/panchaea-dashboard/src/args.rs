use std::time::Duration;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "panchaea-dashboard")]
#[command(about = "Live terminal dashboard for a Panchaea job server", long_about = None)]
pub struct Args {
    /// Base URL of the server's dashboard listener
    #[arg(long, env = "PANCHAEA_SERVER_URL", default_value = "http://127.0.0.1:8080")]
    pub server_url: String,

    /// Path of the status endpoint, relative to the server URL
    #[arg(long, env = "PANCHAEA_API_PATH", default_value = "api")]
    pub api_path: String,

    /// Pause between the end of one poll and the start of the next
    #[arg(
        long,
        env = "PANCHAEA_POLL_INTERVAL_MS",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_ms: u64,

    /// Give up on a single request after this long. Unset means no limit.
    #[arg(long, env = "PANCHAEA_REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: Option<u64>,

    /// Poll once, print the result and exit
    #[arg(long, default_value_t = false)]
    pub once: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// OTLP endpoint for exporting traces
    #[arg(long, env = "OTLP_URL")]
    pub otlp_url: Option<String>,

    /// Bearer token for the OTLP endpoint
    #[arg(long, env = "OTLP_TOKEN")]
    pub otlp_token: Option<String>,
}

impl Args {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable tables
    Table,
    /// One JSON document per view change
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["panchaea-dashboard"]).unwrap();
        assert_eq!(args.interval(), Duration::from_secs(1));
        assert_eq!(args.request_timeout(), None);
        assert_eq!(args.format, OutputFormat::Table);
        assert!(!args.once);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "panchaea-dashboard",
            "--server-url",
            "http://10.0.0.2:9000/",
            "--interval-ms",
            "250",
            "--request-timeout-ms",
            "3000",
            "--format",
            "json",
            "--once",
        ])
        .unwrap();
        assert_eq!(args.server_url, "http://10.0.0.2:9000/");
        assert_eq!(args.interval(), Duration::from_millis(250));
        assert_eq!(args.request_timeout(), Some(Duration::from_secs(3)));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.once);
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let err = Args::try_parse_from(["panchaea-dashboard", "--interval-ms", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(Args::try_parse_from(["panchaea-dashboard", "--interval-ms", "1"]).is_ok());
    }
}
