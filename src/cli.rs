//! Command-line interface components.

use crate::config::DashboardConfig;
use crate::error::Result;
use crate::models::ChartKind;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "epichart")]
#[command(about = "Serve country-level case counts from a public CSV dataset as interactive charts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// JSON configuration file (flags override its values)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// URL of the CSV dataset
    #[arg(long, value_name = "URL")]
    pub source_url: Option<String>,

    /// Read the dataset from a local CSV file instead of downloading it
    #[arg(long, value_name = "PATH", conflicts_with = "source_url")]
    pub source_file: Option<PathBuf>,

    /// Timeout for one dataset download, in seconds
    #[arg(long, value_name = "SECS")]
    pub fetch_timeout: Option<u64>,

    /// Chart shown on the overview page by default
    #[arg(long, value_enum)]
    pub chart: Option<ChartKind>,

    /// Number of countries in the pie chart
    #[arg(long, value_name = "N")]
    pub top_n: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Layer defaults, the optional config file and these flags
    pub fn load_config(&self) -> Result<DashboardConfig> {
        let base = match &self.config {
            Some(path) => DashboardConfig::from_json_file(path)?,
            None => DashboardConfig::default(),
        };

        let config = self.apply_overrides(base);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, mut config: DashboardConfig) -> DashboardConfig {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(url) = &self.source_url {
            config = config.with_source_url(url.clone());
            config.source_file = None;
        }
        if let Some(path) = &self.source_file {
            config = config.with_source_file(path.clone());
        }
        if let Some(secs) = self.fetch_timeout {
            config = config.with_fetch_timeout_secs(secs);
        }
        if let Some(chart) = self.chart {
            config = config.with_default_chart(chart);
        }
        if let Some(top_n) = self.top_n {
            config = config.with_top_n(top_n);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("epichart").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_without_flags() {
        let args = parse(&[]);
        let config = args.load_config().unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.default_chart, ChartKind::Map);
        assert_eq!(args.get_log_level(), "warn");
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = parse(&[
            "--host",
            "127.0.0.1",
            "-p",
            "8080",
            "--chart",
            "pie",
            "--top-n",
            "5",
            "--source-file",
            "cases.csv",
            "-vv",
        ]);
        let config = args.load_config().unwrap();

        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
        assert_eq!(config.default_chart, ChartKind::Pie);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.source_file, Some(PathBuf::from("cases.csv")));
        assert_eq!(args.get_log_level(), "debug");
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"port": 9000, "top_n": 3, "source_file": "old.csv"}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let args = parse(&["--config", &path, "--source-url", "https://example.org/x.csv"]);
        let config = args.load_config().unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.source_url, "https://example.org/x.csv");
        assert!(config.source_file.is_none());
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let args = parse(&["--fetch-timeout", "0"]);
        assert!(args.load_config().is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["epichart", "-q", "-v"]);
        assert!(result.is_err());

        assert_eq!(parse(&["-q"]).get_log_level(), "error");
    }
}
