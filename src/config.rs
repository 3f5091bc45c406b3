//! Runtime settings, read from command line flags or environment variables.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use crate::PasswordHash;

/// Settings for the bookkeeper tools.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File path to the application SQLite database.
    #[arg(long, env = "BOOKKEEPER_DB_PATH")]
    pub db_path: PathBuf,

    /// The most verbose log level to print unless `RUST_LOG` says otherwise.
    #[arg(long, env = "BOOKKEEPER_LOG_LEVEL", default_value_t = LevelFilter::INFO)]
    pub log_level: LevelFilter,

    /// The bcrypt cost used when hashing passwords.
    #[arg(long, env = "BOOKKEEPER_HASH_COST", default_value_t = PasswordHash::DEFAULT_COST)]
    pub hash_cost: u32,
}

#[cfg(test)]
mod config_tests {
    use clap::Parser;
    use tracing_subscriber::filter::LevelFilter;

    use crate::PasswordHash;

    use super::Config;

    #[test]
    fn uses_defaults() {
        let config = Config::try_parse_from(["bookkeeper", "--db-path", "test.db"]).unwrap();

        assert_eq!(config.db_path.to_str(), Some("test.db"));
        assert_eq!(config.log_level, LevelFilter::INFO);
        assert_eq!(config.hash_cost, PasswordHash::DEFAULT_COST);
    }

    #[test]
    fn parses_flags() {
        let config = Config::try_parse_from([
            "bookkeeper",
            "--db-path",
            "test.db",
            "--log-level",
            "debug",
            "--hash-cost",
            "4",
        ])
        .unwrap();

        assert_eq!(config.log_level, LevelFilter::DEBUG);
        assert_eq!(config.hash_cost, 4);
    }
}
