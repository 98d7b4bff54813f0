use clap::Parser;
use std::{path::PathBuf, time::Duration};
use tanbouki_core::auth::{client::DEFAULT_SERVER, Client};

/// Log in to 三宅と矢嶋の店探訪記 from the terminal
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// Base address of the authentication server
    #[clap(long, env = "TANBOUKI_SERVER", default_value = DEFAULT_SERVER)]
    server: String,

    /// Give up on a request after this many seconds
    #[clap(long, env = "TANBOUKI_REQUEST_TIMEOUT", default_value = "10", value_parser = duration_parser)]
    request_timeout: Duration,

    /// Where should we write logs?
    #[clap(long, env = "TANBOUKI_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn duration_parser(s: &str) -> Result<Duration, std::num::ParseIntError> {
    s.parse().map(Duration::from_secs)
}

impl Config {
    /// Get either the configured or a default log directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use the
    /// current directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("jp", "miyake-yajima", "tanbouki")
                    .map(|dirs| dirs.data_local_dir().join("logs"))
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// The API client for the configured server
    pub fn client(&self) -> Client {
        Client::new(self.server.clone())
    }

    /// An HTTP client that gives up after the configured timeout.
    ///
    /// ## Errors
    ///
    /// If reqwest can't set up TLS or the system resolver.
    pub fn http(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
    }
}
