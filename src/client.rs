use crate::endpoint::{Endpoint, Method, DELETE_FILTER};
use reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;

/// Create the default HTTP client for API requests
/// with settings for connection pooling.
///
/// `timeout` is an overall per-request deadline; `None` leaves requests
/// unbounded apart from the connect timeout.
pub fn create_client(timeout: Option<Duration>) -> Client {
    let mut builder = ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .connect_timeout(Duration::from_secs(10));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().expect("Failed to create HTTP client")
}

/// Which method to send for the "delete filter" operation.
///
/// The service registry lists it as GET against the filter path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterDeletion {
    /// Send the method as registered (GET)
    #[default]
    Registered,
    /// Send DELETE
    Corrected,
}

impl FilterDeletion {
    /// Method to use on the wire for `endpoint`
    pub fn method_for(&self, endpoint: &Endpoint) -> Method {
        match self {
            FilterDeletion::Corrected if endpoint.name == DELETE_FILTER => Method::Delete,
            _ => endpoint.method,
        }
    }
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct Config {
    /// URL scheme (http or https)
    pub scheme: String,
    /// API host
    pub host: String,
    /// Method policy for "delete filter"
    pub filter_deletion: FilterDeletion,
    /// Overall request deadline for the default transport
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scheme: "https".to_string(),
            host: "alpha-api.app.net".to_string(),
            filter_deletion: FilterDeletion::default(),
            timeout: None,
        }
    }
}

impl Config {
    /// Create a new configuration with the given scheme and host
    pub fn new(scheme: String, host: String) -> Self {
        Config {
            scheme,
            host,
            ..Config::default()
        }
    }

    pub fn with_filter_deletion(mut self, policy: FilterDeletion) -> Self {
        self.filter_deletion = policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}
