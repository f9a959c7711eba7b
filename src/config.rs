use std::{borrow::Cow, time::Duration};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Transport settings of a [`Client`](crate::Client).
///
/// Defaults: 30 second timeout per call, verified TLS, HTTPS only.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) timeout: Option<Duration>,
    pub(crate) accept_invalid_certs: bool,
    pub(crate) https_only: bool,
    pub(crate) user_agent: Cow<'static, str>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timeout: Some(DEFAULT_TIMEOUT),
            accept_invalid_certs: false,
            https_only: true,
            user_agent: Cow::Borrowed(DEFAULT_USER_AGENT),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Default::default()
    }

    /// Bounds each call from connecting until the body has been read.
    pub fn timeout(self, timeout: Duration) -> Self {
        Config {
            timeout: Some(timeout),
            ..self
        }
    }

    /// Lets calls block for as long as the remote side keeps the connection.
    pub fn no_timeout(self) -> Self {
        Config {
            timeout: None,
            ..self
        }
    }

    /// Skip TLS certificate and host name verification.
    ///
    /// # Warning
    ///
    /// Anyone on the network path can then read and alter requests,
    /// credentials' signatures included.
    pub fn danger_accept_invalid_certs(self, accept_invalid_certs: bool) -> Self {
        Config {
            accept_invalid_certs,
            ..self
        }
    }

    /// Refuse plain `http://` resource URLs.
    pub fn https_only(self, https_only: bool) -> Self {
        Config { https_only, ..self }
    }

    pub fn user_agent<T>(self, user_agent: T) -> Self
    where
        T: Into<Cow<'static, str>>,
    {
        Config {
            user_agent: user_agent.into(),
            ..self
        }
    }

    pub fn get_timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
