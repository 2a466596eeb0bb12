//! Service configuration loaded via OrthoConfig.
//!
//! Values come from command-line flags, `TAXI_*` environment variables and
//! configuration files, in that order of precedence.

use std::net::{AddrParseError, SocketAddr};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::state::DEFAULT_PAGE_SIZE;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Runtime settings for the taxi service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TAXI")]
pub struct TaxiSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Number of entries per listing page.
    pub page_size: Option<usize>,
    /// File holding the session cookie master key (at least 32 bytes).
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`.
    ///
    /// Read from `TAXI_COOKIE_SECURE` or a config file; there is no
    /// command-line flag.
    #[ortho_config(default = true, skip_cli)]
    pub cookie_secure: bool,
    /// Fall back to a random session key when the key file is unreadable.
    ///
    /// Read from `TAXI_ALLOW_EPHEMERAL_KEY` or a config file.
    #[ortho_config(default = false, skip_cli)]
    pub allow_ephemeral_key: bool,
    /// Username of a driver account created at startup.
    pub admin_username: Option<String>,
    /// Password of the startup driver account.
    pub admin_password: Option<String>,
}

impl TaxiSettings {
    /// Parsed bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    /// Listing page size; zero or absent selects the default of five.
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
            .and_then(NonZeroUsize::new)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Session key location.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether the session cookie carries the `Secure` attribute.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    /// Username and password of the startup account, when both are set.
    pub fn bootstrap_admin(&self) -> Option<(&str, &str)> {
        self.admin_username
            .as_deref()
            .zip(self.admin_password.as_deref())
            .filter(|(username, password)| !username.trim().is_empty() && !password.is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "TAXI_BIND_ADDR",
        "TAXI_PAGE_SIZE",
        "TAXI_SESSION_KEY_FILE",
        "TAXI_COOKIE_SECURE",
        "TAXI_ALLOW_EPHEMERAL_KEY",
        "TAXI_ADMIN_USERNAME",
        "TAXI_ADMIN_PASSWORD",
    ];

    fn load_from_empty_args() -> TaxiSettings {
        TaxiSettings::load_from_iter([OsString::from("taxi-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert_eq!(settings.page_size().get(), 5);
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from(DEFAULT_SESSION_KEY_FILE)
        );
        assert!(settings.cookie_secure());
        assert!(!settings.allow_ephemeral_key);
        assert!(settings.bootstrap_admin().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TAXI_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("TAXI_PAGE_SIZE", Some("10".to_owned())),
            ("TAXI_SESSION_KEY_FILE", Some("/tmp/taxi_key".to_owned())),
            ("TAXI_COOKIE_SECURE", Some("false".to_owned())),
            ("TAXI_ALLOW_EPHEMERAL_KEY", Some("true".to_owned())),
            ("TAXI_ADMIN_USERNAME", Some("admin".to_owned())),
            ("TAXI_ADMIN_PASSWORD", Some("s3cret-pass".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("configured address").port(),
            9000
        );
        assert_eq!(settings.page_size().get(), 10);
        assert_eq!(settings.session_key_file(), PathBuf::from("/tmp/taxi_key"));
        assert!(!settings.cookie_secure());
        assert!(settings.allow_ephemeral_key);
        assert_eq!(settings.bootstrap_admin(), Some(("admin", "s3cret-pass")));
    }

    #[rstest]
    fn single_switch_does_not_reset_the_other() {
        let _guard = lock_env(VARS.map(|name| {
            let value = (name == "TAXI_ALLOW_EPHEMERAL_KEY").then(|| "true".to_owned());
            (name, value)
        }));

        let settings = load_from_empty_args();
        assert!(settings.allow_ephemeral_key);
        assert!(settings.cookie_secure());
    }

    #[rstest]
    #[case(Some(0), 5)]
    #[case(None, 5)]
    #[case(Some(2), 2)]
    fn page_size_falls_back_to_default(#[case] raw: Option<usize>, #[case] expected: usize) {
        let settings = TaxiSettings {
            bind_addr: None,
            page_size: raw,
            session_key_file: None,
            cookie_secure: true,
            allow_ephemeral_key: false,
            admin_username: None,
            admin_password: None,
        };
        assert_eq!(settings.page_size().get(), expected);
    }
}
