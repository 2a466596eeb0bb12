//! HTTP server configuration object and helpers.

use std::io;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::Path;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;

use taxi_backend::config::TaxiSettings;
use taxi_backend::inbound::http::state::DEFAULT_PAGE_SIZE;

/// Minimum key material accepted by [`Key::derive_from`].
const MIN_KEY_BYTES: usize = 32;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) page_size: NonZeroUsize,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the listing page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Build the configuration from loaded settings.
    ///
    /// # Errors
    /// Fails when the bind address does not parse or no usable session key
    /// is available.
    pub fn from_settings(settings: &TaxiSettings) -> io::Result<Self> {
        let bind_addr = settings
            .bind_addr()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let allow_ephemeral = cfg!(debug_assertions) || settings.allow_ephemeral_key;
        let key = load_session_key(&settings.session_key_file(), allow_ephemeral)?;
        Ok(Self::new(key, settings.cookie_secure(), SameSite::Lax, bind_addr)
            .with_page_size(settings.page_size()))
    }
}

/// Read the session master key from `path`.
///
/// When the file is missing, unreadable or too short and `allow_ephemeral`
/// is set, a random key is generated instead; sessions then do not survive a
/// restart.
pub(crate) fn load_session_key(path: &Path, allow_ephemeral: bool) -> io::Result<Key> {
    let failure = match std::fs::read(path) {
        Ok(bytes) if bytes.len() >= MIN_KEY_BYTES => return Ok(Key::derive_from(&bytes)),
        Ok(bytes) => format!(
            "session key has {} bytes, at least {MIN_KEY_BYTES} required",
            bytes.len()
        ),
        Err(e) => e.to_string(),
    };

    if allow_ephemeral {
        warn!(path = %path.display(), error = %failure, "using temporary session key (dev only)");
        Ok(Key::generate())
    } else {
        Err(io::Error::other(format!(
            "failed to read session key at {}: {failure}",
            path.display()
        )))
    }
}
