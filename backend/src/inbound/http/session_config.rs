//! Session cookie configuration.
//!
//! Turns the configured key file and cookie toggles into the signing key and
//! middleware used by the HTTP server. Release builds refuse short keys and
//! ephemeral fallbacks unless explicitly allowed.

use std::path::PathBuf;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite, time::Duration};
use tracing::warn;
use zeroize::Zeroize;

/// Minimum key length accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;
/// Shortest master key that a cookie key can be derived from.
const DERIVABLE_KEY_MIN_LEN: usize = 32;
const SESSION_COOKIE_NAME: &str = "session";
const SESSION_TTL_HOURS: i64 = 12;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate missing keys and fall back to a generated one.
    Debug,
    /// Release builds require a readable key of sufficient length.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Raw session options as configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub key_file: PathBuf,
    pub cookie_secure: bool,
    pub allow_ephemeral: bool,
}

/// Validated session settings.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
}

/// Errors raised while loading session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Load the session key and cookie toggles.
///
/// # Errors
/// Returns [`SessionConfigError`] when the key cannot be read and no
/// fallback is permitted, or when a release build is given a short key.
///
/// # Examples
/// ```
/// use shuttle_pool::inbound::http::session_config::{
///     BuildMode, SessionOptions, load_session_settings,
/// };
///
/// let options = SessionOptions {
///     key_file: "/nonexistent/session_key".into(),
///     cookie_secure: false,
///     allow_ephemeral: true,
/// };
/// let settings = load_session_settings(&options, BuildMode::Release).expect("fallback key");
/// assert!(!settings.cookie_secure);
/// ```
pub fn load_session_settings(
    options: &SessionOptions,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let key = load_key(options, mode)?;
    Ok(SessionSettings {
        key,
        cookie_secure: options.cookie_secure,
    })
}

fn load_key(options: &SessionOptions, mode: BuildMode) -> Result<Key, SessionConfigError> {
    let path = &options.key_file;
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path: path.clone(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            if length < DERIVABLE_KEY_MIN_LEN {
                bytes.zeroize();
                warn!(
                    path = %path.display(),
                    length,
                    "session key too short to derive from; using temporary key (dev only)"
                );
                return Ok(Key::generate());
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) => {
            if mode.is_debug() || options.allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(SessionConfigError::KeyRead {
                    path: path.clone(),
                    source: error,
                })
            }
        }
    }
}

/// Encrypted cookie session middleware for the API scope.
#[must_use]
pub fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default().session_ttl(Duration::hours(SESSION_TTL_HOURS)),
        )
        .build()
}
