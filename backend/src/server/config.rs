//! Server settings loaded via OrthoConfig and the resolved server
//! configuration handed to [`super::create_server`].

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use skillforge::middleware::{CorsPolicy, InvalidOrigin};
use skillforge::outbound::persistence::DbPool;
use skillforge::outbound::security::TokenKey;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Settings read from the CLI, `SKILLFORGE_*` environment variables, and an
/// optional config file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SKILLFORGE")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL. Without it the in-memory document store is used.
    pub database_url: Option<String>,
    /// Root directory for uploaded blobs.
    pub upload_dir: Option<PathBuf>,
    /// Bearer token lifetime in seconds.
    pub token_ttl_secs: Option<u64>,
    /// Comma-separated browser origins allowed to call the API. Unset or `*`
    /// admits any origin.
    pub cors_origins: Option<String>,
    /// Keep the cause of internal errors in responses.
    #[ortho_config(default = false)]
    pub development: bool,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR))
    }

    /// Token lifetime, saturating at `i64::MAX` seconds.
    pub fn token_ttl(&self) -> chrono::Duration {
        let secs = self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        chrono::Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX))
    }

    /// Cross-origin policy for browser clients.
    ///
    /// # Errors
    /// Returns [`InvalidOrigin`] when an entry is not an absolute origin URL.
    pub fn cors_policy(&self) -> Result<CorsPolicy, InvalidOrigin> {
        self.cors_origins
            .as_deref()
            .map_or(Ok(CorsPolicy::AnyOrigin), CorsPolicy::parse)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upload_dir: PathBuf,
    pub(crate) token_key: TokenKey,
    pub(crate) token_ttl: chrono::Duration,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) cors: CorsPolicy,
}

impl ServerConfig {
    #[must_use]
    pub fn new(settings: &ServerSettings, token_key: TokenKey) -> Self {
        Self {
            bind_addr: settings.bind_addr(),
            upload_dir: settings.upload_dir(),
            token_key,
            token_ttl: settings.token_ttl(),
            db_pool: None,
            cors: CorsPolicy::AnyOrigin,
        }
    }

    /// Restrict cross-origin access. Any origin is admitted by default.
    #[must_use]
    pub fn with_cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = cors;
        self
    }

    /// Attach a database connection pool for the Diesel repositories.
    ///
    /// Without one, every repository port is served by the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
