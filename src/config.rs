use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "BiteCheck";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP bind address for the host API.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8787";

/// Database path value that selects an in-memory database.
pub const MEMORY_DB: &str = ":memory:";

/// Get the application data directory
/// ~/BiteCheck/ on all platforms. Falls back to the working directory when
/// no home directory can be determined (containers, CI).
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default location of the tracking database.
pub fn database_path() -> PathBuf {
    app_data_dir().join("bitecheck.db")
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "bitecheck_lib=info,bitecheck=info,tower_http=warn"
}

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

/// Runtime settings for the server binary, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub database: DatabaseLocation,
}

impl ServerConfig {
    /// Reads `BITECHECK_ADDR` and `BITECHECK_DB`. Unparseable addresses fall
    /// back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("BITECHECK_ADDR").ok().as_deref(),
            std::env::var("BITECHECK_DB").ok().as_deref(),
        )
    }

    fn from_values(addr: Option<&str>, db: Option<&str>) -> Self {
        let addr = match addr.map(str::parse::<SocketAddr>) {
            Some(Ok(addr)) => addr,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Invalid BITECHECK_ADDR, using default");
                default_addr()
            }
            None => default_addr(),
        };

        let database = match db {
            Some(MEMORY_DB) => DatabaseLocation::Memory,
            Some(path) if !path.trim().is_empty() => DatabaseLocation::File(PathBuf::from(path)),
            _ => DatabaseLocation::File(database_path()),
        };

        Self { addr, database }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8787))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_under_app_data() {
        let db = database_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("bitecheck.db"));
    }

    #[test]
    fn app_data_dir_named_after_app() {
        assert!(app_data_dir().ends_with("BiteCheck"));
    }

    #[test]
    fn default_addr_matches_constant() {
        assert_eq!(default_addr().to_string(), DEFAULT_ADDR);
    }

    #[test]
    fn defaults_when_env_missing() {
        let cfg = ServerConfig::from_values(None, None);
        assert_eq!(cfg.addr, default_addr());
        assert_eq!(cfg.database, DatabaseLocation::File(database_path()));
    }

    #[test]
    fn memory_database_selected() {
        let cfg = ServerConfig::from_values(Some("0.0.0.0:9000"), Some(":memory:"));
        assert_eq!(cfg.addr.port(), 9000);
        assert_eq!(cfg.database, DatabaseLocation::Memory);
    }

    #[test]
    fn bad_addr_falls_back() {
        let cfg = ServerConfig::from_values(Some("not-an-addr"), Some("/tmp/x.db"));
        assert_eq!(cfg.addr, default_addr());
        assert_eq!(cfg.database, DatabaseLocation::File(PathBuf::from("/tmp/x.db")));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
