use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

pub const MYSQL_USERNAME: &str = "MYSQL_USERNAME";
pub const MYSQL_PASSWORD: &str = "MYSQL_PASSWORD";
pub const MYSQL_HOST: &str = "MYSQL_HOST";
pub const MYSQL_DATABASE: &str = "MYSQL_DATABASE";

const MYSQL_VARS: [&str; 4] = [MYSQL_USERNAME, MYSQL_PASSWORD, MYSQL_HOST, MYSQL_DATABASE];

/// Everything a registry process needs before it can serve.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub mysql: MysqlConfig,
}

/// Bind address for the HTTP listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self { host: "0.0.0.0".into(), port }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database credentials. Values are taken as-is; nothing here checks them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MysqlConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    pub database: String,
}

impl std::fmt::Debug for MysqlConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MysqlConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("host", &self.host)
            .field("database", &self.database)
            .finish()
    }
}

impl MysqlConfig {
    /// Build from an arbitrary variable lookup. Missing variables read as empty.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();
        Self {
            username: get(MYSQL_USERNAME),
            password: get(MYSQL_PASSWORD),
            host: get(MYSQL_HOST),
            database: get(MYSQL_DATABASE),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    server: FileServerSection,
}

#[derive(Debug, Default, Deserialize)]
struct FileServerSection {
    host: Option<String>,
    port: Option<u16>,
}

/// Load `.env` into the process environment.
///
/// Returns whether a file was found. A file that exists but cannot be parsed is an error.
pub fn load_env_file() -> Result<bool> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded .env");
            Ok(true)
        }
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(anyhow!("cannot load .env: {e}")),
    }
}

/// The environment counts as loaded when a `.env` file was read or at least one
/// of the MySQL variables is present in the process environment.
fn ensure_env_loaded<F>(env_file_found: bool, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if env_file_found || MYSQL_VARS.iter().any(|key| lookup(key).is_some()) {
        return Ok(());
    }
    Err(anyhow!(
        "no .env file and none of {} set in the environment",
        MYSQL_VARS.join(", ")
    ))
}

fn server_from_sources<F>(default_port: u16, file: Option<&str>, lookup: F) -> Result<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut server = ServerConfig::with_port(default_port);

    if let Some(content) = file {
        let parsed: FileConfig = toml::from_str(content).context("invalid config file")?;
        if let Some(host) = parsed.server.host.filter(|h| !h.trim().is_empty()) {
            server.host = host;
        }
        if let Some(port) = parsed.server.port {
            server.port = port;
        }
    }

    if let Some(host) = lookup("SERVER_HOST").filter(|h| !h.trim().is_empty()) {
        server.host = host;
    }
    if let Some(port) = lookup("SERVER_PORT") {
        server.port = port
            .trim()
            .parse::<u16>()
            .map_err(|e| anyhow!("SERVER_PORT {port:?} is not a valid port: {e}"))?;
    }

    if server.port == 0 {
        return Err(anyhow!("server.port must be within 1..=65535"));
    }
    Ok(server)
}

impl AppConfig {
    /// Load `.env`, the MySQL variables and the bind address.
    ///
    /// `default_port` applies unless `config.toml` (or `CONFIG_PATH`) or
    /// `SERVER_PORT` says otherwise.
    pub fn load(default_port: u16) -> Result<Self> {
        let env_file_found = load_env_file()?;
        let lookup = |key: &str| std::env::var(key).ok();
        ensure_env_loaded(env_file_found, lookup)?;

        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let file = match std::fs::read_to_string(&path) {
            Ok(content) => {
                info!(%path, "using config file");
                Some(content)
            }
            Err(_) => None,
        };

        let server = server_from_sources(default_port, file.as_deref(), lookup)?;
        Ok(Self { server, mysql: MysqlConfig::from_env() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn mysql_config_reads_all_four_values() {
        let cfg = MysqlConfig::from_lookup(vars(&[
            (MYSQL_USERNAME, "app"),
            (MYSQL_PASSWORD, "secret"),
            (MYSQL_HOST, "db:3306"),
            (MYSQL_DATABASE, "crm"),
        ]));
        assert_eq!(cfg.username, "app");
        assert_eq!(cfg.password, "secret");
        assert_eq!(cfg.host, "db:3306");
        assert_eq!(cfg.database, "crm");
    }

    #[test]
    fn missing_values_are_empty_not_errors() {
        let cfg = MysqlConfig::from_lookup(vars(&[(MYSQL_HOST, "localhost")]));
        assert_eq!(cfg.username, "");
        assert_eq!(cfg.database, "");
        assert_eq!(cfg.host, "localhost");
    }

    #[test]
    fn debug_output_hides_password() {
        let cfg = MysqlConfig { password: "hunter2".into(), ..Default::default() };
        let out = format!("{cfg:?}");
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn env_counts_as_loaded_with_file_or_any_variable() {
        assert!(ensure_env_loaded(true, vars(&[])).is_ok());
        assert!(ensure_env_loaded(false, vars(&[(MYSQL_DATABASE, "x")])).is_ok());
        assert!(ensure_env_loaded(false, vars(&[])).is_err());
    }

    #[test]
    fn server_uses_default_port_without_overrides() {
        let server = server_from_sources(3060, None, vars(&[])).unwrap();
        assert_eq!(server, ServerConfig::with_port(3060));
        assert_eq!(server.bind_addr(), "0.0.0.0:3060");
    }

    #[test]
    fn file_then_env_override_the_default() {
        let file = "[server]\nhost = \"127.0.0.1\"\nport = 8000\n";
        let server = server_from_sources(3000, Some(file), vars(&[])).unwrap();
        assert_eq!(server.bind_addr(), "127.0.0.1:8000");

        let env = vars(&[("SERVER_PORT", "9000")]);
        let server = server_from_sources(3000, Some(file), env).unwrap();
        assert_eq!(server.bind_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn bad_port_is_rejected() {
        assert!(server_from_sources(3000, None, vars(&[("SERVER_PORT", "http")])).is_err());
        assert!(server_from_sources(3000, None, vars(&[("SERVER_PORT", "0")])).is_err());
        assert!(server_from_sources(3000, Some("[server\n"), vars(&[])).is_err());
    }
}
