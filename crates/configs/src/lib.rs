use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Connection settings for the PostgreSQL store.
///
/// Either `url` is given directly (or through `DATABASE_URL`), or the URL is
/// assembled from the discrete `user`/`password`/`db_name`/`ssl_mode` parts.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub db_name: String,
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            user: String::new(),
            password: String::new(),
            db_name: String::new(),
            host: default_db_host(),
            port: default_db_port(),
            ssl_mode: default_ssl_mode(),
            sqlx_logging: false,
        }
    }
}

fn default_db_host() -> String { "localhost".into() }
fn default_db_port() -> u16 { 5432 }
fn default_ssl_mode() -> String { "disable".into() }

const SSL_MODES: [&str; 6] = ["disable", "allow", "prefer", "require", "verify-ca", "verify-full"];

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// Directory receiving `all.log` in addition to stdout.
    #[serde(default)]
    pub dir: Option<String>,
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

/// Read and parse `path`. A missing file yields the defaults; any other
/// read error and every parse error is returned.
pub fn load_from_file(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(anyhow!("unable to read config file {path}: {e}")),
    }
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Defaults are validated too, so without a config file the database
    /// still has to come from `DATABASE_URL`.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.url.trim().is_empty() {
            let lower = self.url.to_lowercase();
            if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
                return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
            }
            return Ok(());
        }
        if self.user.trim().is_empty() {
            return Err(anyhow!("database.user is empty; set it or provide database.url / DATABASE_URL"));
        }
        if self.db_name.trim().is_empty() {
            return Err(anyhow!("database.db_name is empty; set it or provide database.url / DATABASE_URL"));
        }
        if self.port == 0 {
            return Err(anyhow!("database.port must be in 1..=65535"));
        }
        if !SSL_MODES.contains(&self.ssl_mode.as_str()) {
            return Err(anyhow!("database.ssl_mode '{}' is not one of {:?}", self.ssl_mode, SSL_MODES));
        }
        Ok(())
    }

    /// Connection URL, preferring an explicit `url` over the discrete parts.
    pub fn connection_url(&self) -> String {
        if !self.url.trim().is_empty() {
            return self.url.clone();
        }
        let credentials = if self.password.is_empty() {
            urlencoding::encode(&self.user).into_owned()
        } else {
            format!("{}:{}", urlencoding::encode(&self.user), urlencoding::encode(&self.password))
        };
        format!(
            "postgres://{}@{}:{}/{}?sslmode={}",
            credentials, self.host, self.port, self.db_name, self.ssl_mode
        )
    }
}
